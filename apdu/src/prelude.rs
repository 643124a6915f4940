//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    digest::digest_partner_key,
    partner::PartnerKeyReq,
    signature::{PartnerSignatureReq, RawSignature},
    status::StatusWord,
    version::{VersionReq, VersionResp},
    Instruction, Subcommand, SWAP_APDU_CLA,
};
