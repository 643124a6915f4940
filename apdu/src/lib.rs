// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / APDU definitions for swap partner verification
//!
//! This module provides the wire encodings exchanged between a swap host and
//! the device while a partner is registered, its signature checked, and the
//! payin transaction handed off for signing.
//!
//! Unlike most of the protocol, multi-byte fields in these messages follow the
//! swap conventions: lengths are single bytes, integers are big-endian and
//! status words are written most significant byte first.
//!
//! A session runs as:
//!
//! 1. [`PartnerKeyReq`][partner::PartnerKeyReq] registers the partner name and
//!    public key, binding the session digest
//!    (see [`digest_partner_key`][digest::digest_partner_key])
//! 2. [`Instruction::CheckPartnerSignature`] submits the partner signature over
//!    that digest, DER encoded for [`Subcommand::Swap`] and raw `R || S` for
//!    [`Subcommand::Sell`]
//! 3. [`Instruction::StartSigningTransaction`] hands the checked transaction
//!    off to the payin application
//!
//! Each command is answered with a [`StatusWord`][status::StatusWord].

#![no_std]

use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

pub use ledger_proto::{ApduError, ApduStatic};

pub mod digest;
pub mod partner;
pub mod prelude;
pub mod signature;
pub mod status;
pub mod version;

/// Swap APDU Class
pub const SWAP_APDU_CLA: u8 = 0xe0;

/// Swap protocol version, reported via [`VersionResp`][version::VersionResp]
pub const SWAP_PROTO_VERSION: u8 = 0x01;

/// Swap APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, TryFromPrimitive)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch application version
    GetVersion = 0x02,

    /// Register partner name and public key
    SetPartnerKey = 0x04,

    /// Check partner signature over the session digest
    CheckPartnerSignature = 0x05,

    /// Hand the checked transaction off for signing
    StartSigningTransaction = 0x0a,
}

/// Exchange flavour, carried in `P2` of each swap APDU.
///
/// This selects both the curve used to interpret the partner public key and
/// the wire format of the partner signature.
#[derive(
    Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u8)]
pub enum Subcommand {
    /// Crypto to crypto exchange, secp256k1 partner keys with DER signatures
    Swap = 0x00,
    /// Crypto to fiat exchange, secp256r1 partner keys with raw `R || S` signatures
    Sell = 0x01,
}

/// Elliptic curves supported for partner keys
#[derive(Copy, Clone, PartialEq, Debug, Display, EnumIter)]
pub enum Curve {
    Secp256k1,
    Secp256r1,
}

/// Partner signature wire encodings
#[derive(Copy, Clone, PartialEq, Debug, Display, EnumIter)]
pub enum SignatureFormat {
    /// ASN.1 DER encoded `ECDSA-Sig-Value`
    Der,
    /// Fixed-width big-endian `R || S`
    Raw,
}

impl Subcommand {
    /// Curve used for partner keys under this subcommand
    pub const fn curve(&self) -> Curve {
        match self {
            Subcommand::Swap => Curve::Secp256k1,
            Subcommand::Sell => Curve::Secp256r1,
        }
    }

    /// Signature encoding expected under this subcommand
    pub const fn signature_format(&self) -> SignatureFormat {
        match self {
            Subcommand::Swap => SignatureFormat::Der,
            Subcommand::Sell => SignatureFormat::Raw,
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use encdec::EncDec;

    use super::*;

    /// Helper for APDU encode / decode tests
    pub fn encode_decode_apdu<'a, A: EncDec<'a, ApduError> + PartialEq>(
        buff: &'a mut [u8],
        apdu: &A,
    ) -> usize {
        // Encode APDU
        let n = apdu.encode(buff).expect("encode failed");

        // Ensure encoded data fits maximum APDU payload
        let m = 255;
        assert!(n < m, "encoded length {n} exceeds maximum APDU payload {m}");

        // Check encoded length matches expected length
        let expected_n = apdu.encode_len().expect("get length failed");
        assert_eq!(n, expected_n, "encode length mismatch");

        // Decode APDU
        let (decoded, decoded_n) = A::decode(&buff[..n]).expect("decode failed");

        // Check decoded object and length match
        assert_eq!(apdu, &decoded);
        assert_eq!(expected_n, decoded_n);

        n
    }

    #[test]
    fn subcommand_parameters() {
        assert_eq!(Subcommand::try_from(0x00).ok(), Some(Subcommand::Swap));
        assert_eq!(Subcommand::try_from(0x01).ok(), Some(Subcommand::Sell));
        assert!(Subcommand::try_from(0x02).is_err());

        assert_eq!(Subcommand::Swap.curve(), Curve::Secp256k1);
        assert_eq!(Subcommand::Swap.signature_format(), SignatureFormat::Der);
        assert_eq!(Subcommand::Sell.curve(), Curve::Secp256r1);
        assert_eq!(Subcommand::Sell.signature_format(), SignatureFormat::Raw);
    }
}
