// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Helpers for computing the session binding digest
//!
//! The same digest must be computed by the host (to request a partner
//! signature) and the device (to check it), so both sides call through here.

use sha2::{Digest as _, Sha256};

/// Session digest length
pub const DIGEST_LEN: usize = 32;

/// Compute the binding digest over an encoded partner registration message.
///
/// This covers the _entire_ message, name length byte included.
pub fn digest_partner_key(message: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::new().chain_update(message).finalize().into()
}
