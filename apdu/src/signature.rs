// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Partner signature APDUs

use encdec::{Decode, DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, SWAP_APDU_CLA};

/// Minimum accepted length of a DER encoded partner signature
pub const MIN_DER_SIGNATURE_LENGTH: usize = 67;

/// Maximum accepted length of a DER encoded partner signature
pub const MAX_DER_SIGNATURE_LENGTH: usize = 72;

/// Length of a single raw signature component
pub const RAW_COMPONENT_LENGTH: usize = 32;

/// Length of a raw `R || S` partner signature
pub const RAW_SIGNATURE_LENGTH: usize = RAW_COMPONENT_LENGTH * 2;

/// Check a partner signature over the session digest.
///
/// The payload is opaque at this layer, its shape depends on the active
/// subcommand (DER for [`Subcommand::Swap`][crate::Subcommand::Swap],
/// [`RawSignature`] for [`Subcommand::Sell`][crate::Subcommand::Sell]).
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                           SIGNATURE                           /
/// /                       (variable length)                       /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PartnerSignatureReq<'a> {
    /// Encoded signature
    pub signature: &'a [u8],
}

impl<'a> PartnerSignatureReq<'a> {
    /// Create a new partner signature APDU
    pub fn new(signature: &'a [u8]) -> Self {
        Self { signature }
    }
}

impl<'a> ApduStatic for PartnerSignatureReq<'a> {
    const CLA: u8 = SWAP_APDU_CLA;
    const INS: u8 = Instruction::CheckPartnerSignature as u8;
}

impl<'a> Encode for PartnerSignatureReq<'a> {
    type Error = ApduError;

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < self.signature.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..self.signature.len()].copy_from_slice(self.signature);

        Ok(self.signature.len())
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.signature.len())
    }
}

impl<'a> Decode<'a> for PartnerSignatureReq<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        Ok((Self { signature: buff }, buff.len()))
    }
}

/// Raw (fixed-width) partner signature
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                               R                               /
/// /                (32-byte big-endian unsigned)                  /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                               S                               /
/// /                (32-byte big-endian unsigned)                  /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RawSignature {
    pub r: [u8; RAW_COMPONENT_LENGTH],
    pub s: [u8; RAW_COMPONENT_LENGTH],
}

impl RawSignature {
    /// Create a raw signature from `R` and `S` components
    pub fn new(r: [u8; RAW_COMPONENT_LENGTH], s: [u8; RAW_COMPONENT_LENGTH]) -> Self {
        Self { r, s }
    }

    /// Fetch the `R || S` encoding of this signature
    pub fn to_bytes(&self) -> [u8; RAW_SIGNATURE_LENGTH] {
        let mut b = [0u8; RAW_SIGNATURE_LENGTH];
        b[..RAW_COMPONENT_LENGTH].copy_from_slice(&self.r);
        b[RAW_COMPONENT_LENGTH..].copy_from_slice(&self.s);
        b
    }
}

impl Encode for RawSignature {
    type Error = ApduError;

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < RAW_SIGNATURE_LENGTH {
            return Err(ApduError::InvalidLength);
        }

        buff[..RAW_SIGNATURE_LENGTH].copy_from_slice(&self.to_bytes());

        Ok(RAW_SIGNATURE_LENGTH)
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(RAW_SIGNATURE_LENGTH)
    }
}

impl DecodeOwned for RawSignature {
    type Output = Self;
    type Error = ApduError;

    /// Decode a [`RawSignature`], the buffer must be exactly `R || S`
    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() != RAW_SIGNATURE_LENGTH {
            return Err(ApduError::InvalidLength);
        }

        let mut r = [0u8; RAW_COMPONENT_LENGTH];
        let mut s = [0u8; RAW_COMPONENT_LENGTH];
        r.copy_from_slice(&buff[..RAW_COMPONENT_LENGTH]);
        s.copy_from_slice(&buff[RAW_COMPONENT_LENGTH..]);

        Ok((Self { r, s }, RAW_SIGNATURE_LENGTH))
    }
}
