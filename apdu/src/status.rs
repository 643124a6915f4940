// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Status words returned in response to swap APDUs

use encdec::{DecodeOwned, Encode};
use ledger_proto::ApduError;
use num_enum::TryFromPrimitive;
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

/// Status word, sent as the two byte reply to each swap command.
///
/// ## Encoding:
/// ```text
///  0                   1
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      SW1      |      SW2      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(
    Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter, TryFromPrimitive,
)]
#[repr(u16)]
pub enum StatusWord {
    /// Command accepted
    Ok = 0x9000,
    /// Command data does not match the expected layout
    IncorrectCommandData = 0x6a80,
    /// Command data could not be decoded
    DeserializationFailed = 0x6a81,
    /// Unexpected internal failure
    InternalError = 0x6a85,
    /// Subcommand (`P2`) invalid or inconsistent with the session
    WrongP2 = 0x6a87,
    /// Instruction unknown or not valid in the current state
    InvalidInstruction = 0x6d00,
    /// APDU class not supported
    ClassNotSupported = 0x6e00,
    /// Partner signature did not verify
    SignVerificationFail = 0x9d1a,
}

/// Encoded length of a [`StatusWord`]
pub const STATUS_WORD_LEN: usize = 2;

impl StatusWord {
    /// Status word as big-endian bytes, ready for transmission
    pub const fn to_bytes(self) -> [u8; STATUS_WORD_LEN] {
        (self as u16).to_be_bytes()
    }

    /// Check whether this status indicates success
    pub fn is_ok(&self) -> bool {
        *self == StatusWord::Ok
    }
}

impl Encode for StatusWord {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(STATUS_WORD_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < STATUS_WORD_LEN {
            return Err(ApduError::InvalidLength);
        }

        buff[..STATUS_WORD_LEN].copy_from_slice(&self.to_bytes());

        Ok(STATUS_WORD_LEN)
    }
}

impl DecodeOwned for StatusWord {
    type Output = Self;

    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self::Output, usize), ApduError> {
        if buff.len() < STATUS_WORD_LEN {
            return Err(ApduError::InvalidLength);
        }

        let v = u16::from_be_bytes([buff[0], buff[1]]);

        match Self::try_from(v) {
            Ok(s) => Ok((s, STATUS_WORD_LEN)),
            Err(_) => Err(ApduError::InvalidEncoding),
        }
    }
}
