// Copyright (c) 2022-2023 The MobileCoin Foundation

use crate::apdu::status::StatusWord;

/// [Engine][super::Engine] errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Command data does not match the expected layout
    #[cfg_attr(feature = "thiserror", error("invalid command format"))]
    InvalidFormat = 0x00,

    /// Partner signature check failed
    #[cfg_attr(feature = "thiserror", error("signature verification failed"))]
    SignatureVerificationFailed = 0x01,

    /// Command not valid in the current session state
    #[cfg_attr(feature = "thiserror", error("invalid session state"))]
    InvalidState = 0x02,

    /// Subcommand differs from the one the session was registered under
    #[cfg_attr(feature = "thiserror", error("subcommand mismatch"))]
    SubcommandMismatch = 0x03,

    /// No pending transaction to hand off
    #[cfg_attr(feature = "thiserror", error("no pending transaction"))]
    MissingTransaction = 0x04,

    /// Unsupported APDU class
    #[cfg_attr(feature = "thiserror", error("unsupported class"))]
    InvalidClass = 0x05,

    /// Unknown instruction
    #[cfg_attr(feature = "thiserror", error("unknown instruction"))]
    InvalidInstruction = 0x06,

    /// Unknown subcommand
    #[cfg_attr(feature = "thiserror", error("unknown subcommand"))]
    InvalidSubcommand = 0x07,

    /// Reply could not be sent
    #[cfg_attr(feature = "thiserror", error("transport failure"))]
    Transport = 0x08,

    /// Unknown / not-yet defined error (placeholder)
    #[cfg_attr(feature = "thiserror", error("unknown"))]
    Unknown = 0xf0,
}

impl Error {
    /// Status word reported to the host for this error.
    ///
    /// Transport failures return `None` as the channel itself is presumed broken.
    pub fn status(&self) -> Option<StatusWord> {
        let s = match self {
            Error::InvalidFormat => StatusWord::IncorrectCommandData,
            Error::SignatureVerificationFailed => StatusWord::SignVerificationFail,
            Error::InvalidState | Error::InvalidInstruction => StatusWord::InvalidInstruction,
            Error::SubcommandMismatch | Error::InvalidSubcommand => StatusWord::WrongP2,
            Error::MissingTransaction | Error::Unknown => StatusWord::InternalError,
            Error::InvalidClass => StatusWord::ClassNotSupported,
            Error::Transport => return None,
        };

        Some(s)
    }
}
