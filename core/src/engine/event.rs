// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Decode;

use ledger_proto::{ApduError, ApduStatic};

use crate::apdu::prelude::*;

/// [`Engine`][super::Engine] input events, typically decoded from request [APDUs][crate::apdu]
///
/// Partner registration and signature payloads are passed through as
/// received, validation happens when the event is handled so the exact
/// registration bytes can be digested.
#[derive(Clone, PartialEq, Debug)]
pub enum Event<'a> {
    /// Fetch application version
    GetVersion,

    /// Register partner name and key (encoded [`PartnerKeyReq`])
    SetPartnerKey(&'a [u8]),

    /// Check partner signature over the session digest
    CheckPartnerSignature(&'a [u8]),

    /// Start signing the pending transaction
    StartSigningTransaction,
}

impl<'a> Event<'a> {
    /// Parse an incoming APDU payload to an engine event
    pub fn parse(ins: u8, buff: &'a [u8]) -> Result<Self, ApduError> {
        let evt = match ins {
            VersionReq::INS => {
                let (_req, _n) = VersionReq::decode(buff)?;
                Event::GetVersion
            }
            PartnerKeyReq::INS => Event::SetPartnerKey(buff),
            PartnerSignatureReq::INS => {
                let (req, _n) = PartnerSignatureReq::decode(buff)?;
                Event::CheckPartnerSignature(req.signature)
            }
            i if i == Instruction::StartSigningTransaction as u8 => Event::StartSigningTransaction,
            _ => return Err(ApduError::InvalidEncoding),
        };

        Ok(evt)
    }

    /// Fetch the instruction for this event
    pub fn instruction(&self) -> Instruction {
        match self {
            Event::GetVersion => Instruction::GetVersion,
            Event::SetPartnerKey(_) => Instruction::SetPartnerKey,
            Event::CheckPartnerSignature(_) => Instruction::CheckPartnerSignature,
            Event::StartSigningTransaction => Instruction::StartSigningTransaction,
        }
    }
}
