// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Partner key registration

use encdec::Decode;

use crate::apdu::{partner::PartnerKeyReq, Subcommand};

use super::{
    reply::reply_ok,
    session::{Partner, SessionDigest},
    Error, Session, Transport,
};

/// Validate and store a partner registration, binding the session digest.
///
/// The session is only updated once the acknowledgement has been sent, so
/// a failed command (including a transport failure) leaves it untouched.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn register<T: Transport>(
    session: &mut Session,
    subcommand: Subcommand,
    buff: &[u8],
    io: &mut T,
) -> Result<(), Error> {
    // Decode checks name bounds and total length
    let (req, _n) = PartnerKeyReq::decode(buff).map_err(|_e| {
        #[cfg(feature = "log")]
        log::error!("invalid partner registration ({} bytes): {:?}", buff.len(), _e);

        Error::InvalidFormat
    })?;

    let partner = Partner::new(subcommand, &req)?;

    // Digest covers the whole registration message
    let digest = SessionDigest::compute(buff);

    #[cfg(feature = "log")]
    log::debug!(
        "partner {:?} registered for {} ({}), digest: {}",
        core::str::from_utf8(partner.name()).unwrap_or("<binary>"),
        subcommand,
        partner.key().curve(),
        digest
    );

    reply_ok(io)?;

    session.subcommand = Some(subcommand);
    session.partner = Some(partner);
    session.digest = digest;

    Ok(())
}
