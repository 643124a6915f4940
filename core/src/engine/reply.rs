// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Status replies, written once per command via the [Transport]

use encdec::Encode;

use crate::apdu::status::{StatusWord, STATUS_WORD_LEN};

use super::{Error, Transport};

/// Maximum reply payload (excluding status word)
pub const MAX_REPLY_LEN: usize = 16;

/// Send a success acknowledgement
pub fn reply_ok<T: Transport>(io: &mut T) -> Result<(), Error> {
    send(io, &StatusWord::Ok.to_bytes())
}

/// Send a payload followed by a success status word
pub fn reply_data<T: Transport, E: Encode>(io: &mut T, data: &E) -> Result<(), Error> {
    let mut buff = [0u8; MAX_REPLY_LEN + STATUS_WORD_LEN];

    let mut n = data.encode(&mut buff[..MAX_REPLY_LEN]).map_err(|_| Error::Unknown)?;
    buff[n..][..STATUS_WORD_LEN].copy_from_slice(&StatusWord::Ok.to_bytes());
    n += STATUS_WORD_LEN;

    send(io, &buff[..n])
}

/// Report a failed command to the host.
///
/// Returns the provided error if the report was written, or
/// [`Error::Transport`] if the report could not be sent.
pub fn reply_error<T: Transport>(io: &mut T, e: Error) -> Error {
    let status = match e.status() {
        Some(s) => s,
        None => return e,
    };

    #[cfg(feature = "log")]
    log::warn!("command failed: {:?} (status: {:04x})", e, status as u16);

    match send(io, &status.to_bytes()) {
        Ok(_) => e,
        Err(t) => t,
    }
}

fn send<T: Transport>(io: &mut T, buff: &[u8]) -> Result<(), Error> {
    io.send(buff).map_err(|_e| {
        #[cfg(feature = "log")]
        log::error!("reply send failed: {:?}", _e);

        Error::Transport
    })
}
