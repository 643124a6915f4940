// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Partner signature verification

use encdec::DecodeOwned;
use k256::ecdsa as secp256k1;
use p256::ecdsa as secp256r1;

use crate::{
    apdu::{
        signature::{RawSignature, MAX_DER_SIGNATURE_LENGTH, MIN_DER_SIGNATURE_LENGTH},
        SignatureFormat, Subcommand,
    },
    helpers::der,
};

use super::{
    reply::reply_ok,
    session::{PartnerKey, SessionDigest},
    Error, Session, Transport,
};

/// Check a partner signature over the session digest.
///
/// DER signatures are checked as received, raw `R || S` signatures are
/// re-encoded as DER before verification.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn verify<T: Transport>(
    session: &Session,
    subcommand: Subcommand,
    buff: &[u8],
    io: &mut T,
) -> Result<(), Error> {
    session.check_subcommand(subcommand)?;

    let partner = session.partner.as_ref().ok_or(Error::InvalidState)?;

    let mut scratch = [0u8; der::MAX_SIGNATURE_SIZE];

    let sig = match subcommand.signature_format() {
        SignatureFormat::Der => check_der(buff)?,
        SignatureFormat::Raw => {
            let n = raw_to_der(buff, &mut scratch)?;
            &scratch[..n]
        }
    };

    partner.key().verify(&session.digest, sig)?;

    #[cfg(feature = "log")]
    log::debug!("partner signature verified for digest {}", session.digest);

    reply_ok(io)
}

/// Check the outer framing of a DER signature
fn check_der(buff: &[u8]) -> Result<&[u8], Error> {
    let len = buff.len();

    if !(MIN_DER_SIGNATURE_LENGTH..=MAX_DER_SIGNATURE_LENGTH).contains(&len)
        || buff[1] as usize + 2 != len
    {
        #[cfg(feature = "log")]
        log::error!("invalid DER signature framing ({len} bytes)");

        return Err(Error::InvalidFormat);
    }

    Ok(buff)
}

/// Re-encode a raw `R || S` signature as DER, returning the encoded length
fn raw_to_der(buff: &[u8], scratch: &mut [u8]) -> Result<usize, Error> {
    let (sig, _) = RawSignature::decode_owned(buff).map_err(|_| {
        #[cfg(feature = "log")]
        log::error!("invalid raw signature length ({} bytes)", buff.len());

        Error::InvalidFormat
    })?;

    if der::signature_size(&sig.r, &sig.s) > scratch.len() {
        return Err(Error::SignatureVerificationFailed);
    }

    der::encode_signature(scratch, &sig.r, &sig.s).map_err(|_| Error::SignatureVerificationFailed)
}

impl PartnerKey {
    /// Verify a DER encoded ECDSA signature over the provided digest.
    ///
    /// Invalid points, malformed signatures and mismatches all report
    /// [`Error::SignatureVerificationFailed`].
    pub fn verify(&self, digest: &SessionDigest, sig: &[u8]) -> Result<(), Error> {
        let r = match self {
            PartnerKey::Secp256k1(k) => verify_secp256k1(k, digest.as_ref(), sig),
            PartnerKey::Secp256r1(k) => verify_secp256r1(k, digest.as_ref(), sig),
        };

        r.map_err(|_e| {
            #[cfg(feature = "log")]
            log::error!("{} signature verification failed: {:?}", self.curve(), _e);

            Error::SignatureVerificationFailed
        })
    }
}

fn verify_secp256k1(key: &[u8], digest: &[u8], sig: &[u8]) -> Result<(), secp256k1::Error> {
    use secp256k1::signature::hazmat::PrehashVerifier;

    let key = secp256k1::VerifyingKey::from_sec1_bytes(key)?;
    let sig = secp256k1::Signature::from_der(sig)?;

    // Low-S form is required for secp256k1 verification
    let sig = sig.normalize_s().unwrap_or(sig);

    key.verify_prehash(digest, &sig)
}

fn verify_secp256r1(key: &[u8], digest: &[u8], sig: &[u8]) -> Result<(), secp256r1::Error> {
    use secp256r1::signature::hazmat::PrehashVerifier;

    let key = secp256r1::VerifyingKey::from_sec1_bytes(key)?;
    let sig = secp256r1::Signature::from_der(sig)?;

    key.verify_prehash(digest, &sig)
}
