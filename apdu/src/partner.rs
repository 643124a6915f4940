// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Partner registration APDUs

use encdec::{Decode, Encode};

use super::{ApduError, ApduStatic, Instruction, SWAP_APDU_CLA};
use crate::digest::{digest_partner_key, DIGEST_LEN};

/// Minimum partner name length
pub const PARTNER_NAME_MIN_LEN: usize = 3;

/// Maximum partner name length
pub const PARTNER_NAME_MAX_LEN: usize = 15;

/// Length of an uncompressed SEC1 public key (`0x04 || X || Y`)
pub const UNCOMPRESSED_KEY_LENGTH: usize = 65;

/// Register a partner for the current session.
///
/// The curve used to interpret `PUBLIC_KEY` is selected by the subcommand,
/// not by the message.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   NAME_LEN    |                                               |
/// +-+-+-+-+-+-+-+-+                                               +
/// /                          PARTNER_NAME                         /
/// /                     (NAME_LEN, 3..=15 bytes)                  /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                           PUBLIC_KEY                          /
/// /               (65-byte uncompressed SEC1 point)               /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PartnerKeyReq<'a> {
    /// Partner name
    pub name: &'a [u8],
    /// Uncompressed partner public key
    pub public_key: &'a [u8; UNCOMPRESSED_KEY_LENGTH],
}

impl<'a> PartnerKeyReq<'a> {
    /// Create a new partner registration APDU
    pub fn new(name: &'a [u8], public_key: &'a [u8; UNCOMPRESSED_KEY_LENGTH]) -> Self {
        Self { name, public_key }
    }

    /// Compute the session digest bound by this registration
    pub fn digest(&self) -> Result<[u8; DIGEST_LEN], ApduError> {
        let mut buff = [0u8; 1 + PARTNER_NAME_MAX_LEN + UNCOMPRESSED_KEY_LENGTH];
        let n = self.encode(&mut buff)?;

        Ok(digest_partner_key(&buff[..n]))
    }
}

impl<'a> ApduStatic for PartnerKeyReq<'a> {
    const CLA: u8 = SWAP_APDU_CLA;
    const INS: u8 = Instruction::SetPartnerKey as u8;
}

impl<'a> Encode for PartnerKeyReq<'a> {
    type Error = ApduError;

    /// Encode a [`PartnerKeyReq`] APDU into the provided buffer
    #[inline]
    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let mut index = 0;

        // Names outside the accepted range would never decode
        if self.name.len() < PARTNER_NAME_MIN_LEN || self.name.len() > PARTNER_NAME_MAX_LEN {
            return Err(ApduError::InvalidEncoding);
        }

        // Check buffer length is valid
        if buff.len() < self.encode_len()? {
            return Err(ApduError::InvalidLength);
        }

        // Write name length
        buff[index] = self.name.len() as u8;
        index += 1;

        // Write name
        buff[index..][..self.name.len()].copy_from_slice(self.name);
        index += self.name.len();

        // Write public key
        buff[index..][..UNCOMPRESSED_KEY_LENGTH].copy_from_slice(self.public_key);
        index += UNCOMPRESSED_KEY_LENGTH;

        Ok(index)
    }

    #[inline]
    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(1 + self.name.len() + UNCOMPRESSED_KEY_LENGTH)
    }
}

impl<'a> Decode<'a> for PartnerKeyReq<'a> {
    type Output = Self;
    type Error = ApduError;

    /// Decode a [`PartnerKeyReq`] APDU from the provided buffer.
    ///
    /// The buffer must contain exactly one message, trailing bytes are rejected.
    #[inline]
    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        let mut index = 0;

        if buff.is_empty() {
            return Err(ApduError::InvalidLength);
        }

        // Read and check name length
        let name_len = buff[index] as usize;
        index += 1;

        if !(PARTNER_NAME_MIN_LEN..=PARTNER_NAME_MAX_LEN).contains(&name_len) {
            return Err(ApduError::InvalidEncoding);
        }

        // Check full message length
        if buff.len() != 1 + name_len + UNCOMPRESSED_KEY_LENGTH {
            return Err(ApduError::InvalidLength);
        }

        let name = &buff[index..][..name_len];
        index += name_len;

        let public_key = <&[u8; UNCOMPRESSED_KEY_LENGTH]>::try_from(&buff[index..])
            .map_err(|_| ApduError::InvalidLength)?;
        index += UNCOMPRESSED_KEY_LENGTH;

        Ok((Self { name, public_key }, index))
    }
}

#[cfg(test)]
mod test {
    use rand::random;

    use super::*;
    use crate::test::encode_decode_apdu;

    fn random_key() -> [u8; UNCOMPRESSED_KEY_LENGTH] {
        let mut k = [0u8; UNCOMPRESSED_KEY_LENGTH];
        for b in k.iter_mut() {
            *b = random();
        }
        k[0] = 0x04;
        k
    }

    #[test]
    fn partner_key_apdu() {
        let key = random_key();

        for name in [&b"ABC"[..], b"Partner", b"fifteen-letters"] {
            let apdu = PartnerKeyReq::new(name, &key);

            let mut buff = [0u8; 128];
            let n = encode_decode_apdu(&mut buff, &apdu);

            assert_eq!(n, 1 + name.len() + UNCOMPRESSED_KEY_LENGTH);
            assert_eq!(buff[0] as usize, name.len());
        }
    }

    #[test]
    fn partner_key_name_length() {
        let key = random_key();
        let name = [b'x'; 32];

        for l in 0..name.len() {
            let mut buff = [0u8; 128];
            buff[0] = l as u8;
            buff[1..][..l].copy_from_slice(&name[..l]);
            buff[1 + l..][..UNCOMPRESSED_KEY_LENGTH].copy_from_slice(&key);

            let r = PartnerKeyReq::decode(&buff[..1 + l + UNCOMPRESSED_KEY_LENGTH]);

            match l {
                PARTNER_NAME_MIN_LEN..=PARTNER_NAME_MAX_LEN => {
                    let (apdu, n) = r.expect("decode failed");
                    assert_eq!(apdu.name, &name[..l]);
                    assert_eq!(apdu.public_key, &key);
                    assert_eq!(n, 1 + l + UNCOMPRESSED_KEY_LENGTH);
                }
                _ => assert!(r.is_err(), "name length {l} accepted"),
            }

            // Name encoding is also bounded
            let e = PartnerKeyReq::new(&name[..l], &key).encode(&mut [0u8; 128]);
            assert_eq!(
                e.is_ok(),
                (PARTNER_NAME_MIN_LEN..=PARTNER_NAME_MAX_LEN).contains(&l)
            );
        }
    }

    #[test]
    fn partner_key_total_length() {
        let key = random_key();
        let mut buff = [0u8; 128];
        let n = PartnerKeyReq::new(b"ABCD", &key).encode(&mut buff).unwrap();

        // Short by one, long by one and empty messages are all rejected
        assert!(PartnerKeyReq::decode(&buff[..n - 1]).is_err());
        assert!(PartnerKeyReq::decode(&buff[..n + 1]).is_err());
        assert!(PartnerKeyReq::decode(&buff[..0]).is_err());
        assert!(PartnerKeyReq::decode(&buff[..n]).is_ok());
    }

    #[test]
    fn partner_key_digest() {
        let key = random_key();
        let apdu = PartnerKeyReq::new(b"ABC", &key);

        let mut buff = [0u8; 128];
        let n = apdu.encode(&mut buff).unwrap();

        assert_eq!(apdu.digest().unwrap(), digest_partner_key(&buff[..n]));
    }
}
