// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Minimal ASN.1 DER codec for ECDSA signatures
//!
//! Values are big-endian unsigned integers, re-encoded as (signed) DER
//! `INTEGER`s with leading zeros stripped and a zero pad inserted where the
//! first remaining byte would otherwise read as negative.
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!     r  INTEGER,
//!     s  INTEGER
//! }
//! ```

use static_assertions::const_assert;

/// ASN.1 `INTEGER` tag
pub const INTEGER_TAG: u8 = 0x02;

/// ASN.1 constructed `SEQUENCE` tag
pub const SEQUENCE_TAG: u8 = 0x30;

/// Width of signature components (`R`, `S`) in bytes
pub const COMPONENT_SIZE: usize = 32;

/// Worst-case encoded size of an integer with `n` value bytes:
/// tag, up to three length bytes, value, padding
pub const fn max_integer_size(n: usize) -> usize {
    1 + 3 + n + 1
}

/// Capacity of a DER signature scratch buffer for [`COMPONENT_SIZE`] components
pub const MAX_SIGNATURE_SIZE: usize = max_integer_size(COMPONENT_SIZE) * 2 + 2;

// Largest possible encoding: two padded 32-byte integers in a short-form sequence
const_assert!(2 + 2 * (2 + COMPONENT_SIZE + 1) <= MAX_SIGNATURE_SIZE);

// Accepted DER signatures always fit the scratch buffer
const_assert!(ledger_swap_apdu::signature::MAX_DER_SIGNATURE_LENGTH <= MAX_SIGNATURE_SIZE);

/// DER codec errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum Error {
    /// Output buffer too small for encoded value
    #[cfg_attr(feature = "thiserror", error("output buffer too small"))]
    BufferTooSmall,

    /// Malformed or non-minimal encoding
    #[cfg_attr(feature = "thiserror", error("invalid DER encoding"))]
    InvalidEncoding,
}

/// Strip leading zero bytes from a big-endian value
fn strip(value: &[u8]) -> &[u8] {
    let n = value.iter().take_while(|b| **b == 0).count();
    &value[n..]
}

/// Compute the content size of the DER `INTEGER` encoding of a big-endian
/// unsigned value (excluding tag and length).
///
/// An all-zero (or empty) value encodes as a single zero byte.
pub fn encoded_size(value: &[u8]) -> usize {
    let v = strip(value);

    match v.first() {
        None => 1,
        Some(b) if b & 0x80 != 0 => v.len() + 1,
        Some(_) => v.len(),
    }
}

/// Size of a DER length field for content of `len` bytes
fn length_size(len: usize) -> usize {
    match len {
        0..=0x7f => 1,
        0x80..=0xff => 2,
        _ => 3,
    }
}

/// Write a DER length field, short form below 128 bytes
fn encode_length(buff: &mut [u8], len: usize) -> Result<usize, Error> {
    let n = length_size(len);

    if buff.len() < n {
        return Err(Error::BufferTooSmall);
    }

    match len {
        0..=0x7f => buff[0] = len as u8,
        0x80..=0xff => {
            buff[0] = 0x81;
            buff[1] = len as u8;
        }
        0x100..=0xffff => {
            buff[0] = 0x82;
            buff[1..3].copy_from_slice(&(len as u16).to_be_bytes());
        }
        _ => return Err(Error::InvalidEncoding),
    }

    Ok(n)
}

/// Read a DER length field, returning the length and bytes consumed.
///
/// Long form lengths must be minimal.
fn decode_length(buff: &[u8]) -> Result<(usize, usize), Error> {
    match buff {
        [] => Err(Error::InvalidEncoding),
        [l, ..] if *l < 0x80 => Ok((*l as usize, 1)),
        [0x81, l, ..] if *l >= 0x80 => Ok((*l as usize, 2)),
        [0x82, h, l, ..] if *h != 0 => Ok((u16::from_be_bytes([*h, *l]) as usize, 3)),
        _ => Err(Error::InvalidEncoding),
    }
}

/// Full encoded size (tag, length, content) of a DER `INTEGER`
pub fn integer_size(value: &[u8]) -> usize {
    let c = encoded_size(value);
    1 + length_size(c) + c
}

/// Full encoded size of an `ECDSA-Sig-Value` carrying `r` and `s`
pub fn signature_size(r: &[u8], s: &[u8]) -> usize {
    let c = integer_size(r) + integer_size(s);
    1 + length_size(c) + c
}

/// Encode a big-endian unsigned value as a DER `INTEGER`,
/// returning the number of bytes written
pub fn encode(buff: &mut [u8], value: &[u8]) -> Result<usize, Error> {
    let v = strip(value);
    let c = encoded_size(value);

    if buff.len() < 1 + length_size(c) + c {
        return Err(Error::BufferTooSmall);
    }

    let mut index = 0;

    buff[index] = INTEGER_TAG;
    index += 1;

    index += encode_length(&mut buff[index..], c)?;

    // Pad where the value would otherwise read as negative,
    // or write a single zero for zero values
    if c > v.len() {
        buff[index] = 0x00;
        index += 1;
    }

    buff[index..][..v.len()].copy_from_slice(v);
    index += v.len();

    Ok(index)
}

/// Encode an `ECDSA-Sig-Value` from big-endian `r` and `s` values,
/// returning the number of bytes written
pub fn encode_signature(buff: &mut [u8], r: &[u8], s: &[u8]) -> Result<usize, Error> {
    let c = integer_size(r) + integer_size(s);

    if buff.len() < signature_size(r, s) {
        return Err(Error::BufferTooSmall);
    }

    let mut index = 0;

    buff[index] = SEQUENCE_TAG;
    index += 1;

    index += encode_length(&mut buff[index..], c)?;
    index += encode(&mut buff[index..], r)?;
    index += encode(&mut buff[index..], s)?;

    Ok(index)
}

/// Decode a DER `INTEGER`, returning the (unpadded) big-endian value and
/// the number of bytes consumed.
///
/// Negative and non-minimal encodings are rejected.
pub fn decode_integer(buff: &[u8]) -> Result<(&[u8], usize), Error> {
    if buff.first() != Some(&INTEGER_TAG) {
        return Err(Error::InvalidEncoding);
    }

    let (len, n) = decode_length(&buff[1..])?;
    let index = 1 + n;

    if len == 0 || buff.len() < index + len {
        return Err(Error::InvalidEncoding);
    }

    let v = &buff[index..][..len];

    match v {
        // Negative values are not valid signature components
        [b, ..] if b & 0x80 != 0 => return Err(Error::InvalidEncoding),
        // Padding is only permitted before a high bit
        [0x00, b, ..] if b & 0x80 == 0 => return Err(Error::InvalidEncoding),
        _ => (),
    }

    Ok((strip(v), index + len))
}

/// Decode an `ECDSA-Sig-Value` into fixed-width big-endian `r` and `s`.
///
/// The buffer must contain exactly one signature.
pub fn decode_signature(
    buff: &[u8],
) -> Result<([u8; COMPONENT_SIZE], [u8; COMPONENT_SIZE]), Error> {
    if buff.first() != Some(&SEQUENCE_TAG) {
        return Err(Error::InvalidEncoding);
    }

    let (len, n) = decode_length(&buff[1..])?;
    let mut index = 1 + n;

    if buff.len() != index + len {
        return Err(Error::InvalidEncoding);
    }

    let mut out = [[0u8; COMPONENT_SIZE]; 2];

    for o in out.iter_mut() {
        let (v, n) = decode_integer(&buff[index..])?;
        index += n;

        if v.len() > COMPONENT_SIZE {
            return Err(Error::InvalidEncoding);
        }

        o[COMPONENT_SIZE - v.len()..].copy_from_slice(v);
    }

    if index != buff.len() {
        return Err(Error::InvalidEncoding);
    }

    Ok((out[0], out[1]))
}
