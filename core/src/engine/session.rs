// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Session context, shared by the registration, verification and signing steps

use heapless::{String, Vec};
use zeroize::Zeroize;

use crate::apdu::{
    digest::{digest_partner_key, DIGEST_LEN},
    partner::{PartnerKeyReq, PARTNER_NAME_MAX_LEN, UNCOMPRESSED_KEY_LENGTH},
    Curve, Subcommand,
};

use super::Error;

/// Maximum length of amount / fee values (big-endian)
pub const MAX_AMOUNT_LEN: usize = 16;

/// Maximum length of a payin destination address
pub const MAX_ADDRESS_LEN: usize = 64;

/// Maximum length of a payin destination extra identifier (memo / tag)
pub const MAX_EXTRA_ID_LEN: usize = 32;

/// Maximum length of the payin application name
pub const MAX_APPLICATION_NAME_LEN: usize = 32;

/// Maximum length of a coin configuration blob
pub const MAX_COIN_CONFIG_LEN: usize = 64;

/// Session binding digest, SHA-256 over the accepted partner registration
#[derive(Clone, PartialEq, Zeroize)]
pub struct SessionDigest([u8; DIGEST_LEN]);

impl SessionDigest {
    /// Create a new (empty) session digest
    pub const fn new() -> Self {
        Self([0u8; DIGEST_LEN])
    }

    /// Compute the session digest over an encoded registration message
    pub fn compute(message: &[u8]) -> Self {
        Self(digest_partner_key(message))
    }
}

impl Default for SessionDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for SessionDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Debug format [SessionDigest] as hex
impl core::fmt::Debug for SessionDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Display [SessionDigest] as hex
impl core::fmt::Display for SessionDigest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in &self.0[..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Partner public key, tagged with the curve selected at registration.
///
/// Key bytes are the raw uncompressed SEC1 point as received, point
/// validation happens when a signature is checked.
#[derive(Clone, PartialEq, Debug)]
pub enum PartnerKey {
    Secp256k1([u8; UNCOMPRESSED_KEY_LENGTH]),
    Secp256r1([u8; UNCOMPRESSED_KEY_LENGTH]),
}

impl PartnerKey {
    /// Interpret key bytes under the curve selected by the provided subcommand
    pub fn new(subcommand: Subcommand, key: &[u8; UNCOMPRESSED_KEY_LENGTH]) -> Self {
        match subcommand.curve() {
            Curve::Secp256k1 => PartnerKey::Secp256k1(*key),
            Curve::Secp256r1 => PartnerKey::Secp256r1(*key),
        }
    }

    /// Fetch the curve for this key
    pub fn curve(&self) -> Curve {
        match self {
            PartnerKey::Secp256k1(_) => Curve::Secp256k1,
            PartnerKey::Secp256r1(_) => Curve::Secp256r1,
        }
    }

    /// Fetch raw key bytes
    pub fn as_bytes(&self) -> &[u8; UNCOMPRESSED_KEY_LENGTH] {
        match self {
            PartnerKey::Secp256k1(k) | PartnerKey::Secp256r1(k) => k,
        }
    }
}

/// Registered partner record
#[derive(Clone, PartialEq, Debug)]
pub struct Partner {
    name: Vec<u8, PARTNER_NAME_MAX_LEN>,
    key: PartnerKey,
}

impl Partner {
    /// Create a partner record from a decoded registration APDU
    pub fn new(subcommand: Subcommand, req: &PartnerKeyReq) -> Result<Self, Error> {
        let name = Vec::from_slice(req.name).map_err(|_| Error::InvalidFormat)?;

        Ok(Self {
            name,
            key: PartnerKey::new(subcommand, req.public_key),
        })
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn key(&self) -> &PartnerKey {
        &self.key
    }
}

/// Transaction parameters, provided by the exchange flow prior to signature
/// checking and consumed once when signing is started
#[derive(Clone, PartialEq, Debug)]
pub struct PendingTransaction {
    /// Amount owed to the partner (big-endian)
    pub amount: Vec<u8, MAX_AMOUNT_LEN>,
    /// Transaction fee (big-endian)
    pub fee: Vec<u8, MAX_AMOUNT_LEN>,
    /// Payin destination address
    pub destination_address: String<MAX_ADDRESS_LEN>,
    /// Optional destination extra identifier (empty if unused)
    pub destination_extra_id: String<MAX_EXTRA_ID_LEN>,
}

impl PendingTransaction {
    /// Create a new pending transaction
    pub fn new(amount: &[u8], fee: &[u8], address: &str, extra_id: &str) -> Result<Self, Error> {
        Ok(Self {
            amount: Vec::from_slice(amount).map_err(|_| Error::InvalidFormat)?,
            fee: Vec::from_slice(fee).map_err(|_| Error::InvalidFormat)?,
            destination_address: String::try_from(address).map_err(|_| Error::InvalidFormat)?,
            destination_extra_id: String::try_from(extra_id).map_err(|_| Error::InvalidFormat)?,
        })
    }
}

/// Payin coin configuration, identifying the application that will build
/// and sign the payin transaction
#[derive(Clone, PartialEq, Debug)]
pub struct CoinConfig {
    /// Payin application name
    pub application: String<MAX_APPLICATION_NAME_LEN>,
    /// Opaque coin configuration passed through to the payin application
    pub configuration: Vec<u8, MAX_COIN_CONFIG_LEN>,
}

impl CoinConfig {
    /// Create a new coin configuration
    pub fn new(application: &str, configuration: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            application: String::try_from(application).map_err(|_| Error::InvalidFormat)?,
            configuration: Vec::from_slice(configuration).map_err(|_| Error::InvalidFormat)?,
        })
    }
}

/// Session context
#[derive(Default)]
pub struct Session {
    /// Subcommand fixed at registration
    pub(crate) subcommand: Option<Subcommand>,
    /// Registered partner
    pub(crate) partner: Option<Partner>,
    /// Binding digest over the partner registration
    pub(crate) digest: SessionDigest,
    /// Pending transaction and payin configuration
    pub(crate) transaction: Option<(PendingTransaction, CoinConfig)>,
}

impl Session {
    /// Create a new (empty) session
    pub const fn new() -> Self {
        Self {
            subcommand: None,
            partner: None,
            digest: SessionDigest::new(),
            transaction: None,
        }
    }

    /// Fetch the subcommand this session was registered under
    pub fn subcommand(&self) -> Option<Subcommand> {
        self.subcommand
    }

    /// Fetch the registered partner
    pub fn partner(&self) -> Option<&Partner> {
        self.partner.as_ref()
    }

    /// Fetch the session digest
    pub fn digest(&self) -> &SessionDigest {
        &self.digest
    }

    /// Fetch the pending transaction
    pub fn transaction(&self) -> Option<&(PendingTransaction, CoinConfig)> {
        self.transaction.as_ref()
    }

    /// Check the provided subcommand matches the registered one
    pub(crate) fn check_subcommand(&self, subcommand: Subcommand) -> Result<(), Error> {
        match self.subcommand {
            Some(s) if s == subcommand => Ok(()),
            _ => Err(Error::SubcommandMismatch),
        }
    }

    /// Clear session data
    pub fn clear(&mut self) {
        self.subcommand = None;
        self.partner = None;
        self.digest.zeroize();
        self.transaction = None;
    }
}
