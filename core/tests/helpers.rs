#![allow(unused)]

use encdec::Encode;
use k256::ecdsa as secp256k1;
use log::{debug, trace};
use p256::ecdsa as secp256r1;
use rand_core::OsRng;

use ledger_swap_core::{
    apdu::{partner::PartnerKeyReq, Subcommand},
    engine::{CoinConfig, Driver, Engine, PayinParams, PendingTransaction, Transport},
};

pub const PAYIN_APPLICATION: &str = "Bitcoin";
pub const PAYIN_ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
pub const PAYIN_EXTRA_ID: &str = "";
pub const PAYIN_AMOUNT: &[u8] = &[0x01, 0x2a, 0x05, 0xf2, 0x00];
pub const PAYIN_FEE: &[u8] = &[0x27, 0x10];
pub const PAYIN_CONFIG: &[u8] = &[0x03, 0x42, 0x54, 0x43];

/// Transport error for test use
#[derive(Clone, Debug, PartialEq)]
pub struct TransportError;

/// Transport implementation for test use, records replies
#[derive(Default)]
pub struct TestTransport {
    pub replies: Vec<Vec<u8>>,
    /// Fail all sends while set
    pub fail: bool,
}

impl TestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the most recent reply
    pub fn last(&self) -> Option<&[u8]> {
        self.replies.last().map(|r| &r[..])
    }
}

impl Transport for TestTransport {
    type Error = TransportError;

    fn send(&mut self, buff: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            debug!("dropping reply: {:02x?}", buff);
            return Err(TransportError);
        }

        trace!("reply: {:02x?}", buff);
        self.replies.push(buff.to_vec());

        Ok(())
    }
}

/// Payin hand-off, as received by [`TestDriver`]
#[derive(Clone, Debug, PartialEq)]
pub struct Payin {
    pub application: String,
    pub amount: Vec<u8>,
    pub fee_amount: Vec<u8>,
    pub coin_configuration: Vec<u8>,
    pub destination_address: String,
    pub destination_address_extra_id: String,
}

/// Driver implementation for test use, records payin hand-offs
#[derive(Default)]
pub struct TestDriver {
    pub payins: Vec<Payin>,
}

impl Driver for TestDriver {
    fn create_payin_transaction(&mut self, application: &str, params: &PayinParams) {
        debug!("payin via {}: {:02x?}", application, params);

        self.payins.push(Payin {
            application: application.to_string(),
            amount: params.amount.to_vec(),
            fee_amount: params.fee_amount.to_vec(),
            coin_configuration: params.coin_configuration.to_vec(),
            destination_address: params.destination_address.to_string(),
            destination_address_extra_id: params.destination_address_extra_id.to_string(),
        });
    }
}

/// Partner signing key
pub enum TestKey {
    Secp256k1(secp256k1::SigningKey),
    Secp256r1(secp256r1::SigningKey),
}

impl TestKey {
    /// Generate a random key on the curve used by the provided subcommand
    pub fn random(subcommand: Subcommand) -> Self {
        match subcommand {
            Subcommand::Swap => TestKey::Secp256k1(secp256k1::SigningKey::random(&mut OsRng)),
            Subcommand::Sell => TestKey::Secp256r1(secp256r1::SigningKey::random(&mut OsRng)),
        }
    }

    /// Fetch the uncompressed SEC1 public key
    pub fn public_key(&self) -> [u8; 65] {
        let mut pk = [0u8; 65];
        match self {
            TestKey::Secp256k1(k) => {
                pk.copy_from_slice(k.verifying_key().to_encoded_point(false).as_bytes())
            }
            TestKey::Secp256r1(k) => {
                pk.copy_from_slice(k.verifying_key().to_encoded_point(false).as_bytes())
            }
        }
        pk
    }

    /// Build an encoded partner registration for this key
    pub fn registration(&self, name: &[u8]) -> Vec<u8> {
        registration(name, &self.public_key())
    }

    /// Sign a digest, returning a DER encoded signature
    pub fn sign_der(&self, digest: &[u8]) -> Vec<u8> {
        use secp256k1::signature::hazmat::PrehashSigner;

        match self {
            TestKey::Secp256k1(k) => {
                let sig: secp256k1::Signature = k.sign_prehash(digest).unwrap();
                sig.to_der().as_bytes().to_vec()
            }
            TestKey::Secp256r1(k) => {
                let sig: secp256r1::Signature = k.sign_prehash(digest).unwrap();
                sig.to_der().as_bytes().to_vec()
            }
        }
    }

    /// Sign a digest, returning a raw `R || S` signature
    pub fn sign_raw(&self, digest: &[u8]) -> Vec<u8> {
        use secp256k1::signature::hazmat::PrehashSigner;

        match self {
            TestKey::Secp256k1(k) => {
                let sig: secp256k1::Signature = k.sign_prehash(digest).unwrap();
                sig.to_bytes().to_vec()
            }
            TestKey::Secp256r1(k) => {
                let sig: secp256r1::Signature = k.sign_prehash(digest).unwrap();
                sig.to_bytes().to_vec()
            }
        }
    }

    /// Sign a digest using the wire format for the provided subcommand
    pub fn sign(&self, subcommand: Subcommand, digest: &[u8]) -> Vec<u8> {
        match subcommand {
            Subcommand::Swap => self.sign_der(digest),
            Subcommand::Sell => self.sign_raw(digest),
        }
    }
}

/// Encode a partner registration message.
///
/// Built by hand so out-of-range names can be produced,
/// see [`PartnerKeyReq`] for the checked encoding.
pub fn registration(name: &[u8], public_key: &[u8; 65]) -> Vec<u8> {
    let mut buff = Vec::with_capacity(1 + name.len() + public_key.len());
    buff.push(name.len() as u8);
    buff.extend_from_slice(name);
    buff.extend_from_slice(public_key);
    buff
}

/// Encode a partner registration via [`PartnerKeyReq`]
pub fn encode_registration(name: &[u8], public_key: &[u8; 65]) -> Vec<u8> {
    let mut buff = vec![0u8; 128];
    let n = PartnerKeyReq::new(name, public_key)
        .encode(&mut buff)
        .unwrap();
    buff.truncate(n);
    buff
}

/// Pending transaction used by tests
pub fn transaction() -> (PendingTransaction, CoinConfig) {
    (
        PendingTransaction::new(PAYIN_AMOUNT, PAYIN_FEE, PAYIN_ADDRESS, PAYIN_EXTRA_ID).unwrap(),
        CoinConfig::new(PAYIN_APPLICATION, PAYIN_CONFIG).unwrap(),
    )
}

/// Setup an engine with a pending transaction and a transport
pub fn setup() -> (Engine<TestDriver>, TestTransport) {
    let _ = simplelog::SimpleLogger::init(log::LevelFilter::Debug, Default::default());

    let mut e = Engine::new(TestDriver::default());

    let (tx, coin) = transaction();
    e.set_transaction(tx, coin).unwrap();

    (e, TestTransport::new())
}

/// Build a command APDU
pub fn apdu(ins: u8, subcommand: Subcommand, data: &[u8]) -> Vec<u8> {
    let mut buff = vec![0xe0, ins, 0x00, subcommand as u8, data.len() as u8];
    buff.extend_from_slice(data);
    buff
}

pub const STATUS_OK: [u8; 2] = [0x90, 0x00];
pub const STATUS_INVALID_FORMAT: [u8; 2] = [0x6a, 0x80];
pub const STATUS_VERIFICATION_FAILED: [u8; 2] = [0x9d, 0x1a];
pub const STATUS_WRONG_P2: [u8; 2] = [0x6a, 0x87];
pub const STATUS_INVALID_STATE: [u8; 2] = [0x6d, 0x00];
