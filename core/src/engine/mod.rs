// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] sequences swap partner verification.
//!
//! This handles [Event] inputs for the active [Subcommand], writing exactly
//! one reply per command via the provided [Transport],
//! see [apdu][crate::apdu] for APDU protocol / encoding specifications.

use strum::{Display, EnumIter, EnumString, EnumVariantNames};

use crate::apdu::{version::VersionResp, Instruction, Subcommand, SWAP_APDU_CLA};

mod error;
pub use error::Error;

mod event;
pub use event::Event;

mod session;
pub use session::{
    CoinConfig, Partner, PartnerKey, PendingTransaction, Session, SessionDigest,
    MAX_ADDRESS_LEN, MAX_AMOUNT_LEN, MAX_APPLICATION_NAME_LEN, MAX_COIN_CONFIG_LEN,
    MAX_EXTRA_ID_LEN,
};

mod partner;
mod reply;
mod signing;
pub use signing::PayinParams;
mod verify;

/// APDU header length (`CLA INS P1 P2 LC`)
pub const APDU_HEADER_LEN: usize = 5;

/// Application version, reported via [`VersionResp`]
pub const APP_VERSION: VersionResp = VersionResp {
    major: parse_version(env!("CARGO_PKG_VERSION_MAJOR")),
    minor: parse_version(env!("CARGO_PKG_VERSION_MINOR")),
    patch: parse_version(env!("CARGO_PKG_VERSION_PATCH")),
};

/// Engine internal state enumeration
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle, no partner registered
    Initial,
    /// Partner registered, session digest bound
    PartnerSet,
    /// Partner signature checked, ready to start signing
    SignatureChecked,
}

/// [`Transport`] trait carries replies back to the host
pub trait Transport {
    type Error: core::fmt::Debug;

    /// Send a reply buffer
    fn send(&mut self, buff: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, buff: &[u8]) -> Result<(), Self::Error> {
        T::send(self, buff)
    }
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// Build and sign the payin transaction using the named application
    fn create_payin_transaction(&mut self, application: &str, params: &PayinParams);
}

impl<T: Driver> Driver for &mut T {
    fn create_payin_transaction(&mut self, application: &str, params: &PayinParams) {
        T::create_payin_transaction(self, application, params)
    }
}

/// [Engine] provides hardware-independent support for swap partner verification
pub struct Engine<DRV: Driver> {
    state: State,
    session: Session,
    drv: DRV,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver
    pub const fn new(drv: DRV) -> Self {
        Self {
            state: State::Initial,
            session: Session::new(),
            drv,
        }
    }

    /// Handle an incoming event for the provided subcommand.
    ///
    /// Protocol errors are reported to the host and returned, leaving the
    /// engine state unchanged. [`Error::Transport`] is returned if the reply
    /// could not be sent.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update<T: Transport>(
        &mut self,
        subcommand: Subcommand,
        evt: &Event,
        io: &mut T,
    ) -> Result<(), Error> {
        #[cfg(feature = "log")]
        log::debug!("event ({}, {}): {:02x?}", self.state, subcommand, evt);

        let r = match (self.state, evt) {
            // Version requests are answered in any state
            (_, Event::GetVersion) => reply::reply_data(io, &APP_VERSION),

            // Register partner
            (State::Initial, Event::SetPartnerKey(buff)) => {
                partner::register(&mut self.session, subcommand, buff, io).map(|_| {
                    self.state = State::PartnerSet;
                })
            }

            // Check partner signature
            (State::PartnerSet, Event::CheckPartnerSignature(buff)) => {
                verify::verify(&self.session, subcommand, buff, io).map(|_| {
                    self.state = State::SignatureChecked;
                })
            }

            // Start signing, state is checked by the trigger
            (_, Event::StartSigningTransaction) => signing::trigger(
                &mut self.state,
                &mut self.session,
                subcommand,
                &mut self.drv,
                io,
            ),

            // Handle unexpected events
            _e => {
                #[cfg(feature = "log")]
                log::error!("Unexpected event in state {:?}: {:02x?}", self.state, _e);

                Err(Error::InvalidState)
            }
        };

        match r {
            Ok(()) => Ok(()),
            Err(Error::Transport) => Err(Error::Transport),
            Err(e) => Err(reply::reply_error(io, e)),
        }
    }

    /// Handle a raw command APDU (`CLA INS P1 P2 LC DATA`).
    ///
    /// Header failures are reported with the matching status word before
    /// the payload is considered.
    pub fn handle_apdu<T: Transport>(&mut self, apdu: &[u8], io: &mut T) -> Result<(), Error> {
        let (subcommand, evt) = match Self::parse_apdu(apdu) {
            Ok(v) => v,
            Err(e) => return Err(reply::reply_error(io, e)),
        };

        self.update(subcommand, &evt, io)
    }

    /// Split a command APDU into subcommand and event
    fn parse_apdu(apdu: &[u8]) -> Result<(Subcommand, Event), Error> {
        if apdu.len() < APDU_HEADER_LEN {
            return Err(Error::InvalidFormat);
        }

        let (cla, ins, p2, lc) = (apdu[0], apdu[1], apdu[3], apdu[4] as usize);

        if cla != SWAP_APDU_CLA {
            return Err(Error::InvalidClass);
        }

        let ins = Instruction::try_from(ins).map_err(|_| Error::InvalidInstruction)?;
        let subcommand = Subcommand::try_from(p2).map_err(|_| Error::InvalidSubcommand)?;

        let data = &apdu[APDU_HEADER_LEN..];
        if data.len() != lc {
            return Err(Error::InvalidFormat);
        }

        let evt = Event::parse(ins as u8, data).map_err(|_| Error::InvalidFormat)?;

        Ok((subcommand, evt))
    }

    /// Set the pending transaction and payin configuration.
    ///
    /// Parameters are fixed once the partner signature has been checked.
    pub fn set_transaction(
        &mut self,
        tx: PendingTransaction,
        coin: CoinConfig,
    ) -> Result<(), Error> {
        if self.state == State::SignatureChecked {
            return Err(Error::InvalidState);
        }

        self.session.transaction = Some((tx, coin));

        Ok(())
    }

    /// Fetch current engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch the current session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch the registered partner
    pub fn partner(&self) -> Option<&Partner> {
        self.session.partner()
    }

    /// Fetch the session digest
    pub fn digest(&self) -> &SessionDigest {
        self.session.digest()
    }

    /// Fetch the subcommand the session was registered under
    pub fn subcommand(&self) -> Option<Subcommand> {
        self.session.subcommand()
    }

    /// Fetch the platform driver
    pub fn driver(&self) -> &DRV {
        &self.drv
    }

    /// Reset engine state, dropping any session data
    pub fn reset(&mut self) {
        self.session.clear();
        self.state = State::Initial;
    }
}

const fn parse_version(v: &str) -> u8 {
    let b = v.as_bytes();
    let mut n = 0u8;
    let mut i = 0;

    while i < b.len() {
        n = n * 10 + (b[i] - b'0');
        i += 1;
    }

    n
}
