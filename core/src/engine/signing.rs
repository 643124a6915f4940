// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Signing trigger, hands the checked transaction off to the payin application

use crate::apdu::Subcommand;

use super::{reply::reply_ok, Driver, Error, Session, State, Transport};

/// Payin transaction parameters, passed to [`Driver::create_payin_transaction`]
#[derive(Clone, PartialEq, Debug)]
pub struct PayinParams<'a> {
    /// Amount owed to the partner (big-endian)
    pub amount: &'a [u8],
    /// Transaction fee (big-endian)
    pub fee_amount: &'a [u8],
    /// Opaque coin configuration
    pub coin_configuration: &'a [u8],
    /// Payin destination address
    pub destination_address: &'a str,
    /// Destination extra identifier (memo / tag), empty if unused
    pub destination_address_extra_id: &'a str,
}

/// Start signing the pending transaction.
///
/// Requires a checked partner signature for the same subcommand. On success
/// the session is cleared and the engine returns to [`State::Initial`] before
/// the payin application is invoked.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn trigger<T: Transport, D: Driver>(
    state: &mut State,
    session: &mut Session,
    subcommand: Subcommand,
    drv: &mut D,
    io: &mut T,
) -> Result<(), Error> {
    if *state != State::SignatureChecked {
        return Err(Error::InvalidState);
    }

    session.check_subcommand(subcommand)?;

    let (tx, coin) = session.transaction.clone().ok_or(Error::MissingTransaction)?;

    reply_ok(io)?;

    *state = State::Initial;
    session.clear();

    #[cfg(feature = "log")]
    log::info!("starting payin transaction via {}", coin.application);

    let params = PayinParams {
        amount: &tx.amount,
        fee_amount: &tx.fee,
        coin_configuration: &coin.configuration,
        destination_address: &tx.destination_address,
        destination_address_extra_id: &tx.destination_extra_id,
    };

    drv.create_payin_transaction(&coin.application, &params);

    Ok(())
}
