// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Swap partner verification core
//!
//! This provides a common [Engine][engine] checking that exchange parameters
//! originate from a registered swap partner before payin transaction signing
//! is started, for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via [Event][engine::Event]s,
//! with replies written through a [Transport][engine::Transport],
//! see [ledger_swap_apdu] for APDU objects and wire encodings.
//!
//! ## Operations
//!
//! The application version can be requested at any time via
//! [`VersionReq`][ledger_swap_apdu::version::VersionReq], returning a
//! [`VersionResp`][ledger_swap_apdu::version::VersionResp].
//!
//! Each swap command carries a [`Subcommand`][ledger_swap_apdu::Subcommand]
//! in `P2`, selecting the partner key curve and signature encoding. The
//! subcommand used to register a partner must be used for the rest of the
//! session.
//!
//! ### Verifying a partner
//!
//! 1. The exchange flow configures the pending transaction and payin
//!    application via [`Engine::set_transaction`][engine::Engine::set_transaction]
//! 2. Issue [`PartnerKeyReq`][ledger_swap_apdu::partner::PartnerKeyReq] to
//!    register the partner name and public key. The session digest is
//!    computed over the exact request bytes
//!    (see [`digest_partner_key`][ledger_swap_apdu::digest::digest_partner_key])
//! 3. Issue [`PartnerSignatureReq`][ledger_swap_apdu::signature::PartnerSignatureReq]
//!    with the partner signature over the session digest, DER encoded for
//!    `Swap` or raw `R || S` for `Sell`
//! 4. Issue `StartSigningTransaction` to hand the checked transaction off
//!    to the payin application via [`Driver`][engine::Driver], returning the
//!    engine to its initial state
//!
//! Each command is answered with a single
//! [`StatusWord`][ledger_swap_apdu::status::StatusWord], failed commands
//! leave the session unchanged.

#![cfg_attr(not(feature = "std"), no_std)]

pub use ledger_swap_apdu::{self as apdu};

pub mod engine;

pub mod helpers;
