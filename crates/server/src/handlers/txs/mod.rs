// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transaction codec handlers.
//!
//! `POST /txs/decode` turns a base64 binary transaction into its JSON form and
//! `POST /txs/encode` goes the other way. Neither interprets the transaction.

pub mod decode;
pub mod encode;
mod types;

pub use decode::decode_tx;
pub use encode::encode_tx;
pub use types::{DecodeTxError, DecodeTxRequest, EncodeTxRequest, EncodeTxResponse};
