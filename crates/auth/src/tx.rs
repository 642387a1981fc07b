// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signed transactions and the messages they carry.

use crate::address::AccAddress;
use crate::codec::json::{self, ObjectReader, ObjectWriter};
use crate::codec::{
    Codable, CodecError, Concrete, Decoder, Encoder, Polymorphic, Registry, RegistryBuilder,
    RegistryError, impl_codable_interface, impl_codable_plain,
};
use crate::coins::Coins;
use crate::genesis::Params;
use crate::keys::PubKey;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const STD_TX_TAG: &str = "cosmos-sdk/StdTx";
pub const MSG_SEND_TAG: &str = "cosmos-sdk/MsgSend";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("transaction carries no messages")]
    NoMessages,

    #[error("transaction carries no signatures")]
    NoSignatures,

    #[error("wrong number of signatures: expected {expected}, found {found}")]
    WrongSignerCount { expected: usize, found: usize },

    #[error("too many signatures: limit {limit}, found {found}")]
    TooManySignatures { limit: u64, found: usize },

    #[error("memo too long: limit {limit} characters, found {found}")]
    MemoTooLong { limit: u64, found: usize },

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("invalid message at index {index}: {source}")]
    InvalidMsg {
        index: usize,
        #[source]
        source: Box<TxError>,
    },
}

/// A state transition request carried by a transaction.
pub trait Msg: Polymorphic {
    fn route(&self) -> &'static str;

    fn msg_type(&self) -> &'static str;

    /// Stateless checks.
    fn validate_basic(&self) -> Result<(), TxError>;

    /// Addresses that must sign a transaction carrying this message.
    fn signers(&self) -> Vec<AccAddress>;

    fn clone_msg(&self) -> Box<dyn Msg>;
}

impl Clone for Box<dyn Msg> {
    fn clone(&self) -> Self {
        self.clone_msg()
    }
}

impl_codable_interface!(Msg);

/// Transfer of coins between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct MsgSend {
    pub from_address: AccAddress,
    pub to_address: AccAddress,
    pub amount: Coins,
}

impl Msg for MsgSend {
    fn route(&self) -> &'static str {
        "bank"
    }

    fn msg_type(&self) -> &'static str {
        "send"
    }

    fn validate_basic(&self) -> Result<(), TxError> {
        if !self.amount.is_all_positive() {
            return Err(TxError::InvalidCoins(format!(
                "send amount must be positive, got '{}'",
                self.amount
            )));
        }
        Ok(())
    }

    fn signers(&self) -> Vec<AccAddress> {
        vec![self.from_address]
    }

    fn clone_msg(&self) -> Box<dyn Msg> {
        Box::new(self.clone())
    }
}

impl Concrete for MsgSend {}

/// Fee paid for a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Coins,
    #[serde(with = "crate::codec::json::decimal_string")]
    pub gas: u64,
}

impl_codable_plain!(MsgSend, StdFee);

/// A signature together with the key that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct StdSignature {
    pub pub_key: Option<Box<dyn PubKey>>,
    pub signature: Vec<u8>,
}

impl Codable for StdSignature {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        enc.encode(&self.pub_key)?;
        enc.put_bytes(&self.signature);
        Ok(())
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            pub_key: dec.decode()?,
            signature: dec.take_bytes()?,
        })
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        let mut obj = ObjectWriter::new(registry);
        obj.field("pub_key", &self.pub_key)?
            .raw("signature", json::base64_value(&self.signature));
        Ok(obj.finish())
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        let mut obj = ObjectReader::new(value, "StdSignature", registry)?;
        Ok(Self {
            pub_key: obj.field("pub_key")?,
            signature: json::base64_from_value(obj.raw("signature"))?,
        })
    }
}

/// The standard signed transaction.
#[derive(Debug, Clone)]
pub struct StdTx {
    pub msgs: Vec<Box<dyn Msg>>,
    pub fee: StdFee,
    pub signatures: Vec<StdSignature>,
    pub memo: String,
}

impl StdTx {
    pub fn new(
        msgs: Vec<Box<dyn Msg>>,
        fee: StdFee,
        signatures: Vec<StdSignature>,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            msgs,
            fee,
            signatures,
            memo: memo.into(),
        }
    }

    /// Required signers of all messages, first-seen order, without repeats.
    pub fn signers(&self) -> Vec<AccAddress> {
        let mut signers: Vec<AccAddress> = Vec::new();
        for signer in self.msgs.iter().flat_map(|msg| msg.signers()) {
            if !signers.contains(&signer) {
                signers.push(signer);
            }
        }
        signers
    }

    pub fn validate_basic(&self, params: &Params) -> Result<(), TxError> {
        if self.msgs.is_empty() {
            return Err(TxError::NoMessages);
        }
        if self.signatures.is_empty() {
            return Err(TxError::NoSignatures);
        }

        let found = self.signatures.len();
        if found as u64 > params.tx_sig_limit {
            return Err(TxError::TooManySignatures {
                limit: params.tx_sig_limit,
                found,
            });
        }
        let expected = self.signers().len();
        if expected != found {
            return Err(TxError::WrongSignerCount { expected, found });
        }

        let memo_len = self.memo.chars().count();
        if memo_len as u64 > params.max_memo_characters {
            return Err(TxError::MemoTooLong {
                limit: params.max_memo_characters,
                found: memo_len,
            });
        }

        for (index, msg) in self.msgs.iter().enumerate() {
            msg.validate_basic().map_err(|source| TxError::InvalidMsg {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}

impl Codable for StdTx {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        enc.encode(&self.msgs)?;
        enc.encode(&self.fee)?;
        enc.encode(&self.signatures)?;
        enc.encode(&self.memo)
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            msgs: dec.decode()?,
            fee: dec.decode()?,
            signatures: dec.decode()?,
            memo: dec.decode()?,
        })
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        let mut obj = ObjectWriter::new(registry);
        obj.field("msg", &self.msgs)?
            .field("fee", &self.fee)?
            .field("signatures", &self.signatures)?
            .field("memo", &self.memo)?;
        Ok(obj.finish())
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        let mut obj = ObjectReader::new(value, "StdTx", registry)?;
        Ok(Self {
            msgs: obj.field("msg")?,
            fee: obj.field("fee")?,
            signatures: obj.field("signatures")?,
            memo: obj.field("memo")?,
        })
    }
}

impl Concrete for StdTx {}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register_interface::<dyn Msg>("Msg")?
        .register_concrete::<MsgSend>(MSG_SEND_TAG)?
        .register_implementation::<dyn Msg, MsgSend>(|msg| Box::new(msg))?
        .register_concrete::<StdTx>(STD_TX_TAG)?;
    Ok(())
}
