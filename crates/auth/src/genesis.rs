// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Genesis snapshot of the auth module.

use crate::account::{AccountError, GenesisAccount};
use crate::address::AccAddress;
use crate::codec::json::{ObjectReader, ObjectWriter};
use crate::codec::{Codable, CodecError, Decoder, Encoder, Registry, impl_codable_plain};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

pub const MODULE_NAME: &str = "auth";

pub const DEFAULT_MAX_MEMO_CHARACTERS: u64 = 256;
pub const DEFAULT_TX_SIG_LIMIT: u64 = 7;
pub const DEFAULT_TX_SIZE_COST_PER_BYTE: u64 = 10;
pub const DEFAULT_SIG_VERIFY_COST_ED25519: u64 = 590;
pub const DEFAULT_SIG_VERIFY_COST_SECP256K1: u64 = 1000;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("invalid account at index {index}: {source}")]
    InvalidAccount {
        index: usize,
        #[source]
        source: AccountError,
    },

    #[error("duplicate account address {0}")]
    DuplicateAddress(AccAddress),
}

/// Auth module parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Params {
    #[serde(with = "crate::codec::json::decimal_string")]
    pub max_memo_characters: u64,
    #[serde(with = "crate::codec::json::decimal_string")]
    pub tx_sig_limit: u64,
    #[serde(with = "crate::codec::json::decimal_string")]
    pub tx_size_cost_per_byte: u64,
    #[serde(with = "crate::codec::json::decimal_string")]
    pub sig_verify_cost_ed25519: u64,
    #[serde(with = "crate::codec::json::decimal_string")]
    pub sig_verify_cost_secp256k1: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_memo_characters: DEFAULT_MAX_MEMO_CHARACTERS,
            tx_sig_limit: DEFAULT_TX_SIG_LIMIT,
            tx_size_cost_per_byte: DEFAULT_TX_SIZE_COST_PER_BYTE,
            sig_verify_cost_ed25519: DEFAULT_SIG_VERIFY_COST_ED25519,
            sig_verify_cost_secp256k1: DEFAULT_SIG_VERIFY_COST_SECP256K1,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), GenesisError> {
        let fields = [
            ("max_memo_characters", self.max_memo_characters),
            ("tx_sig_limit", self.tx_sig_limit),
            ("tx_size_cost_per_byte", self.tx_size_cost_per_byte),
            ("sig_verify_cost_ed25519", self.sig_verify_cost_ed25519),
            ("sig_verify_cost_secp256k1", self.sig_verify_cost_secp256k1),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(GenesisError::InvalidParam {
                name: *name,
                reason: "must be positive".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl_codable_plain!(Params);

/// Ordered list of genesis accounts.
#[derive(Debug, Clone, Default)]
pub struct GenesisAccounts(Vec<Box<dyn GenesisAccount>>);

impl GenesisAccounts {
    pub fn new(accounts: Vec<Box<dyn GenesisAccount>>) -> Self {
        Self(accounts)
    }

    pub fn push(&mut self, account: Box<dyn GenesisAccount>) {
        self.0.push(account);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn GenesisAccount>> {
        self.0.iter()
    }

    pub fn contains(&self, address: &AccAddress) -> bool {
        self.0.iter().any(|acc| acc.address() == Some(address))
    }

    pub fn into_inner(self) -> Vec<Box<dyn GenesisAccount>> {
        self.0
    }
}

impl From<Vec<Box<dyn GenesisAccount>>> for GenesisAccounts {
    fn from(accounts: Vec<Box<dyn GenesisAccount>>) -> Self {
        Self(accounts)
    }
}

impl Codable for GenesisAccounts {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        self.0.encode_binary(enc)
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Vec::decode_binary(dec).map(Self)
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        self.0.encode_json(registry)
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        Vec::decode_json(value, registry).map(Self)
    }
}

/// Validate every account and reject repeated addresses.
pub fn validate_genesis_accounts(accounts: &GenesisAccounts) -> Result<(), GenesisError> {
    let mut seen = HashSet::with_capacity(accounts.len());
    for (index, account) in accounts.iter().enumerate() {
        account
            .validate()
            .map_err(|source| GenesisError::InvalidAccount { index, source })?;
        if let Some(address) = account.address() {
            if !seen.insert(*address) {
                return Err(GenesisError::DuplicateAddress(*address));
            }
        }
    }
    Ok(())
}

/// Auth module state at genesis.
#[derive(Debug, Clone, Default)]
pub struct GenesisState {
    pub params: Params,
    pub accounts: GenesisAccounts,
}

impl GenesisState {
    pub fn new(params: Params, accounts: GenesisAccounts) -> Self {
        Self { params, accounts }
    }

    /// Check the parameters and each account. Address uniqueness is left to
    /// [`validate_genesis_accounts`].
    pub fn validate(&self) -> Result<(), GenesisError> {
        self.params.validate()?;
        for (index, account) in self.accounts.iter().enumerate() {
            account
                .validate()
                .map_err(|source| GenesisError::InvalidAccount { index, source })?;
        }
        Ok(())
    }

    /// Order accounts by account number.
    pub fn sanitize(&mut self) {
        self.accounts.0.sort_by_key(|acc| acc.account_number());
    }
}

impl Codable for GenesisState {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        enc.encode(&self.params)?;
        enc.encode(&self.accounts)
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            params: dec.decode()?,
            accounts: dec.decode()?,
        })
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        let mut obj = ObjectWriter::new(registry);
        obj.field("params", &self.params)?
            .field("accounts", &self.accounts)?;
        Ok(obj.finish())
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        let mut obj = ObjectReader::new(value, "GenesisState", registry)?;
        let params = match obj.raw("params") {
            Value::Null => Params::default(),
            params => Params::decode_json(params, registry)?,
        };
        Ok(Self {
            params,
            accounts: obj.field("accounts")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, BaseAccount};
    use crate::coins::{Coin, Coins};
    use crate::default_codec;
    use crate::keys::{PubKey, PubKeyEd25519};

    fn key(seed: u8) -> PubKeyEd25519 {
        let signing = ed25519_dalek::SigningKey::from_bytes(&[seed; 32]);
        PubKeyEd25519::new(signing.verifying_key().to_bytes())
    }

    fn account(seed: u8, number: u64) -> Box<dyn GenesisAccount> {
        let key = key(seed);
        let coins = Coins::new(vec![Coin::new("stake", 100).unwrap()]).unwrap();
        Box::new(BaseAccount::new(Some(key.address()), coins, Some(Box::new(key)), number, 0))
    }

    #[test]
    fn test_default_params_are_valid() {
        let params = Params::default();
        assert_eq!(params.max_memo_characters, 256);
        assert_eq!(params.tx_sig_limit, 7);
        assert_eq!(params.tx_size_cost_per_byte, 10);
        assert_eq!(params.sig_verify_cost_ed25519, 590);
        assert_eq!(params.sig_verify_cost_secp256k1, 1000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_param_is_rejected() {
        let params = Params {
            tx_sig_limit: 0,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(GenesisError::InvalidParam { name: "tx_sig_limit", .. })
        ));
    }

    #[test]
    fn test_validate_reports_index_of_bad_account() {
        let mut mismatched = BaseAccount::with_address(key(2).address());
        mismatched.set_pub_key(Some(Box::new(key(3))));

        let state = GenesisState::new(
            Params::default(),
            vec![account(1, 0), Box::new(mismatched) as Box<dyn GenesisAccount>].into(),
        );
        match state.validate() {
            Err(GenesisError::InvalidAccount { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(source, AccountError::InvalidAccount(_)));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_addresses_pass_validate_but_not_the_helper() {
        let accounts: GenesisAccounts = vec![account(1, 0), account(1, 1)].into();
        assert!(accounts.contains(&key(1).address()));
        assert!(!accounts.contains(&key(9).address()));

        let state = GenesisState::new(Params::default(), accounts.clone());
        assert!(state.validate().is_ok());
        assert!(matches!(
            validate_genesis_accounts(&accounts),
            Err(GenesisError::DuplicateAddress(addr)) if addr == key(1).address()
        ));
    }

    #[test]
    fn test_sanitize_orders_by_account_number() {
        let mut state = GenesisState::new(
            Params::default(),
            vec![account(1, 5), account(2, 1), account(3, 3)].into(),
        );
        state.sanitize();
        let numbers: Vec<u64> = state.accounts.iter().map(|a| a.account_number()).collect();
        assert_eq!(numbers, [1, 3, 5]);
    }

    #[test]
    fn test_json_snapshot_round_trips() {
        let codec = default_codec().unwrap();
        let state = GenesisState::new(Params::default(), vec![account(1, 0), account(2, 1)].into());

        let json = codec.marshal_json_value(&state).unwrap();
        assert_eq!(json["params"]["max_memo_characters"], "256");
        assert_eq!(json["accounts"][1]["type"], "cosmos-sdk/Account");

        let back: GenesisState = codec.unmarshal_json_value(json.clone()).unwrap();
        assert_eq!(back.params, state.params);
        assert_eq!(back.accounts.len(), 2);
        assert_eq!(codec.marshal_json_value(&back).unwrap(), json);

        let bytes = codec.marshal_binary(&state).unwrap();
        let from_binary: GenesisState = codec.unmarshal_binary(&bytes).unwrap();
        assert_eq!(codec.marshal_binary(&from_binary).unwrap(), bytes);
    }

    #[test]
    fn test_missing_params_fall_back_to_defaults() {
        let codec = default_codec().unwrap();
        let state: GenesisState = codec
            .unmarshal_json_value(serde_json::json!({"accounts": []}))
            .unwrap();
        assert_eq!(state.params, Params::default());
        assert!(state.accounts.is_empty());
    }
}
