// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account model.
//!
//! [`Account`] is the capability set shared by every account variant and
//! [`GenesisAccount`] adds the self-validation needed when an account is
//! loaded from a genesis snapshot. [`BaseAccount`] is the plain variant and
//! the building block other variants hold by composition.
//!
//! Mutators are atomic: when one fails, the account is left untouched.

use crate::address::AccAddress;
use crate::codec::json::{ObjectReader, ObjectWriter};
use crate::codec::{
    Codable, CodecError, Concrete, Decoder, Encoder, Polymorphic, Registry, RegistryBuilder,
    RegistryError, impl_codable_interface,
};
use crate::coins::Coins;
use crate::keys::PubKey;
use serde_json::Value;
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;

pub const BASE_ACCOUNT_TAG: &str = "cosmos-sdk/Account";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("cannot override BaseAccount address")]
    AddressAlreadySet,

    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("sequence cannot decrease from {current} to {requested}")]
    SequenceRegression { current: u64, requested: u64 },

    #[error("account number is already set to {current}, cannot change it to {requested}")]
    AccountNumberAlreadySet { current: u64, requested: u64 },
}

/// Capabilities shared by every account variant.
pub trait Account: Polymorphic + fmt::Display {
    fn address(&self) -> Option<&AccAddress>;

    /// Set the address. Fails once an address is present.
    fn set_address(&mut self, address: AccAddress) -> Result<(), AccountError>;

    fn pub_key(&self) -> Option<&dyn PubKey>;

    fn set_pub_key(&mut self, pub_key: Option<Box<dyn PubKey>>);

    fn account_number(&self) -> u64;

    fn set_account_number(&mut self, account_number: u64) -> Result<(), AccountError>;

    fn sequence(&self) -> u64;

    /// Set the sequence. Lower values than the current one are rejected.
    fn set_sequence(&mut self, sequence: u64) -> Result<(), AccountError>;

    fn coins(&self) -> &Coins;

    fn set_coins(&mut self, coins: Coins);

    /// Balance spendable at `block_time`.
    fn spendable_coins(&self, block_time: SystemTime) -> Coins;

    fn clone_account(&self) -> Box<dyn Account>;
}

/// An account that can appear in a genesis snapshot.
pub trait GenesisAccount: Account {
    /// Check structural invariants, such as the public key matching the address.
    fn validate(&self) -> Result<(), AccountError>;

    fn clone_genesis(&self) -> Box<dyn GenesisAccount>;
}

impl Clone for Box<dyn Account> {
    fn clone(&self) -> Self {
        self.clone_account()
    }
}

impl Clone for Box<dyn GenesisAccount> {
    fn clone(&self) -> Self {
        self.clone_genesis()
    }
}

impl_codable_interface!(Account, GenesisAccount);

/// Plain account with no vesting or module-specific state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseAccount {
    address: Option<AccAddress>,
    coins: Coins,
    pub_key: Option<Box<dyn PubKey>>,
    /// `None` until a number is assigned. Zero is a valid assignment.
    account_number: Option<u64>,
    sequence: u64,
}

impl BaseAccount {
    pub fn new(
        address: Option<AccAddress>,
        coins: Coins,
        pub_key: Option<Box<dyn PubKey>>,
        account_number: u64,
        sequence: u64,
    ) -> Self {
        Self {
            address,
            coins,
            pub_key,
            account_number: Some(account_number),
            sequence,
        }
    }

    pub fn with_address(address: AccAddress) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }
}

impl Account for BaseAccount {
    fn address(&self) -> Option<&AccAddress> {
        self.address.as_ref()
    }

    fn set_address(&mut self, address: AccAddress) -> Result<(), AccountError> {
        if self.address.is_some() {
            return Err(AccountError::AddressAlreadySet);
        }
        self.address = Some(address);
        Ok(())
    }

    fn pub_key(&self) -> Option<&dyn PubKey> {
        self.pub_key.as_deref()
    }

    fn set_pub_key(&mut self, pub_key: Option<Box<dyn PubKey>>) {
        self.pub_key = pub_key;
    }

    fn account_number(&self) -> u64 {
        self.account_number.unwrap_or_default()
    }

    fn set_account_number(&mut self, account_number: u64) -> Result<(), AccountError> {
        match self.account_number {
            Some(current) if current != account_number => {
                Err(AccountError::AccountNumberAlreadySet {
                    current,
                    requested: account_number,
                })
            }
            _ => {
                self.account_number = Some(account_number);
                Ok(())
            }
        }
    }

    fn sequence(&self) -> u64 {
        self.sequence
    }

    fn set_sequence(&mut self, sequence: u64) -> Result<(), AccountError> {
        if sequence < self.sequence {
            return Err(AccountError::SequenceRegression {
                current: self.sequence,
                requested: sequence,
            });
        }
        self.sequence = sequence;
        Ok(())
    }

    fn coins(&self) -> &Coins {
        &self.coins
    }

    fn set_coins(&mut self, coins: Coins) {
        self.coins = coins;
    }

    fn spendable_coins(&self, _block_time: SystemTime) -> Coins {
        self.coins.clone()
    }

    fn clone_account(&self) -> Box<dyn Account> {
        Box::new(self.clone())
    }
}

impl GenesisAccount for BaseAccount {
    fn validate(&self) -> Result<(), AccountError> {
        if let (Some(address), Some(pub_key)) = (&self.address, &self.pub_key) {
            if pub_key.address() != *address {
                return Err(AccountError::InvalidAccount(
                    "pubkey and address pair is invalid".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn clone_genesis(&self) -> Box<dyn GenesisAccount> {
        Box::new(self.clone())
    }
}

impl fmt::Display for BaseAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self.address.map(|a| a.to_string()).unwrap_or_default();
        let pub_key = self
            .pub_key
            .as_ref()
            .map(|k| k.to_string())
            .unwrap_or_default();

        writeln!(f, "Account:")?;
        writeln!(f, "  Address:       {address}")?;
        writeln!(f, "  Pubkey:        {pub_key}")?;
        writeln!(f, "  Coins:         {}", self.coins)?;
        writeln!(f, "  AccountNumber: {}", self.account_number())?;
        writeln!(f, "  Sequence:      {}", self.sequence)
    }
}

impl Codable for BaseAccount {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        match &self.address {
            Some(address) => enc.put_bytes(address.as_bytes()),
            None => enc.put_bytes(&[]),
        }
        enc.encode(&self.coins)?;
        enc.encode(&self.pub_key)?;
        enc.encode(&self.account_number())?;
        enc.encode(&self.sequence)
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let address = dec.take_bytes()?;
        let address = if address.is_empty() {
            None
        } else {
            let address = AccAddress::from_slice(&address)
                .map_err(|e| CodecError::InvalidValue(e.to_string()))?;
            Some(address)
        };

        Ok(Self {
            address,
            coins: dec.decode()?,
            pub_key: dec.decode()?,
            account_number: Some(dec.decode()?),
            sequence: dec.decode()?,
        })
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        let mut obj = ObjectWriter::new(registry);
        obj.raw(
            "address",
            Value::String(self.address.map(|a| a.to_string()).unwrap_or_default()),
        )
        .field("coins", &self.coins)?
        .field("public_key", &self.pub_key)?
        .field("account_number", &self.account_number())?
        .field("sequence", &self.sequence)?;
        Ok(obj.finish())
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        let mut obj = ObjectReader::new(value, "BaseAccount", registry)?;
        let address: String = obj.field("address")?;
        let address = if address.is_empty() {
            None
        } else {
            Some(
                address
                    .parse::<AccAddress>()
                    .map_err(|e| CodecError::InvalidValue(e.to_string()))?,
            )
        };

        Ok(Self {
            address,
            coins: obj.field("coins")?,
            pub_key: obj.field("public_key")?,
            account_number: Some(obj.field("account_number")?),
            sequence: obj.field("sequence")?,
        })
    }
}

impl Concrete for BaseAccount {}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register_interface::<dyn GenesisAccount>("GenesisAccount")?
        .register_interface::<dyn Account>("Account")?
        .register_concrete::<BaseAccount>(BASE_ACCOUNT_TAG)?
        .register_implementation::<dyn Account, BaseAccount>(|acc| Box::new(acc))?
        .register_implementation::<dyn GenesisAccount, BaseAccount>(|acc| Box::new(acc))?;
    Ok(())
}
