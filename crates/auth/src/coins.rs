// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token balances.

use lazy_static::lazy_static;
use parity_scale_codec::{Decode, Encode, Input};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

lazy_static! {
    static ref DENOM_RE: Regex = Regex::new(r"^[a-z][a-z0-9/]{2,127}$").expect("valid denom regex");
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoinsError {
    #[error("invalid denomination '{0}'")]
    InvalidDenom(String),

    #[error("duplicate denomination '{0}'")]
    DuplicateDenom(String),

    #[error("amount of '{0}' overflows")]
    Overflow(String),

    #[error("insufficient '{denom}': have {available}, need {requested}")]
    Insufficient {
        denom: String,
        available: u128,
        requested: u128,
    },
}

pub fn validate_denom(denom: &str) -> Result<(), CoinsError> {
    if DENOM_RE.is_match(denom) {
        Ok(())
    } else {
        Err(CoinsError::InvalidDenom(denom.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "crate::codec::json::decimal_string")]
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Result<Self, CoinsError> {
        let denom = denom.into();
        validate_denom(&denom)?;
        Ok(Self { denom, amount })
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins sorted by denomination, each denomination at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new(mut coins: Vec<Coin>) -> Result<Self, CoinsError> {
        for coin in &coins {
            validate_denom(&coin.denom)?;
        }
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        if let Some(pair) = coins.windows(2).find(|pair| pair[0].denom == pair[1].denom) {
            return Err(CoinsError::DuplicateDenom(pair[0].denom.clone()));
        }
        Ok(Self(coins))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .binary_search_by(|coin| coin.denom.as_str().cmp(denom))
            .map(|idx| self.0[idx].amount)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn is_all_positive(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(Coin::is_positive)
    }

    pub fn checked_add(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut sums: BTreeMap<&str, u128> =
            self.0.iter().map(|c| (c.denom.as_str(), c.amount)).collect();
        for coin in &other.0 {
            let entry = sums.entry(coin.denom.as_str()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .ok_or_else(|| CoinsError::Overflow(coin.denom.clone()))?;
        }
        Ok(Self(
            sums.into_iter()
                .map(|(denom, amount)| Coin {
                    denom: denom.to_string(),
                    amount,
                })
                .collect(),
        ))
    }

    /// Subtract `other`, dropping denominations that reach zero.
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut rest: BTreeMap<&str, u128> =
            self.0.iter().map(|c| (c.denom.as_str(), c.amount)).collect();
        for coin in &other.0 {
            let available = rest.get(coin.denom.as_str()).copied().unwrap_or(0);
            let left = available
                .checked_sub(coin.amount)
                .ok_or_else(|| CoinsError::Insufficient {
                    denom: coin.denom.clone(),
                    available,
                    requested: coin.amount,
                })?;
            rest.insert(coin.denom.as_str(), left);
        }
        Ok(Self(
            rest.into_iter()
                .filter(|(_, amount)| *amount > 0)
                .map(|(denom, amount)| Coin {
                    denom: denom.to_string(),
                    amount,
                })
                .collect(),
        ))
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinsError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Decode for Coins {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let coins = Vec::<Coin>::decode(input)?;
        Coins::new(coins).map_err(|_| "invalid coin set".into())
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, coin) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

crate::codec::impl_codable_plain!(Coin, Coins);
