// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account addresses and their bech32 text form.

use bech32::{Bech32, Hrp};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address string")]
    Empty,

    #[error("invalid bech32 address: {0}")]
    InvalidBech32(String),

    #[error("invalid address prefix: expected '{expected}', found '{found}'")]
    WrongPrefix { expected: &'static str, found: String },

    #[error("invalid address length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct AccAddress([u8; AccAddress::LEN]);

impl AccAddress {
    pub const LEN: usize = 20;
    pub const BECH32_HRP: &'static str = "cosmos";

    const HRP: Hrp = Hrp::parse_unchecked(Self::BECH32_HRP);

    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| AddressError::InvalidLength {
            expected: Self::LEN,
            found: bytes.len(),
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn to_bech32(&self) -> String {
        // Encoding only fails for payloads longer than bech32 allows.
        bech32::encode::<Bech32>(Self::HRP, &self.0).unwrap_or_default()
    }

    pub fn from_bech32(text: &str) -> Result<Self, AddressError> {
        if text.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, data) =
            bech32::decode(text).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
        if hrp.to_lowercase() != Self::BECH32_HRP {
            return Err(AddressError::WrongPrefix {
                expected: Self::BECH32_HRP,
                found: hrp.to_string(),
            });
        }
        Self::from_slice(&data)
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl fmt::Debug for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccAddress({})", self.to_bech32())
    }
}

impl FromStr for AccAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl From<[u8; AccAddress::LEN]> for AccAddress {
    fn from(bytes: [u8; AccAddress::LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for AccAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> Deserialize<'de> for AccAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

crate::codec::impl_codable_plain!(AccAddress);
