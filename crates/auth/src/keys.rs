// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Public keys held by accounts and transaction signatures.

use crate::address::AccAddress;
use crate::codec::{
    Codable, CodecError, Concrete, Decoder, Encoder, Polymorphic, Registry, RegistryBuilder,
    RegistryError, impl_codable_interface, json,
};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use ripemd::Ripemd160;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

pub const ED25519_TAG: &str = "tendermint/PubKeyEd25519";
pub const SECP256K1_TAG: &str = "tendermint/PubKeySecp256k1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid {kind} public key length: expected {expected} bytes, found {found}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid secp256k1 compressed key prefix 0x{0:02x}")]
    InvalidSecp256k1Prefix(u8),
}

/// A public key able to derive the address it controls.
pub trait PubKey: Polymorphic + fmt::Display {
    fn bytes(&self) -> &[u8];

    fn address(&self) -> AccAddress;

    /// Check `signature` over `msg`. Unsupported schemes never verify.
    fn verify_bytes(&self, msg: &[u8], signature: &[u8]) -> bool;

    fn clone_box(&self) -> Box<dyn PubKey>;
}

impl PartialEq for dyn PubKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_any().type_id() == other.as_any().type_id() && self.bytes() == other.bytes()
    }
}

impl Eq for dyn PubKey {}

impl Clone for Box<dyn PubKey> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl_codable_interface!(PubKey);

/// Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubKeyEd25519([u8; PubKeyEd25519::LEN]);

impl PubKeyEd25519 {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes = bytes.try_into().map_err(|_| KeyError::InvalidLength {
            kind: "ed25519",
            expected: Self::LEN,
            found: bytes.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl PubKey for PubKeyEd25519 {
    fn bytes(&self) -> &[u8] {
        &self.0
    }

    fn address(&self) -> AccAddress {
        let digest = Sha256::digest(self.0);
        let mut address = [0u8; AccAddress::LEN];
        address.copy_from_slice(&digest[..AccAddress::LEN]);
        AccAddress::new(address)
    }

    fn verify_bytes(&self, msg: &[u8], signature: &[u8]) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        key.verify(msg, &signature).is_ok()
    }

    fn clone_box(&self) -> Box<dyn PubKey> {
        Box::new(*self)
    }
}

/// Compressed secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PubKeySecp256k1([u8; PubKeySecp256k1::LEN]);

impl PubKeySecp256k1 {
    pub const LEN: usize = 33;

    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|_| KeyError::InvalidLength {
            kind: "secp256k1",
            expected: Self::LEN,
            found: bytes.len(),
        })?;
        match bytes[0] {
            0x02 | 0x03 => Ok(Self(bytes)),
            other => Err(KeyError::InvalidSecp256k1Prefix(other)),
        }
    }
}

impl PubKey for PubKeySecp256k1 {
    fn bytes(&self) -> &[u8] {
        &self.0
    }

    fn address(&self) -> AccAddress {
        let digest = Ripemd160::digest(Sha256::digest(self.0));
        let mut address = [0u8; AccAddress::LEN];
        address.copy_from_slice(&digest);
        AccAddress::new(address)
    }

    fn verify_bytes(&self, _msg: &[u8], _signature: &[u8]) -> bool {
        false
    }

    fn clone_box(&self) -> Box<dyn PubKey> {
        Box::new(*self)
    }
}

macro_rules! impl_key_common {
    ($($ty:ident),+) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{{{}}}", stringify!($ty), hex::encode_upper(self.0))
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        impl Codable for $ty {
            fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
                enc.put_bytes(&self.0);
                Ok(())
            }

            fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
                let bytes = dec.take_bytes()?;
                Self::from_slice(&bytes).map_err(|e| CodecError::InvalidValue(e.to_string()))
            }

            fn encode_json(&self, _registry: &Registry) -> Result<Value, CodecError> {
                Ok(json::base64_value(&self.0))
            }

            fn decode_json(value: Value, _registry: &Registry) -> Result<Self, CodecError> {
                let bytes = json::base64_from_value(value)?;
                Self::from_slice(&bytes).map_err(|e| CodecError::InvalidValue(e.to_string()))
            }
        }

        impl Concrete for $ty {}
    )+};
}

impl_key_common!(PubKeyEd25519, PubKeySecp256k1);

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .register_interface::<dyn PubKey>("PubKey")?
        .register_concrete::<PubKeyEd25519>(ED25519_TAG)?
        .register_implementation::<dyn PubKey, PubKeyEd25519>(|key| Box::new(key))?
        .register_concrete::<PubKeySecp256k1>(SECP256K1_TAG)?
        .register_implementation::<dyn PubKey, PubKeySecp256k1>(|key| Box::new(key))?;
    Ok(())
}
