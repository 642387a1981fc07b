// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account schema, genesis state and signed transactions of the auth module,
//! together with the type-registered codec used to move them across the wire.

pub mod account;
pub mod address;
pub mod codec;
pub mod coins;
pub mod genesis;
pub mod keys;
pub mod tx;

pub use account::{Account, AccountError, BaseAccount, GenesisAccount};
pub use address::{AccAddress, AddressError};
pub use codec::{Codec, CodecError, Registry, RegistryBuilder, RegistryError};
pub use coins::{Coin, Coins, CoinsError};
pub use genesis::{GenesisAccounts, GenesisError, GenesisState, MODULE_NAME, Params};
pub use keys::{KeyError, PubKey, PubKeyEd25519, PubKeySecp256k1};
pub use tx::{Msg, MsgSend, StdFee, StdSignature, StdTx, TxError};

/// Register every interface and concrete type of this crate.
pub fn register_codec(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    keys::register(builder)?;
    account::register(builder)?;
    tx::register(builder)?;
    Ok(())
}

/// A sealed codec holding this crate's registrations.
pub fn default_codec() -> Result<Codec, RegistryError> {
    let mut builder = RegistryBuilder::new();
    register_codec(&mut builder)?;
    Ok(Codec::new(builder.build()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codec_registers_every_type() {
        let codec = default_codec().unwrap();
        assert_eq!(
            codec.registry().tags(),
            [
                "cosmos-sdk/Account",
                "cosmos-sdk/MsgSend",
                "cosmos-sdk/StdTx",
                "tendermint/PubKeyEd25519",
                "tendermint/PubKeySecp256k1",
            ]
        );
        assert_eq!(
            codec.registry().interfaces(),
            ["Account", "GenesisAccount", "Msg", "PubKey"]
        );
        assert!(codec.registry().is_registered::<BaseAccount>());
    }

    #[test]
    fn test_registering_twice_fails() {
        let mut builder = RegistryBuilder::new();
        register_codec(&mut builder).unwrap();
        assert!(register_codec(&mut builder).is_err());
    }
}
