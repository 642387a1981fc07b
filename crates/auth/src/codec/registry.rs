// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type registry shared by the binary and JSON codecs.
//!
//! Registration happens once at startup on a [`RegistryBuilder`]. Calling
//! [`RegistryBuilder::build`] freezes the tables into a [`Registry`], which has
//! no mutating methods and can be shared between request handlers without
//! locking.

use super::binary::Decoder;
use super::error::{CodecError, RegistryError};
use super::{Codable, Polymorphic};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

/// Number of bytes that mark a polymorphic value in the binary form.
pub const PREFIX_LEN: usize = 4;

/// Binary marker derived from a registered tag.
pub type Prefix = [u8; PREFIX_LEN];

/// Derive the binary prefix of a tag: the first four bytes of its SHA-256 digest.
pub fn prefix_for(tag: &str) -> Prefix {
    let digest = Sha256::digest(tag.as_bytes());
    let mut prefix = [0u8; PREFIX_LEN];
    prefix.copy_from_slice(&digest[..PREFIX_LEN]);
    prefix
}

/// Registration record of a concrete type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteInfo {
    pub tag: String,
    pub prefix: Prefix,
    pub type_name: &'static str,
}

type BinaryDecodeFn<I> =
    Box<dyn Fn(&mut Decoder<'_>) -> Result<Box<I>, CodecError> + Send + Sync>;
type JsonDecodeFn<I> = Box<dyn Fn(Value, &Registry) -> Result<Box<I>, CodecError> + Send + Sync>;

struct Implementor<I: ?Sized> {
    decode_binary: BinaryDecodeFn<I>,
    decode_json: JsonDecodeFn<I>,
}

struct InterfaceTable<I: ?Sized> {
    implementors: HashMap<TypeId, Implementor<I>>,
}

struct InterfaceEntry {
    name: &'static str,
    // Always an `InterfaceTable<I>` for the interface keyed by `TypeId::of::<I>()`.
    table: Box<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct Tables {
    interfaces: HashMap<TypeId, InterfaceEntry>,
    concretes: HashMap<TypeId, ConcreteInfo>,
    by_tag: HashMap<String, TypeId>,
    by_prefix: HashMap<Prefix, TypeId>,
}

/// Mutable registry used during startup.
#[derive(Default)]
pub struct RegistryBuilder {
    tables: Tables,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interface (a trait object type such as `dyn PubKey`).
    pub fn register_interface<I>(&mut self, name: &'static str) -> Result<&mut Self, RegistryError>
    where
        I: ?Sized + 'static,
    {
        let key = TypeId::of::<I>();
        if self.tables.interfaces.contains_key(&key) {
            return Err(RegistryError::DuplicateInterface(name));
        }

        self.tables.interfaces.insert(
            key,
            InterfaceEntry {
                name,
                table: Box::new(InterfaceTable::<I> {
                    implementors: HashMap::new(),
                }),
            },
        );
        tracing::debug!(interface = name, "registered interface");
        Ok(self)
    }

    /// Register a concrete type under a unique tag.
    pub fn register_concrete<T>(&mut self, tag: &str) -> Result<&mut Self, RegistryError>
    where
        T: Codable + 'static,
    {
        let key = TypeId::of::<T>();
        if self.tables.concretes.contains_key(&key) {
            return Err(RegistryError::DuplicateType(type_name::<T>()));
        }
        if self.tables.by_tag.contains_key(tag) {
            return Err(RegistryError::DuplicateTag(tag.to_string()));
        }

        let prefix = prefix_for(tag);
        if let Some(existing) = self.tables.by_prefix.get(&prefix) {
            let existing = self
                .tables
                .concretes
                .get(existing)
                .map(|info| info.tag.clone())
                .unwrap_or_default();
            return Err(RegistryError::PrefixCollision {
                tag: tag.to_string(),
                existing,
            });
        }

        self.tables.concretes.insert(
            key,
            ConcreteInfo {
                tag: tag.to_string(),
                prefix,
                type_name: type_name::<T>(),
            },
        );
        self.tables.by_tag.insert(tag.to_string(), key);
        self.tables.by_prefix.insert(prefix, key);
        tracing::debug!(tag, prefix = %hex::encode(prefix), "registered concrete type");
        Ok(self)
    }

    /// Declare that the concrete type `T` implements the interface `I`.
    ///
    /// `upcast` turns a decoded `T` into the interface's trait object, which is
    /// usually written as `|value| Box::new(value)`.
    pub fn register_implementation<I, T>(
        &mut self,
        upcast: fn(T) -> Box<I>,
    ) -> Result<&mut Self, RegistryError>
    where
        I: ?Sized + 'static,
        T: Codable + 'static,
    {
        let concrete = TypeId::of::<T>();
        let tag = self
            .tables
            .concretes
            .get(&concrete)
            .map(|info| info.tag.clone())
            .ok_or(RegistryError::UnknownConcrete(type_name::<T>()))?;

        let entry = self
            .tables
            .interfaces
            .get_mut(&TypeId::of::<I>())
            .ok_or(RegistryError::UnknownInterface(type_name::<I>()))?;
        let interface = entry.name;
        let table = entry
            .table
            .downcast_mut::<InterfaceTable<I>>()
            .ok_or(RegistryError::UnknownInterface(interface))?;

        if table.implementors.contains_key(&concrete) {
            return Err(RegistryError::DuplicateImplementation { interface, tag });
        }

        table.implementors.insert(
            concrete,
            Implementor {
                decode_binary: Box::new(move |dec: &mut Decoder<'_>| {
                    T::decode_binary(dec).map(upcast)
                }),
                decode_json: Box::new(move |value: Value, registry: &Registry| {
                    T::decode_json(value, registry).map(upcast)
                }),
            },
        );
        tracing::debug!(interface, tag = %tag, "registered implementation");
        Ok(self)
    }

    /// Freeze the registrations.
    pub fn build(self) -> Registry {
        Registry {
            tables: self.tables,
        }
    }
}

/// Read-only registry consulted by the codec.
pub struct Registry {
    tables: Tables,
}

impl Registry {
    /// Registration record of a concrete type, if it was registered.
    pub fn concrete(&self, type_id: TypeId) -> Option<&ConcreteInfo> {
        self.tables.concretes.get(&type_id)
    }

    /// Registration record of the concrete type behind a trait object.
    pub fn concrete_of<I>(&self, value: &I) -> Result<&ConcreteInfo, CodecError>
    where
        I: ?Sized + Polymorphic,
    {
        self.concrete(value.as_any().type_id())
            .ok_or(CodecError::UnregisteredType(value.type_name()))
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.tables.concretes.contains_key(&TypeId::of::<T>())
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tables.by_tag.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Registered interface names, sorted.
    pub fn interfaces(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.tables.interfaces.values().map(|e| e.name).collect();
        names.sort_unstable();
        names
    }

    /// Tag registered for a binary prefix.
    pub fn tag_for_prefix(&self, prefix: &Prefix) -> Option<&str> {
        self.tables
            .by_prefix
            .get(prefix)
            .and_then(|id| self.tables.concretes.get(id))
            .map(|info| info.tag.as_str())
    }

    pub(crate) fn decode_binary_as<I>(
        &self,
        prefix: Prefix,
        body: &mut Decoder<'_>,
    ) -> Result<Box<I>, CodecError>
    where
        I: ?Sized + 'static,
    {
        let concrete = self
            .tables
            .by_prefix
            .get(&prefix)
            .copied()
            .ok_or_else(|| CodecError::UnknownPrefix(hex::encode(prefix)))?;
        let implementor = self.implementor::<I>(concrete)?;
        (implementor.decode_binary)(body)
    }

    pub(crate) fn decode_json_as<I>(&self, tag: &str, value: Value) -> Result<Box<I>, CodecError>
    where
        I: ?Sized + 'static,
    {
        let concrete = self
            .tables
            .by_tag
            .get(tag)
            .copied()
            .ok_or_else(|| CodecError::UnknownTag(tag.to_string()))?;
        let implementor = self.implementor::<I>(concrete)?;
        (implementor.decode_json)(value, self)
    }

    fn implementor<I>(&self, concrete: TypeId) -> Result<&Implementor<I>, CodecError>
    where
        I: ?Sized + 'static,
    {
        let entry = self
            .tables
            .interfaces
            .get(&TypeId::of::<I>())
            .ok_or(CodecError::UnknownInterface(type_name::<I>()))?;
        let table = entry
            .table
            .downcast_ref::<InterfaceTable<I>>()
            .ok_or(CodecError::UnknownInterface(entry.name))?;

        table
            .implementors
            .get(&concrete)
            .ok_or_else(|| CodecError::NotImplemented {
                interface: entry.name,
                tag: self
                    .tables
                    .concretes
                    .get(&concrete)
                    .map(|info| info.tag.clone())
                    .unwrap_or_default(),
            })
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("interfaces", &self.interfaces())
            .field("tags", &self.tags())
            .finish()
    }
}
