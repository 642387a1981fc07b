// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Binary framing on top of SCALE.
//!
//! Plain values use their SCALE encoding. A polymorphic value is framed as
//! `Compact<u32>(len) ‖ prefix ‖ body`, where `len` covers the prefix and the
//! body, so a decoder always knows where the value ends before resolving its
//! type.

use super::error::CodecError;
use super::registry::{PREFIX_LEN, Prefix, Registry};
use super::{Codable, Polymorphic};
use parity_scale_codec::{Compact, Decode, Encode};

/// Writes the binary form of a value.
pub struct Encoder<'a> {
    registry: &'a Registry,
    buf: Vec<u8>,
}

impl<'a> Encoder<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            buf: Vec::new(),
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Append the SCALE encoding of a plain value.
    pub fn put<T: Encode + ?Sized>(&mut self, value: &T) {
        value.encode_to(&mut self.buf);
    }

    /// Append a length-prefixed byte string.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        bytes.encode_to(&mut self.buf);
    }

    pub(crate) fn put_prefix(&mut self, prefix: &Prefix) {
        self.buf.extend_from_slice(prefix);
    }

    /// Append a value through its [`Codable`] implementation.
    pub fn encode<T: Codable>(&mut self, value: &T) -> Result<(), CodecError> {
        value.encode_binary(self)
    }

    /// Append a polymorphic value, framed with the prefix of its registered type.
    pub fn put_interface<I>(&mut self, value: &I) -> Result<(), CodecError>
    where
        I: ?Sized + Polymorphic,
    {
        let info = self.registry.concrete_of(value)?;

        let mut frame = Encoder::new(self.registry);
        frame.put_prefix(&info.prefix);
        value.encode_binary_body(&mut frame)?;

        let len =
            u32::try_from(frame.buf.len()).map_err(|_| CodecError::TooLarge(frame.buf.len()))?;
        Compact(len).encode_to(&mut self.buf);
        self.buf.extend_from_slice(&frame.buf);
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads the binary form of a value.
pub struct Decoder<'a> {
    registry: &'a Registry,
    input: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a Registry, input: &'a [u8]) -> Self {
        Self { registry, input }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    /// Read a plain SCALE value.
    pub fn take<T: Decode>(&mut self) -> Result<T, CodecError> {
        Ok(T::decode(&mut self.input)?)
    }

    /// Read a length-prefixed byte string.
    pub fn take_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        self.take::<Vec<u8>>()
    }

    /// Read a value through its [`Codable`] implementation.
    pub fn decode<T: Codable>(&mut self) -> Result<T, CodecError> {
        T::decode_binary(self)
    }

    pub(crate) fn take_prefix(&mut self) -> Result<Prefix, CodecError> {
        if self.input.len() < PREFIX_LEN {
            return Err(CodecError::UnexpectedEnd("type prefix"));
        }
        let (head, rest) = self.input.split_at(PREFIX_LEN);
        let mut prefix = [0u8; PREFIX_LEN];
        prefix.copy_from_slice(head);
        self.input = rest;
        Ok(prefix)
    }

    /// Read a prefixed value of the expected registered type.
    pub(crate) fn expect_prefix(&mut self, expected: &Prefix) -> Result<(), CodecError> {
        let found = self.take_prefix()?;
        if &found == expected {
            return Ok(());
        }

        let expected = self
            .registry
            .tag_for_prefix(expected)
            .map(str::to_string)
            .unwrap_or_else(|| hex::encode(expected));
        match self.registry.tag_for_prefix(&found) {
            Some(found) => Err(CodecError::PrefixMismatch {
                expected,
                found: found.to_string(),
            }),
            None => Err(CodecError::UnknownPrefix(hex::encode(found))),
        }
    }

    /// Read a polymorphic value and resolve it to an implementation of `I`.
    pub fn take_interface<I>(&mut self) -> Result<Box<I>, CodecError>
    where
        I: ?Sized + 'static,
    {
        let Compact(declared) = self.take::<Compact<u32>>()?;
        let len = declared as usize;
        if len > self.input.len() {
            return Err(CodecError::LengthOverflow {
                declared,
                available: self.input.len(),
            });
        }

        let (frame, rest) = self.input.split_at(len);
        self.input = rest;

        let mut frame = Decoder::new(self.registry, frame);
        let prefix = frame.take_prefix()?;
        let value = self.registry.decode_binary_as::<I>(prefix, &mut frame)?;
        frame.finish()?;
        Ok(value)
    }

    /// Fail if any input is left unread.
    pub fn finish(&self) -> Result<(), CodecError> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes(self.input.len()))
        }
    }
}
