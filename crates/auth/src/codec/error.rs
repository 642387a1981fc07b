// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Errors raised while encoding or decoding values through the [`Codec`](super::Codec).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("binary decoding failed: {0}")]
    Binary(#[from] parity_scale_codec::Error),

    #[error("{0} unread bytes remain after decoding")]
    TrailingBytes(usize),

    #[error("length prefix {declared} exceeds the {available} remaining bytes")]
    LengthOverflow { declared: u32, available: usize },

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),

    #[error("no type registered for prefix 0x{0}")]
    UnknownPrefix(String),

    #[error("no type registered under tag '{0}'")]
    UnknownTag(String),

    #[error("expected type '{expected}' but found '{found}'")]
    PrefixMismatch { expected: String, found: String },

    #[error("type {0} is not registered with the codec")]
    UnregisteredType(&'static str),

    #[error("interface {0} is not registered with the codec")]
    UnknownInterface(&'static str),

    #[error("type '{tag}' is not registered as an implementation of {interface}")]
    NotImplemented { interface: &'static str, tag: String },

    #[error("encoded value of {0} bytes does not fit a length prefix")]
    TooLarge(usize),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed type envelope: {0}")]
    MalformedEnvelope(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("{context}.{field}: {source}")]
    Field {
        context: &'static str,
        field: &'static str,
        #[source]
        source: Box<CodecError>,
    },
}

/// Errors raised while populating a [`RegistryBuilder`](super::RegistryBuilder).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("interface {0} is already registered")]
    DuplicateInterface(&'static str),

    #[error("type {0} is already registered")]
    DuplicateType(&'static str),

    #[error("tag '{0}' is already registered")]
    DuplicateTag(String),

    #[error("tag '{tag}' collides with the prefix of '{existing}'")]
    PrefixCollision { tag: String, existing: String },

    #[error("interface {0} must be registered before its implementations")]
    UnknownInterface(&'static str),

    #[error("type {0} must be registered before it can implement an interface")]
    UnknownConcrete(&'static str),

    #[error("type '{tag}' already implements {interface}")]
    DuplicateImplementation { interface: &'static str, tag: String },
}
