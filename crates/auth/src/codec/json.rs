// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON rendering helpers.
//!
//! Polymorphic values travel as `{"type": "<tag>", "value": <body>}`. Objects
//! are written in field declaration order, so identical values always render
//! to identical bytes.

use super::error::CodecError;
use super::registry::Registry;
use super::{Codable, Polymorphic};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map, Value};

pub const TYPE_FIELD: &str = "type";
pub const VALUE_FIELD: &str = "value";

/// Wrap a body in a type envelope.
pub fn envelope(tag: &str, body: Value) -> Value {
    let mut map = Map::with_capacity(2);
    map.insert(TYPE_FIELD.to_string(), Value::String(tag.to_string()));
    map.insert(VALUE_FIELD.to_string(), body);
    Value::Object(map)
}

/// Split a type envelope into its tag and body.
pub fn open_envelope(value: Value) -> Result<(String, Value), CodecError> {
    let Value::Object(mut map) = value else {
        return Err(CodecError::MalformedEnvelope(
            "expected an object with `type` and `value` fields".to_string(),
        ));
    };

    let tag = match map.remove(TYPE_FIELD) {
        Some(Value::String(tag)) => tag,
        Some(_) => {
            return Err(CodecError::MalformedEnvelope(
                "`type` must be a string".to_string(),
            ));
        }
        None => return Err(CodecError::MalformedEnvelope("missing `type`".to_string())),
    };
    let body = map
        .remove(VALUE_FIELD)
        .ok_or_else(|| CodecError::MalformedEnvelope(format!("missing `value` for '{tag}'")))?;

    Ok((tag, body))
}

/// Open an envelope that must carry `expected`.
pub(crate) fn open_envelope_of(value: Value, expected: &str) -> Result<Value, CodecError> {
    let (tag, body) = open_envelope(value)?;
    if tag != expected {
        return Err(CodecError::PrefixMismatch {
            expected: expected.to_string(),
            found: tag,
        });
    }
    Ok(body)
}

pub(crate) fn encode_interface<I>(value: &I, registry: &Registry) -> Result<Value, CodecError>
where
    I: ?Sized + Polymorphic,
{
    let info = registry.concrete_of(value)?;
    let body = value.encode_json_body(registry)?;
    Ok(envelope(&info.tag, body))
}

pub(crate) fn decode_interface<I>(value: Value, registry: &Registry) -> Result<Box<I>, CodecError>
where
    I: ?Sized + 'static,
{
    let (tag, body) = open_envelope(value)?;
    registry.decode_json_as::<I>(&tag, body)
}

/// Builds a JSON object field by field.
pub struct ObjectWriter<'r> {
    registry: &'r Registry,
    map: Map<String, Value>,
}

impl<'r> ObjectWriter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            map: Map::new(),
        }
    }

    pub fn field<T: Codable>(&mut self, name: &str, value: &T) -> Result<&mut Self, CodecError> {
        let value = value.encode_json(self.registry)?;
        self.map.insert(name.to_string(), value);
        Ok(self)
    }

    pub fn raw(&mut self, name: &str, value: Value) -> &mut Self {
        self.map.insert(name.to_string(), value);
        self
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

/// Reads the fields of a JSON object. Missing fields read as `null`; unknown
/// fields are ignored.
pub struct ObjectReader<'r> {
    registry: &'r Registry,
    context: &'static str,
    map: Map<String, Value>,
}

impl<'r> ObjectReader<'r> {
    pub fn new(
        value: Value,
        context: &'static str,
        registry: &'r Registry,
    ) -> Result<Self, CodecError> {
        match value {
            Value::Object(map) => Ok(Self {
                registry,
                context,
                map,
            }),
            other => Err(CodecError::InvalidValue(format!(
                "{context}: expected an object, found {}",
                kind(&other)
            ))),
        }
    }

    pub fn field<T: Codable>(&mut self, name: &'static str) -> Result<T, CodecError> {
        let value = self.map.remove(name).unwrap_or(Value::Null);
        T::decode_json(value, self.registry).map_err(|source| CodecError::Field {
            context: self.context,
            field: name,
            source: Box::new(source),
        })
    }

    pub fn raw(&mut self, name: &str) -> Value {
        self.map.remove(name).unwrap_or(Value::Null)
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serde helpers rendering integers as decimal strings. Decoding accepts
/// either a string or a JSON number.
pub mod decimal_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + From<u64>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text
                .parse::<T>()
                .map_err(|e| D::Error::custom(format!("invalid integer '{text}': {e}"))),
            Repr::Number(n) => Ok(T::from(n)),
        }
    }
}

/// Render bytes as a standard base64 string.
pub fn base64_value(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}

/// Read bytes from a standard base64 string. `null` reads as no bytes.
pub fn base64_from_value(value: Value) -> Result<Vec<u8>, CodecError> {
    match value {
        Value::String(text) => STANDARD
            .decode(text.as_bytes())
            .map_err(|e| CodecError::InvalidValue(format!("invalid base64: {e}"))),
        Value::Null => Ok(Vec::new()),
        other => Err(CodecError::InvalidValue(format!(
            "expected a base64 string, found {}",
            kind(&other)
        ))),
    }
}
