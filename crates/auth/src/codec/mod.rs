// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type-registered binary and JSON codec.
//!
//! Every value that crosses the wire implements [`Codable`]. Values of an
//! open family (public keys, messages, accounts) are stored as trait objects
//! and resolved through the [`Registry`]: the binary form carries a four byte
//! prefix derived from the registered tag, the JSON form carries the tag in a
//! `{"type", "value"}` envelope. Decoding a prefix or tag that was never
//! registered is an error, never a default value.

mod binary;
mod error;
pub mod json;
mod registry;

pub use binary::{Decoder, Encoder};
pub use error::{CodecError, RegistryError};
pub use registry::{ConcreteInfo, PREFIX_LEN, Prefix, Registry, RegistryBuilder, prefix_for};

use serde_json::Value;
use std::any::{Any, TypeId};
use std::fmt;

/// A value with a canonical binary and JSON form.
pub trait Codable: Sized {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError>;
    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError>;
    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError>;
    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError>;
}

/// Marker for concrete types that may stand behind a registered interface.
pub trait Concrete: Codable + Any + fmt::Debug + Send + Sync {}

/// Object-safe view of a [`Concrete`] value, used by every registered
/// interface trait as a supertrait.
pub trait Polymorphic: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
    fn encode_binary_body(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError>;
    fn encode_json_body(&self, registry: &Registry) -> Result<Value, CodecError>;
}

impl<T: Concrete> Polymorphic for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn encode_binary_body(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        self.encode_binary(enc)
    }

    fn encode_json_body(&self, registry: &Registry) -> Result<Value, CodecError> {
        self.encode_json(registry)
    }
}

/// Borrow the concrete value behind a registered interface.
pub fn downcast_ref<T, I>(value: &I) -> Option<&T>
where
    T: 'static,
    I: ?Sized + Polymorphic,
{
    value.as_any().downcast_ref::<T>()
}

/// Binary and JSON codec bound to a frozen [`Registry`].
///
/// Registered concrete types are prefixed (binary) or enveloped (JSON) at the
/// top level as well, so a payload names its own type.
#[derive(Debug)]
pub struct Codec {
    registry: Registry,
}

impl Codec {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn marshal_binary<T: Codable + 'static>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut enc = Encoder::new(&self.registry);
        if let Some(info) = self.registry.concrete(TypeId::of::<T>()) {
            enc.put_prefix(&info.prefix);
        }
        value.encode_binary(&mut enc)?;
        Ok(enc.into_bytes())
    }

    /// Decode a value from its complete binary form. Unread trailing bytes are
    /// an error.
    pub fn unmarshal_binary<T: Codable + 'static>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let mut dec = Decoder::new(&self.registry, bytes);
        if let Some(info) = self.registry.concrete(TypeId::of::<T>()) {
            dec.expect_prefix(&info.prefix)?;
        }
        let value = T::decode_binary(&mut dec)?;
        dec.finish()?;
        Ok(value)
    }

    pub fn marshal_json_value<T: Codable + 'static>(&self, value: &T) -> Result<Value, CodecError> {
        let body = value.encode_json(&self.registry)?;
        Ok(match self.registry.concrete(TypeId::of::<T>()) {
            Some(info) => json::envelope(&info.tag, body),
            None => body,
        })
    }

    pub fn marshal_json<T: Codable + 'static>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let value = self.marshal_json_value(value)?;
        Ok(serde_json::to_vec(&value)?)
    }

    pub fn unmarshal_json_value<T: Codable + 'static>(
        &self,
        value: Value,
    ) -> Result<T, CodecError> {
        let body = match self.registry.concrete(TypeId::of::<T>()) {
            Some(info) => json::open_envelope_of(value, &info.tag)?,
            None => value,
        };
        T::decode_json(body, &self.registry)
    }

    pub fn unmarshal_json<T: Codable + 'static>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.unmarshal_json_value(value)
    }
}

/// Implements [`Codable`] for types that derive SCALE `Encode`/`Decode` and
/// serde `Serialize`/`Deserialize`.
macro_rules! impl_codable_plain {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::codec::Codable for $ty {
            fn encode_binary(
                &self,
                enc: &mut $crate::codec::Encoder<'_>,
            ) -> Result<(), $crate::codec::CodecError> {
                enc.put(self);
                Ok(())
            }

            fn decode_binary(
                dec: &mut $crate::codec::Decoder<'_>,
            ) -> Result<Self, $crate::codec::CodecError> {
                dec.take::<Self>()
            }

            fn encode_json(
                &self,
                _registry: &$crate::codec::Registry,
            ) -> Result<serde_json::Value, $crate::codec::CodecError> {
                Ok(serde_json::to_value(self)?)
            }

            fn decode_json(
                value: serde_json::Value,
                _registry: &$crate::codec::Registry,
            ) -> Result<Self, $crate::codec::CodecError> {
                Ok(serde_json::from_value(value)?)
            }
        }
    )+};
}
pub(crate) use impl_codable_plain;

/// Implements [`Codable`] for `Box<dyn Interface>` by resolving the concrete
/// type through the registry.
macro_rules! impl_codable_interface {
    ($($iface:path),+ $(,)?) => {$(
        impl $crate::codec::Codable for Box<dyn $iface> {
            fn encode_binary(
                &self,
                enc: &mut $crate::codec::Encoder<'_>,
            ) -> Result<(), $crate::codec::CodecError> {
                enc.put_interface::<dyn $iface>(&**self)
            }

            fn decode_binary(
                dec: &mut $crate::codec::Decoder<'_>,
            ) -> Result<Self, $crate::codec::CodecError> {
                dec.take_interface::<dyn $iface>()
            }

            fn encode_json(
                &self,
                registry: &$crate::codec::Registry,
            ) -> Result<serde_json::Value, $crate::codec::CodecError> {
                $crate::codec::json::encode_interface::<dyn $iface>(&**self, registry)
            }

            fn decode_json(
                value: serde_json::Value,
                registry: &$crate::codec::Registry,
            ) -> Result<Self, $crate::codec::CodecError> {
                $crate::codec::json::decode_interface::<dyn $iface>(value, registry)
            }
        }
    )+};
}
pub(crate) use impl_codable_interface;

impl Codable for u64 {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        enc.put(self);
        Ok(())
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        dec.take::<u64>()
    }

    fn encode_json(&self, _registry: &Registry) -> Result<Value, CodecError> {
        Ok(Value::String(self.to_string()))
    }

    fn decode_json(value: Value, _registry: &Registry) -> Result<Self, CodecError> {
        match &value {
            Value::String(text) => text
                .parse()
                .map_err(|e| CodecError::InvalidValue(format!("invalid integer '{text}': {e}"))),
            Value::Number(n) => n.as_u64().ok_or_else(|| {
                CodecError::InvalidValue(format!("{n} is not an unsigned 64-bit integer"))
            }),
            other => Err(CodecError::InvalidValue(format!(
                "expected an unsigned integer, found {}",
                json::kind(other)
            ))),
        }
    }
}

impl Codable for String {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        enc.put(self);
        Ok(())
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        dec.take::<String>()
    }

    fn encode_json(&self, _registry: &Registry) -> Result<Value, CodecError> {
        Ok(Value::String(self.clone()))
    }

    fn decode_json(value: Value, _registry: &Registry) -> Result<Self, CodecError> {
        match value {
            Value::String(text) => Ok(text),
            Value::Null => Ok(String::new()),
            other => Err(CodecError::InvalidValue(format!(
                "expected a string, found {}",
                json::kind(&other)
            ))),
        }
    }
}

impl<T: Codable> Codable for Vec<T> {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        let len = u32::try_from(self.len()).map_err(|_| CodecError::TooLarge(self.len()))?;
        enc.put(&parity_scale_codec::Compact(len));
        self.iter().try_for_each(|item| item.encode_binary(enc))
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let parity_scale_codec::Compact(len) = dec.take::<parity_scale_codec::Compact<u32>>()?;
        // Every item takes at least one byte, which bounds the allocation.
        let mut items = Vec::with_capacity((len as usize).min(dec.remaining()));
        for _ in 0..len {
            items.push(T::decode_binary(dec)?);
        }
        Ok(items)
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        self.iter()
            .map(|item| item.encode_json(registry))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| T::decode_json(item, registry))
                .collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(CodecError::InvalidValue(format!(
                "expected an array, found {}",
                json::kind(&other)
            ))),
        }
    }
}

impl<T: Codable> Codable for Option<T> {
    fn encode_binary(&self, enc: &mut Encoder<'_>) -> Result<(), CodecError> {
        match self {
            None => {
                enc.put(&0u8);
                Ok(())
            }
            Some(value) => {
                enc.put(&1u8);
                value.encode_binary(enc)
            }
        }
    }

    fn decode_binary(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match dec.take::<u8>()? {
            0 => Ok(None),
            1 => T::decode_binary(dec).map(Some),
            other => Err(CodecError::InvalidValue(format!(
                "invalid option discriminant {other}"
            ))),
        }
    }

    fn encode_json(&self, registry: &Registry) -> Result<Value, CodecError> {
        match self {
            None => Ok(Value::Null),
            Some(value) => value.encode_json(registry),
        }
    }

    fn decode_json(value: Value, registry: &Registry) -> Result<Self, CodecError> {
        match value {
            Value::Null => Ok(None),
            value => T::decode_json(value, registry).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_scale_codec::{Decode, Encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
    struct Ping {
        nonce: u32,
    }

    #[derive(Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
    struct Pong {
        label: String,
    }

    impl_codable_plain!(Ping, Pong);
    impl Concrete for Ping {}
    impl Concrete for Pong {}

    trait Event: Polymorphic {}
    impl Event for Ping {}
    impl Event for Pong {}
    impl_codable_interface!(Event);

    fn registry(with_pong: bool) -> Registry {
        let mut builder = RegistryBuilder::new();
        builder
            .register_interface::<dyn Event>("Event")
            .unwrap()
            .register_concrete::<Ping>("test/Ping")
            .unwrap()
            .register_implementation::<dyn Event, Ping>(|v| Box::new(v))
            .unwrap();
        if with_pong {
            builder
                .register_concrete::<Pong>("test/Pong")
                .unwrap()
                .register_implementation::<dyn Event, Pong>(|v| Box::new(v))
                .unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_interface_round_trips_through_binary_and_json() {
        let codec = Codec::new(registry(true));
        let events: Vec<Box<dyn Event>> = vec![
            Box::new(Ping { nonce: 7 }),
            Box::new(Pong {
                label: "hi".to_string(),
            }),
        ];

        let bytes = codec.marshal_binary(&events).unwrap();
        let decoded: Vec<Box<dyn Event>> = codec.unmarshal_binary(&bytes).unwrap();
        assert_eq!(downcast_ref::<Ping, _>(&*decoded[0]), Some(&Ping { nonce: 7 }));
        assert_eq!(
            downcast_ref::<Pong, _>(&*decoded[1]).map(|p| p.label.as_str()),
            Some("hi")
        );

        let json = codec.marshal_json_value(&events).unwrap();
        assert_eq!(json[0]["type"], "test/Ping");
        assert_eq!(json[0]["value"]["nonce"], 7);
        let back: Vec<Box<dyn Event>> = codec.unmarshal_json_value(json).unwrap();
        assert_eq!(codec.marshal_binary(&back).unwrap(), bytes);
    }

    #[test]
    fn test_unregistered_prefix_is_a_decode_error() {
        let full = Codec::new(registry(true));
        let partial = Codec::new(registry(false));
        let value: Box<dyn Event> = Box::new(Pong {
            label: "x".to_string(),
        });

        let bytes = full.marshal_binary(&value).unwrap();
        let err = partial.unmarshal_binary::<Box<dyn Event>>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnknownPrefix(_)), "{err}");

        let json = full.marshal_json_value(&value).unwrap();
        let err = partial.unmarshal_json_value::<Box<dyn Event>>(json).unwrap_err();
        assert!(matches!(err, CodecError::UnknownTag(tag) if tag == "test/Pong"));
    }

    #[test]
    fn test_encoding_an_unregistered_type_fails() {
        let partial = Codec::new(registry(false));
        let value: Box<dyn Event> = Box::new(Pong {
            label: "x".to_string(),
        });
        assert!(matches!(
            partial.marshal_binary(&value),
            Err(CodecError::UnregisteredType(_))
        ));
        assert!(matches!(
            partial.marshal_json(&value),
            Err(CodecError::UnregisteredType(_))
        ));
    }

    #[test]
    fn test_registered_concrete_is_prefixed_at_top_level() {
        let codec = Codec::new(registry(true));
        let bytes = codec.marshal_binary(&Ping { nonce: 1 }).unwrap();
        assert_eq!(&bytes[..PREFIX_LEN], &prefix_for("test/Ping"));
        assert_eq!(codec.unmarshal_binary::<Ping>(&bytes).unwrap(), Ping { nonce: 1 });

        let err = codec.unmarshal_binary::<Pong>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::PrefixMismatch { .. }), "{err}");
    }

    #[test]
    fn test_trailing_and_truncated_input_is_rejected() {
        let codec = Codec::new(registry(true));
        let mut bytes = codec.marshal_binary(&Ping { nonce: 1 }).unwrap();

        bytes.push(0);
        assert!(matches!(
            codec.unmarshal_binary::<Ping>(&bytes),
            Err(CodecError::TrailingBytes(1))
        ));

        bytes.truncate(bytes.len() - 3);
        assert!(codec.unmarshal_binary::<Ping>(&bytes).is_err());
        assert!(matches!(
            codec.unmarshal_binary::<Ping>(&[1, 2]),
            Err(CodecError::UnexpectedEnd(_))
        ));
    }

    #[test]
    fn test_oversized_length_prefix_is_rejected() {
        let codec = Codec::new(registry(true));
        // Compact(63) followed by only four bytes.
        let bytes = [63 << 2, 0, 0, 0, 0];
        assert!(matches!(
            codec.unmarshal_binary::<Box<dyn Event>>(&bytes),
            Err(CodecError::LengthOverflow { declared: 63, .. })
        ));
    }

    #[test]
    fn test_duplicate_registrations_fail() {
        let mut builder = RegistryBuilder::new();
        builder.register_interface::<dyn Event>("Event").unwrap();
        assert_eq!(
            builder.register_interface::<dyn Event>("Event").err(),
            Some(RegistryError::DuplicateInterface("Event"))
        );

        builder.register_concrete::<Ping>("test/Ping").unwrap();
        assert!(matches!(
            builder.register_concrete::<Ping>("test/Other"),
            Err(RegistryError::DuplicateType(_))
        ));
        assert_eq!(
            builder.register_concrete::<Pong>("test/Ping").err(),
            Some(RegistryError::DuplicateTag("test/Ping".to_string()))
        );

        builder
            .register_implementation::<dyn Event, Ping>(|v| Box::new(v))
            .unwrap();
        assert!(matches!(
            builder.register_implementation::<dyn Event, Ping>(|v| Box::new(v)),
            Err(RegistryError::DuplicateImplementation { .. })
        ));
        assert!(matches!(
            builder.register_implementation::<dyn Event, Pong>(|v| Box::new(v)),
            Err(RegistryError::UnknownConcrete(_))
        ));
    }

    #[test]
    fn test_u64_json_accepts_strings_and_numbers() {
        let registry = registry(false);
        assert_eq!(u64::decode_json(Value::from("42"), &registry).unwrap(), 42);
        assert_eq!(u64::decode_json(Value::from(42u64), &registry).unwrap(), 42);
        assert!(u64::decode_json(Value::from(-1), &registry).is_err());
        assert_eq!(7u64.encode_json(&registry).unwrap(), Value::from("7"));
    }
}
