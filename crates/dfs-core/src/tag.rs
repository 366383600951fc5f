//! The `type` discriminator carried by every concrete record.
//!
//! [`TypeTag<R>`] is a zero-sized field that serializes as `R::TYPE_NAME`
//! and refuses any other value on input. Records declare it with
//! `#[serde(rename = "type", default)]`, which gives the required
//! behaviour: an absent `type` defaults to the record's own name, and a
//! present one must match it exactly.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::descriptor::SchemaType;

/// Literal discriminator for record type `R`.
pub struct TypeTag<R>(PhantomData<fn() -> R>);

impl<R> TypeTag<R> {
    /// The tag value.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R: SchemaType> TypeTag<R> {
    /// The discriminator string this tag serializes as.
    pub fn name(&self) -> &'static str {
        R::TYPE_NAME
    }
}

impl<R> Default for TypeTag<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for TypeTag<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for TypeTag<R> {}

impl<R> PartialEq for TypeTag<R> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<R> Eq for TypeTag<R> {}

impl<R: SchemaType> fmt::Debug for TypeTag<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", R::TYPE_NAME)
    }
}

impl<R: SchemaType> Serialize for TypeTag<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(R::TYPE_NAME)
    }
}

impl<'de, R: SchemaType> Deserialize<'de> for TypeTag<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor<R>(PhantomData<fn() -> R>);

        impl<'de, R: SchemaType> Visitor<'de> for TagVisitor<R> {
            type Value = TypeTag<R>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "the string \"{}\"", R::TYPE_NAME)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value == R::TYPE_NAME {
                    Ok(TypeTag::new())
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_str(TagVisitor(PhantomData))
    }
}
