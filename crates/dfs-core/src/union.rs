//! Discriminated unions over record types.
//!
//! A union field accepts any one of a fixed set of records and selects the
//! alternative by the payload's `type` value before decoding the rest of
//! it. [`tagged_union!`](crate::tagged_union) generates the enum, its
//! serde implementations, validation dispatch, and the schema
//! [`FieldType`](crate::FieldType) describing it.

use serde_json::Value;

/// Read the `type` discriminator of an undecoded union payload.
pub fn discriminator(value: &Value) -> Result<&str, String> {
    match value {
        Value::Object(map) => match map.get("type") {
            Some(Value::String(tag)) => Ok(tag),
            Some(other) => Err(format!(
                "discriminator \"type\" must be a string, found {other}"
            )),
            None => Err("missing discriminator field \"type\"".to_string()),
        },
        other => Err(format!(
            "expected an object with a \"type\" discriminator, found {}",
            json_kind(other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Define an enum over record types that dispatches on the `type` field.
///
/// ```ignore
/// tagged_union! {
///     /// A window parameter.
///     pub enum WindowParameter {
///         SingleWindow(SingleWindow),
///         SimpleWindowRatio(SimpleWindowRatio),
///     }
/// }
/// ```
///
/// Every alternative must implement `SchemaType`, `Validate`, and the serde
/// traits. The crate using the macro must depend on `serde` and
/// `serde_json`.
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty), )+
        }

        impl $name {
            /// Discriminator values accepted by this union, in declaration order.
            pub const VARIANTS: &'static [&'static str] =
                &[ $( <$ty as $crate::SchemaType>::TYPE_NAME ),+ ];

            /// The `type` discriminator of the wrapped record.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => <$ty as $crate::SchemaType>::TYPE_NAME, )+
                }
            }

            /// Schema field type listing every alternative.
            pub fn field_type() -> $crate::FieldType {
                $crate::FieldType::Union(::std::vec![
                    $( $crate::FieldType::Ref(<$ty as $crate::SchemaType>::TYPE_NAME) ),+
                ])
            }
        }

        $(
            impl ::std::convert::From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl $crate::Validate for $name {
            fn validate_into(&self, ctx: &mut $crate::ValidationContext) {
                match self {
                    $( Self::$variant(inner) => $crate::Validate::validate_into(inner, ctx), )+
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                match self {
                    $( Self::$variant(inner) => ::serde::Serialize::serialize(inner, serializer), )+
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                use ::serde::de::Error as _;
                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                let tag = $crate::union::discriminator(&value)
                    .map_err(D::Error::custom)?
                    .to_string();
                $(
                    if tag == <$ty as $crate::SchemaType>::TYPE_NAME {
                        return <$ty as ::serde::Deserialize>::deserialize(value)
                            .map(Self::$variant)
                            .map_err(D::Error::custom);
                    }
                )+
                Err(D::Error::custom(::std::format!(
                    "unknown {} type \"{}\", expected one of: {}",
                    stringify!($name),
                    tag,
                    Self::VARIANTS.join(", ")
                )))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use crate::{
        Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate,
        ValidationContext,
    };

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Ratio {
        #[serde(rename = "type", default)]
        type_: TypeTag<Ratio>,
        ratio: f64,
    }

    impl SchemaType for Ratio {
        const TYPE_NAME: &'static str = "Ratio";
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record(
                Self::TYPE_NAME,
                "tests::Ratio",
                "",
                vec![FieldDescriptor::required("ratio", FieldType::number(), "")],
            )
        }
    }

    impl Validate for Ratio {
        fn validate_into(&self, ctx: &mut ValidationContext) {
            ctx.number("ratio", self.ratio, &Constraints::new().gt(0.0).lt(1.0));
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Area {
        #[serde(rename = "type", default)]
        type_: TypeTag<Area>,
        area: f64,
    }

    impl SchemaType for Area {
        const TYPE_NAME: &'static str = "Area";
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record(Self::TYPE_NAME, "tests::Area", "", Vec::new())
        }
    }

    impl Validate for Area {
        fn validate_into(&self, _ctx: &mut ValidationContext) {}
    }

    crate::tagged_union! {
        enum Opening {
            Ratio(Ratio),
            Area(Area),
        }
    }

    #[test]
    fn dispatches_on_type() {
        let o: Opening = serde_json::from_value(json!({"type": "Area", "area": 2.5})).unwrap();
        assert_eq!(o.type_name(), "Area");
        assert!(matches!(o, Opening::Area(Area { area, .. }) if area == 2.5));
    }

    #[test]
    fn unknown_type_lists_alternatives() {
        let err = serde_json::from_value::<Opening>(json!({"type": "Door"})).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown Opening type \"Door\""), "{msg}");
        assert!(msg.contains("Ratio, Area"), "{msg}");
    }

    #[test]
    fn missing_discriminator_rejected() {
        let err = serde_json::from_value::<Opening>(json!({"area": 1.0})).unwrap_err();
        assert!(err.to_string().contains("missing discriminator"));
    }

    #[test]
    fn serializes_inner_record() {
        let o = Opening::from(Ratio {
            type_: TypeTag::new(),
            ratio: 0.4,
        });
        assert_eq!(serde_json::to_value(&o).unwrap(), json!({"type": "Ratio", "ratio": 0.4}));
    }

    #[test]
    fn validation_delegates() {
        let o = Opening::from(Ratio {
            type_: TypeTag::new(),
            ratio: 1.4,
        });
        assert_eq!(o.validate().unwrap_err().len(), 1);
    }

    #[test]
    fn field_type_lists_refs() {
        assert_eq!(
            Opening::field_type(),
            FieldType::Union(vec![FieldType::Ref("Ratio"), FieldType::Ref("Area")])
        );
    }

    #[test]
    fn non_object_payload_rejected() {
        assert!(serde_json::from_value::<Opening>(json!([1, 2])).is_err());
    }
}
