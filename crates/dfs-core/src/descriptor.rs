//! # Type Descriptors
//!
//! Every record and enum in the schema describes itself with a
//! [`TypeDescriptor`]: its schema name, the Rust path that defines it, a
//! description, and either its fields or its enum values. The document
//! generator works only from these descriptors, so it never needs to know
//! the concrete Rust types.
//!
//! Descriptors are collected in a [`TypeRegistry`]. The registry refuses
//! two different definitions under the same schema name, which would
//! otherwise silently shadow one another in the published document.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::constraint::Constraints;
use crate::error::RegistryError;
use crate::geometry::{POINT_2D, POINT_3D, POLYGON};

/// A type that publishes a schema definition.
pub trait SchemaType {
    /// Schema name, also the value of the record's `type` discriminator.
    const TYPE_NAME: &'static str;

    /// Describe the type for the document generator.
    fn describe() -> TypeDescriptor;
}

/// Schema-level description of one named type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Schema name (`Room2D`).
    pub name: &'static str,
    /// Fully qualified Rust path of the defining type.
    pub qualified_name: &'static str,
    /// Human-readable description published with the schema.
    pub description: &'static str,
    /// Record or enum body.
    pub kind: TypeKind,
}

/// Body of a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// A record with named fields.
    Record(RecordDescriptor),
    /// A closed set of string values.
    Enum(EnumDescriptor),
}

/// Fields and inheritance of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    /// Name of the record this one extends, if any.
    pub base: Option<&'static str>,
    /// Abstract records are never instantiated and carry no discriminator.
    pub is_abstract: bool,
    /// Fields declared by this record, excluding inherited ones and the
    /// `type` discriminator.
    pub fields: Vec<FieldDescriptor>,
}

/// Values of an enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Allowed values, in declaration order.
    pub values: &'static [&'static str],
}

impl TypeDescriptor {
    /// Describe a concrete record.
    pub fn record(
        name: &'static str,
        qualified_name: &'static str,
        description: &'static str,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            name,
            qualified_name,
            description,
            kind: TypeKind::Record(RecordDescriptor {
                base: None,
                is_abstract: false,
                fields,
            }),
        }
    }

    /// Describe an abstract record that only exists to be extended.
    pub fn abstract_record(
        name: &'static str,
        qualified_name: &'static str,
        description: &'static str,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        let mut descriptor = Self::record(name, qualified_name, description, fields);
        if let TypeKind::Record(record) = &mut descriptor.kind {
            record.is_abstract = true;
        }
        descriptor
    }

    /// Describe an enum.
    pub fn enumeration(
        name: &'static str,
        qualified_name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            qualified_name,
            description,
            kind: TypeKind::Enum(EnumDescriptor { values }),
        }
    }

    /// Declare the record this one extends. No effect on enums.
    pub fn extends(mut self, base: &'static str) -> Self {
        if let TypeKind::Record(record) = &mut self.kind {
            record.base = Some(base);
        }
        self
    }

    /// The record body, if this is a record.
    pub fn as_record(&self) -> Option<&RecordDescriptor> {
        match &self.kind {
            TypeKind::Record(record) => Some(record),
            TypeKind::Enum(_) => None,
        }
    }

    /// The base record name, if any.
    pub fn base(&self) -> Option<&'static str> {
        self.as_record().and_then(|r| r.base)
    }

    /// Names of every type referenced by this type's own fields, in field
    /// order. Base types are not included.
    pub fn field_references(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if let Some(record) = self.as_record() {
            for field in &record.fields {
                field.ty.collect_references(&mut out);
            }
        }
        out
    }
}

/// One field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Serialized field name.
    pub name: &'static str,
    /// Value type and its constraints.
    pub ty: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Value used when the field is absent.
    pub default: Option<Value>,
    /// Human-readable description.
    pub description: &'static str,
    /// Field is informational and published as `readOnly`.
    pub read_only: bool,
}

impl FieldDescriptor {
    /// A field that must be supplied.
    pub fn required(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            required: true,
            default: None,
            description,
            read_only: false,
        }
    }

    /// A field that may be omitted.
    pub fn optional(name: &'static str, ty: FieldType, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, ty, description)
        }
    }

    /// Attach the default used when the field is omitted.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark the field read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// Value type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Floating point number.
    Number(Constraints),
    /// Integer.
    Integer(Constraints),
    /// Boolean flag.
    Boolean,
    /// String.
    String(Constraints),
    /// Free-form JSON object.
    Object,
    /// Homogeneous list.
    Array {
        /// Item type.
        items: Box<FieldType>,
        /// Item-count bounds.
        constraints: Constraints,
    },
    /// A named record or enum.
    Ref(&'static str),
    /// One of several alternatives.
    Union(Vec<FieldType>),
    /// A value that may also be `null`.
    Nullable(Box<FieldType>),
}

impl FieldType {
    /// Unconstrained number.
    pub const fn number() -> Self {
        Self::Number(Constraints::NONE)
    }

    /// Unconstrained string.
    pub const fn string() -> Self {
        Self::String(Constraints::NONE)
    }

    /// List of `items` without count bounds.
    pub fn array(items: FieldType) -> Self {
        Self::array_with(items, Constraints::NONE)
    }

    /// List of `items` with count bounds.
    pub fn array_with(items: FieldType, constraints: Constraints) -> Self {
        Self::Array {
            items: Box::new(items),
            constraints,
        }
    }

    /// Reference to a named type.
    pub fn reference<T: SchemaType>() -> Self {
        Self::Ref(T::TYPE_NAME)
    }

    /// Allow `null` in addition to `self`.
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    /// A 2D point (`[x, y]`).
    pub fn point2d() -> Self {
        Self::array_with(Self::number(), POINT_2D)
    }

    /// A 3D point (`[x, y, z]`).
    pub fn point3d() -> Self {
        Self::array_with(Self::number(), POINT_3D)
    }

    /// A closed loop of at least three 2D points.
    pub fn polygon2d() -> Self {
        Self::array_with(Self::point2d(), POLYGON)
    }

    /// A closed loop of at least three 3D points.
    pub fn polygon3d() -> Self {
        Self::array_with(Self::point3d(), POLYGON)
    }

    /// Append every named type reachable through this field type.
    pub fn collect_references(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::Ref(name) => out.push(*name),
            Self::Array { items, .. } => items.collect_references(out),
            Self::Nullable(inner) => inner.collect_references(out),
            Self::Union(alternatives) => {
                for alt in alternatives {
                    alt.collect_references(out);
                }
            }
            Self::Number(_) | Self::Integer(_) | Self::Boolean | Self::String(_) | Self::Object => {}
        }
    }
}

/// Set of type descriptors keyed by schema name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`'s descriptor.
    pub fn register<T: SchemaType>(&mut self) -> Result<&mut Self, RegistryError> {
        self.insert(T::describe())
    }

    /// Register a descriptor.
    ///
    /// Re-registering an identical descriptor is a no-op. A different
    /// definition under an already registered name is rejected.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Result<&mut Self, RegistryError> {
        if let Some(existing) = self.types.get(descriptor.name) {
            if existing.qualified_name == descriptor.qualified_name && *existing == descriptor {
                return Ok(self);
            }
            return Err(RegistryError::DuplicateTypeName {
                name: descriptor.name.to_string(),
                existing: existing.qualified_name.to_string(),
                incoming: descriptor.qualified_name.to_string(),
            });
        }
        tracing::trace!(name = descriptor.name, "registered schema type");
        self.types.insert(descriptor.name, descriptor);
        Ok(self)
    }

    /// Look up a descriptor by schema name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Window;
    impl SchemaType for Window {
        const TYPE_NAME: &'static str = "Window";
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record(
                Self::TYPE_NAME,
                concat!(module_path!(), "::Window"),
                "A window.",
                vec![
                    FieldDescriptor::required("width", FieldType::Number(Constraints::new().gt(0.0)), "Width."),
                    FieldDescriptor::optional("frame", FieldType::Ref("Frame").nullable(), "Frame."),
                ],
            )
        }
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::new();
        registry.register::<Window>().unwrap().register::<Window>().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Window"));
    }

    #[test]
    fn conflicting_definition_is_rejected() {
        let mut registry = TypeRegistry::new();
        registry.register::<Window>().unwrap();
        let other = TypeDescriptor::record("Window", "elsewhere::Window", "Another window.", Vec::new());
        let err = registry.insert(other).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateTypeName {
                name: "Window".to_string(),
                existing: Window::describe().qualified_name.to_string(),
                incoming: "elsewhere::Window".to_string(),
            }
        );
    }

    #[test]
    fn field_references_walk_nested_types() {
        let ty = FieldType::array(FieldType::Union(vec![
            FieldType::Ref("A"),
            FieldType::Ref("B").nullable(),
        ]));
        let mut out = Vec::new();
        ty.collect_references(&mut out);
        assert_eq!(out, vec!["A", "B"]);
        assert_eq!(Window::describe().field_references(), vec!["Frame"]);
    }

    #[test]
    fn abstract_record_with_base() {
        let d = TypeDescriptor::abstract_record("_Base", "x::_Base", "", Vec::new()).extends("Root");
        let record = d.as_record().unwrap();
        assert!(record.is_abstract);
        assert_eq!(d.base(), Some("Root"));
    }

    #[test]
    fn optional_field_keeps_metadata() {
        let f = FieldDescriptor::optional("offset", FieldType::number(), "Offset.")
            .with_default(serde_json::json!(1.0))
            .read_only();
        assert!(!f.required);
        assert!(f.read_only);
        assert_eq!(f.default, Some(serde_json::json!(1.0)));
    }
}
