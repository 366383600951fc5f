//! # Identified Records
//!
//! `Room2D`, `Story`, `Building`, `ContextShade` and `Model` each carry an
//! `identifier`, an optional `display_name` and optional free-form
//! `user_data`. The fields are declared on every record rather than
//! flattened in, because flattening disables unknown-field rejection.
//!
//! This module also holds the small shared field types: the
//! `Autocalculate` sentinel, numbers that may be autocalculated, and the
//! pass-through objects of the energy and radiance libraries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dfs_core::{
    Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate,
    ValidationContext,
};

/// Bounds on a record identifier.
pub const IDENTIFIER: Constraints = Constraints::new().length(1, 100).pattern("^[.A-Za-z0-9_-]+$");

/// Bounds on a by-name reference to a library object.
pub const OBJECT_NAME: Constraints = Constraints::new().length(1, 100);

/// The three identity field descriptors, in declaration order.
pub fn identity_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::required(
            "identifier",
            FieldType::String(IDENTIFIER),
            "Text string for a unique object ID. This identifier remains constant as \
             the object is mutated, copied, and serialized to different formats. Must \
             be < 100 characters and not contain any spaces or special characters.",
        ),
        FieldDescriptor::optional(
            "display_name",
            FieldType::string(),
            "Display name of the object with no character restrictions.",
        ),
        FieldDescriptor::optional(
            "user_data",
            FieldType::Object,
            "Optional dictionary of user data associated with the object. All keys and \
             values of this dictionary should be of a standard data type to ensure \
             correct serialization of the object (eg. str, float, int, list).",
        ),
    ]
}

/// Check the identity fields of the record at the current path.
pub fn validate_identity(ctx: &mut ValidationContext, identifier: &str) {
    ctx.string("identifier", identifier, &IDENTIFIER);
}

/// Sentinel noting that a value is derived from the rest of the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Autocalculate {
    /// Always `Autocalculate`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Autocalculate>,
}

impl SchemaType for Autocalculate {
    const TYPE_NAME: &'static str = "Autocalculate";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Autocalculate"),
            "Autocalculate the value.",
            Vec::new(),
        )
    }
}

impl Validate for Autocalculate {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

/// A number that may instead be left to [`Autocalculate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoNumber {
    /// Derive the value.
    Autocalculate(Autocalculate),
    /// Explicit value.
    Number(f64),
}

impl Default for AutoNumber {
    fn default() -> Self {
        Self::Autocalculate(Autocalculate::default())
    }
}

impl AutoNumber {
    /// The explicit value, if one was given.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Autocalculate(_) => None,
            Self::Number(v) => Some(*v),
        }
    }

    /// Schema field type with `constraints` on the numeric alternative.
    pub fn field_type(constraints: Constraints) -> FieldType {
        FieldType::Union(vec![
            FieldType::reference::<Autocalculate>(),
            FieldType::Number(constraints),
        ])
    }

    /// Default value as published in the schema.
    pub fn default_value() -> Value {
        serde_json::json!({ "type": Autocalculate::TYPE_NAME })
    }

    /// Check the numeric alternative against `constraints`.
    pub fn check(&self, ctx: &mut ValidationContext, name: &str, constraints: &Constraints) {
        if let Self::Number(v) = self {
            ctx.number(name, *v, constraints);
        }
    }
}

/// An object from an external library (constructions, modifiers, ...)
/// carried through unchanged. It must at least name its `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ExternalObject(Map<String, Value>);

impl ExternalObject {
    /// The object's `type` value.
    pub fn type_name(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    /// The raw fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Map<String, Value>> for ExternalObject {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        match map.get("type") {
            Some(Value::String(_)) => Ok(Self(map)),
            Some(other) => Err(format!("library object \"type\" must be a string, found {other}")),
            None => Err("library object is missing its \"type\" field".to_string()),
        }
    }
}

impl From<ExternalObject> for Map<String, Value> {
    fn from(object: ExternalObject) -> Self {
        object.0
    }
}
