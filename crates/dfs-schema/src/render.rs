//! # Schema Rendering
//!
//! Turns [`TypeDescriptor`]s into OpenAPI component schemas.
//!
//! Two layouts are supported:
//!
//! - **Flattened.** Every record is a closed object. Fields declared by
//!   its base records are merged in, base first, with a redeclared field
//!   replacing the inherited one in place.
//! - **Inheritance.** Every record is `allOf: [{$ref: Base}, {own
//!   fields}]`, where `Base` is the declared base record or the
//!   synthesized [`BASE_MODEL_NAME`] schema.
//!
//! Unions render as `anyOf` when flattened and as `oneOf` in the
//! inheritance layout, where they may also carry a `discriminator`.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use dfs_core::{FieldDescriptor, FieldType, RecordDescriptor, TypeDescriptor, TypeKind, TypeRegistry};

use crate::error::SchemaError;

/// Name of the synthesized root schema of the inheritance layout.
pub const BASE_MODEL_NAME: &str = "_OpenAPIGenBaseModel";

/// Prefix of every component reference.
pub const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// Name of the discriminator property.
const TYPE_PROPERTY: &str = "type";

/// Human title of a field name: underscores become spaces and each word
/// starts upper case (`room_2ds` becomes `Room 2Ds`).
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn component_ref(name: &str) -> Value {
    json!({ "$ref": format!("{COMPONENT_REF_PREFIX}{name}") })
}

/// Renders descriptors of one registry under one set of layout switches.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRenderer<'a> {
    registry: &'a TypeRegistry,
    inheritance: bool,
    add_discriminator: bool,
}

impl<'a> SchemaRenderer<'a> {
    /// A renderer for the flattened layout.
    pub fn flattened(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            inheritance: false,
            add_discriminator: false,
        }
    }

    /// A renderer for the inheritance layout.
    pub fn inheritance(registry: &'a TypeRegistry, add_discriminator: bool) -> Self {
        Self {
            registry,
            inheritance: true,
            add_discriminator,
        }
    }

    /// Render the component schema of one registered type.
    pub fn render(&self, descriptor: &TypeDescriptor) -> Result<Value, SchemaError> {
        match &descriptor.kind {
            TypeKind::Enum(values) => {
                let mut schema = Map::new();
                schema.insert("title".into(), Value::from(descriptor.name));
                if !descriptor.description.is_empty() {
                    schema.insert("description".into(), Value::from(descriptor.description));
                }
                schema.insert("enum".into(), Value::from(values.values.to_vec()));
                schema.insert("type".into(), Value::from("string"));
                Ok(Value::Object(schema))
            }
            TypeKind::Record(record) if self.inheritance => {
                Ok(self.render_inherited(descriptor, record))
            }
            TypeKind::Record(record) => self.render_flattened(descriptor, record),
        }
    }

    /// The synthesized root of the inheritance layout.
    pub fn base_model(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("title".into(), Value::from(BASE_MODEL_NAME));
        schema.insert("type".into(), Value::from("object"));
        schema.insert(
            "properties".into(),
            json!({ "type": { "title": "Type", "type": "string" } }),
        );
        if self.add_discriminator {
            schema.insert("discriminator".into(), json!({ "propertyName": "type" }));
        }
        Value::Object(schema)
    }

    /// Every record from the root of `descriptor`'s base chain down to
    /// `descriptor` itself.
    pub fn base_chain<'r>(
        &'r self,
        descriptor: &'r TypeDescriptor,
    ) -> Result<Vec<&'r TypeDescriptor>, SchemaError> {
        let mut chain = vec![descriptor];
        let mut current = descriptor;
        while let Some(base) = current.base() {
            if chain.iter().any(|d| d.name == base) {
                break;
            }
            current = self
                .registry
                .get(base)
                .ok_or_else(|| SchemaError::UnknownTypeReference {
                    name: base.to_string(),
                    referenced_by: current.name.to_string(),
                })?;
            chain.push(current);
        }
        chain.reverse();
        Ok(chain)
    }

    fn render_flattened(
        &self,
        descriptor: &TypeDescriptor,
        record: &RecordDescriptor,
    ) -> Result<Value, SchemaError> {
        let mut properties = Map::new();
        let mut required = HashSet::new();
        if !record.is_abstract {
            properties.insert(TYPE_PROPERTY.into(), type_property(descriptor.name));
        }
        for ancestor in self.base_chain(descriptor)? {
            let Some(fields) = ancestor.as_record().map(|r| &r.fields) else {
                continue;
            };
            for field in fields {
                properties.insert(field.name.into(), self.property(field));
                if field.required {
                    required.insert(field.name);
                } else {
                    required.remove(field.name);
                }
            }
        }
        let required: Vec<Value> = properties
            .keys()
            .filter(|name| required.contains(name.as_str()))
            .map(|name| Value::from(name.as_str()))
            .collect();

        let mut schema = Map::new();
        schema.insert("title".into(), Value::from(descriptor.name));
        if !descriptor.description.is_empty() {
            schema.insert("description".into(), Value::from(descriptor.description));
        }
        schema.insert("type".into(), Value::from("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::from(required));
        }
        schema.insert("additionalProperties".into(), Value::Bool(false));
        Ok(Value::Object(schema))
    }

    fn render_inherited(&self, descriptor: &TypeDescriptor, record: &RecordDescriptor) -> Value {
        let mut properties = Map::new();
        if !record.is_abstract {
            properties.insert(TYPE_PROPERTY.into(), type_property(descriptor.name));
        }
        let mut required = Vec::new();
        for field in &record.fields {
            properties.insert(field.name.into(), self.property(field));
            if field.required {
                required.push(field.name);
            }
        }

        let mut own = Map::new();
        own.insert("type".into(), Value::from("object"));
        own.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            own.insert("required".into(), Value::from(required));
        }

        let base = record.base.unwrap_or(BASE_MODEL_NAME);
        let mut schema = Map::new();
        schema.insert("title".into(), Value::from(descriptor.name));
        if !descriptor.description.is_empty() {
            schema.insert("description".into(), Value::from(descriptor.description));
        }
        schema.insert(
            "allOf".into(),
            Value::Array(vec![component_ref(base), Value::Object(own)]),
        );
        Value::Object(schema)
    }

    /// Render one field as a property schema.
    pub fn property(&self, field: &FieldDescriptor) -> Value {
        let mut schema = Map::new();
        schema.insert("title".into(), Value::from(title_case(field.name)));
        if !field.description.is_empty() {
            schema.insert("description".into(), Value::from(field.description));
        }
        if let Some(default) = &field.default {
            schema.insert("default".into(), default.clone());
        }
        if field.read_only {
            schema.insert("readOnly".into(), Value::Bool(true));
        }
        self.write_type(&field.ty, &mut schema, true);
        Value::Object(schema)
    }

    fn item_schema(&self, ty: &FieldType) -> Value {
        let mut schema = Map::new();
        self.write_type(ty, &mut schema, false);
        Value::Object(schema)
    }

    /// Write the keywords of `ty` into `schema`. A reference at property
    /// level is wrapped in `allOf` so it can sit next to title and
    /// description.
    fn write_type(&self, ty: &FieldType, schema: &mut Map<String, Value>, property_level: bool) {
        match ty {
            FieldType::Number(constraints) => {
                constraints.apply_numeric(schema);
                schema.insert("type".into(), Value::from("number"));
            }
            FieldType::Integer(constraints) => {
                constraints.apply_numeric(schema);
                schema.insert("type".into(), Value::from("integer"));
            }
            FieldType::Boolean => {
                schema.insert("type".into(), Value::from("boolean"));
            }
            FieldType::String(constraints) => {
                constraints.apply_string(schema);
                schema.insert("type".into(), Value::from("string"));
            }
            FieldType::Object => {
                schema.insert("type".into(), Value::from("object"));
            }
            FieldType::Array { items, constraints } => {
                constraints.apply_items(schema);
                schema.insert("type".into(), Value::from("array"));
                schema.insert("items".into(), self.item_schema(items));
            }
            FieldType::Ref(name) if property_level => {
                schema.insert("allOf".into(), Value::Array(vec![component_ref(name)]));
            }
            FieldType::Ref(name) => {
                schema.insert("$ref".into(), Value::from(format!("{COMPONENT_REF_PREFIX}{name}")));
            }
            FieldType::Union(alternatives) => self.write_union(alternatives, schema),
            FieldType::Nullable(inner) => {
                self.write_type(inner, schema, property_level);
                schema.insert("nullable".into(), Value::Bool(true));
            }
        }
    }

    fn write_union(&self, alternatives: &[FieldType], schema: &mut Map<String, Value>) {
        let key = if self.inheritance { "oneOf" } else { "anyOf" };
        let rendered: Vec<Value> = alternatives.iter().map(|a| self.item_schema(a)).collect();
        schema.insert(key.into(), Value::Array(rendered));

        if !(self.inheritance && self.add_discriminator) {
            return;
        }
        let names: Option<Vec<&str>> = alternatives
            .iter()
            .map(|a| match a {
                FieldType::Ref(name) => Some(*name),
                _ => None,
            })
            .collect();
        if let Some(names) = names {
            let mapping: Map<String, Value> = names
                .into_iter()
                .map(|name| (name.to_string(), Value::from(format!("{COMPONENT_REF_PREFIX}{name}"))))
                .collect();
            schema.insert(
                "discriminator".into(),
                json!({ "propertyName": "type", "mapping": mapping }),
            );
        }
    }
}

fn type_property(name: &str) -> Value {
    json!({
        "title": "Type",
        "default": name,
        "pattern": format!("^{name}$"),
        "type": "string"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfs_core::Constraints;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .insert(TypeDescriptor::abstract_record(
                "_Base",
                "tests::Base",
                "Base record.",
                vec![
                    FieldDescriptor::required("depth", FieldType::number(), "Depth."),
                    FieldDescriptor::optional("offset", FieldType::number(), "Offset.")
                        .with_default(json!(0)),
                ],
            ))
            .unwrap()
            .insert(
                TypeDescriptor::record(
                    "Fin",
                    "tests::Fin",
                    "A fin.",
                    vec![
                        FieldDescriptor::required(
                            "count",
                            FieldType::Integer(Constraints::new().gt(0.0)),
                            "Count.",
                        ),
                        FieldDescriptor::required(
                            "offset",
                            FieldType::Number(Constraints::new().ge(0.0)),
                            "Offset.",
                        ),
                    ],
                )
                .extends("_Base"),
            )
            .unwrap()
            .insert(TypeDescriptor::record("Slab", "tests::Slab", "", Vec::new()))
            .unwrap()
            .insert(TypeDescriptor::enumeration(
                "Side",
                "tests::Side",
                "A side.",
                &["Left", "Right"],
            ))
            .unwrap();
        registry
    }

    #[test]
    fn title_case_matches_python() {
        assert_eq!(title_case("room_2ds"), "Room 2Ds");
        assert_eq!(title_case("floor_to_ceiling_height"), "Floor To Ceiling Height");
        assert_eq!(title_case("type"), "Type");
        assert_eq!(title_case("is_top_exposed"), "Is Top Exposed");
    }

    #[test]
    fn flattened_record_merges_base_fields() {
        let registry = registry();
        let renderer = SchemaRenderer::flattened(&registry);
        let schema = renderer.render(registry.get("Fin").unwrap()).unwrap();
        let keys: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["type", "depth", "offset", "count"]);
        assert_eq!(schema["properties"]["offset"]["minimum"], json!(0));
        assert!(schema["properties"]["offset"].get("default").is_none());
        assert_eq!(schema["required"], json!(["depth", "offset", "count"]));
        assert_eq!(schema["additionalProperties"], json!(false));
        assert_eq!(
            schema["properties"]["type"],
            json!({"title": "Type", "default": "Fin", "pattern": "^Fin$", "type": "string"})
        );
        assert_eq!(schema["properties"]["count"]["exclusiveMinimum"], json!(0));
        assert_eq!(schema["properties"]["count"]["type"], "integer");
    }

    #[test]
    fn empty_description_and_required_are_omitted() {
        let registry = registry();
        let schema = SchemaRenderer::flattened(&registry)
            .render(registry.get("Slab").unwrap())
            .unwrap();
        assert!(schema.get("description").is_none());
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn inheritance_record_references_base() {
        let registry = registry();
        let renderer = SchemaRenderer::inheritance(&registry, true);
        let fin = renderer.render(registry.get("Fin").unwrap()).unwrap();
        assert_eq!(fin["allOf"][0], json!({"$ref": "#/components/schemas/_Base"}));
        let own: Vec<&String> = fin["allOf"][1]["properties"].as_object().unwrap().keys().collect();
        assert_eq!(own, ["type", "count", "offset"]);

        let base = renderer.render(registry.get("_Base").unwrap()).unwrap();
        assert_eq!(base["allOf"][0]["$ref"], "#/components/schemas/_OpenAPIGenBaseModel");
        assert!(base["allOf"][1]["properties"].get("type").is_none());
        assert_eq!(renderer.base_model()["discriminator"]["propertyName"], "type");
    }

    #[test]
    fn enum_schema() {
        let registry = registry();
        let schema = SchemaRenderer::flattened(&registry)
            .render(registry.get("Side").unwrap())
            .unwrap();
        assert_eq!(
            schema,
            json!({"title": "Side", "description": "A side.", "enum": ["Left", "Right"], "type": "string"})
        );
    }

    #[test]
    fn references_and_unions() {
        let registry = registry();
        let field = FieldDescriptor::optional(
            "fins",
            FieldType::array(
                FieldType::Union(vec![FieldType::Ref("Fin"), FieldType::Ref("Slab")]).nullable(),
            ),
            "Fins.",
        );
        let flat = SchemaRenderer::flattened(&registry).property(&field);
        assert_eq!(
            flat["items"],
            json!({
                "anyOf": [
                    {"$ref": "#/components/schemas/Fin"},
                    {"$ref": "#/components/schemas/Slab"}
                ],
                "nullable": true
            })
        );

        let inherited = SchemaRenderer::inheritance(&registry, true).property(&field);
        assert_eq!(inherited["items"]["oneOf"].as_array().unwrap().len(), 2);
        assert_eq!(
            inherited["items"]["discriminator"]["mapping"]["Slab"],
            "#/components/schemas/Slab"
        );

        let side = FieldDescriptor::optional("side", FieldType::Ref("Side"), "Side.")
            .with_default(json!("Left"));
        assert_eq!(
            SchemaRenderer::flattened(&registry).property(&side),
            json!({
                "title": "Side",
                "description": "Side.",
                "default": "Left",
                "allOf": [{"$ref": "#/components/schemas/Side"}]
            })
        );
    }

    #[test]
    fn mixed_union_has_no_discriminator() {
        let registry = registry();
        let field = FieldDescriptor::required(
            "size",
            FieldType::Union(vec![FieldType::Ref("Slab"), FieldType::number()]),
            "",
        );
        let schema = SchemaRenderer::inheritance(&registry, true).property(&field);
        assert!(schema.get("discriminator").is_none());
        assert!(schema.get("description").is_none());
        assert_eq!(schema["oneOf"][1], json!({"type": "number"}));
    }

    #[test]
    fn unknown_base_is_reported() {
        let mut registry = TypeRegistry::new();
        registry
            .insert(TypeDescriptor::record("Orphan", "tests::Orphan", "", Vec::new()).extends("Gone"))
            .unwrap();
        let err = SchemaRenderer::flattened(&registry)
            .render(registry.get("Orphan").unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownTypeReference { ref name, ref referenced_by }
                if name == "Gone" && referenced_by == "Orphan"
        ));
    }
}
