//! # Instance Validation Against the Generated Schema
//!
//! A second, independent check of a document: the flattened component
//! schemas are compiled into a JSON Schema (Draft 7) validator and an
//! instance is validated against one named root type.
//!
//! OpenAPI 3.0 schemas are not quite JSON Schema, so the components are
//! translated first:
//!
//! - `#/components/schemas/X` references become `#/definitions/X`;
//! - `nullable: true` becomes `anyOf: [<schema>, {"type": "null"}]`.
//!
//! Other OpenAPI-only keywords (`discriminator`, `readOnly`) are left in
//! place; Draft 7 ignores them.

use std::fmt;
use std::path::Path;

use serde_json::{json, Map, Value};

use dfs_core::record::is_yaml;
use dfs_core::{DfsError, TypeRegistry};

use crate::document::{DocumentMetadata, GeneratorOptions, OpenApiDocument};
use crate::error::SchemaError;
use crate::generator::generate_document;
use crate::render::COMPONENT_REF_PREFIX;
use crate::version::package_version;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// One place where a document departs from the generated schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Schema name of the record the document was checked as.
    pub record: String,
    /// Path of the offending value in the same notation the record
    /// validator uses (`buildings[0].unique_stories`), empty for the
    /// document itself.
    pub field_path: String,
    /// Schema keyword that failed, as a JSON Pointer into the definitions.
    pub keyword: String,
    /// What the validator reported.
    pub message: String,
}

impl Violation {
    fn new(record: &str, error: &jsonschema::ValidationError<'_>) -> Self {
        Self {
            record: record.to_string(),
            field_path: dotted_path(&error.instance_path.to_string()),
            keyword: error.schema_path.to_string(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field_path.is_empty() {
            write!(f, "  {}: {}", self.record, self.message)
        } else {
            write!(f, "  {}.{}: {}", self.record, self.field_path, self.message)
        }
    }
}

/// Turn a JSON Pointer such as `/buildings/0/room_2ds` into
/// `buildings[0].room_2ds`.
fn dotted_path(pointer: &str) -> String {
    let mut out = String::new();
    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            out.push('[');
            out.push_str(&token);
            out.push(']');
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&token);
        }
    }
    out
}

/// Every violation of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceViolations {
    violations: Vec<Violation>,
}

impl InstanceViolations {
    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are none.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations in the order the validator found them.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for InstanceViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Validates JSON instances against the flattened component schemas.
#[derive(Debug, Clone)]
pub struct InstanceValidator {
    definitions: Map<String, Value>,
}

impl InstanceValidator {
    /// Generate the flattened document for `roots` and keep its schemas.
    pub fn new(registry: &TypeRegistry, roots: &[&str]) -> Result<Self, SchemaError> {
        let document = generate_document(
            registry,
            roots,
            &DocumentMetadata::dragonfly_model(package_version()),
            &GeneratorOptions::default(),
        )?;
        Ok(Self::from_document(&document))
    }

    /// Use the component schemas of an already generated document. The
    /// document should be in the flattened layout; the inheritance layout
    /// compiles but does not reject unknown fields.
    pub fn from_document(document: &OpenApiDocument) -> Self {
        let definitions = document
            .components
            .schemas
            .iter()
            .map(|(name, schema)| (name.clone(), to_json_schema(schema)))
            .collect();
        Self { definitions }
    }

    /// Returns true if `root` names a known schema.
    pub fn has_schema(&self, root: &str) -> bool {
        self.definitions.contains_key(root)
    }

    /// Compile the validator for `root`.
    fn build(&self, root: &str) -> Result<jsonschema::Validator, SchemaError> {
        if !self.has_schema(root) {
            return Err(SchemaError::ValidatorBuild {
                root: root.to_string(),
                reason: "no schema with this name was generated".to_string(),
            });
        }
        let schema = json!({
            "allOf": [{ "$ref": format!("{DEFINITIONS_PREFIX}{root}") }],
            "definitions": self.definitions,
        });
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        opts.build(&schema).map_err(|e| SchemaError::ValidatorBuild {
            root: root.to_string(),
            reason: e.to_string(),
        })
    }

    /// Validate `instance` against `root`, reporting every violation.
    pub fn validate(&self, root: &str, instance: &Value) -> Result<(), SchemaError> {
        let validator = self.build(root)?;
        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation::new(root, &e))
            .collect();

        if violations.is_empty() {
            tracing::debug!(root, "instance matches generated schema");
            Ok(())
        } else {
            Err(SchemaError::InstanceInvalid {
                root: root.to_string(),
                violations: InstanceViolations { violations },
            })
        }
    }

    /// Read a JSON or YAML file and validate it against `root`.
    pub fn validate_file(&self, root: &str, path: &Path) -> Result<(), InstanceFileError> {
        let instance = read_instance(path)?;
        self.validate(root, &instance)?;
        Ok(())
    }
}

/// Failure of [`InstanceValidator::validate_file`]: the file could not be
/// read as a document, or it did not match the schema.
#[derive(Debug, thiserror::Error)]
pub enum InstanceFileError {
    /// The file is missing or is not JSON/YAML.
    #[error(transparent)]
    Input(#[from] DfsError),
    /// The document does not match the schema, or no validator could be
    /// built for the root.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Read a JSON document, or a YAML one for `.yaml`/`.yml` paths.
pub fn read_instance(path: &Path) -> Result<Value, DfsError> {
    if !path.is_file() {
        return Err(DfsError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    if is_yaml(path) {
        let yaml: serde_yaml::Value = serde_yaml::from_str(&text)?;
        yaml_to_json(&yaml).map_err(|e| DfsError::Yaml(serde::de::Error::custom(e)))
    } else {
        Ok(serde_json::from_str(&text)?)
    }
}

/// Translate one OpenAPI schema object into Draft 7 JSON Schema.
fn to_json_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            let mut nullable = false;
            for (key, value) in map {
                match (key.as_str(), value) {
                    ("nullable", Value::Bool(flag)) => nullable = *flag,
                    ("$ref", Value::String(target)) => {
                        let target = match target.strip_prefix(COMPONENT_REF_PREFIX) {
                            Some(name) => format!("{DEFINITIONS_PREFIX}{name}"),
                            None => target.clone(),
                        };
                        out.insert(key.clone(), Value::String(target));
                    }
                    _ => {
                        out.insert(key.clone(), to_json_schema(value));
                    }
                }
            }
            if nullable {
                json!({ "anyOf": [Value::Object(out), { "type": "null" }] })
            } else {
                Value::Object(out)
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(to_json_schema).collect()),
        other => other.clone(),
    }
}

/// A YAML document that has no JSON equivalent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum YamlConversionError {
    /// `.inf` and `.nan` have no JSON number.
    #[error("{path}: YAML number {number} has no JSON representation")]
    NonFiniteNumber {
        /// Where the number sits in the document.
        path: String,
        /// The number as YAML wrote it.
        number: String,
    },

    /// JSON object keys are strings; YAML also allows null, sequence and
    /// mapping keys.
    #[error("{path}: YAML {kind} cannot be used as an object key")]
    UnsupportedKey {
        /// The mapping holding the key.
        path: String,
        /// What the key is: `null`, `sequence`, `mapping` or `tagged value`.
        kind: &'static str,
    },
}

/// Convert a parsed YAML document into the JSON value it denotes.
///
/// Numeric and boolean keys become their string form, YAML tags are
/// dropped. Errors name the offending value's path.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, YamlConversionError> {
    convert_yaml(yaml, "")
}

fn convert_yaml(yaml: &serde_yaml::Value, at: &str) -> Result<Value, YamlConversionError> {
    use serde_yaml::Value as Yaml;

    let path = || if at.is_empty() { "(root)".to_string() } else { at.to_string() };
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => yaml_number(n).ok_or_else(|| YamlConversionError::NonFiniteNumber {
            path: path(),
            number: n.to_string(),
        })?,
        Yaml::String(text) => Value::String(text.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| convert_yaml(item, &format!("{at}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Yaml::String(text) => text.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => return Err(unsupported_key(path(), "null")),
                    Yaml::Sequence(_) => return Err(unsupported_key(path(), "sequence")),
                    Yaml::Mapping(_) => return Err(unsupported_key(path(), "mapping")),
                    Yaml::Tagged(_) => return Err(unsupported_key(path(), "tagged value")),
                };
                let child = if at.is_empty() { key.clone() } else { format!("{at}.{key}") };
                out.insert(key, convert_yaml(value, &child)?);
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => convert_yaml(&tagged.value, at)?,
    })
}

fn unsupported_key(path: String, kind: &'static str) -> YamlConversionError {
    YamlConversionError::UnsupportedKey { path, kind }
}

fn yaml_number(n: &serde_yaml::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        Some(Value::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(Value::from(u))
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_and_refs_are_translated() {
        let schema = json!({
            "title": "Windows",
            "type": "array",
            "items": {
                "anyOf": [{"$ref": "#/components/schemas/SingleWindow"}],
                "nullable": true
            }
        });
        let out = to_json_schema(&schema);
        assert_eq!(
            out["items"],
            json!({
                "anyOf": [
                    {"anyOf": [{"$ref": "#/definitions/SingleWindow"}]},
                    {"type": "null"}
                ]
            })
        );
        assert_eq!(out["title"], "Windows");
    }

    #[test]
    fn room2d_instance_checked_against_schema() {
        let registry = dfs_model::registry().unwrap();
        let validator = InstanceValidator::new(&registry, &["Room2D"]).unwrap();
        let room = json!({
            "type": "Room2D",
            "identifier": "Office",
            "floor_boundary": [[0, 0], [10, 0], [10, 10], [0, 10]],
            "floor_height": 0,
            "floor_to_ceiling_height": 3,
            "window_parameters": [null, {"type": "SimpleWindowRatio", "window_ratio": 0.4}, null, null],
            "properties": {"type": "Room2DPropertiesAbridged"}
        });
        validator.validate("Room2D", &room).unwrap();

        let mut bad = room.clone();
        bad["floor_to_ceiling_height"] = json!("tall");
        bad["colour"] = json!("blue");
        let err = validator.validate("Room2D", &bad).unwrap_err();
        match err {
            SchemaError::InstanceInvalid { root, violations } => {
                assert_eq!(root, "Room2D");
                assert!(violations.len() >= 2, "{violations}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_root_is_a_build_error() {
        let registry = dfs_model::registry().unwrap();
        let validator = InstanceValidator::new(&registry, &["Room2D"]).unwrap();
        assert!(!validator.has_schema("Model"));
        let err = validator.validate("Model", &json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::ValidatorBuild { .. }));
    }

    #[test]
    fn yaml_conversion() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("identifier: A\nheights: [1, 2.5]\n3: true\n").unwrap();
        assert_eq!(
            yaml_to_json(&yaml).unwrap(),
            json!({"identifier": "A", "heights": [1, 2.5], "3": true})
        );
    }

    #[test]
    fn yaml_conversion_errors_name_the_value() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("room_2ds:\n  - floor_height: .nan\n").unwrap();
        let err = yaml_to_json(&yaml).unwrap_err();
        assert!(matches!(
            err,
            YamlConversionError::NonFiniteNumber { ref path, .. } if path == "room_2ds[0].floor_height"
        ));

        let yaml: serde_yaml::Value = serde_yaml::from_str("user_data:\n  ? [1, 2]\n  : x\n").unwrap();
        assert_eq!(
            yaml_to_json(&yaml).unwrap_err(),
            YamlConversionError::UnsupportedKey {
                path: "user_data".to_string(),
                kind: "sequence",
            }
        );
    }

    #[test]
    fn read_instance_missing_and_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("absent.json");
        assert!(matches!(
            read_instance(&missing),
            Err(DfsError::MissingInputFile { .. })
        ));

        let path = tmp.path().join("shade.yml");
        std::fs::write(&path, "type: ContextShade\nis_detached: false\n").unwrap();
        let value = read_instance(&path).unwrap();
        assert_eq!(value["is_detached"], json!(false));
    }

    #[test]
    fn pointers_become_record_paths() {
        assert_eq!(dotted_path(""), "");
        assert_eq!(dotted_path("/floor_height"), "floor_height");
        assert_eq!(
            dotted_path("/buildings/0/unique_stories/1/room_2ds"),
            "buildings[0].unique_stories[1].room_2ds"
        );
        assert_eq!(dotted_path("/window_parameters/2"), "window_parameters[2]");
        assert_eq!(dotted_path("/user_data/a~1b"), "user_data.a/b");
    }

    #[test]
    fn violations_name_record_and_field() {
        let registry = dfs_model::registry().unwrap();
        let validator = InstanceValidator::new(&registry, &["Room2D"]).unwrap();
        let room = json!({
            "type": "Room2D",
            "identifier": "Office",
            "floor_boundary": [[0, 0], [10, 0], [10, 10], [0, 10]],
            "floor_height": "ground",
            "floor_to_ceiling_height": 3,
            "properties": {"type": "Room2DPropertiesAbridged"}
        });
        let SchemaError::InstanceInvalid { violations, .. } =
            validator.validate("Room2D", &room).unwrap_err()
        else {
            panic!("expected schema violations");
        };
        let v = violations
            .violations()
            .iter()
            .find(|v| v.field_path == "floor_height")
            .unwrap();
        assert_eq!(v.record, "Room2D");
        assert!(v.keyword.contains("floor_height"), "{}", v.keyword);
        assert!(v.to_string().starts_with("  Room2D.floor_height: "), "{v}");

        let root_level = Violation {
            record: "Story".to_string(),
            field_path: String::new(),
            keyword: "/required".to_string(),
            message: "\"identifier\" is a required property".to_string(),
        };
        assert_eq!(root_level.to_string(), "  Story: \"identifier\" is a required property");
    }
}
