//! Parse and serialize helpers shared by every record type.
//!
//! Parsing is decode followed by full validation: a record returned from
//! any `from_*` method has passed every field and cross-field rule.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::context::Validate;
use crate::descriptor::SchemaType;
use crate::error::DfsError;

/// A schema record that can be parsed, validated, and serialized.
pub trait Record: SchemaType + Validate + Serialize + DeserializeOwned + Sized {
    /// Decode and validate a JSON value.
    fn from_value(value: Value) -> Result<Self, DfsError> {
        let record: Self = serde_json::from_value(value)?;
        record.validate()?;
        Ok(record)
    }

    /// Decode and validate a JSON string.
    fn from_json_str(input: &str) -> Result<Self, DfsError> {
        let record: Self = serde_json::from_str(input)?;
        record.validate()?;
        Ok(record)
    }

    /// Decode and validate a YAML string.
    fn from_yaml_str(input: &str) -> Result<Self, DfsError> {
        let record: Self = serde_yaml::from_str(input)?;
        record.validate()?;
        Ok(record)
    }

    /// Read, decode, and validate a file.
    ///
    /// Files ending in `.yaml` or `.yml` are read as YAML, anything else
    /// as JSON.
    fn from_file(path: impl AsRef<Path>) -> Result<Self, DfsError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DfsError::MissingInputFile {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), record = Self::TYPE_NAME, "parsing record file");
        if is_yaml(path) {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Serialize to a JSON value.
    fn to_json_value(&self) -> Result<Value, DfsError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to a compact JSON string.
    fn to_json_string(&self) -> Result<String, DfsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to an indented JSON string.
    fn to_json_string_pretty(&self) -> Result<String, DfsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<T> Record for T where T: SchemaType + Validate + Serialize + DeserializeOwned {}

/// Returns true if `path` has a YAML extension.
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Constraints, FieldDescriptor, FieldType, TypeDescriptor, TypeTag, ValidationContext};
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Overhang {
        #[serde(rename = "type", default)]
        type_: TypeTag<Overhang>,
        depth: f64,
    }

    impl SchemaType for Overhang {
        const TYPE_NAME: &'static str = "Overhang";
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record(
                Self::TYPE_NAME,
                "tests::Overhang",
                "",
                vec![FieldDescriptor::required("depth", FieldType::number(), "")],
            )
        }
    }

    impl Validate for Overhang {
        fn validate_into(&self, ctx: &mut ValidationContext) {
            ctx.number("depth", self.depth, &Constraints::new().gt(0.0));
        }
    }

    #[test]
    fn parse_runs_validation() {
        assert!(Overhang::from_json_str(r#"{"depth": 1.0}"#).is_ok());
        let err = Overhang::from_json_str(r#"{"depth": 0}"#).unwrap_err();
        assert!(matches!(err, DfsError::Validation(ref v) if v.len() == 1));
    }

    #[test]
    fn decode_error_is_parse() {
        let err = Overhang::from_json_str(r#"{"depth": 1.0, "angle": 3}"#).unwrap_err();
        assert!(matches!(err, DfsError::Parse(_)));
    }

    #[test]
    fn yaml_input() {
        let o = Overhang::from_yaml_str("type: Overhang\ndepth: 0.5\n").unwrap();
        assert_eq!(o.depth, 0.5);
    }

    #[test]
    fn missing_file() {
        let err = Overhang::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DfsError::MissingInputFile { .. }));
    }

    #[test]
    fn serialize_round_trip() {
        let o = Overhang::from_json_str(r#"{"depth": 2.0}"#).unwrap();
        let text = o.to_json_string().unwrap();
        assert_eq!(text, r#"{"type":"Overhang","depth":2.0}"#);
        assert_eq!(Overhang::from_json_str(&text).unwrap(), o);
        assert_eq!(o.to_json_value().unwrap()["type"], "Overhang");
    }

    #[test]
    fn yaml_extension_detection() {
        assert!(is_yaml(Path::new("model.yaml")));
        assert!(is_yaml(Path::new("model.yml")));
        assert!(!is_yaml(Path::new("model.dfjson")));
    }
}
