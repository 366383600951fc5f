//! # Validate Subcommand
//!
//! Decodes a document as one of the Dragonfly record types and runs every
//! field and cross-field rule over it. With `--schema-check` the document
//! is also checked against the generated JSON schema.
//!
//! Exit codes: 0 when the document is valid, 1 when it is not, 2 when it
//! could not be read at all.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use dfs_core::{DfsError, Record, SchemaType};
use dfs_model::{Building, ContextShade, Model, Room2D, Story};
use dfs_schema::{read_instance, InstanceValidator, MODEL_ROOT};

/// Record type a document is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// Read the `type` field of the document.
    Auto,
    Model,
    #[value(name = "room2d")]
    Room2D,
    Story,
    Building,
    ContextShade,
}

impl RecordKind {
    /// Schema name of the record type. `None` for `Auto`.
    pub fn type_name(self) -> Option<&'static str> {
        match self {
            Self::Auto => None,
            Self::Model => Some(Model::TYPE_NAME),
            Self::Room2D => Some(Room2D::TYPE_NAME),
            Self::Story => Some(Story::TYPE_NAME),
            Self::Building => Some(Building::TYPE_NAME),
            Self::ContextShade => Some(ContextShade::TYPE_NAME),
        }
    }

    fn from_type_name(name: &str) -> Option<Self> {
        [
            Self::Model,
            Self::Room2D,
            Self::Story,
            Self::Building,
            Self::ContextShade,
        ]
        .into_iter()
        .find(|kind| kind.type_name() == Some(name))
    }

    /// Resolve `Auto` from the document's `type` field, or from a
    /// `.dfjson` extension when the field is absent.
    pub fn resolve(self, instance: &Value, path: &Path) -> Option<Self> {
        if self != Self::Auto {
            return Some(self);
        }
        match instance.get("type").and_then(Value::as_str) {
            Some(name) => Self::from_type_name(name),
            None if path.extension().and_then(|e| e.to_str()) == Some("dfjson") => {
                Some(Self::Model)
            }
            None => None,
        }
    }

    /// Decode and validate `instance` as this record type.
    fn check(self, instance: Value) -> Result<(), DfsError> {
        match self {
            Self::Auto | Self::Model => Model::from_value(instance).map(drop),
            Self::Room2D => Room2D::from_value(instance).map(drop),
            Self::Story => Story::from_value(instance).map(drop),
            Self::Building => Building::from_value(instance).map(drop),
            Self::ContextShade => ContextShade::from_value(instance).map(drop),
        }
    }
}

/// Arguments for the `dfs validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON or YAML document to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Record type of the document.
    #[arg(long, value_enum, default_value_t = RecordKind::Auto)]
    pub kind: RecordKind,

    /// Also check the document against the generated JSON schema.
    #[arg(long)]
    pub schema_check: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure. Unreadable
/// input is returned as an error.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let path = &args.path;
    let instance = read_instance(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;

    let Some(kind) = args.kind.resolve(&instance, path) else {
        println!(
            "FAIL: {} — cannot determine record type; pass --kind",
            path.display()
        );
        return Ok(1);
    };
    let type_name = kind.type_name().unwrap_or(MODEL_ROOT);
    tracing::info!(path = %path.display(), record = type_name, "validating document");

    if let Err(e) = kind.check(instance.clone()) {
        println!("FAIL: {} — {e}", path.display());
        return Ok(1);
    }

    if args.schema_check {
        let registry = dfs_model::registry().context("failed to build type registry")?;
        let validator = InstanceValidator::new(&registry, &[MODEL_ROOT])
            .context("failed to generate schema for the check")?;
        if let Err(e) = validator.validate(type_name, &instance) {
            println!("FAIL: {} — {e}", path.display());
            return Ok(1);
        }
    }

    println!("OK: {}", path.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo_root() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates/
        dir.pop(); // repo root
        dir
    }

    fn args(path: PathBuf, kind: RecordKind, schema_check: bool) -> ValidateArgs {
        ValidateArgs {
            path,
            kind,
            schema_check,
        }
    }

    #[test]
    fn kind_resolution() {
        let p = Path::new("a.json");
        assert_eq!(
            RecordKind::Auto.resolve(&json!({"type": "Story"}), p),
            Some(RecordKind::Story)
        );
        assert_eq!(
            RecordKind::Auto.resolve(&json!({}), Path::new("m.dfjson")),
            Some(RecordKind::Model)
        );
        assert_eq!(RecordKind::Auto.resolve(&json!({"type": "Face3D"}), p), None);
        assert_eq!(
            RecordKind::Building.resolve(&json!({"type": "Story"}), p),
            Some(RecordKind::Building)
        );
    }

    #[test]
    fn valid_sample_returns_zero() {
        let path = repo_root().join("samples").join("room2d_simple.json");
        assert_eq!(run_validate(&args(path, RecordKind::Auto, true)).unwrap(), 0);
    }

    #[test]
    fn model_sample_with_schema_check() {
        let path = repo_root().join("samples").join("model_complete_simple.dfjson");
        assert_eq!(run_validate(&args(path, RecordKind::Auto, true)).unwrap(), 0);
    }

    #[test]
    fn segment_mismatch_returns_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.json");
        let room = json!({
            "type": "Room2D",
            "identifier": "R",
            "floor_boundary": [[0, 0], [5, 0], [5, 5], [0, 5]],
            "floor_height": 0,
            "floor_to_ceiling_height": 3,
            "air_boundaries": [false, false, false],
            "properties": {"type": "Room2DPropertiesAbridged"}
        });
        std::fs::write(&path, room.to_string()).unwrap();
        assert_eq!(run_validate(&args(path, RecordKind::Auto, false)).unwrap(), 1);
    }

    #[test]
    fn wrong_kind_returns_one() {
        let path = repo_root().join("samples").join("story_simple.json");
        assert_eq!(run_validate(&args(path, RecordKind::Room2D, false)).unwrap(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = run_validate(&args(
            PathBuf::from("/nonexistent/dfs/model.json"),
            RecordKind::Auto,
            false,
        ));
        let err = result.unwrap_err();
        assert!(err.root_cause().to_string().contains("no input file"));
    }
}
