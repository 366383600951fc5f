//! Errors raised while generating, emitting or checking against the
//! published schema document.

use std::path::PathBuf;

use thiserror::Error;

use dfs_core::RegistryError;

use crate::instance::InstanceViolations;

/// Error type for the schema crate.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A field, union alternative, base or root names a type that is not
    /// in the registry.
    #[error("unknown type \"{name}\" referenced by {referenced_by}")]
    UnknownTypeReference {
        /// The missing type name.
        name: String,
        /// The type that holds the reference, or `(root)` for a root type.
        referenced_by: String,
    },

    /// Two different definitions were registered under one name.
    #[error(transparent)]
    DuplicateTypeName(#[from] RegistryError),

    /// A document version that is not three dot-separated numbers.
    #[error("invalid document version \"{version}\": expected MAJOR.MINOR.PATCH")]
    InvalidVersion {
        /// The rejected version string.
        version: String,
    },

    /// A generated document could not be serialized.
    #[error("failed to serialize {artifact}: {source}")]
    Serialize {
        /// File name of the artifact being serialized.
        artifact: String,
        /// Underlying serializer error.
        source: serde_json::Error,
    },

    /// Writing an artifact failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The generated schemas could not be compiled into a validator.
    #[error("validator build error for root type '{root}': {reason}")]
    ValidatorBuild {
        /// Root type of the validator.
        root: String,
        /// Reason reported by the JSON Schema compiler.
        reason: String,
    },

    /// An instance did not conform to the generated schema.
    #[error("instance does not match schema '{root}':\n{violations}")]
    InstanceInvalid {
        /// Root type the instance was checked against.
        root: String,
        /// Every violation reported by the validator.
        violations: InstanceViolations,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_reference_display() {
        let err = SchemaError::UnknownTypeReference {
            name: "Floor2D".to_string(),
            referenced_by: "Story".to_string(),
        };
        assert_eq!(err.to_string(), "unknown type \"Floor2D\" referenced by Story");
    }

    #[test]
    fn duplicate_name_is_transparent() {
        let err = SchemaError::from(RegistryError::DuplicateTypeName {
            name: "Room2D".to_string(),
            existing: "a::Room2D".to_string(),
            incoming: "b::Room2D".to_string(),
        });
        assert!(err.to_string().contains("Room2D"));
    }

    #[test]
    fn invalid_version_display() {
        let err = SchemaError::InvalidVersion {
            version: "1.2".to_string(),
        };
        assert!(err.to_string().contains("\"1.2\""));
    }
}
