//! # Error Hierarchy
//!
//! Structured error types for the Dragonfly schema, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation errors carry the path of the offending value inside the
//! record tree (e.g. `buildings[0].unique_stories[1].room_2ds[0].floor_height`)
//! so that a client can locate every problem from a single report.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for parsing and validating records.
#[derive(Error, Debug)]
pub enum DfsError {
    /// The record decoded but violated one or more declared rules.
    #[error("validation failed:\n{0}")]
    Validation(#[from] ValidationViolations),

    /// The input could not be decoded into the requested record type.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The YAML input could not be decoded into the requested record type.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The input file does not exist.
    #[error("no input file found at {}", path.display())]
    MissingInputFile {
        /// Path that was requested.
        path: PathBuf,
    },

    /// I/O error while reading input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single rule violation found while validating a record tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A single field's value violates its declared bound (range, length,
    /// item count, or pattern).
    #[error("{path}: {constraint} (got {actual})")]
    FieldConstraintViolation {
        /// Location of the offending value.
        path: String,
        /// Human-readable statement of the declared constraint.
        constraint: String,
        /// Rendering of the value that was found.
        actual: String,
    },

    /// A per-edge attribute list does not match the edge count of its polygon.
    #[error(
        "{path}: length of {field} must match number of floor segments ({expected} expected, {actual} found)"
    )]
    SegmentCountMismatch {
        /// Location of the record that owns the list.
        path: String,
        /// Name of the per-edge list.
        field: String,
        /// Total edge count of the polygon (boundary plus holes).
        expected: usize,
        /// Length of the supplied list.
        actual: usize,
    },
}

impl ValidationError {
    /// The record-tree path this violation was reported at.
    pub fn path(&self) -> &str {
        match self {
            Self::FieldConstraintViolation { path, .. } | Self::SegmentCountMismatch { path, .. } => {
                path
            }
        }
    }
}

/// Every violation collected during one validation pass, in the order
/// they were found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationViolations {
    violations: Vec<ValidationError>,
}

impl ValidationViolations {
    /// Wrap an already-collected list of violations.
    pub fn new(violations: Vec<ValidationError>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[ValidationError] {
        &self.violations
    }

    /// Returns the first violation, if any.
    pub fn first(&self) -> Option<&ValidationError> {
        self.violations.first()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationViolations {}

/// Errors raised while assembling a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two distinct type definitions claim the same schema name.
    #[error("duplicate type name \"{name}\": already registered by {existing}, rejected {incoming}")]
    DuplicateTypeName {
        /// The colliding schema name.
        name: String,
        /// Qualified name of the definition already registered.
        existing: String,
        /// Qualified name of the definition that was rejected.
        incoming: String,
    },
}
