//! # dfs-core — Foundational Types for the Dragonfly Schema
//!
//! This crate holds the machinery every record in the schema is built on.
//! It knows nothing about rooms or buildings; `dfs-model` supplies those.
//!
//! ## Key Design Principles
//!
//! 1. **One declaration per constraint.** A field's bounds live in a
//!    [`Constraints`] value. The validator evaluates it and the document
//!    generator renders it, so the runtime checks and the published schema
//!    agree by construction.
//!
//! 2. **Report every violation.** Validation walks the whole record tree
//!    through a [`ValidationContext`] and returns all problems at once,
//!    each tagged with its path in the tree.
//!
//! 3. **Discriminators are types.** [`TypeTag<R>`] makes the literal `type`
//!    field impossible to get wrong, and [`tagged_union!`] reads it before
//!    decoding a union payload.
//!
//! 4. **Self-describing records.** Every record implements [`SchemaType`]
//!    and publishes a [`TypeDescriptor`]; the generator only sees
//!    descriptors collected in a [`TypeRegistry`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dfs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

#![deny(missing_docs)]

pub mod constraint;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod record;
pub mod tag;
pub mod union;

// Re-export primary types for ergonomic imports.
pub use constraint::{Bound, Constraints};
pub use context::{Validate, ValidationContext};
pub use descriptor::{
    EnumDescriptor, FieldDescriptor, FieldType, RecordDescriptor, SchemaType, TypeDescriptor,
    TypeKind, TypeRegistry,
};
pub use error::{DfsError, RegistryError, ValidationError, ValidationViolations};
pub use geometry::{segment_count, CoordinateCountError, Point2D, Point3D};
pub use record::Record;
pub use tag::TypeTag;
