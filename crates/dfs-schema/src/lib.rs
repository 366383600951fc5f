//! # dfs-schema — OpenAPI Document Generation
//!
//! Publishes the Dragonfly record types as an OpenAPI 3 document and checks
//! instances against it.
//!
//! ## Generation (`generator`, `render`)
//!
//! [`generate_document`] walks the type graph of a [`TypeRegistry`] from a
//! set of root types and renders every reachable type once, in name order.
//! Two layouts are available: flattened (inherited fields merged, closed
//! objects) and inheritance (`allOf` on the base, optional discriminators).
//!
//! ## Emission (`emit`, `mapper`)
//!
//! [`emit()`] writes the document, and optionally the [`ClassMapper`], to an
//! output directory. Everything is serialized before the first write, and
//! every file lands through a temporary file and a rename.
//!
//! ## Instance Checks (`instance`)
//!
//! [`InstanceValidator`] compiles the flattened component schemas into a
//! JSON Schema validator, giving a second opinion on a document that is
//! independent of the typed decoder in `dfs-model`.
//!
//! ## Crate Policy
//!
//! - Depends on `dfs-core` only; `dfs-model` supplies the registry in tests.
//! - Generation is pure; only [`emit()`] touches the filesystem.
//! - Output is deterministic for identical inputs.
//!
//! [`TypeRegistry`]: dfs_core::TypeRegistry

#![deny(missing_docs)]

pub mod document;
pub mod emit;
pub mod error;
pub mod generator;
pub mod instance;
pub mod mapper;
pub mod render;
pub mod version;

pub use document::{
    DocumentMetadata, ExternalDocs, GeneratorOptions, InfoExtras, OpenApiDocument, Tag, TagGroup,
};
pub use emit::{emit, EmitRequest, FLATTENED_FILE, INHERITANCE_FILE, MAPPER_FILE};
pub use error::SchemaError;
pub use generator::generate_document;
pub use instance::{
    read_instance, yaml_to_json, InstanceFileError, InstanceValidator, InstanceViolations,
    Violation, YamlConversionError,
};
pub use mapper::ClassMapper;
pub use render::{SchemaRenderer, BASE_MODEL_NAME};
pub use version::{package_version, truncate_version, validate_version};

/// Root type of the published Dragonfly document.
pub const MODEL_ROOT: &str = "Model";
