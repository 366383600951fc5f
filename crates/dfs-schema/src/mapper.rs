//! Class mapper: schema names to the Rust types that define them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dfs_core::TypeRegistry;

use crate::document::OpenApiDocument;

/// `{"classes": {TypeName: "crate::module::Type"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMapper {
    /// Rust path of each schema type, keyed by schema name.
    pub classes: BTreeMap<String, String>,
}

impl ClassMapper {
    /// Map every schema of `document` that the registry defines.
    /// Synthesized schemas have no defining type and are left out.
    pub fn from_document(registry: &TypeRegistry, document: &OpenApiDocument) -> Self {
        let classes = document
            .schema_names()
            .filter_map(|name| registry.get(name))
            .map(|d| (d.name.to_string(), d.qualified_name.to_string()))
            .collect();
        Self { classes }
    }

    /// Number of mapped types.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no type is mapped.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
