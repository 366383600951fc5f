//! # Document Generator
//!
//! Builds an [`OpenApiDocument`] from a [`TypeRegistry`] and a set of root
//! type names.
//!
//! ## Algorithm
//!
//! 1. Walk the type graph from the roots through field references and
//!    union alternatives. Flattened documents also follow the fields of
//!    every base record, since those are merged into the subtype; the
//!    inheritance layout follows the base edge itself.
//! 2. Render every reached type once, in name order.
//! 3. Emit one tag per schema and a single `Models` tag group listing the
//!    tag names in sorted order.
//! 4. Overwrite the `version` default of each root with the document
//!    version.
//!
//! The output depends only on the inputs: two runs over the same registry,
//! roots, metadata and options produce equal documents.

use std::collections::{BTreeSet, VecDeque};

use serde_json::{Map, Value};

use dfs_core::{RegistryError, TypeDescriptor, TypeRegistry};

use crate::document::{
    Components, DocumentMetadata, GeneratorOptions, Info, OpenApiDocument, Tag, TagGroup,
    TAG_GROUP_NAME,
};
use crate::error::SchemaError;
use crate::render::{SchemaRenderer, BASE_MODEL_NAME};
use crate::version::validate_version;

/// Referrer recorded for a root that is not in the registry.
const ROOT_REFERRER: &str = "(root)";

/// Owner reported when a registered type collides with a synthesized schema.
const SYNTHESIZED_OWNER: &str = "(synthesized)";

/// Generate the API document for `roots`.
pub fn generate_document(
    registry: &TypeRegistry,
    roots: &[&str],
    metadata: &DocumentMetadata,
    options: &GeneratorOptions,
) -> Result<OpenApiDocument, SchemaError> {
    let version = validate_version(&metadata.version)?;
    let renderer = if options.inheritance {
        SchemaRenderer::inheritance(registry, options.add_discriminator)
    } else {
        SchemaRenderer::flattened(registry)
    };

    let reachable = reachable_types(registry, &renderer, roots, options.inheritance)?;
    tracing::debug!(
        roots = roots.len(),
        schemas = reachable.len(),
        inheritance = options.inheritance,
        "collected reachable schema types"
    );

    let mut schemas = Map::new();
    if options.inheritance {
        schemas.insert(BASE_MODEL_NAME.to_string(), renderer.base_model());
    }
    for descriptor in &reachable {
        // Registered names are unique; only a synthesized entry can collide.
        if schemas.contains_key(descriptor.name) {
            return Err(RegistryError::DuplicateTypeName {
                name: descriptor.name.to_string(),
                existing: SYNTHESIZED_OWNER.to_string(),
                incoming: descriptor.qualified_name.to_string(),
            }
            .into());
        }
        schemas.insert(descriptor.name.to_string(), renderer.render(descriptor)?);
    }
    // Synthesized names sort alongside the registered ones.
    let mut names: Vec<String> = schemas.keys().cloned().collect();
    names.sort();
    let schemas: Map<String, Value> = names
        .into_iter()
        .filter_map(|name| schemas.remove(&name).map(|schema| (name, schema)))
        .collect();

    let mut components = Components { schemas };
    for root in roots {
        patch_version(&mut components, root, &version, options.inheritance);
    }

    let tags: Vec<Tag> = components.schemas.keys().map(|name| Tag::for_schema(name)).collect();
    let mut tag_names: Vec<String> = tags.iter().map(|t| t.name.clone()).collect();
    tag_names.sort();

    let extras = options.info.clone();
    let info = Info {
        description: metadata.description.clone(),
        version,
        title: metadata.title.clone(),
        contact: extras.as_ref().and_then(|e| e.contact.clone()),
        logo: extras.as_ref().and_then(|e| e.logo.clone()),
        license: extras.and_then(|e| e.license),
    };

    Ok(OpenApiDocument {
        openapi: options.openapi_version.clone(),
        servers: Vec::new(),
        info,
        external_docs: options.external_docs.clone(),
        tags,
        tag_groups: vec![TagGroup {
            name: TAG_GROUP_NAME.to_string(),
            tags: tag_names,
        }],
        paths: Map::new(),
        components,
    })
}

/// Every type reachable from `roots`, sorted by name.
fn reachable_types<'a>(
    registry: &'a TypeRegistry,
    renderer: &SchemaRenderer<'a>,
    roots: &[&str],
    inheritance: bool,
) -> Result<Vec<&'a TypeDescriptor>, SchemaError> {
    let mut seen: BTreeSet<&'a str> = BTreeSet::new();
    let mut found = Vec::new();
    let mut queue: VecDeque<(&str, &str)> = roots.iter().map(|r| (*r, ROOT_REFERRER)).collect();

    while let Some((name, referrer)) = queue.pop_front() {
        let descriptor = registry
            .get(name)
            .ok_or_else(|| SchemaError::UnknownTypeReference {
                name: name.to_string(),
                referenced_by: referrer.to_string(),
            })?;
        if !seen.insert(descriptor.name) {
            continue;
        }
        found.push(descriptor);

        if inheritance {
            if let Some(base) = descriptor.base() {
                queue.push_back((base, descriptor.name));
            }
            for reference in descriptor.field_references() {
                queue.push_back((reference, descriptor.name));
            }
        } else {
            for ancestor in renderer.base_chain(descriptor)? {
                for reference in ancestor.field_references() {
                    queue.push_back((reference, ancestor.name));
                }
            }
        }
    }

    found.sort_by_key(|d| d.name);
    Ok(found)
}

/// Set the `version` default of `root`'s schema, if it has a `version`
/// property.
fn patch_version(components: &mut Components, root: &str, version: &str, inheritance: bool) {
    let pointer = if inheritance {
        "/allOf/1/properties/version"
    } else {
        "/properties/version"
    };
    let Some(property) = components
        .schemas
        .get_mut(root)
        .and_then(|schema| schema.pointer_mut(pointer))
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    property.insert("default".to_string(), Value::from(version));
}
