//! # OpenAPI Document Model
//!
//! The shape of the published API document. Field order in these structs
//! is the key order of the emitted JSON.
//!
//! Nothing here is global: a document is assembled from a
//! [`DocumentMetadata`] and [`GeneratorOptions`] on every call, so two
//! generations never share state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default OpenAPI version of the emitted document.
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.2";

/// Name of the single tag group listing every schema tag.
pub const TAG_GROUP_NAME: &str = "Models";

/// Title, description and version of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title.
    pub title: String,
    /// Document description.
    pub description: String,
    /// `MAJOR.MINOR.PATCH` version, also patched into each root's
    /// `version` default.
    pub version: String,
}

impl DocumentMetadata {
    /// Metadata of the Dragonfly model document at the given version.
    pub fn dragonfly_model(version: impl Into<String>) -> Self {
        Self {
            title: "Dragonfly Model Schema".to_string(),
            description: "This is the documentation for Dragonfly model schema.".to_string(),
            version: version.into(),
        }
    }
}

/// Switches and extra metadata for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Render each record as a reference to its base plus its own fields
    /// instead of merging inherited fields.
    pub inheritance: bool,
    /// Attach `discriminator` objects (inheritance mode only).
    pub add_discriminator: bool,
    /// Link to external documentation.
    pub external_docs: Option<ExternalDocs>,
    /// Contact, license and logo of the `info` block.
    pub info: Option<InfoExtras>,
    /// Value of the top-level `openapi` key.
    pub openapi_version: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            inheritance: false,
            add_discriminator: true,
            external_docs: None,
            info: None,
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Options carrying the Ladybug Tools contact, license, logo and
    /// external docs.
    pub fn dragonfly() -> Self {
        Self {
            external_docs: Some(ExternalDocs::dragonfly()),
            info: Some(InfoExtras::dragonfly()),
            ..Self::default()
        }
    }
}

/// `info.contact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Maintainer name.
    pub name: String,
    /// Maintainer email.
    pub email: String,
    /// Project homepage.
    pub url: String,
}

/// `info.license`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License name, e.g. `MIT`.
    pub name: String,
    /// Link to the license text.
    pub url: String,
}

/// `info.x-logo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    /// Image URL.
    pub url: String,
    /// Text shown when the image cannot be loaded.
    #[serde(rename = "altText")]
    pub alt_text: String,
}

/// Optional parts of the `info` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoExtras {
    /// Written to `info.contact`.
    pub contact: Option<Contact>,
    /// Written to `info.license`.
    pub license: Option<License>,
    /// Written to `info.x-logo`.
    pub logo: Option<Logo>,
}

impl InfoExtras {
    /// Ladybug Tools contact, MIT license and the Dragonfly logo.
    pub fn dragonfly() -> Self {
        Self {
            contact: Some(Contact {
                name: "Ladybug Tools".to_string(),
                email: "info@ladybug.tools".to_string(),
                url: "https://github.com/ladybug-tools/dragonfly-core".to_string(),
            }),
            license: Some(License {
                name: "MIT".to_string(),
                url: "https://github.com/ladybug-tools/dragonfly-schema/blob/master/LICENSE"
                    .to_string(),
            }),
            logo: Some(Logo {
                url: "https://www.ladybug.tools/assets/img/dragonfly-large.png".to_string(),
                alt_text: "Dragonfly logo".to_string(),
            }),
        }
    }
}

/// Top-level `externalDocs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    /// Link text.
    pub description: String,
    /// Link target.
    pub url: String,
}

impl ExternalDocs {
    /// Link to the Pollination API.
    pub fn dragonfly() -> Self {
        Self {
            description: "See how to use these schema in action.".to_string(),
            url: "https://api.pollination.cloud/".to_string(),
        }
    }
}

/// The `info` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Document description.
    pub description: String,
    /// Document version, `MAJOR.MINOR.PATCH`.
    pub version: String,
    /// Document title.
    pub title: String,
    /// Maintainer contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// Logo rendered by ReDoc.
    #[serde(rename = "x-logo", skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// License of the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// One entry of `tags`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// `<lowercase schema name>_model`.
    pub name: String,
    /// The schema name as written.
    #[serde(rename = "x-displayName")]
    pub display_name: String,
    /// ReDoc directive that renders the schema.
    pub description: String,
}

impl Tag {
    /// The tag documenting one component schema.
    pub fn for_schema(schema_name: &str) -> Self {
        Self {
            name: format!("{}_model", schema_name.to_lowercase()),
            display_name: schema_name.to_string(),
            description: format!(
                "<SchemaDefinition schemaRef=\"#/components/schemas/{schema_name}\" />\n"
            ),
        }
    }
}

/// One entry of `x-tagGroups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    /// Group title, always `Models`.
    pub name: String,
    /// Tag names in sorted order.
    pub tags: Vec<String>,
}

/// `components`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Component schemas keyed by type name, in name order.
    pub schemas: Map<String, Value>,
}

/// A complete generated API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version, `3.0.2` unless overridden.
    pub openapi: String,
    /// Always empty.
    pub servers: Vec<Value>,
    /// Title, version and maintainer details.
    pub info: Info,
    /// Where to read more.
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
    /// One tag per component schema, in schema order.
    pub tags: Vec<Tag>,
    /// The single `Models` group.
    #[serde(rename = "x-tagGroups")]
    pub tag_groups: Vec<TagGroup>,
    /// Always empty: the document describes types only.
    pub paths: Map<String, Value>,
    /// The schemas.
    pub components: Components,
}

impl OpenApiDocument {
    /// Look up a component schema by type name.
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.components.schemas.get(name)
    }

    /// Names of every component schema, in document order.
    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.components.schemas.keys().map(String::as_str)
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
