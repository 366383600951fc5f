//! Building: a stack of unique Stories.

use serde::{Deserialize, Serialize};

use dfs_core::{FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate, ValidationContext};

use crate::identity::{identity_fields, validate_identity};
use crate::properties::BuildingPropertiesAbridged;
use crate::story::Story;

/// A complete Building defined by its unique Stories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Building {
    /// Always `Building`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Building>,
    /// Unique ID: 1 to 100 characters from `A-Z a-z 0-9 . _ -`.
    pub identifier: String,
    /// Display name with no character restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form user data carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Map<String, serde_json::Value>>,
    /// The distinct stories; a story's `multiplier` repeats it.
    pub unique_stories: Vec<Story>,
    /// Extension properties.
    pub properties: BuildingPropertiesAbridged,
}

impl Building {
    /// A building made of `unique_stories`.
    pub fn new(identifier: impl Into<String>, unique_stories: Vec<Story>) -> Self {
        Self {
            type_: TypeTag::new(),
            identifier: identifier.into(),
            display_name: None,
            user_data: None,
            unique_stories,
            properties: BuildingPropertiesAbridged::default(),
        }
    }
}

impl SchemaType for Building {
    const TYPE_NAME: &'static str = "Building";

    fn describe() -> TypeDescriptor {
        let mut fields = identity_fields();
        fields.extend([
            FieldDescriptor::required(
                "unique_stories",
                FieldType::array(FieldType::reference::<Story>()),
                "An array of unique dragonfly Story objects that together form the entire \
                 building. Stories should generally be ordered from lowest floor to highest \
                 floor. Note that, if a given Story is repeated several times over the \
                 height of the building, the unique story included in this list should be \
                 the first (lowest) story of the repeated floors.",
            ),
            FieldDescriptor::required(
                "properties",
                FieldType::reference::<BuildingPropertiesAbridged>(),
                "Extension properties for particular simulation engines (Radiance, \
                 EnergyPlus).",
            ),
        ]);
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Building"),
            "A complete Building defined by extruded Room2Ds.",
            fields,
        )
    }
}

impl Validate for Building {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_identity(ctx, &self.identifier);
        ctx.nested("unique_stories", &self.unique_stories);
        ctx.nested("properties", &self.properties);
    }
}
