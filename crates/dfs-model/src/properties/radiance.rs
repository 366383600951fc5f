//! Radiance extension properties.

use serde::{Deserialize, Serialize};

use dfs_core::{FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate, ValidationContext};

use super::gridpar::GridParameter;
use crate::identity::ExternalObject;

fn modifier_set_field(description: &'static str) -> FieldDescriptor {
    FieldDescriptor::optional("modifier_set", FieldType::string(), description)
}

/// Radiance properties of a Room2D.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room2DRadiancePropertiesAbridged {
    /// Always `Room2DRadiancePropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Room2DRadiancePropertiesAbridged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier_set: Option<String>,
    /// Sensor grids to generate for the room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_parameters: Option<Vec<GridParameter>>,
}

impl SchemaType for Room2DRadiancePropertiesAbridged {
    const TYPE_NAME: &'static str = "Room2DRadiancePropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Room2DRadiancePropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                modifier_set_field(
                    "Identifier of a ModifierSet to specify all modifiers for the Room2D. If \
                     None, the Room2D will use the Story or Building modifier_set or the \
                     Model global_modifier_set. Any ModifierSet assigned here will override \
                     those assigned to the parent objects.",
                ),
                FieldDescriptor::optional(
                    "grid_parameters",
                    FieldType::array(GridParameter::field_type()),
                    "An optional list of GridParameter objects to describe how sensor grids \
                     should be generated for the Room2D.",
                ),
            ],
        )
    }
}

impl Validate for Room2DRadiancePropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("grid_parameters", &self.grid_parameters);
    }
}

/// Radiance properties of a Story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryRadiancePropertiesAbridged {
    /// Always `StoryRadiancePropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<StoryRadiancePropertiesAbridged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier_set: Option<String>,
}

impl SchemaType for StoryRadiancePropertiesAbridged {
    const TYPE_NAME: &'static str = "StoryRadiancePropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::StoryRadiancePropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![modifier_set_field(
                "Name of a ModifierSet to specify all modifiers for the Story. If None, the \
                 Story will use the Building modifier_set or the Model global_modifier_set. \
                 Any ModifierSet assigned here will override those assigned to the parent \
                 objects.",
            )],
        )
    }
}

impl Validate for StoryRadiancePropertiesAbridged {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

/// Radiance properties of a Building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingRadiancePropertiesAbridged {
    /// Always `BuildingRadiancePropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<BuildingRadiancePropertiesAbridged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier_set: Option<String>,
}

impl SchemaType for BuildingRadiancePropertiesAbridged {
    const TYPE_NAME: &'static str = "BuildingRadiancePropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::BuildingRadiancePropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![modifier_set_field(
                "Name of a ModifierSet to specify all modifiers for the Building. If None, \
                 the Model global_modifier_set will be used.",
            )],
        )
    }
}

impl Validate for BuildingRadiancePropertiesAbridged {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

/// Radiance properties of a ContextShade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextShadeRadiancePropertiesAbridged {
    /// Always `ContextShadeRadiancePropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ContextShadeRadiancePropertiesAbridged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

impl SchemaType for ContextShadeRadiancePropertiesAbridged {
    const TYPE_NAME: &'static str = "ContextShadeRadiancePropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ContextShadeRadiancePropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![FieldDescriptor::optional(
                "modifier",
                FieldType::string(),
                "Name of a Modifier to set the reflectance and specularity of the \
                 ContextShade. If None, the the default of 0.2 diffuse reflectance will be \
                 used.",
            )],
        )
    }
}

impl Validate for ContextShadeRadiancePropertiesAbridged {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

/// Model-level Radiance properties and modifier libraries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelRadianceProperties {
    /// Always `ModelRadianceProperties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ModelRadianceProperties>,
    /// Informational; published as read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_modifier_set: Option<ExternalObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier_sets: Option<Vec<ExternalObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<ExternalObject>>,
}

impl SchemaType for ModelRadianceProperties {
    const TYPE_NAME: &'static str = "ModelRadianceProperties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ModelRadianceProperties"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                FieldDescriptor::optional(
                    "global_modifier_set",
                    FieldType::Object,
                    "Global Radiance modifier set.",
                )
                .read_only(),
                FieldDescriptor::optional(
                    "modifier_sets",
                    FieldType::array(FieldType::Object),
                    "List of all ModifierSets in the Model.",
                ),
                FieldDescriptor::optional(
                    "modifiers",
                    FieldType::array(FieldType::Object),
                    "A list of all unique modifiers in the model. This includes modifiers \
                     across all the Model modifier_sets.",
                ),
            ],
        )
    }
}

impl Validate for ModelRadianceProperties {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn room_grids_are_validated_with_index() {
        let p: Room2DRadiancePropertiesAbridged = serde_json::from_value(json!({
            "grid_parameters": [
                {"type": "RoomGridParameter", "dimension": 0.5},
                {"type": "RoomGridParameter", "dimension": -1}
            ]
        }))
        .unwrap();
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.violations()[0].path(), "grid_parameters[1].dimension");
    }

    #[test]
    fn model_radiance_libraries() {
        let p: ModelRadianceProperties = serde_json::from_value(json!({
            "modifiers": [{"type": "Plastic", "identifier": "generic_wall"}]
        }))
        .unwrap();
        assert_eq!(p.modifiers.map(|m| m.len()), Some(1));
    }
}
