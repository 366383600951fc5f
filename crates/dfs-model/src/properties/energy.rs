//! Energy-simulation extension properties.
//!
//! Room-level properties reference library objects by name. The model
//! carries the libraries themselves as pass-through objects.

use serde::{Deserialize, Serialize};

use dfs_core::{FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate, ValidationContext};

use crate::identity::{ExternalObject, OBJECT_NAME};

fn name_field(name: &'static str, description: &'static str) -> FieldDescriptor {
    FieldDescriptor::optional(name, FieldType::String(OBJECT_NAME), description)
}

fn library_field(name: &'static str, description: &'static str) -> FieldDescriptor {
    FieldDescriptor::optional(name, FieldType::array(FieldType::Object), description)
}

/// Energy properties of a Room2D.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room2DEnergyPropertiesAbridged {
    /// Always `Room2DEnergyPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Room2DEnergyPropertiesAbridged>,
    /// Name of the room's construction set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_set: Option<String>,
    /// Name of the room's program type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
    /// Name of the HVAC system serving the room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hvac: Option<String>,
}

impl SchemaType for Room2DEnergyPropertiesAbridged {
    const TYPE_NAME: &'static str = "Room2DEnergyPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Room2DEnergyPropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                name_field(
                    "construction_set",
                    "Name of a ConstructionSet to specify all constructions for the Room2D. \
                     If None, the Room2D will use the Story or Building construction_set or \
                     the Model global_construction_set. Any ConstructionSet assigned here \
                     will override those assigned to these objects.",
                ),
                name_field(
                    "program_type",
                    "Name of a ProgramType to specify all schedules and loads for the \
                     Room2D. If None, the Room2D will have no loads or setpoints.",
                ),
                name_field(
                    "hvac",
                    "An optional name of a HVAC system (such as an IdealAirSystem) that \
                     specifies how the Room2D is conditioned. If None, it will be assumed \
                     that the Room2D is not conditioned.",
                ),
            ],
        )
    }
}

impl Validate for Room2DEnergyPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.optional_string("construction_set", self.construction_set.as_deref(), &OBJECT_NAME);
        ctx.optional_string("program_type", self.program_type.as_deref(), &OBJECT_NAME);
        ctx.optional_string("hvac", self.hvac.as_deref(), &OBJECT_NAME);
    }
}

/// Energy properties of a Story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryEnergyPropertiesAbridged {
    /// Always `StoryEnergyPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<StoryEnergyPropertiesAbridged>,
    /// Name of the construction set for every room of the story.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_set: Option<String>,
}

impl SchemaType for StoryEnergyPropertiesAbridged {
    const TYPE_NAME: &'static str = "StoryEnergyPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::StoryEnergyPropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![name_field(
                "construction_set",
                "Name of a ConstructionSet to specify all constructions for the Story. If \
                 None, the Story will use the Building construction_set or the Model \
                 global_construction_set. Any ConstructionSet assigned here will override \
                 those assigned to these objects.",
            )],
        )
    }
}

impl Validate for StoryEnergyPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.optional_string("construction_set", self.construction_set.as_deref(), &OBJECT_NAME);
    }
}

/// Energy properties of a Building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingEnergyPropertiesAbridged {
    /// Always `BuildingEnergyPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<BuildingEnergyPropertiesAbridged>,
    /// Name of the construction set for every room of the building.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_set: Option<String>,
}

impl SchemaType for BuildingEnergyPropertiesAbridged {
    const TYPE_NAME: &'static str = "BuildingEnergyPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::BuildingEnergyPropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![name_field(
                "construction_set",
                "Name of a ConstructionSet to specify all constructions for the Building. \
                 If None, the Model global_construction_set will be used.",
            )],
        )
    }
}

impl Validate for BuildingEnergyPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.optional_string("construction_set", self.construction_set.as_deref(), &OBJECT_NAME);
    }
}

/// Energy properties of a ContextShade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextShadeEnergyPropertiesAbridged {
    /// Always `ContextShadeEnergyPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ContextShadeEnergyPropertiesAbridged>,
    /// Name of the shade construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction: Option<String>,
    /// Name of the schedule giving the shade's transmittance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmittance_schedule: Option<String>,
}

impl SchemaType for ContextShadeEnergyPropertiesAbridged {
    const TYPE_NAME: &'static str = "ContextShadeEnergyPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ContextShadeEnergyPropertiesAbridged"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                name_field(
                    "construction",
                    "Name of a ShadeConstruction to set the reflectance and specularity of \
                     the ContextShade. If None, the the EnergyPlus default of 0.2 diffuse \
                     reflectance will be used.",
                ),
                name_field(
                    "transmittance_schedule",
                    "Name of a schedule to set the transmittance of the ContextShade, which \
                     can vary throughout the simulation. If None, the ContextShade will be \
                     completely opaque.",
                ),
            ],
        )
    }
}

impl Validate for ContextShadeEnergyPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.optional_string("construction", self.construction.as_deref(), &OBJECT_NAME);
        ctx.optional_string(
            "transmittance_schedule",
            self.transmittance_schedule.as_deref(),
            &OBJECT_NAME,
        );
    }
}

/// Terrain surrounding the model, used for the wind profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrianTypes {
    Ocean,
    Country,
    Suburbs,
    Urban,
    #[default]
    City,
}

impl SchemaType for TerrianTypes {
    const TYPE_NAME: &'static str = "TerrianTypes";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::enumeration(
            Self::TYPE_NAME,
            concat!(module_path!(), "::TerrianTypes"),
            "An enumeration.",
            &["Ocean", "Country", "Suburbs", "Urban", "City"],
        )
    }
}

/// Model-level energy properties and resource libraries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEnergyProperties {
    /// Always `ModelEnergyProperties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ModelEnergyProperties>,
    /// Terrain around the model, used to adjust wind speed.
    #[serde(default)]
    pub terrain_type: TerrianTypes,
    /// Name of the construction set used where nothing closer assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_construction_set: Option<String>,
    /// Construction sets referenced by name in the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_sets: Option<Vec<ExternalObject>>,
    /// Constructions referenced by name in the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructions: Option<Vec<ExternalObject>>,
    /// Materials used by the constructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<ExternalObject>>,
    /// HVAC systems referenced by name in the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hvacs: Option<Vec<ExternalObject>>,
    /// Program types referenced by name in the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_types: Option<Vec<ExternalObject>>,
    /// Schedules referenced by name in the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedules: Option<Vec<ExternalObject>>,
    /// Type limits used by the schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type_limits: Option<Vec<ExternalObject>>,
}

impl SchemaType for ModelEnergyProperties {
    const TYPE_NAME: &'static str = "ModelEnergyProperties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ModelEnergyProperties"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                FieldDescriptor::optional(
                    "terrain_type",
                    FieldType::reference::<TerrianTypes>(),
                    "Text for the terrain in which the model sits. This is used to \
                     determine the wind profile over the height of the buildings.",
                )
                .with_default("City".into()),
                name_field(
                    "global_construction_set",
                    "Name for the ConstructionSet to be used for all objects lacking their \
                     own construction or a parent construction_set. This ConstructionSet \
                     must appear under the Model construction_sets.",
                ),
                library_field(
                    "construction_sets",
                    "List of all ConstructionSets in the Model.",
                ),
                library_field(
                    "constructions",
                    "A list of all unique constructions in the model. This includes \
                     constructions across all the Model construction_sets.",
                ),
                library_field(
                    "materials",
                    "A list of all unique materials in the model. This includes materials \
                     needed to make the Model constructions.",
                ),
                library_field("hvacs", "List of all HVAC systems in the Model."),
                library_field("program_types", "List of all ProgramTypes in the Model."),
                library_field(
                    "schedules",
                    "A list of all unique schedules in the model. This includes schedules \
                     across all HVAC systems, ProgramTypes and ContextShades.",
                ),
                library_field(
                    "schedule_type_limits",
                    "A list of all unique ScheduleTypeLimits in the model. This all \
                     ScheduleTypeLimits needed to make the Model schedules.",
                ),
            ],
        )
    }
}

impl Validate for ModelEnergyProperties {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.optional_string(
            "global_construction_set",
            self.global_construction_set.as_deref(),
            &OBJECT_NAME,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn room_energy_names_bounded() {
        let p: Room2DEnergyPropertiesAbridged =
            serde_json::from_value(json!({"program_type": "", "hvac": "x".repeat(101)})).unwrap();
        let errors = p.validate().unwrap_err();
        let paths: Vec<&str> = errors.violations().iter().map(|v| v.path()).collect();
        assert_eq!(paths, vec!["program_type", "hvac"]);
    }

    #[test]
    fn model_energy_defaults() {
        let p: ModelEnergyProperties = serde_json::from_value(json!({"type": "ModelEnergyProperties"})).unwrap();
        assert_eq!(p.terrain_type, TerrianTypes::City);
        assert!(p.constructions.is_none());
    }

    #[test]
    fn library_objects_pass_through() {
        let p: ModelEnergyProperties = serde_json::from_value(json!({
            "constructions": [{"type": "OpaqueConstructionAbridged", "identifier": "Roof", "materials": ["PolyIso"]}]
        }))
        .unwrap();
        let constructions = p.constructions.as_deref().unwrap_or_default();
        assert_eq!(constructions[0].type_name(), "OpaqueConstructionAbridged");
        assert!(serde_json::from_value::<ModelEnergyProperties>(json!({"materials": [{"identifier": "m"}]})).is_err());
    }
}
