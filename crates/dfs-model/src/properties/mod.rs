//! # Extension Properties
//!
//! Each identified record carries a `properties` container whose members
//! belong to simulation-engine extensions. Every member is optional; an
//! absent member means the extension assigns its defaults.

pub mod comparison;
pub mod doe2;
pub mod energy;
pub mod gridpar;
pub mod radiance;

use serde::{Deserialize, Serialize};

use dfs_core::{FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate, ValidationContext};

pub use comparison::{ModelComparisonProperties, Room2DComparisonProperties};
pub use doe2::{ModelDoe2Properties, Room2DDoe2Properties};
pub use energy::{
    BuildingEnergyPropertiesAbridged, ContextShadeEnergyPropertiesAbridged,
    ModelEnergyProperties, Room2DEnergyPropertiesAbridged, StoryEnergyPropertiesAbridged,
    TerrianTypes,
};
pub use gridpar::{
    ExteriorApertureGridParameter, ExteriorApertureType, ExteriorFaceGridParameter,
    ExteriorFaceType, GridParameter, GridParameterBase, RoomGridParameter,
    RoomRadialGridParameter,
};
pub use radiance::{
    BuildingRadiancePropertiesAbridged, ContextShadeRadiancePropertiesAbridged,
    ModelRadianceProperties, Room2DRadiancePropertiesAbridged, StoryRadiancePropertiesAbridged,
};

const CONTAINER_DESCRIPTION: &str =
    "Base class for all objects that are not extensible with additional keys.";

fn member<T: SchemaType>(name: &'static str) -> FieldDescriptor {
    FieldDescriptor::optional(name, FieldType::reference::<T>(), "")
}

/// Extension properties of a Room2D.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room2DPropertiesAbridged {
    /// Always `Room2DPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Room2DPropertiesAbridged>,
    /// Energy extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Room2DEnergyPropertiesAbridged>,
    /// Radiance extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiance: Option<Room2DRadiancePropertiesAbridged>,
    /// DOE-2 extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doe2: Option<Room2DDoe2Properties>,
    /// Properties for comparing against an earlier version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Room2DComparisonProperties>,
}

impl SchemaType for Room2DPropertiesAbridged {
    const TYPE_NAME: &'static str = "Room2DPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Room2DPropertiesAbridged"),
            CONTAINER_DESCRIPTION,
            vec![
                member::<Room2DEnergyPropertiesAbridged>("energy"),
                member::<Room2DRadiancePropertiesAbridged>("radiance"),
                member::<Room2DDoe2Properties>("doe2"),
                member::<Room2DComparisonProperties>("comparison"),
            ],
        )
    }
}

impl Validate for Room2DPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("energy", &self.energy);
        ctx.nested("radiance", &self.radiance);
        ctx.nested("doe2", &self.doe2);
        ctx.nested("comparison", &self.comparison);
    }
}

/// Extension properties of a Story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryPropertiesAbridged {
    /// Always `StoryPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<StoryPropertiesAbridged>,
    /// Energy extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<StoryEnergyPropertiesAbridged>,
    /// Radiance extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiance: Option<StoryRadiancePropertiesAbridged>,
}

impl SchemaType for StoryPropertiesAbridged {
    const TYPE_NAME: &'static str = "StoryPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::StoryPropertiesAbridged"),
            CONTAINER_DESCRIPTION,
            vec![
                member::<StoryEnergyPropertiesAbridged>("energy"),
                member::<StoryRadiancePropertiesAbridged>("radiance"),
            ],
        )
    }
}

impl Validate for StoryPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("energy", &self.energy);
        ctx.nested("radiance", &self.radiance);
    }
}

/// Extension properties of a Building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildingPropertiesAbridged {
    /// Always `BuildingPropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<BuildingPropertiesAbridged>,
    /// Energy extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<BuildingEnergyPropertiesAbridged>,
    /// Radiance extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiance: Option<BuildingRadiancePropertiesAbridged>,
}

impl SchemaType for BuildingPropertiesAbridged {
    const TYPE_NAME: &'static str = "BuildingPropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::BuildingPropertiesAbridged"),
            CONTAINER_DESCRIPTION,
            vec![
                member::<BuildingEnergyPropertiesAbridged>("energy"),
                member::<BuildingRadiancePropertiesAbridged>("radiance"),
            ],
        )
    }
}

impl Validate for BuildingPropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("energy", &self.energy);
        ctx.nested("radiance", &self.radiance);
    }
}

/// Extension properties of a ContextShade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextShadePropertiesAbridged {
    /// Always `ContextShadePropertiesAbridged`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ContextShadePropertiesAbridged>,
    /// Energy extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<ContextShadeEnergyPropertiesAbridged>,
    /// Radiance extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiance: Option<ContextShadeRadiancePropertiesAbridged>,
}

impl SchemaType for ContextShadePropertiesAbridged {
    const TYPE_NAME: &'static str = "ContextShadePropertiesAbridged";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ContextShadePropertiesAbridged"),
            CONTAINER_DESCRIPTION,
            vec![
                member::<ContextShadeEnergyPropertiesAbridged>("energy"),
                member::<ContextShadeRadiancePropertiesAbridged>("radiance"),
            ],
        )
    }
}

impl Validate for ContextShadePropertiesAbridged {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("energy", &self.energy);
        ctx.nested("radiance", &self.radiance);
    }
}

/// Extension properties and resource libraries of a Model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelProperties {
    /// Always `ModelProperties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ModelProperties>,
    /// Energy extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<ModelEnergyProperties>,
    /// Radiance extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiance: Option<ModelRadianceProperties>,
    /// DOE-2 extension properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doe2: Option<ModelDoe2Properties>,
    /// Properties for comparing against an earlier version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ModelComparisonProperties>,
}

impl SchemaType for ModelProperties {
    const TYPE_NAME: &'static str = "ModelProperties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ModelProperties"),
            CONTAINER_DESCRIPTION,
            vec![
                member::<ModelEnergyProperties>("energy"),
                member::<ModelRadianceProperties>("radiance"),
                member::<ModelDoe2Properties>("doe2"),
                member::<ModelComparisonProperties>("comparison"),
            ],
        )
    }
}

impl Validate for ModelProperties {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("energy", &self.energy);
        ctx.nested("radiance", &self.radiance);
        ctx.nested("doe2", &self.doe2);
        ctx.nested("comparison", &self.comparison);
    }
}
