//! # Model
//!
//! The root document: buildings, context shades, units, tolerances and
//! model-wide extension properties.

use serde::{Deserialize, Serialize};
use serde_json::json;

use dfs_core::{
    Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate,
    ValidationContext,
};

use crate::building::Building;
use crate::context_shade::ContextShade;
use crate::external::Units;
use crate::identity::{identity_fields, validate_identity};
use crate::properties::ModelProperties;

/// Semantic version string `X.Y.Z`.
pub const VERSION: Constraints = Constraints::new().pattern(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$");

const TOLERANCE: Constraints = Constraints::new().ge(0.0);

/// Version assigned to a model that does not declare one.
pub const DEFAULT_VERSION: &str = "0.0.0";

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_angle_tolerance() -> f64 {
    1.0
}

/// A Dragonfly model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    /// Always `Model`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Model>,
    /// Unique ID: 1 to 100 characters from `A-Z a-z 0-9 . _ -`.
    pub identifier: String,
    /// Display name with no character restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form user data carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Map<String, serde_json::Value>>,
    /// Schema version the model was written with.
    #[serde(default = "default_version")]
    pub version: String,
    /// The buildings of the model.
    pub buildings: Vec<Building>,
    /// Shade geometry around the buildings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_shades: Option<Vec<ContextShade>>,
    /// Units of every length in the model.
    #[serde(default)]
    pub units: Units,
    /// Distance below which two vertices are equal.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Angle in degrees below which two planes are parallel.
    #[serde(default = "default_angle_tolerance")]
    pub angle_tolerance: f64,
    /// Extension properties.
    pub properties: ModelProperties,
}

impl Model {
    /// A model of `buildings` with default units and tolerances.
    pub fn new(identifier: impl Into<String>, buildings: Vec<Building>) -> Self {
        Self {
            type_: TypeTag::new(),
            identifier: identifier.into(),
            display_name: None,
            user_data: None,
            version: default_version(),
            buildings,
            context_shades: None,
            units: Units::default(),
            tolerance: default_tolerance(),
            angle_tolerance: default_angle_tolerance(),
            properties: ModelProperties::default(),
        }
    }

    /// Total Room2D count across every unique story.
    pub fn room_count(&self) -> usize {
        self.buildings
            .iter()
            .flat_map(|b| &b.unique_stories)
            .map(|s| s.room_2ds.len())
            .sum()
    }
}

impl SchemaType for Model {
    const TYPE_NAME: &'static str = "Model";

    fn describe() -> TypeDescriptor {
        let mut fields = identity_fields();
        fields.extend([
            FieldDescriptor::optional(
                "version",
                FieldType::String(VERSION),
                "Text string for the current version of the schema.",
            )
            .with_default(DEFAULT_VERSION.into()),
            FieldDescriptor::required(
                "buildings",
                FieldType::array(FieldType::reference::<Building>()),
                "A list of Buildings in the model.",
            ),
            FieldDescriptor::optional(
                "context_shades",
                FieldType::array(FieldType::reference::<ContextShade>()),
                "A list of ContextShades in the model.",
            ),
            FieldDescriptor::optional(
                "units",
                FieldType::reference::<Units>(),
                "Text indicating the units in which the model geometry exists. This is \
                 used to scale the geometry to the correct units for simulation engines \
                 like EnergyPlus, which requires all geometry be in meters.",
            )
            .with_default("Meters".into()),
            FieldDescriptor::optional(
                "tolerance",
                FieldType::Number(TOLERANCE),
                "The maximum difference between x, y, and z values at which vertices are \
                 considered equivalent. This value should be in the Model units and is \
                 used in a variety of checks and operations. A value of 0 will result in \
                 bypassing all checks so it is recommended that this always be a positive \
                 number when checks have not already been performed on a Model. The \
                 default of 0.01 is suitable for models in meters.",
            )
            .with_default(json!(0.01)),
            FieldDescriptor::optional(
                "angle_tolerance",
                FieldType::Number(TOLERANCE),
                "The max angle difference in degrees that vertices are allowed to differ \
                 from one another in order to consider them colinear. This value is used \
                 in a variety of checks and operations that can be performed on geometry. \
                 A value of 0 will result in no checks and an inability to perform \
                 certain operations so it is recommended that this always be a positive \
                 number when checks have not already been performed on a given Model.",
            )
            .with_default(json!(1.0)),
            FieldDescriptor::required(
                "properties",
                FieldType::reference::<ModelProperties>(),
                "Extension properties for particular simulation engines (Radiance, \
                 EnergyPlus).",
            ),
        ]);
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Model"),
            "Model object.",
            fields,
        )
    }
}

impl Validate for Model {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_identity(ctx, &self.identifier);
        ctx.string("version", &self.version, &VERSION);
        ctx.nested("buildings", &self.buildings);
        ctx.nested("context_shades", &self.context_shades);
        ctx.number("tolerance", self.tolerance, &TOLERANCE);
        ctx.number("angle_tolerance", self.angle_tolerance, &TOLERANCE);
        ctx.nested("properties", &self.properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_model_defaults() {
        let model: Model = serde_json::from_value(json!({
            "identifier": "Empty",
            "buildings": [],
            "properties": {"type": "ModelProperties"}
        }))
        .unwrap();
        assert_eq!(model.version, "0.0.0");
        assert_eq!(model.units, Units::Meters);
        assert_eq!(model.tolerance, 0.01);
        assert_eq!(model.angle_tolerance, 1.0);
        assert_eq!(model.room_count(), 0);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn version_must_be_three_numbers() {
        let mut model = Model::new("M", Vec::new());
        for bad in ["1.2", "v1.2.3", "1.2.3-beta", ""] {
            model.version = bad.to_string();
            let errors = model.validate().unwrap_err();
            assert_eq!(errors.violations()[0].path(), "version", "{bad}");
        }
        model.version = "10.20.30".to_string();
        assert!(model.validate().is_ok());
    }

    #[test]
    fn negative_tolerances_are_both_reported() {
        let mut model = Model::new("M", Vec::new());
        model.tolerance = -0.1;
        model.angle_tolerance = -1.0;
        let errors = model.validate().unwrap_err();
        let paths: Vec<&str> = errors.violations().iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["tolerance", "angle_tolerance"]);
    }

    #[test]
    fn unknown_units_rejected() {
        let result = serde_json::from_value::<Model>(json!({
            "identifier": "M",
            "buildings": [],
            "units": "Furlongs",
            "properties": {}
        }));
        assert!(result.is_err());
    }
}
