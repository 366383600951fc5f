//! ContextShade: shading geometry around the buildings (trees, canopies,
//! neighbouring buildings).

use serde::{Deserialize, Serialize};

use dfs_core::{
    Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate,
    ValidationContext,
};

use crate::external::Face3D;
use crate::identity::{identity_fields, validate_identity};
use crate::properties::ContextShadePropertiesAbridged;

const GEOMETRY: Constraints = Constraints::new().min_items(1);

fn yes() -> bool {
    true
}

/// Context shade defined by an array of planar Face3Ds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextShade {
    /// Always `ContextShade`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ContextShade>,
    /// Unique ID: 1 to 100 characters from `A-Z a-z 0-9 . _ -`.
    pub identifier: String,
    /// Display name with no character restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form user data carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Map<String, serde_json::Value>>,
    /// Planar faces forming the shade.
    pub geometry: Vec<Face3D>,
    /// True for shade that does not move with a building, such as trees or neighbouring buildings.
    #[serde(default = "yes")]
    pub is_detached: bool,
    /// Extension properties.
    pub properties: ContextShadePropertiesAbridged,
}

impl SchemaType for ContextShade {
    const TYPE_NAME: &'static str = "ContextShade";

    fn describe() -> TypeDescriptor {
        let mut fields = identity_fields();
        fields.extend([
            FieldDescriptor::required(
                "geometry",
                FieldType::array_with(FieldType::reference::<Face3D>(), GEOMETRY),
                "An array of planar Face3Ds that together represent the context shade.",
            ),
            FieldDescriptor::optional(
                "is_detached",
                FieldType::Boolean,
                "Boolean to note whether this shade is detached from any of the other \
                 geometry in the model. Cases where this should be True include shade \
                 representing surrounding buildings or context.",
            )
            .with_default(true.into()),
            FieldDescriptor::required(
                "properties",
                FieldType::reference::<ContextShadePropertiesAbridged>(),
                "Extension properties for particular simulation engines (Radiance, \
                 EnergyPlus).",
            ),
        ]);
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ContextShade"),
            "A Context Shade object defined by an array of Face3Ds (eg. canopy, trees, etc.).",
            fields,
        )
    }
}

impl Validate for ContextShade {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_identity(ctx, &self.identifier);
        ctx.items("geometry", self.geometry.len(), &GEOMETRY);
        ctx.nested("geometry", &self.geometry);
        ctx.nested("properties", &self.properties);
    }
}
