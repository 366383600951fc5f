//! Geometry for specifying sloped roofs over a Story.

use serde::{Deserialize, Serialize};

use dfs_core::{FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate, ValidationContext};

use crate::external::Face3D;

/// Sloped roof geometry for a Story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoofSpecification {
    /// Always `RoofSpecification`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<RoofSpecification>,
    /// Roof faces; each covers the rooms below it.
    pub geometry: Vec<Face3D>,
}

impl SchemaType for RoofSpecification {
    const TYPE_NAME: &'static str = "RoofSpecification";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::RoofSpecification"),
            "Geometry for specifying sloped roofs over a Story.",
            vec![FieldDescriptor::required(
                "geometry",
                FieldType::array(FieldType::reference::<Face3D>()),
                "An array of Face3D objects representing the geometry of the Roof. None of \
                 these geometries should overlap in plan and, together, these Face3D should \
                 either completely cover or skip each Room2D of the Story to which the \
                 RoofSpecification is assigned.",
            )],
        )
    }
}

impl Validate for RoofSpecification {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("geometry", &self.geometry);
    }
}
