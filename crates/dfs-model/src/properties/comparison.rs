//! Comparison properties: the geometry of a reference room that a Room2D
//! is being compared against.

use serde::{Deserialize, Serialize};

use dfs_core::geometry::{validate_polygon, validate_polygons};
use dfs_core::{
    segment_count, FieldDescriptor, FieldType, Point2D, SchemaType, TypeDescriptor, TypeTag,
    Validate, ValidationContext,
};

use crate::room2d::check_segment_counts;
use crate::skylight::SkylightParameter;
use crate::window::WindowParameter;

/// Reference-room geometry attached to a Room2D.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room2DComparisonProperties {
    /// Always `Room2DComparisonProperties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Room2DComparisonProperties>,
    /// Floor outline of the room being compared against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_boundary: Option<Vec<Point2D>>,
    /// Floor holes of the room being compared against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_holes: Option<Vec<Vec<Point2D>>>,
    /// Window parameters of the room being compared against, one per edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_windows: Option<Vec<Option<WindowParameter>>>,
    /// Skylight parameters of the room being compared against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_skylight: Option<SkylightParameter>,
}

impl SchemaType for Room2DComparisonProperties {
    const TYPE_NAME: &'static str = "Room2DComparisonProperties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Room2DComparisonProperties"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                FieldDescriptor::optional(
                    "floor_boundary",
                    FieldType::polygon2d(),
                    "A list of 2D points representing the outer boundary vertices of the \
                     Room2D to which the host Room2D is being compared. The list should \
                     include at least 3 points and each point should be a list of 2 (x, y) \
                     values.",
                ),
                FieldDescriptor::optional(
                    "floor_holes",
                    FieldType::array(FieldType::polygon2d()),
                    "Optional list of lists with one list for each hole in the floor plate \
                     of the Room2D to which the host Room2D is being compared. Each hole \
                     should be a list of at least 2 points and each point a list of 2 (x, y) \
                     values. If None, it will be assumed that there are no holes in the \
                     floor plate.",
                ),
                FieldDescriptor::optional(
                    "comparison_windows",
                    FieldType::array(WindowParameter::field_type().nullable()),
                    "A list of WindowParameter objects that dictate the window geometries \
                     of the Room2D to which the host Room2D is being compared.",
                ),
                FieldDescriptor::optional(
                    "comparison_skylight",
                    SkylightParameter::field_type(),
                    "A SkylightParameter object for the Room2D to which the host Room2D is \
                     being compared.",
                ),
            ],
        )
    }
}

impl Validate for Room2DComparisonProperties {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        if let Some(boundary) = &self.floor_boundary {
            validate_polygon(ctx, "floor_boundary", boundary);
        }
        if let Some(holes) = &self.floor_holes {
            validate_polygons(ctx, "floor_holes", holes);
        }
        ctx.nested("comparison_windows", &self.comparison_windows);
        ctx.nested("comparison_skylight", &self.comparison_skylight);
        if let Some(boundary) = &self.floor_boundary {
            let expected = segment_count(boundary, self.floor_holes.as_deref());
            check_segment_counts(
                ctx,
                expected,
                &[(
                    "comparison_windows",
                    self.comparison_windows.as_ref().map(Vec::len),
                )],
            );
        }
    }
}

/// Model-level comparison properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelComparisonProperties {
    /// Always `ModelComparisonProperties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ModelComparisonProperties>,
}

impl SchemaType for ModelComparisonProperties {
    const TYPE_NAME: &'static str = "ModelComparisonProperties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ModelComparisonProperties"),
            "Base class for all objects that are not extensible with additional keys.",
            Vec::new(),
        )
    }
}

impl Validate for ModelComparisonProperties {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}
