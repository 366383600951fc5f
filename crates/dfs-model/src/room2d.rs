//! # Room2D
//!
//! A single room extruded from a floor polygon (an outer boundary plus
//! optional holes). Four optional per-edge lists attach one value to every
//! edge of that polygon, walking the boundary first and then each hole:
//! `boundary_conditions`, `window_parameters`, `shading_parameters` and
//! `air_boundaries`. A present list must have exactly one entry per edge;
//! an absent list means every edge takes the default.
//!
//! [`validate_room2d`] applies those rules to bare geometry and lists, and
//! [`Room2D`] applies the same rules plus its own field bounds.

use serde::{Deserialize, Serialize};

use dfs_core::geometry::{validate_polygon, validate_polygons};
use dfs_core::{
    segment_count, FieldDescriptor, FieldType, Point2D, SchemaType, TypeDescriptor, TypeTag,
    Validate, ValidationContext, ValidationViolations,
};

use crate::external::BoundaryCondition;
use crate::identity::{identity_fields, validate_identity};
use crate::properties::Room2DPropertiesAbridged;
use crate::shading::ShadingParameter;
use crate::skylight::SkylightParameter;
use crate::window::WindowParameter;

/// Report every present per-edge list whose length differs from
/// `expected`. Absent lists pass.
pub(crate) fn check_segment_counts(
    ctx: &mut ValidationContext,
    expected: usize,
    lists: &[(&str, Option<usize>)],
) {
    for (field, len) in lists {
        if let Some(actual) = *len {
            if actual != expected {
                ctx.segment_mismatch(field, expected, actual);
            }
        }
    }
}

/// Floor geometry and the per-edge lists that must align with it.
struct FloorPlan<'a> {
    floor_boundary: &'a [Point2D],
    floor_holes: Option<&'a [Vec<Point2D>]>,
    boundary_conditions: Option<&'a [BoundaryCondition]>,
    window_parameters: Option<&'a [Option<WindowParameter>]>,
    shading_parameters: Option<&'a [Option<ShadingParameter>]>,
    air_boundaries: Option<&'a [bool]>,
}

impl FloorPlan<'_> {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_polygon(ctx, "floor_boundary", self.floor_boundary);
        if let Some(holes) = self.floor_holes {
            validate_polygons(ctx, "floor_holes", holes);
        }
        if let Some(bcs) = self.boundary_conditions {
            ctx.nested("boundary_conditions", bcs);
        }
        if let Some(windows) = self.window_parameters {
            ctx.nested("window_parameters", windows);
        }
        if let Some(shades) = self.shading_parameters {
            ctx.nested("shading_parameters", shades);
        }

        let expected = segment_count(self.floor_boundary, self.floor_holes);
        check_segment_counts(
            ctx,
            expected,
            &[
                ("boundary_conditions", self.boundary_conditions.map(<[_]>::len)),
                ("window_parameters", self.window_parameters.map(<[_]>::len)),
                ("shading_parameters", self.shading_parameters.map(<[_]>::len)),
                ("air_boundaries", self.air_boundaries.map(<[_]>::len)),
            ],
        );
    }
}

/// Check a floor polygon and its per-edge lists.
///
/// Field-level rules (at least three points per polygon, finite
/// coordinates, each parameter's own bounds) are reported first, then one
/// `SegmentCountMismatch` per present list whose length is not the edge
/// count. Every violation is collected.
pub fn validate_room2d(
    floor_boundary: &[Point2D],
    floor_holes: Option<&[Vec<Point2D>]>,
    boundary_conditions: Option<&[BoundaryCondition]>,
    window_parameters: Option<&[Option<WindowParameter>]>,
    shading_parameters: Option<&[Option<ShadingParameter>]>,
    air_boundaries: Option<&[bool]>,
) -> Result<(), ValidationViolations> {
    let mut ctx = ValidationContext::new();
    FloorPlan {
        floor_boundary,
        floor_holes,
        boundary_conditions,
        window_parameters,
        shading_parameters,
        air_boundaries,
    }
    .validate_into(&mut ctx);
    ctx.finish()
}

/// A single room defined by an extruded floor polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room2D {
    /// Always `Room2D`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Room2D>,
    /// Unique ID: 1 to 100 characters from `A-Z a-z 0-9 . _ -`.
    pub identifier: String,
    /// Display name with no character restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form user data carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Map<String, serde_json::Value>>,
    /// Outer floor outline.
    pub floor_boundary: Vec<Point2D>,
    /// Holes in the floor; their edges follow the boundary's in every per-edge list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_holes: Option<Vec<Vec<Point2D>>>,
    /// Height of the floor.
    pub floor_height: f64,
    /// Distance from floor to ceiling.
    pub floor_to_ceiling_height: f64,
    /// Whether the floor touches the ground.
    #[serde(default)]
    pub is_ground_contact: bool,
    /// Whether the ceiling is exposed to the outdoors.
    #[serde(default)]
    pub is_top_exposed: bool,
    /// One boundary condition per edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_conditions: Option<Vec<BoundaryCondition>>,
    /// One window parameter, or none, per edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_parameters: Option<Vec<Option<WindowParameter>>>,
    /// One shading parameter, or none, per edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shading_parameters: Option<Vec<Option<ShadingParameter>>>,
    /// Whether each edge is an air boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_boundaries: Option<Vec<bool>>,
    /// How to generate skylights in the roof.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skylight_parameters: Option<SkylightParameter>,
    /// Extension properties.
    pub properties: Room2DPropertiesAbridged,
}

impl Room2D {
    /// A room with the given floor polygon and heights and no per-edge
    /// lists.
    pub fn new(
        identifier: impl Into<String>,
        floor_boundary: Vec<Point2D>,
        floor_height: f64,
        floor_to_ceiling_height: f64,
    ) -> Self {
        Self {
            type_: TypeTag::new(),
            identifier: identifier.into(),
            display_name: None,
            user_data: None,
            floor_boundary,
            floor_holes: None,
            floor_height,
            floor_to_ceiling_height,
            is_ground_contact: false,
            is_top_exposed: false,
            boundary_conditions: None,
            window_parameters: None,
            shading_parameters: None,
            air_boundaries: None,
            skylight_parameters: None,
            properties: Room2DPropertiesAbridged::default(),
        }
    }

    /// Number of wall segments: boundary edges plus hole edges.
    pub fn segment_count(&self) -> usize {
        segment_count(&self.floor_boundary, self.floor_holes.as_deref())
    }

    fn floor_plan(&self) -> FloorPlan<'_> {
        FloorPlan {
            floor_boundary: &self.floor_boundary,
            floor_holes: self.floor_holes.as_deref(),
            boundary_conditions: self.boundary_conditions.as_deref(),
            window_parameters: self.window_parameters.as_deref(),
            shading_parameters: self.shading_parameters.as_deref(),
            air_boundaries: self.air_boundaries.as_deref(),
        }
    }
}

impl SchemaType for Room2D {
    const TYPE_NAME: &'static str = "Room2D";

    fn describe() -> TypeDescriptor {
        let mut fields = identity_fields();
        fields.extend([
            FieldDescriptor::required(
                "floor_boundary",
                FieldType::polygon2d(),
                "A list of 2D points representing the outer boundary vertices of the \
                 Room2D. The list should include at least 3 points and each point should \
                 be a list of 2 (x, y) values.",
            ),
            FieldDescriptor::optional(
                "floor_holes",
                FieldType::array(FieldType::polygon2d()),
                "Optional list of lists with one list for each hole in the floor plate. \
                 Each hole should be a list of at least 2 points and each point a list of \
                 2 (x, y) values. If None, it will be assumed that there are no holes in \
                 the floor plate.",
            ),
            FieldDescriptor::required(
                "floor_height",
                FieldType::number(),
                "A number to indicate the height of the floor plane in the Z axis.",
            ),
            FieldDescriptor::required(
                "floor_to_ceiling_height",
                FieldType::number(),
                "A number for the distance between the floor and the ceiling.",
            ),
            FieldDescriptor::optional(
                "is_ground_contact",
                FieldType::Boolean,
                "A boolean noting whether this Room2D has its floor in contact with the \
                 ground.",
            )
            .with_default(false.into()),
            FieldDescriptor::optional(
                "is_top_exposed",
                FieldType::Boolean,
                "A boolean noting whether this Room2D has its ceiling exposed to the \
                 outdoors.",
            )
            .with_default(false.into()),
            FieldDescriptor::optional(
                "boundary_conditions",
                FieldType::array(BoundaryCondition::field_type()),
                "A list of boundary conditions that match the number of segments in the \
                 input floor_geometry + floor_holes. These will be used to assign boundary \
                 conditions to each of the walls of the Room in the resulting model. Their \
                 order should align with the order of segments in the floor_boundary and \
                 then with each hole segment. If None, all boundary conditions will be \
                 Outdoors or Ground depending on whether ceiling height of the room is at \
                 or below 0 (the assumed ground plane).",
            ),
            FieldDescriptor::optional(
                "window_parameters",
                FieldType::array(WindowParameter::field_type().nullable()),
                "A list of WindowParameter objects that dictate how the window geometries \
                 will be generated for each of the walls. If None, no windows will exist \
                 over the entire Room2D.",
            ),
            FieldDescriptor::optional(
                "shading_parameters",
                FieldType::array(ShadingParameter::field_type().nullable()),
                "A list of ShadingParameter objects that dictate how the shade geometries \
                 will be generated for each of the walls. If None, no shades will exist \
                 over the entire Room2D.",
            ),
            FieldDescriptor::optional(
                "air_boundaries",
                FieldType::array(FieldType::Boolean),
                "A list of booleans for whether each wall has an air boundary type. False \
                 values indicate a standard opaque type while True values indicate an \
                 AirBoundary type. All walls will be False by default. Note that any walls \
                 with a True air boundary must have a Surface boundary condition without \
                 any windows.",
            ),
            FieldDescriptor::optional(
                "skylight_parameters",
                SkylightParameter::field_type(),
                "A SkylightParameter object describing how to generate skylights. If None, \
                 no skylights will exist on the Room2D.",
            ),
            FieldDescriptor::required(
                "properties",
                FieldType::reference::<Room2DPropertiesAbridged>(),
                "Extension properties for particular simulation engines (Radiance, \
                 EnergyPlus).",
            ),
        ]);
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Room2D"),
            "A single room defined by an extruded floor plate polygon.",
            fields,
        )
    }
}

impl Validate for Room2D {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_identity(ctx, &self.identifier);
        self.floor_plan().validate_into(ctx);
        ctx.nested("skylight_parameters", &self.skylight_parameters);
        ctx.nested("properties", &self.properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::Outdoors;
    use crate::window::SimpleWindowRatio;
    use dfs_core::ValidationError;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]
    }

    fn outdoors(n: usize) -> Vec<BoundaryCondition> {
        vec![BoundaryCondition::Outdoors(Outdoors::default()); n]
    }

    #[test]
    fn matching_lists_pass() {
        let windows = vec![Some(WindowParameter::from(SimpleWindowRatio::new(0.4))); 4];
        let bcs = outdoors(4);
        assert!(validate_room2d(
            &square(),
            None,
            Some(bcs.as_slice()),
            Some(windows.as_slice()),
            None,
            Some(&[false; 4][..]),
        )
        .is_ok());
    }

    #[test]
    fn holes_add_edges() {
        let hole = vec![
            Point2D::new(4.0, 4.0),
            Point2D::new(6.0, 4.0),
            Point2D::new(6.0, 6.0),
            Point2D::new(4.0, 6.0),
        ];
        let holes = vec![hole];
        let (eight, four) = (outdoors(8), outdoors(4));
        assert!(validate_room2d(&square(), Some(holes.as_slice()), Some(eight.as_slice()), None, None, None).is_ok());
        let errors = validate_room2d(&square(), Some(holes.as_slice()), Some(four.as_slice()), None, None, None)
            .unwrap_err();
        assert_eq!(
            errors.first(),
            Some(&ValidationError::SegmentCountMismatch {
                path: "(root)".to_string(),
                field: "boundary_conditions".to_string(),
                expected: 8,
                actual: 4,
            })
        );
    }

    #[test]
    fn triangular_hole_in_square_has_seven_edges() {
        let holes = vec![vec![
            Point2D::new(4.0, 4.0),
            Point2D::new(6.0, 4.0),
            Point2D::new(5.0, 6.0),
        ]];
        let bcs = outdoors(7);
        let windows = vec![Some(WindowParameter::from(SimpleWindowRatio::new(0.3))); 7];
        let shades: Vec<Option<ShadingParameter>> = vec![None; 7];
        assert!(validate_room2d(
            &square(),
            Some(holes.as_slice()),
            Some(bcs.as_slice()),
            Some(windows.as_slice()),
            Some(shades.as_slice()),
            Some(&[false; 7][..]),
        )
        .is_ok());

        // A list that only covers the outer boundary misses the hole's edges.
        let errors = validate_room2d(
            &square(),
            Some(holes.as_slice()),
            Some(bcs.as_slice()),
            None,
            None,
            Some(&[false; 4][..]),
        )
        .unwrap_err();
        assert_eq!(
            errors.violations(),
            &[ValidationError::SegmentCountMismatch {
                path: "(root)".to_string(),
                field: "air_boundaries".to_string(),
                expected: 7,
                actual: 4,
            }]
        );
    }

    #[test]
    fn every_list_is_checked() {
        let bcs = outdoors(2);
        let windows = vec![None; 3];
        let shades = vec![None; 5];
        let errors = validate_room2d(
            &square(),
            None,
            Some(bcs.as_slice()),
            Some(windows.as_slice()),
            Some(shades.as_slice()),
            Some(&[true][..]),
        )
        .unwrap_err();
        let fields: Vec<String> = errors
            .violations()
            .iter()
            .map(|e| match e {
                ValidationError::SegmentCountMismatch { field, .. } => field.clone(),
                other => panic!("unexpected violation {other}"),
            })
            .collect();
        assert_eq!(
            fields,
            vec!["boundary_conditions", "window_parameters", "shading_parameters", "air_boundaries"]
        );
    }

    #[test]
    fn short_boundary_reported_with_field_rules_first() {
        let boundary = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)];
        let errors = validate_room2d(&boundary, None, None, None, None, Some(&[false; 3][..])).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.violations()[0].path(), "floor_boundary");
        assert!(matches!(
            errors.violations()[1],
            ValidationError::SegmentCountMismatch { expected: 2, actual: 3, .. }
        ));
    }

    #[test]
    fn nested_parameter_bounds_are_independent() {
        let windows = vec![
            None,
            Some(WindowParameter::from(SimpleWindowRatio::new(1.5))),
            None,
            None,
        ];
        let errors = validate_room2d(&square(), None, None, Some(windows.as_slice()), None, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations()[0].path(), "window_parameters[1].window_ratio");
    }

    #[test]
    fn room_counts_segments() {
        let mut room = Room2D::new("Office", square(), 0.0, 3.0);
        assert_eq!(room.segment_count(), 4);
        assert!(room.validate().is_ok());
        room.air_boundaries = Some(vec![false; 5]);
        room.identifier = "bad id".to_string();
        let errors = room.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.violations()[0].path(), "identifier");
    }
}
