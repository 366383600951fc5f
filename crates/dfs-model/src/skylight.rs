//! Skylight parameters: instructions for generating the skylights of a roof.

use serde::{Deserialize, Serialize};

use dfs_core::geometry::validate_polygons;
use dfs_core::{
    tagged_union, Constraints, FieldDescriptor, FieldType, Point2D, SchemaType, TypeDescriptor,
    TypeTag, Validate, ValidationContext,
};

use crate::identity::AutoNumber;
use crate::window::check_aligned;

const POSITIVE: Constraints = Constraints::new().gt(0.0);
const RATIO: Constraints = Constraints::new().gt(0.0).lt(1.0);

const SPACING_DESCRIPTION: &str = "A number for the spacing between the centers of each \
    grid cell. This should be less than a third of the dimension of the Roof geometry if \
    multiple, evenly-spaced skylights are desired. If Autocalculate, a spacing of one third \
    the smaller dimension of the parent Roof will be automatically assumed.";

fn spacing_field() -> FieldDescriptor {
    FieldDescriptor::optional("spacing", AutoNumber::field_type(POSITIVE), SPACING_DESCRIPTION)
        .with_default(AutoNumber::default_value())
}

/// Gridded skylights defined by an absolute area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GriddedSkylightArea {
    /// Always `GriddedSkylightArea`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<GriddedSkylightArea>,
    /// Total skylight area.
    pub skylight_area: f64,
    /// Spacing between skylight centers, or autocalculated.
    #[serde(default)]
    pub spacing: AutoNumber,
}

impl SchemaType for GriddedSkylightArea {
    const TYPE_NAME: &'static str = "GriddedSkylightArea";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::GriddedSkylightArea"),
            "Gridded skylights defined by an absolute area.",
            vec![
                FieldDescriptor::required(
                    "skylight_area",
                    FieldType::Number(POSITIVE),
                    "A number for the skylight area in current model units. If this area \
                     is larger than the area of the roof that it is applied to, the \
                     skylight will fill the parent roof at a 99 percent ratio.",
                ),
                spacing_field(),
            ],
        )
    }
}

impl Validate for GriddedSkylightArea {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("skylight_area", self.skylight_area, &POSITIVE);
        self.spacing.check(ctx, "spacing", &POSITIVE);
    }
}

/// Gridded skylights derived from an area ratio with the roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GriddedSkylightRatio {
    /// Always `GriddedSkylightRatio`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<GriddedSkylightRatio>,
    /// Skylight area as a fraction of roof area.
    pub skylight_ratio: f64,
    /// Spacing between skylight centers, or autocalculated.
    #[serde(default)]
    pub spacing: AutoNumber,
}

impl SchemaType for GriddedSkylightRatio {
    const TYPE_NAME: &'static str = "GriddedSkylightRatio";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::GriddedSkylightRatio"),
            "Gridded skylights derived from an area ratio with the roof.",
            vec![
                FieldDescriptor::required(
                    "skylight_ratio",
                    FieldType::Number(RATIO),
                    "A number between 0 and 1 for the ratio between the skylight area and \
                     the total Roof face area.",
                ),
                spacing_field(),
            ],
        )
    }
}

impl Validate for GriddedSkylightRatio {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("skylight_ratio", self.skylight_ratio, &RATIO);
        self.spacing.check(ctx, "spacing", &POSITIVE);
    }
}

/// Several detailed skylights defined by 2D polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedSkylights {
    /// Always `DetailedSkylights`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<DetailedSkylights>,
    /// Skylight outlines in plan.
    pub polygons: Vec<Vec<Point2D>>,
    /// Whether each polygon is an overhead door.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub are_doors: Option<Vec<bool>>,
}

impl SchemaType for DetailedSkylights {
    const TYPE_NAME: &'static str = "DetailedSkylights";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::DetailedSkylights"),
            "Several detailed skylights defined by 2D Polygons (lists of 2D vertices).",
            vec![
                FieldDescriptor::required(
                    "polygons",
                    FieldType::array(FieldType::polygon2d()),
                    "An array of arrays with each sub-array representing a polygonal \
                     boundary of a skylight. Each sub-array should consist of arrays \
                     representing points, which contain 2 values for 2D coordinates in the \
                     world XY system. These coordinate values should lie within the parent \
                     Room2D Polygon.",
                ),
                FieldDescriptor::optional(
                    "are_doors",
                    FieldType::array(FieldType::Boolean),
                    "An array of booleans that align with the polygons and note whether \
                     each of the polygons represents an overhead door (True) or a skylight \
                     (False). If None, it will be assumed that all polygons represent \
                     skylights and they will be translated to Apertures in any resulting \
                     Honeybee model.",
                ),
            ],
        )
    }
}

impl Validate for DetailedSkylights {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_polygons(ctx, "polygons", &self.polygons);
        if let Some(doors) = &self.are_doors {
            check_aligned(ctx, "are_doors", doors.len(), "polygons", self.polygons.len());
        }
    }
}

tagged_union! {
    /// Instructions for generating the skylights of a Room2D roof.
    pub enum SkylightParameter {
        GriddedSkylightArea(GriddedSkylightArea),
        GriddedSkylightRatio(GriddedSkylightRatio),
        DetailedSkylights(DetailedSkylights),
    }
}
