//! Window parameters: instructions for generating the windows of one wall.

use serde::{Deserialize, Serialize};

use dfs_core::geometry::validate_polygons;
use dfs_core::{
    tagged_union, Constraints, FieldDescriptor, FieldType, Point2D, SchemaType, TypeDescriptor,
    TypeTag, Validate, ValidationContext,
};

const POSITIVE: Constraints = Constraints::new().gt(0.0);
const NON_NEGATIVE: Constraints = Constraints::new().ge(0.0);
const RATIO: Constraints = Constraints::new().gt(0.0).lt(1.0);

fn default_sill_height() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

/// Report `name` if its length differs from the list it must align with.
pub(crate) fn check_aligned(
    ctx: &mut ValidationContext,
    name: &str,
    len: usize,
    aligned_with: &str,
    expected: usize,
) {
    if len != expected {
        ctx.field(name, |ctx| {
            ctx.violation(
                format!("must have one item per {aligned_with} entry ({expected} items)"),
                format!("{len} items"),
            )
        });
    }
}

fn are_doors_field(aligned_with: &'static str) -> FieldDescriptor {
    let description = match aligned_with {
        "origins" => {
            "An array of booleans that align with the origins and note whether each \
             of the geometries represents a door (True) or a window (False). If None, \
             it will be assumed that all geometries represent windows and they will be \
             translated to Apertures in any resulting Honeybee model."
        }
        _ => {
            "An array of booleans that align with the polygons and note whether each \
             of the polygons represents a door (True) or a window (False). If None, it \
             will be assumed that all polygons represent windows and they will be \
             translated to Apertures in any resulting Honeybee model."
        }
    };
    FieldDescriptor::optional("are_doors", FieldType::array(FieldType::Boolean), description)
}

/// A single window in the wall center defined by a width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleWindow {
    /// Always `SingleWindow`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<SingleWindow>,
    /// Window width.
    pub width: f64,
    /// Window height.
    pub height: f64,
    /// Height of the sill above the floor.
    #[serde(default = "default_sill_height")]
    pub sill_height: f64,
}

impl SchemaType for SingleWindow {
    const TYPE_NAME: &'static str = "SingleWindow";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::SingleWindow"),
            "A single window in the wall center defined by a width * height.",
            vec![
                FieldDescriptor::required(
                    "width",
                    FieldType::Number(POSITIVE),
                    "A number for the window width. Note that, if this width is applied to \
                     a wall that is too narrow for this width, the generated window will \
                     automatically be shortened when it is applied to the wall. In this \
                     way, setting the width to be `float(\"inf\")` will create parameters \
                     that always generate a ribboin window.",
                ),
                FieldDescriptor::required(
                    "height",
                    FieldType::Number(POSITIVE),
                    "A number for the window height. Note that, if this height is applied \
                     to a wall that is too short for this height, the generated window \
                     will automatically be shortened when it is applied to the wall.",
                ),
                FieldDescriptor::optional(
                    "sill_height",
                    FieldType::Number(POSITIVE),
                    "A number for the window sill height.",
                )
                .with_default(1.0.into()),
            ],
        )
    }
}

impl Validate for SingleWindow {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("width", self.width, &POSITIVE);
        ctx.number("height", self.height, &POSITIVE);
        ctx.number("sill_height", self.sill_height, &POSITIVE);
    }
}

/// A single window defined by an absolute area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimpleWindowArea {
    /// Always `SimpleWindowArea`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<SimpleWindowArea>,
    /// Window area of the wall.
    pub window_area: f64,
    /// Split the area into several rectangles when one does not fit.
    #[serde(default = "yes")]
    pub rect_split: bool,
}

impl SchemaType for SimpleWindowArea {
    const TYPE_NAME: &'static str = "SimpleWindowArea";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::SimpleWindowArea"),
            "A single window defined by an absolute area.",
            vec![
                FieldDescriptor::required(
                    "window_area",
                    FieldType::Number(POSITIVE),
                    "A number for the window area in current model units. If this area is \
                     larger than the area of the Wall that it is applied to, the window \
                     will fill the parent Wall at a 99 percent ratio.",
                ),
                FieldDescriptor::optional(
                    "rect_split",
                    FieldType::Boolean,
                    "Boolean to note whether rectangular portions of base Face should be \
                     extracted before scaling them to create apertures. For pentagonal \
                     gabled geometries, the resulting apertures will consist of one \
                     rectangle and one triangle, which can often look more realistic and \
                     is a better input for engines like EnergyPlus that cannot model \
                     windows with more than 4 vertices.",
                )
                .with_default(true.into()),
            ],
        )
    }
}

impl Validate for SimpleWindowArea {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("window_area", self.window_area, &POSITIVE);
    }
}

/// A single window defined by an area ratio with the base surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimpleWindowRatio {
    /// Always `SimpleWindowRatio`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<SimpleWindowRatio>,
    /// Window area as a fraction of wall area.
    pub window_ratio: f64,
}

impl SimpleWindowRatio {
    /// A window covering `window_ratio` of its wall.
    pub fn new(window_ratio: f64) -> Self {
        Self {
            type_: TypeTag::new(),
            window_ratio,
        }
    }
}

impl SchemaType for SimpleWindowRatio {
    const TYPE_NAME: &'static str = "SimpleWindowRatio";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::SimpleWindowRatio"),
            "A single window defined by an area ratio with the base surface.",
            vec![FieldDescriptor::required(
                "window_ratio",
                FieldType::Number(RATIO),
                "A number between 0 and 1 for the ratio between the window area and the \
                 parent wall surface area.",
            )],
        )
    }
}

impl Validate for SimpleWindowRatio {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("window_ratio", self.window_ratio, &RATIO);
    }
}

/// Repeating windows derived from an area ratio with the base wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepeatingWindowRatio {
    /// Always `RepeatingWindowRatio`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<RepeatingWindowRatio>,
    /// Window area as a fraction of wall area.
    pub window_ratio: f64,
    /// Target height of each window.
    pub window_height: f64,
    /// Target sill height.
    pub sill_height: f64,
    /// Target distance between window centers.
    pub horizontal_separation: f64,
    /// Distance between windows stacked in one column.
    #[serde(default)]
    pub vertical_separation: f64,
}

impl SchemaType for RepeatingWindowRatio {
    const TYPE_NAME: &'static str = "RepeatingWindowRatio";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::RepeatingWindowRatio"),
            "Repeating windows derived from an area ratio with the base wall.",
            vec![
                FieldDescriptor::required(
                    "window_ratio",
                    FieldType::Number(RATIO),
                    "A number between 0 and 1 for the ratio between the window area and \
                     the parent wall surface area.",
                ),
                FieldDescriptor::required(
                    "window_height",
                    FieldType::Number(POSITIVE),
                    "A number for the target height of the windows. Note that, if the \
                     window ratio is too large for the height, the ratio will take \
                     precedence and the actual window_height will be larger than this value.",
                ),
                FieldDescriptor::required(
                    "sill_height",
                    FieldType::Number(POSITIVE),
                    "A number for the target height above the bottom edge of the rectangle \
                     to start the windows. Note that, if the ratio is too large for the \
                     height, the ratio will take precedence and the sill_height will be \
                     smaller than this value.",
                ),
                FieldDescriptor::required(
                    "horizontal_separation",
                    FieldType::Number(NON_NEGATIVE),
                    "A number for the target separation between individual window \
                     centerlines.  If this number is larger than the parent rectangle base, \
                     only one window will be produced.",
                ),
                FieldDescriptor::optional(
                    "vertical_separation",
                    FieldType::Number(NON_NEGATIVE),
                    "An optional number to create a single vertical separation between top \
                     and bottom windows.",
                )
                .with_default(0.into()),
            ],
        )
    }
}

impl Validate for RepeatingWindowRatio {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("window_ratio", self.window_ratio, &RATIO);
        ctx.number("window_height", self.window_height, &POSITIVE);
        ctx.number("sill_height", self.sill_height, &POSITIVE);
        ctx.number("horizontal_separation", self.horizontal_separation, &NON_NEGATIVE);
        ctx.number("vertical_separation", self.vertical_separation, &NON_NEGATIVE);
    }
}

/// Several rectangular windows, defined by origin, width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RectangularWindows {
    /// Always `RectangularWindows`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<RectangularWindows>,
    /// Bottom-left corner of each window in wall coordinates.
    pub origins: Vec<Point2D>,
    /// Width of each window.
    pub widths: Vec<f64>,
    /// Height of each window.
    pub heights: Vec<f64>,
    /// Whether each window is a door.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub are_doors: Option<Vec<bool>>,
}

impl SchemaType for RectangularWindows {
    const TYPE_NAME: &'static str = "RectangularWindows";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::RectangularWindows"),
            "Several rectangular windows, defined by origin, width and height.",
            vec![
                FieldDescriptor::required(
                    "origins",
                    FieldType::array(FieldType::point2d()),
                    "An array of 2D points within the plane of the wall for the origin of \
                     each window. Each point should be a list of 2 (x, y) values. The wall \
                     plane is assumed to have an origin at the first point of the wall \
                     segment and an X-axis extending along the length of the segment. The \
                     wall plane's Y-axis always points upwards. Therefore, both X and Y \
                     values of each origin point should be positive.",
                ),
                FieldDescriptor::required(
                    "widths",
                    FieldType::array(FieldType::Number(POSITIVE)),
                    "An array of positive numbers for the window widths. The length of \
                     this list must match the length of the origins.",
                ),
                FieldDescriptor::required(
                    "heights",
                    FieldType::array(FieldType::Number(POSITIVE)),
                    "An array of positive numbers for the window heights. The length of \
                     this list must match the length of the origins.",
                ),
                are_doors_field("origins"),
            ],
        )
    }
}

impl Validate for RectangularWindows {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("origins", &self.origins);
        for (name, values) in [("widths", &self.widths), ("heights", &self.heights)] {
            ctx.field(name, |ctx| {
                for (i, v) in values.iter().enumerate() {
                    ctx.index(i, |ctx| POSITIVE.check_number(ctx, *v));
                }
            });
        }
        let count = self.origins.len();
        check_aligned(ctx, "widths", self.widths.len(), "origins", count);
        check_aligned(ctx, "heights", self.heights.len(), "origins", count);
        if let Some(doors) = &self.are_doors {
            check_aligned(ctx, "are_doors", doors.len(), "origins", count);
        }
    }
}

/// Several detailed windows defined by 2D polygons in the wall plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedWindows {
    /// Always `DetailedWindows`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<DetailedWindows>,
    /// Window outlines in wall coordinates.
    pub polygons: Vec<Vec<Point2D>>,
    /// Whether each polygon is a door.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub are_doors: Option<Vec<bool>>,
}

impl SchemaType for DetailedWindows {
    const TYPE_NAME: &'static str = "DetailedWindows";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::DetailedWindows"),
            "Several detailed windows defined by 2D Polygons (lists of 2D vertices).",
            vec![
                FieldDescriptor::required(
                    "polygons",
                    FieldType::array(FieldType::polygon2d()),
                    "An array of arrays with each sub-array representing a polygonal \
                     boundary of a window. Each sub-array should consist of arrays \
                     representing points, which contain 2 values for 2D coordinates in the \
                     wall plane. The wall plane is assumed to have an origin at the first \
                     point of the wall segment and an X-axis extending along the length of \
                     the segment. The wall plane's Y-axis always points upwards. Therefore, \
                     both X and Y values of each point in the polygon should always be \
                     positive.",
                ),
                are_doors_field("polygons"),
            ],
        )
    }
}

impl Validate for DetailedWindows {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_polygons(ctx, "polygons", &self.polygons);
        if let Some(doors) = &self.are_doors {
            check_aligned(ctx, "are_doors", doors.len(), "polygons", self.polygons.len());
        }
    }
}

tagged_union! {
    /// Instructions for generating the windows of one wall segment.
    pub enum WindowParameter {
        SingleWindow(SingleWindow),
        SimpleWindowArea(SimpleWindowArea),
        SimpleWindowRatio(SimpleWindowRatio),
        RepeatingWindowRatio(RepeatingWindowRatio),
        RectangularWindows(RectangularWindows),
        DetailedWindows(DetailedWindows),
    }
}
