//! Shading parameters: instructions for generating the shades of one wall.

use serde::{Deserialize, Serialize};

use dfs_core::{
    tagged_union, Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag,
    Validate, ValidationContext,
};

const POSITIVE: Constraints = Constraints::new().gt(0.0);
const NON_NEGATIVE: Constraints = Constraints::new().ge(0.0);
const ANGLE: Constraints = Constraints::new().ge(-90.0).le(90.0);
const VECTOR_2D: Constraints = Constraints::new().items(2, 2);

fn default_contour_vector() -> Vec<f64> {
    vec![0.0, 1.0]
}

/// Extruded borders over all windows in the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtrudedBorder {
    /// Always `ExtrudedBorder`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ExtrudedBorder>,
    /// Depth the border extends out from each window.
    pub depth: f64,
}

impl SchemaType for ExtrudedBorder {
    const TYPE_NAME: &'static str = "ExtrudedBorder";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ExtrudedBorder"),
            "Extruded borders over all windows in the wall.",
            vec![FieldDescriptor::required(
                "depth",
                FieldType::Number(POSITIVE),
                "A number for the depth of the border.",
            )],
        )
    }
}

impl Validate for ExtrudedBorder {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("depth", self.depth, &POSITIVE);
    }
}

/// A single overhang over an entire wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overhang {
    /// Always `Overhang`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Overhang>,
    /// Depth of the overhang.
    pub depth: f64,
    /// Tilt from horizontal in degrees.
    #[serde(default)]
    pub angle: f64,
}

impl Overhang {
    /// An overhang of `depth` perpendicular to the wall.
    pub fn new(depth: f64) -> Self {
        Self {
            type_: TypeTag::new(),
            depth,
            angle: 0.0,
        }
    }
}

impl SchemaType for Overhang {
    const TYPE_NAME: &'static str = "Overhang";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Overhang"),
            "A single overhang over an entire wall.",
            vec![
                FieldDescriptor::required(
                    "depth",
                    FieldType::Number(POSITIVE),
                    "A number for the overhang depth.",
                ),
                FieldDescriptor::optional(
                    "angle",
                    FieldType::Number(ANGLE),
                    "A number between -90 and 90 for the for an angle to rotate the \
                     overhang in degrees. 0 indicates an overhang perpendicular to the \
                     wall. Positive values indicate a downward rotation. Negative values \
                     indicate an upward rotation.",
                )
                .with_default(0.into()),
            ],
        )
    }
}

impl Validate for Overhang {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.number("depth", self.depth, &POSITIVE);
        ctx.number("angle", self.angle, &ANGLE);
    }
}

/// Fields shared by every louver family. Never instantiated.
pub enum LouversBase {}

impl SchemaType for LouversBase {
    const TYPE_NAME: &'static str = "_LouversBase";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::abstract_record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::LouversBase"),
            "Base class for for a series of louvered shades over a wall.",
            vec![
                FieldDescriptor::required(
                    "depth",
                    FieldType::Number(POSITIVE),
                    "A number for the depth to extrude the louvers.",
                ),
                FieldDescriptor::optional(
                    "offset",
                    FieldType::Number(NON_NEGATIVE),
                    "A number for the distance to louvers from the wall.",
                )
                .with_default(0.into()),
                FieldDescriptor::optional(
                    "angle",
                    FieldType::Number(ANGLE),
                    "A number between -90 and 90 for the for an angle to rotate the \
                     louvers in degrees. 0 indicates louvers perpendicular to the wall. \
                     Positive values indicate a downward rotation. Negative values \
                     indicate an upward rotation.",
                )
                .with_default(0.into()),
                FieldDescriptor::optional(
                    "contour_vector",
                    FieldType::array_with(FieldType::number(), VECTOR_2D),
                    "A list of two float values representing the (x, y) of a 2D vector for \
                     the direction along which contours are generated. (0, 1) will generate \
                     horizontal contours, (1, 0) will generate vertical contours, and (1, 1) \
                     will generate diagonal contours.",
                )
                .with_default(serde_json::json!([0, 1])),
                FieldDescriptor::optional(
                    "flip_start_side",
                    FieldType::Boolean,
                    "Boolean to note whether the side the louvers start from should be \
                     flipped. Default is False to have contours on top or right. Setting to \
                     True will start contours on the bottom or left.",
                )
                .with_default(false.into()),
            ],
        )
    }
}

fn validate_louver_fields(
    ctx: &mut ValidationContext,
    depth: f64,
    offset: f64,
    angle: f64,
    contour_vector: &[f64],
) {
    ctx.number("depth", depth, &POSITIVE);
    ctx.number("offset", offset, &NON_NEGATIVE);
    ctx.number("angle", angle, &ANGLE);
    ctx.items("contour_vector", contour_vector.len(), &VECTOR_2D);
}

/// A series of louvered shades at a given distance between each louver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LouversByDistance {
    /// Always `LouversByDistance`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<LouversByDistance>,
    /// Depth of each louver.
    pub depth: f64,
    /// Distance of the louvers from the wall.
    #[serde(default)]
    pub offset: f64,
    /// Tilt from horizontal in degrees.
    #[serde(default)]
    pub angle: f64,
    /// 2D direction the louvers run along.
    #[serde(default = "default_contour_vector")]
    pub contour_vector: Vec<f64>,
    /// Start placing louvers from the opposite side.
    #[serde(default)]
    pub flip_start_side: bool,
    /// Spacing between louvers.
    pub distance: f64,
}

impl SchemaType for LouversByDistance {
    const TYPE_NAME: &'static str = "LouversByDistance";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::LouversByDistance"),
            "A series of louvered Shades at a given distance between each louver.",
            vec![FieldDescriptor::required(
                "distance",
                FieldType::Number(POSITIVE),
                "A number for the approximate distance between each louver.",
            )],
        )
        .extends(LouversBase::TYPE_NAME)
    }
}

impl Validate for LouversByDistance {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_louver_fields(ctx, self.depth, self.offset, self.angle, &self.contour_vector);
        ctx.number("distance", self.distance, &POSITIVE);
    }
}

/// A specific number of louvered shades over a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LouversByCount {
    /// Always `LouversByCount`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<LouversByCount>,
    /// Depth of each louver.
    pub depth: f64,
    /// Distance of the louvers from the wall.
    #[serde(default)]
    pub offset: f64,
    /// Tilt from horizontal in degrees.
    #[serde(default)]
    pub angle: f64,
    /// 2D direction the louvers run along.
    #[serde(default = "default_contour_vector")]
    pub contour_vector: Vec<f64>,
    /// Start placing louvers from the opposite side.
    #[serde(default)]
    pub flip_start_side: bool,
    /// Number of louvers.
    pub louver_count: i64,
}

impl SchemaType for LouversByCount {
    const TYPE_NAME: &'static str = "LouversByCount";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::LouversByCount"),
            "A specific number of louvered Shades over a wall.",
            vec![FieldDescriptor::required(
                "louver_count",
                FieldType::Integer(POSITIVE),
                "A positive integer for the number of louvers to generate.",
            )],
        )
        .extends(LouversBase::TYPE_NAME)
    }
}

impl Validate for LouversByCount {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_louver_fields(ctx, self.depth, self.offset, self.angle, &self.contour_vector);
        ctx.integer("louver_count", self.louver_count, &POSITIVE);
    }
}

tagged_union! {
    /// Instructions for generating the shades of one wall segment.
    pub enum ShadingParameter {
        ExtrudedBorder(ExtrudedBorder),
        Overhang(Overhang),
        LouversByDistance(LouversByDistance),
        LouversByCount(LouversByCount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn louvers_take_base_defaults() {
        let s: ShadingParameter =
            serde_json::from_value(json!({"type": "LouversByDistance", "depth": 0.3, "distance": 0.5}))
                .unwrap();
        match s {
            ShadingParameter::LouversByDistance(l) => {
                assert_eq!(l.offset, 0.0);
                assert_eq!(l.contour_vector, vec![0.0, 1.0]);
                assert!(!l.flip_start_side);
            }
            other => panic!("decoded as {}", other.type_name()),
        }
    }

    #[test]
    fn louver_count_must_be_positive() {
        let s: ShadingParameter =
            serde_json::from_value(json!({"type": "LouversByCount", "depth": 0.3, "louver_count": 0}))
                .unwrap();
        assert_eq!(s.validate().unwrap_err().violations()[0].path(), "louver_count");
    }

    #[test]
    fn louver_count_rejects_fractions() {
        assert!(serde_json::from_value::<ShadingParameter>(
            json!({"type": "LouversByCount", "depth": 0.3, "louver_count": 2.5})
        )
        .is_err());
    }

    #[test]
    fn overhang_angle_bounds() {
        let mut o = Overhang::new(1.0);
        assert!(o.validate().is_ok());
        o.angle = 95.0;
        assert!(o.validate().is_err());
    }

    #[test]
    fn contour_vector_must_be_2d() {
        let s: ShadingParameter = serde_json::from_value(json!({
            "type": "LouversByDistance",
            "depth": 0.3,
            "distance": 0.5,
            "contour_vector": [1, 0, 0]
        }))
        .unwrap();
        assert_eq!(s.validate().unwrap_err().violations()[0].path(), "contour_vector");
    }

    #[test]
    fn louver_descriptors_extend_base() {
        assert_eq!(LouversByCount::describe().base(), Some("_LouversBase"));
        assert!(LouversBase::describe().as_record().unwrap().is_abstract);
    }
}
