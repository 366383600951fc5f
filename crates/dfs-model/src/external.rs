//! Types owned by the underlying geometry and building-energy libraries.
//!
//! Only the parts referenced by the schema are defined here: planar faces,
//! wall boundary conditions, and model units.

use serde::{Deserialize, Serialize};

use dfs_core::geometry::{validate_polygon, validate_polygons, POINT_3D};
use dfs_core::{
    tagged_union, Constraints, FieldDescriptor, FieldType, Point3D, SchemaType, TypeDescriptor,
    TypeTag, Validate, ValidationContext,
};

use crate::identity::AutoNumber;

/// A plane defined by a normal, an origin, and an optional X axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plane {
    /// Always `Plane`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Plane>,
    /// Unit normal vector.
    pub n: Point3D,
    /// Origin point.
    pub o: Point3D,
    /// X axis of the plane's coordinate system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Point3D>,
}

impl SchemaType for Plane {
    const TYPE_NAME: &'static str = "Plane";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Plane"),
            "A plane defined by a normal vector, an origin point and an optional x-axis.",
            vec![
                FieldDescriptor::required(
                    "n",
                    FieldType::point3d(),
                    "Plane normal as 3 (x, y, z) values.",
                ),
                FieldDescriptor::required(
                    "o",
                    FieldType::point3d(),
                    "Plane origin as 3 (x, y, z) values",
                ),
                FieldDescriptor::optional(
                    "x",
                    FieldType::point3d(),
                    "Plane x-axis as 3 (x, y, z) values. If None, it is autocalculated.",
                ),
            ],
        )
    }
}

impl Validate for Plane {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.nested("n", &self.n);
        ctx.nested("o", &self.o);
        ctx.nested("x", &self.x);
    }
}

/// A single planar face in 3D space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Face3D {
    /// Always `Face3D`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Face3D>,
    /// Outer boundary vertices.
    pub boundary: Vec<Point3D>,
    /// Hole loops, each inside the boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holes: Option<Vec<Vec<Point3D>>>,
    /// Plane in which the face lies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plane: Option<Plane>,
}

impl SchemaType for Face3D {
    const TYPE_NAME: &'static str = "Face3D";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Face3D"),
            "A single planar face in 3D space.",
            vec![
                FieldDescriptor::required(
                    "boundary",
                    FieldType::polygon3d(),
                    "A list of points representing the outer boundary vertices of the face. \
                     The list should include at least 3 points and each point should be a \
                     list of 3 (x, y, z) values.",
                ),
                FieldDescriptor::optional(
                    "holes",
                    FieldType::array(FieldType::polygon3d()),
                    "Optional list of lists with one list for each hole in the face. Each \
                     hole should be a list of at least 3 points and each point a list of 3 \
                     (x, y, z) values. If None, it will be assumed that there are no holes \
                     in the face.",
                ),
                FieldDescriptor::optional(
                    "plane",
                    FieldType::reference::<Plane>(),
                    "Optional Plane indicating the plane in which the face exists. If None, \
                     the plane will usually be derived from the boundary points.",
                ),
            ],
        )
    }
}

impl Validate for Face3D {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_polygon(ctx, "boundary", &self.boundary);
        if let Some(holes) = &self.holes {
            validate_polygons(ctx, "holes", holes);
        }
        ctx.nested("plane", &self.plane);
    }
}

/// Ground boundary condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ground {
    /// Always `Ground`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Ground>,
}

impl SchemaType for Ground {
    const TYPE_NAME: &'static str = "Ground";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Ground"),
            "Ground boundary condition.",
            Vec::new(),
        )
    }
}

impl Validate for Ground {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

fn yes() -> bool {
    true
}

/// Outdoors boundary condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outdoors {
    /// Always `Outdoors`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Outdoors>,
    /// Whether the surface is exposed to direct sun.
    #[serde(default = "yes")]
    pub sun_exposure: bool,
    /// Whether the surface is exposed to wind.
    #[serde(default = "yes")]
    pub wind_exposure: bool,
    /// Fraction of the sky seen by the surface.
    #[serde(default)]
    pub view_factor: AutoNumber,
}

impl Outdoors {
    const VIEW_FACTOR: Constraints = Constraints::new().ge(0.0).le(1.0);
}

impl Default for Outdoors {
    fn default() -> Self {
        Self {
            type_: TypeTag::new(),
            sun_exposure: true,
            wind_exposure: true,
            view_factor: AutoNumber::default(),
        }
    }
}

impl SchemaType for Outdoors {
    const TYPE_NAME: &'static str = "Outdoors";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Outdoors"),
            "Outdoors boundary condition.",
            vec![
                FieldDescriptor::optional(
                    "sun_exposure",
                    FieldType::Boolean,
                    "A boolean noting whether the boundary is exposed to sun.",
                )
                .with_default(true.into()),
                FieldDescriptor::optional(
                    "wind_exposure",
                    FieldType::Boolean,
                    "A boolean noting whether the boundary is exposed to wind.",
                )
                .with_default(true.into()),
                FieldDescriptor::optional(
                    "view_factor",
                    AutoNumber::field_type(Self::VIEW_FACTOR),
                    "A number for the view factor to the ground. This can also be an \
                     Autocalculate object to have the view factor automatically calculated.",
                )
                .with_default(AutoNumber::default_value()),
            ],
        )
    }
}

impl Validate for Outdoors {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        self.view_factor.check(ctx, "view_factor", &Self::VIEW_FACTOR);
    }
}

/// Adiabatic boundary condition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Adiabatic {
    /// Always `Adiabatic`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Adiabatic>,
}

impl SchemaType for Adiabatic {
    const TYPE_NAME: &'static str = "Adiabatic";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Adiabatic"),
            "Adiabatic boundary condition.",
            Vec::new(),
        )
    }
}

impl Validate for Adiabatic {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}

/// Boundary condition adjacent to another surface in the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Surface {
    /// Always `Surface`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Surface>,
    /// Identifiers of the adjacent object and its parents.
    pub boundary_condition_objects: Vec<String>,
}

impl Surface {
    const OBJECTS: Constraints = Constraints::new().items(2, 3);
}

impl SchemaType for Surface {
    const TYPE_NAME: &'static str = "Surface";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Surface"),
            "Boundary condition when an object is adjacent to another object.",
            vec![FieldDescriptor::required(
                "boundary_condition_objects",
                FieldType::array_with(FieldType::string(), Self::OBJECTS),
                "A list of up to 3 object identifiers that are adjacent to this one. The \
                 first object is always the one that is immediately adjacent and is of the \
                 same object type (Face, Aperture, Door). When this boundary condition is \
                 applied to a Face, the second object in the tuple will be the parent Room \
                 of the adjacent object. When the boundary condition is applied to a \
                 sub-face (Door or Aperture), the second object will be the parent Face \
                 of the adjacent sub-face and the third object will be the parent Room of \
                 the adjacent sub-face.",
            )],
        )
    }
}

impl Validate for Surface {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        ctx.items(
            "boundary_condition_objects",
            self.boundary_condition_objects.len(),
            &Self::OBJECTS,
        );
    }
}

tagged_union! {
    /// Boundary condition of one wall segment.
    pub enum BoundaryCondition {
        Ground(Ground),
        Outdoors(Outdoors),
        Adiabatic(Adiabatic),
        Surface(Surface),
    }
}

/// Units in which model geometry is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Meters,
    Millimeters,
    Feet,
    Inches,
    Centimeters,
}

impl SchemaType for Units {
    const TYPE_NAME: &'static str = "Units";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::enumeration(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Units"),
            "An enumeration.",
            &["Meters", "Millimeters", "Feet", "Inches", "Centimeters"],
        )
    }
}
