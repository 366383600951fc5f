//! Grid parameters: instructions for generating sensor grids from a Room2D.

use serde::{Deserialize, Serialize};

use dfs_core::{
    tagged_union, Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag,
    Validate, ValidationContext,
};

use crate::identity::AutoNumber;

const POSITIVE: Constraints = Constraints::new().gt(0.0);
const NON_NEGATIVE: Constraints = Constraints::new().ge(0.0);
const VECTOR_3D: Constraints = Constraints::new().items(3, 3);

fn yes() -> bool {
    true
}

fn default_room_offset() -> f64 {
    1.0
}

fn default_radial_offset() -> f64 {
    1.2
}

fn default_exterior_offset() -> f64 {
    0.1
}

fn default_dir_count() -> i64 {
    8
}

fn offset_field(default: f64, target: &'static str) -> FieldDescriptor {
    let description = match target {
        "room" => "A number for how far to offset the grid from the Room2D floors. (Default: 1.0, suitable for Models in Meters).",
        "radial" => "A number for how far to offset the grid from the Room2D floors. (Default: 1.2, suitable for Models in Meters).",
        "aperture" => "A number for how far to offset the grid from the Apertures. (Default: 0.1, suitable for Models in Meters).",
        _ => "A number for how far to offset the grid from the Faces. (Default: 0.1, suitable for Models in Meters).",
    };
    FieldDescriptor::optional("offset", FieldType::number(), description).with_default(default.into())
}

fn validate_base(ctx: &mut ValidationContext, dimension: f64) {
    ctx.number("dimension", dimension, &POSITIVE);
}

/// Fields shared by every grid parameter. Never instantiated.
pub enum GridParameterBase {}

impl SchemaType for GridParameterBase {
    const TYPE_NAME: &'static str = "_GridParameterBase";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::abstract_record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::GridParameterBase"),
            "Base object for all GridParameters.",
            vec![
                FieldDescriptor::required(
                    "dimension",
                    FieldType::Number(POSITIVE),
                    "The dimension of the grid cells as a number.",
                ),
                FieldDescriptor::optional(
                    "include_mesh",
                    FieldType::Boolean,
                    "A boolean to note whether the resulting SensorGrid should include the mesh.",
                )
                .with_default(true.into()),
            ],
        )
    }
}

/// A sensor grid generated from a Room2D's floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomGridParameter {
    /// Always `RoomGridParameter`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<RoomGridParameter>,
    /// Grid cell size.
    pub dimension: f64,
    /// Keep the mesh the sensors are taken from.
    #[serde(default = "yes")]
    pub include_mesh: bool,
    /// Height of the grid above the floor.
    #[serde(default = "default_room_offset")]
    pub offset: f64,
    /// Distance the grid keeps from the walls.
    #[serde(default)]
    pub wall_offset: f64,
}

impl RoomGridParameter {
    /// A floor grid with cells of `dimension`.
    pub fn new(dimension: f64) -> Self {
        Self {
            type_: TypeTag::new(),
            dimension,
            include_mesh: true,
            offset: default_room_offset(),
            wall_offset: 0.0,
        }
    }
}

impl SchemaType for RoomGridParameter {
    const TYPE_NAME: &'static str = "RoomGridParameter";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::RoomGridParameter"),
            "Instructions for a SensorGrid generated from a Room2D's floors.",
            vec![
                offset_field(1.0, "room"),
                FieldDescriptor::optional(
                    "wall_offset",
                    FieldType::Number(NON_NEGATIVE),
                    "A number for the distance at which sensors close to walls should be \
                     removed. Note that this option has no effect unless the value is more \
                     than half of the dimension.",
                )
                .with_default(0.into()),
            ],
        )
        .extends(GridParameterBase::TYPE_NAME)
    }
}

impl Validate for RoomGridParameter {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_base(ctx, self.dimension);
        ctx.number("wall_offset", self.wall_offset, &NON_NEGATIVE);
    }
}

/// A sensor grid of radial directions around positions from floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomRadialGridParameter {
    /// Always `RoomRadialGridParameter`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<RoomRadialGridParameter>,
    /// Grid cell size.
    pub dimension: f64,
    /// Keep the mesh the sensors are taken from.
    #[serde(default = "yes")]
    pub include_mesh: bool,
    /// Height of the grid above the floor.
    #[serde(default = "default_radial_offset")]
    pub offset: f64,
    /// Distance the grid keeps from the walls.
    #[serde(default)]
    pub wall_offset: f64,
    /// Number of directions radiating from each sensor point.
    #[serde(default = "default_dir_count")]
    pub dir_count: i64,
    /// Direction of the first radial sensor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_vector: Option<Vec<f64>>,
    /// Radius of the mesh drawn around each sensor point.
    #[serde(default)]
    pub mesh_radius: AutoNumber,
}

impl SchemaType for RoomRadialGridParameter {
    const TYPE_NAME: &'static str = "RoomRadialGridParameter";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::RoomRadialGridParameter"),
            "Instructions for a SensorGrid of radial directions around positions from \
             floors.\n\nThis type of sensor grid is particularly helpful for studies of \
             multiple view directions, such as imageless glare studies.",
            vec![
                offset_field(1.2, "radial"),
                FieldDescriptor::optional(
                    "dir_count",
                    FieldType::Integer(POSITIVE),
                    "A positive integer for the number of radial directions to be generated \
                     around each position.",
                )
                .with_default(8.into()),
                FieldDescriptor::optional(
                    "start_vector",
                    FieldType::array_with(FieldType::number(), VECTOR_3D),
                    "A vector as 3 (x, y, z) values to set the start direction of the \
                     generated directions. This can be used to orient the resulting sensors \
                     to specific parts of the scene. It can also change the elevation of the \
                     resulting directions since this start vector will always be rotated in \
                     the XY plane to generate the resulting directions.",
                ),
                FieldDescriptor::optional(
                    "mesh_radius",
                    AutoNumber::field_type(NON_NEGATIVE),
                    "An optional number to override the radius of the meshes generated \
                     around each sensor. If Autocalculate, it will be equal to 45 percent of \
                     the grid dimension.",
                )
                .with_default(AutoNumber::default_value()),
            ],
        )
        .extends(RoomGridParameter::TYPE_NAME)
    }
}

impl Validate for RoomRadialGridParameter {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_base(ctx, self.dimension);
        ctx.number("wall_offset", self.wall_offset, &NON_NEGATIVE);
        ctx.integer("dir_count", self.dir_count, &POSITIVE);
        if let Some(vector) = &self.start_vector {
            ctx.items("start_vector", vector.len(), &VECTOR_3D);
        }
        self.mesh_radius.check(ctx, "mesh_radius", &NON_NEGATIVE);
    }
}

/// Kinds of exterior face a grid can be generated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExteriorFaceType {
    #[default]
    Wall,
    Roof,
    Floor,
    All,
}

impl SchemaType for ExteriorFaceType {
    const TYPE_NAME: &'static str = "ExteriorFaceType";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::enumeration(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ExteriorFaceType"),
            "An enumeration.",
            &["Wall", "Roof", "Floor", "All"],
        )
    }
}

/// A sensor grid generated from exterior faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExteriorFaceGridParameter {
    /// Always `ExteriorFaceGridParameter`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ExteriorFaceGridParameter>,
    /// Grid cell size.
    pub dimension: f64,
    /// Keep the mesh the sensors are taken from.
    #[serde(default = "yes")]
    pub include_mesh: bool,
    /// Distance of the grid from the faces.
    #[serde(default = "default_exterior_offset")]
    pub offset: f64,
    /// Which exterior faces get a grid.
    #[serde(default)]
    pub face_type: ExteriorFaceType,
    /// Grid the faces with their apertures cut out.
    #[serde(default)]
    pub punched_geometry: bool,
}

impl SchemaType for ExteriorFaceGridParameter {
    const TYPE_NAME: &'static str = "ExteriorFaceGridParameter";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ExteriorFaceGridParameter"),
            "Instructions for a SensorGrid generated from exterior Faces.",
            vec![
                offset_field(0.1, "face"),
                FieldDescriptor::optional(
                    "face_type",
                    FieldType::reference::<ExteriorFaceType>(),
                    "Text to specify the type of face that will be used to generate grids. \
                     Note that only Faces with Outdoors boundary conditions will be used, \
                     meaning that most Floors will typically be excluded unless they \
                     represent the underside of a cantilever.",
                )
                .with_default("Wall".into()),
                FieldDescriptor::optional(
                    "punched_geometry",
                    FieldType::Boolean,
                    "A boolean to note whether the punched_geometry of the faces should be \
                     used (True) with the areas of sub-faces removed from the grid or the \
                     full geometry should be used (False).",
                )
                .with_default(false.into()),
            ],
        )
        .extends(GridParameterBase::TYPE_NAME)
    }
}

impl Validate for ExteriorFaceGridParameter {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_base(ctx, self.dimension);
    }
}

/// Kinds of exterior aperture a grid can be generated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExteriorApertureType {
    Window,
    Skylight,
    #[default]
    All,
}

impl SchemaType for ExteriorApertureType {
    const TYPE_NAME: &'static str = "ExteriorApertureType";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::enumeration(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ExteriorApertureType"),
            "An enumeration.",
            &["Window", "Skylight", "All"],
        )
    }
}

/// A sensor grid generated from exterior apertures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExteriorApertureGridParameter {
    /// Always `ExteriorApertureGridParameter`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ExteriorApertureGridParameter>,
    /// Grid cell size.
    pub dimension: f64,
    /// Keep the mesh the sensors are taken from.
    #[serde(default = "yes")]
    pub include_mesh: bool,
    /// Distance of the grid from the apertures.
    #[serde(default = "default_exterior_offset")]
    pub offset: f64,
    /// Which apertures get a grid.
    #[serde(default)]
    pub aperture_type: ExteriorApertureType,
}

impl SchemaType for ExteriorApertureGridParameter {
    const TYPE_NAME: &'static str = "ExteriorApertureGridParameter";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ExteriorApertureGridParameter"),
            "Instructions for a SensorGrid generated from exterior Aperture.",
            vec![
                offset_field(0.1, "aperture"),
                FieldDescriptor::optional(
                    "aperture_type",
                    FieldType::reference::<ExteriorApertureType>(),
                    "Text to specify the type of Aperture that will be used to generate \
                     grids. Window indicates Apertures in Walls. Skylights are in parent \
                     Roof faces.",
                )
                .with_default("All".into()),
            ],
        )
        .extends(GridParameterBase::TYPE_NAME)
    }
}

impl Validate for ExteriorApertureGridParameter {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_base(ctx, self.dimension);
    }
}

tagged_union! {
    /// Instructions for generating one sensor grid.
    pub enum GridParameter {
        RoomGridParameter(RoomGridParameter),
        RoomRadialGridParameter(RoomRadialGridParameter),
        ExteriorFaceGridParameter(ExteriorFaceGridParameter),
        ExteriorApertureGridParameter(ExteriorApertureGridParameter),
    }
}
