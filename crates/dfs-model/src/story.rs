//! Story: a floor of a building made of Room2Ds.

use serde::{Deserialize, Serialize};

use dfs_core::{
    Constraints, FieldDescriptor, FieldType, SchemaType, TypeDescriptor, TypeTag, Validate,
    ValidationContext,
};

use crate::identity::{identity_fields, validate_identity, AutoNumber};
use crate::properties::StoryPropertiesAbridged;
use crate::roof::RoofSpecification;
use crate::room2d::Room2D;

const MULTIPLIER: Constraints = Constraints::new().ge(1.0);

fn one() -> i64 {
    1
}

/// A Story of a Building defined by its Room2Ds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Story {
    /// Always `Story`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Story>,
    /// Unique ID: 1 to 100 characters from `A-Z a-z 0-9 . _ -`.
    pub identifier: String,
    /// Display name with no character restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form user data carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<serde_json::Map<String, serde_json::Value>>,
    /// The rooms of the story.
    pub room_2ds: Vec<Room2D>,
    /// Distance to the next floor, or autocalculated.
    #[serde(default)]
    pub floor_to_floor_height: AutoNumber,
    /// Height of the story's floor, or autocalculated from its rooms.
    #[serde(default)]
    pub floor_height: AutoNumber,
    /// How many times the story repeats in the building.
    #[serde(default = "one")]
    pub multiplier: i64,
    /// Sloped roof geometry over the story.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof: Option<RoofSpecification>,
    /// Extension properties.
    pub properties: StoryPropertiesAbridged,
}

impl Story {
    /// A story holding `room_2ds` with every other field at its default.
    pub fn new(identifier: impl Into<String>, room_2ds: Vec<Room2D>) -> Self {
        Self {
            type_: TypeTag::new(),
            identifier: identifier.into(),
            display_name: None,
            user_data: None,
            room_2ds,
            floor_to_floor_height: AutoNumber::default(),
            floor_height: AutoNumber::default(),
            multiplier: 1,
            roof: None,
            properties: StoryPropertiesAbridged::default(),
        }
    }
}

impl SchemaType for Story {
    const TYPE_NAME: &'static str = "Story";

    fn describe() -> TypeDescriptor {
        let mut fields = identity_fields();
        fields.extend([
            FieldDescriptor::required(
                "room_2ds",
                FieldType::array(FieldType::reference::<Room2D>()),
                "An array of dragonfly Room2D objects that together form an entire story \
                 of a building.",
            ),
            FieldDescriptor::optional(
                "floor_to_floor_height",
                AutoNumber::field_type(Constraints::NONE),
                "A number for the distance from the floor plate of this story to the \
                 floor of the story above this one (if it exists). If Autocalculate, this \
                 value will be the maximum floor_to_ceiling_height of the input room_2ds.",
            )
            .with_default(AutoNumber::default_value()),
            FieldDescriptor::optional(
                "floor_height",
                AutoNumber::field_type(Constraints::NONE),
                "A number to indicate the height of the floor plane in the Z axis. If \
                 Autocalculate, this will be the minimum floor height of all the \
                 room_2ds, which is suitable for cases where there are no floor plenums.",
            )
            .with_default(AutoNumber::default_value()),
            FieldDescriptor::optional(
                "multiplier",
                FieldType::Integer(MULTIPLIER),
                "An integer that denotes the number of times that this Story is repeated \
                 over the height of the building.",
            )
            .with_default(1.into()),
            FieldDescriptor::optional(
                "roof",
                FieldType::reference::<RoofSpecification>(),
                "An optional RoofSpecification object containing geometry for generating \
                 sloped roofs over the Story. The RoofSpecification will only affect the \
                 child Room2Ds that have a True is_top_exposed property and it will only \
                 be utilized in translation to Honeybee when the Story multiplier is 1. \
                 If None, all Room2D ceilings will be flat.",
            ),
            FieldDescriptor::required(
                "properties",
                FieldType::reference::<StoryPropertiesAbridged>(),
                "Extension properties for particular simulation engines (Radiance, \
                 EnergyPlus).",
            ),
        ]);
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Story"),
            "A Story of a Building defined by an extruded Room2Ds.",
            fields,
        )
    }
}

impl Validate for Story {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        validate_identity(ctx, &self.identifier);
        ctx.nested("room_2ds", &self.room_2ds);
        ctx.integer("multiplier", self.multiplier, &MULTIPLIER);
        ctx.nested("roof", &self.roof);
        ctx.nested("properties", &self.properties);
    }
}
