//! DOE-2 extension properties.

use serde::{Deserialize, Serialize};

use dfs_core::{
    Constraints, FieldDescriptor, SchemaType, TypeDescriptor, TypeTag, Validate, ValidationContext,
};

use crate::identity::AutoNumber;

const NON_NEGATIVE: Constraints = Constraints::new().ge(0.0);
const FRACTION: Constraints = Constraints::new().ge(0.0).le(1.0);

/// DOE-2 air-flow properties of a Room2D.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Room2DDoe2Properties {
    /// Always `Room2DDoe2Properties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<Room2DDoe2Properties>,
    /// Design supply airflow.
    #[serde(default)]
    pub assigned_flow: AutoNumber,
    /// Supply airflow per floor area.
    #[serde(default)]
    pub flow_per_area: AutoNumber,
    /// Minimum airflow as a fraction of design flow.
    #[serde(default)]
    pub min_flow_ratio: AutoNumber,
    /// Minimum airflow per floor area.
    #[serde(default)]
    pub min_flow_per_area: AutoNumber,
    /// Heating airflow as a fraction of design flow.
    #[serde(default)]
    pub hmax_flow_ratio: AutoNumber,
}

impl Room2DDoe2Properties {
    fn flow_field(name: &'static str, bounds: Constraints, description: &'static str) -> FieldDescriptor {
        FieldDescriptor::optional(name, AutoNumber::field_type(bounds), description)
            .with_default(AutoNumber::default_value())
    }
}

impl SchemaType for Room2DDoe2Properties {
    const TYPE_NAME: &'static str = "Room2DDoe2Properties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::Room2DDoe2Properties"),
            "Base class for all objects that are not extensible with additional keys.",
            vec![
                Self::flow_field(
                    "assigned_flow",
                    NON_NEGATIVE,
                    "A number for the design supply air flow rate for the zone the Room is \
                     assigned to (cfm). This establishes the minimum allowed design air flow. \
                     Note that the actual design flow may be larger. If Autocalculate, this \
                     parameter will not be written into the INP.",
                ),
                Self::flow_field(
                    "flow_per_area",
                    NON_NEGATIVE,
                    "A number for the design supply air flow rate to the zone per unit floor \
                     area (cfm/ft2). If Autocalculate, this parameter will not be written \
                     into the INP.",
                ),
                Self::flow_field(
                    "min_flow_ratio",
                    FRACTION,
                    "A number between 0 and 1 for the minimum allowable zone air supply flow \
                     rate, expressed as a fraction of design flow rate. Applicable to \
                     variable-volume type systems only. If Autocalculate, this parameter will \
                     not be written into the INP.",
                ),
                Self::flow_field(
                    "min_flow_per_area",
                    NON_NEGATIVE,
                    "A number for the minimum air flow per square foot of floor area \
                     (cfm/ft2). This is an alternative way of specifying the min_flow_ratio. \
                     If Autocalculate, this parameter will not be written into the INP.",
                ),
                Self::flow_field(
                    "hmax_flow_ratio",
                    FRACTION,
                    "A number between 0 and 1 for the ratio of the maximum (or fixed) \
                     heating airflow to the cooling airflow. The specific meaning varies \
                     according to the type of zone terminal. If Autocalculate, this \
                     parameter will not be written into the INP.",
                ),
            ],
        )
    }
}

impl Validate for Room2DDoe2Properties {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        self.assigned_flow.check(ctx, "assigned_flow", &NON_NEGATIVE);
        self.flow_per_area.check(ctx, "flow_per_area", &NON_NEGATIVE);
        self.min_flow_ratio.check(ctx, "min_flow_ratio", &FRACTION);
        self.min_flow_per_area.check(ctx, "min_flow_per_area", &NON_NEGATIVE);
        self.hmax_flow_ratio.check(ctx, "hmax_flow_ratio", &FRACTION);
    }
}

/// Model-level DOE-2 properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDoe2Properties {
    /// Always `ModelDoe2Properties`.
    #[serde(rename = "type", default)]
    pub type_: TypeTag<ModelDoe2Properties>,
}

impl SchemaType for ModelDoe2Properties {
    const TYPE_NAME: &'static str = "ModelDoe2Properties";

    fn describe() -> TypeDescriptor {
        TypeDescriptor::record(
            Self::TYPE_NAME,
            concat!(module_path!(), "::ModelDoe2Properties"),
            "Base class for all objects that are not extensible with additional keys.",
            Vec::new(),
        )
    }
}

impl Validate for ModelDoe2Properties {
    fn validate_into(&self, _ctx: &mut ValidationContext) {}
}
