//! The catalogue of every schema type defined in this crate.

use dfs_core::{RegistryError, TypeRegistry};

use crate::external::{Adiabatic, Face3D, Ground, Outdoors, Plane, Surface, Units};
use crate::identity::Autocalculate;
use crate::properties::*;
use crate::roof::RoofSpecification;
use crate::shading::{ExtrudedBorder, LouversBase, LouversByCount, LouversByDistance, Overhang};
use crate::skylight::{DetailedSkylights, GriddedSkylightArea, GriddedSkylightRatio};
use crate::window::{
    DetailedWindows, RectangularWindows, RepeatingWindowRatio, SimpleWindowArea,
    SimpleWindowRatio, SingleWindow,
};
use crate::{Building, ContextShade, Model, Room2D, Story};

/// Build a registry holding every record, abstract base and enumeration.
///
/// The registry is built fresh on each call and is read-only afterwards.
pub fn registry() -> Result<TypeRegistry, RegistryError> {
    let mut registry = TypeRegistry::new();
    registry
        // Identified records.
        .register::<Model>()?
        .register::<Building>()?
        .register::<Story>()?
        .register::<Room2D>()?
        .register::<ContextShade>()?
        .register::<RoofSpecification>()?
        // Shared and external types.
        .register::<Autocalculate>()?
        .register::<Plane>()?
        .register::<Face3D>()?
        .register::<Ground>()?
        .register::<Outdoors>()?
        .register::<Adiabatic>()?
        .register::<Surface>()?
        .register::<Units>()?
        // Windows, shades and skylights.
        .register::<SingleWindow>()?
        .register::<SimpleWindowArea>()?
        .register::<SimpleWindowRatio>()?
        .register::<RepeatingWindowRatio>()?
        .register::<RectangularWindows>()?
        .register::<DetailedWindows>()?
        .register::<ExtrudedBorder>()?
        .register::<Overhang>()?
        .register::<LouversBase>()?
        .register::<LouversByDistance>()?
        .register::<LouversByCount>()?
        .register::<GriddedSkylightArea>()?
        .register::<GriddedSkylightRatio>()?
        .register::<DetailedSkylights>()?
        // Property containers.
        .register::<Room2DPropertiesAbridged>()?
        .register::<StoryPropertiesAbridged>()?
        .register::<BuildingPropertiesAbridged>()?
        .register::<ContextShadePropertiesAbridged>()?
        .register::<ModelProperties>()?
        // Energy.
        .register::<Room2DEnergyPropertiesAbridged>()?
        .register::<StoryEnergyPropertiesAbridged>()?
        .register::<BuildingEnergyPropertiesAbridged>()?
        .register::<ContextShadeEnergyPropertiesAbridged>()?
        .register::<ModelEnergyProperties>()?
        .register::<TerrianTypes>()?
        // Radiance.
        .register::<Room2DRadiancePropertiesAbridged>()?
        .register::<StoryRadiancePropertiesAbridged>()?
        .register::<BuildingRadiancePropertiesAbridged>()?
        .register::<ContextShadeRadiancePropertiesAbridged>()?
        .register::<ModelRadianceProperties>()?
        .register::<GridParameterBase>()?
        .register::<RoomGridParameter>()?
        .register::<RoomRadialGridParameter>()?
        .register::<ExteriorFaceGridParameter>()?
        .register::<ExteriorFaceType>()?
        .register::<ExteriorApertureGridParameter>()?
        .register::<ExteriorApertureType>()?
        // DOE-2 and comparison.
        .register::<Room2DDoe2Properties>()?
        .register::<ModelDoe2Properties>()?
        .register::<Room2DComparisonProperties>()?
        .register::<ModelComparisonProperties>()?;
    tracing::debug!(types = registry.len(), "built dragonfly type registry");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reference_resolves() {
        let registry = registry().unwrap();
        for descriptor in registry.iter() {
            for name in descriptor.field_references() {
                assert!(
                    registry.contains(name),
                    "{} references unregistered {name}",
                    descriptor.name
                );
            }
            if let Some(base) = descriptor.base() {
                assert!(registry.contains(base), "{} extends unregistered {base}", descriptor.name);
            }
        }
    }

    #[test]
    fn abstract_bases_are_registered() {
        let registry = registry().unwrap();
        for name in ["_LouversBase", "_GridParameterBase"] {
            let record = registry.get(name).and_then(|d| d.as_record()).unwrap();
            assert!(record.is_abstract, "{name}");
        }
        assert_eq!(
            registry.get("RoomRadialGridParameter").and_then(|d| d.base()),
            Some("RoomGridParameter")
        );
    }

    #[test]
    fn building_twice_is_stable() {
        let a = registry().unwrap();
        let b = registry().unwrap();
        assert_eq!(a.len(), b.len());
        assert!(a.len() > 50);
    }
}
