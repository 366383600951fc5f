//! # dfs-model — Dragonfly Building Records
//!
//! The typed records of the Dragonfly building-energy schema: a [`Model`]
//! of [`Building`]s, each a stack of [`Story`] objects made of [`Room2D`]
//! floor polygons, plus [`ContextShade`] geometry and the window, shading,
//! skylight and extension-property records that hang off them.
//!
//! ## Key Design Principles
//!
//! 1. **Records are plain data.** Every record derives `Serialize` and
//!    `Deserialize`, rejects unknown fields, and carries a `type` tag that
//!    must equal its own name. Records are never mutated by this crate.
//!
//! 2. **Unions dispatch on `type`.** `WindowParameter`, `ShadingParameter`,
//!    `SkylightParameter`, `BoundaryCondition` and `GridParameter` read the
//!    discriminator first and decode only the matching record.
//!
//! 3. **Per-edge lists are checked against the floor polygon.** A Room2D's
//!    `boundary_conditions`, `window_parameters`, `shading_parameters` and
//!    `air_boundaries` must each have one entry per floor edge. See
//!    [`validate_room2d`].
//!
//! 4. **Each type describes itself.** Every record and enum implements
//!    [`SchemaType`](dfs_core::SchemaType); [`registry`] collects them all
//!    for the document generator.
//!
//! ## Crate Policy
//!
//! - Depends only on `dfs-core` internally.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod building;
pub mod context_shade;
pub mod external;
pub mod identity;
pub mod model;
pub mod properties;
pub mod registry;
pub mod roof;
pub mod room2d;
pub mod shading;
pub mod skylight;
pub mod story;
pub mod window;

// Re-export primary types for ergonomic imports.
pub use building::Building;
pub use context_shade::ContextShade;
pub use external::{Adiabatic, BoundaryCondition, Face3D, Ground, Outdoors, Plane, Surface, Units};
pub use identity::{AutoNumber, Autocalculate, ExternalObject};
pub use model::Model;
pub use properties::{
    BuildingPropertiesAbridged, ContextShadePropertiesAbridged, GridParameter, ModelProperties,
    Room2DPropertiesAbridged, StoryPropertiesAbridged,
};
pub use registry::registry;
pub use roof::RoofSpecification;
pub use room2d::{validate_room2d, Room2D};
pub use shading::{
    ExtrudedBorder, LouversBase, LouversByCount, LouversByDistance, Overhang, ShadingParameter,
};
pub use skylight::{DetailedSkylights, GriddedSkylightArea, GriddedSkylightRatio, SkylightParameter};
pub use story::Story;
pub use window::{
    DetailedWindows, RectangularWindows, RepeatingWindowRatio, SimpleWindowArea,
    SimpleWindowRatio, SingleWindow, WindowParameter,
};
