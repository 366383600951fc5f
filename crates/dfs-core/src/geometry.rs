//! Point primitives and polygon edge counting.
//!
//! Points are serialized as bare coordinate arrays (`[x, y]`, `[x, y, z]`).
//! Decoding rejects arrays of the wrong arity; validation rejects
//! non-finite coordinates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraint::Constraints;
use crate::context::{Validate, ValidationContext};

/// A coordinate array had the wrong number of values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected a point of {expected} coordinates, found {found}")]
pub struct CoordinateCountError {
    /// Coordinates the point type requires.
    pub expected: usize,
    /// Coordinates supplied.
    pub found: usize,
}

/// Item bounds for a 2D point array.
pub const POINT_2D: Constraints = Constraints::new().items(2, 2);

/// Item bounds for a 3D point array.
pub const POINT_3D: Constraints = Constraints::new().items(3, 3);

/// Item bounds for a polygon loop.
pub const POLYGON: Constraints = Constraints::new().min_items(3);

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Point2D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point2D {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl TryFrom<Vec<f64>> for Point2D {
    type Error = CoordinateCountError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y] => Ok(Self { x: *x, y: *y }),
            _ => Err(CoordinateCountError {
                expected: 2,
                found: values.len(),
            }),
        }
    }
}

impl From<Point2D> for Vec<f64> {
    fn from(p: Point2D) -> Self {
        vec![p.x, p.y]
    }
}

impl Validate for Point2D {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        check_finite(ctx, &[self.x, self.y]);
    }
}

/// A point in space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Point3D {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3D {
    /// Construct a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl TryFrom<Vec<f64>> for Point3D {
    type Error = CoordinateCountError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [x, y, z] => Ok(Self {
                x: *x,
                y: *y,
                z: *z,
            }),
            _ => Err(CoordinateCountError {
                expected: 3,
                found: values.len(),
            }),
        }
    }
}

impl From<Point3D> for Vec<f64> {
    fn from(p: Point3D) -> Self {
        vec![p.x, p.y, p.z]
    }
}

impl Validate for Point3D {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        check_finite(ctx, &[self.x, self.y, self.z]);
    }
}

fn check_finite(ctx: &mut ValidationContext, coordinates: &[f64]) {
    for (i, value) in coordinates.iter().enumerate() {
        if !value.is_finite() {
            ctx.index(i, |ctx| ctx.violation("must be a finite number", value));
        }
    }
}

/// Check a polygon loop under `name`: at least three points, each finite.
pub fn validate_polygon<P: Validate>(ctx: &mut ValidationContext, name: &str, points: &[P]) {
    ctx.field(name, |ctx| {
        POLYGON.check_items(ctx, points.len());
        points.validate_into(ctx);
    });
}

/// Check a list of polygon loops under `name`.
pub fn validate_polygons<P: Validate>(ctx: &mut ValidationContext, name: &str, loops: &[Vec<P>]) {
    ctx.field(name, |ctx| {
        for (i, points) in loops.iter().enumerate() {
            ctx.index(i, |ctx| {
                POLYGON.check_items(ctx, points.len());
                points.validate_into(ctx);
            });
        }
    });
}

/// Total edge count of a polygon with holes.
///
/// Each closed loop of `n` vertices has `n` edges, so the count is the
/// boundary length plus the length of every hole.
pub fn segment_count(boundary: &[Point2D], holes: Option<&[Vec<Point2D>]>) -> usize {
    boundary.len() + holes.map_or(0, |h| h.iter().map(Vec::len).sum())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    // Quarter-unit coordinates print and parse back exactly.
    fn coordinate() -> impl Strategy<Value = f64> {
        (-4_000_000i32..4_000_000).prop_map(|v| f64::from(v) / 4.0)
    }

    fn point() -> impl Strategy<Value = Point2D> {
        (coordinate(), coordinate()).prop_map(|(x, y)| Point2D::new(x, y))
    }

    fn polygon() -> impl Strategy<Value = Vec<Point2D>> {
        prop::collection::vec(point(), 3..12)
    }

    proptest! {
        /// Edge count is the vertex count of every loop combined.
        #[test]
        fn segment_count_sums_loops(boundary in polygon(), holes in prop::collection::vec(polygon(), 0..4)) {
            let expected = boundary.len() + holes.iter().map(Vec::len).sum::<usize>();
            prop_assert_eq!(segment_count(&boundary, Some(holes.as_slice())), expected);
        }

        /// Finite points always validate and survive a JSON round trip.
        #[test]
        fn finite_points_round_trip(p in point()) {
            prop_assert!(p.validate().is_ok());
            let json = serde_json::to_string(&p).unwrap();
            let back: Point2D = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, p);
        }
    }
}
