//! # Scene Geometry
//!
//! Plain data types for the 3D model handed to a renderer: points, rebar
//! segments and extruded solids. Coordinates are inches with the origin at
//! the bottom corner of the footing, Z up.

use serde::{Deserialize, Serialize};

use crate::materials::{MaterialKind, RenderMaterial};

/// A point in plan (inches)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }
}

/// A point in space (inches)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    /// Same point raised by `dz`
    pub fn raised(&self, dz: f64) -> Self {
        Point3::new(self.x, self.y, self.z + dz)
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Role of a segment within one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Straight run along the bar direction
    Main,
    /// 90° hook at the far end of the run
    FarHook,
    /// 90° hook at the near end of the run
    NearHook,
}

/// One straight piece of a reinforcing bar, drawn as a circular extrusion
/// of `diameter_in` from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub start: Point3,
    pub end: Point3,
    pub diameter_in: f64,
    pub kind: SegmentKind,
    pub material: MaterialKind,
}

impl BarSegment {
    /// Segment length (in)
    pub fn length_in(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A closed plan profile extruded vertically between two elevations.
///
/// The profile repeats its first point at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    pub profile: Vec<Point2>,
    pub base_z: f64,
    pub top_z: f64,
    pub material: RenderMaterial,
}

impl Extrusion {
    /// Axis-aligned rectangular prism with its plan corner at `(x0, y0)`.
    ///
    /// Profile order: (x0,y0) → (x0,y1) → (x1,y1) → (x1,y0) → (x0,y0).
    pub fn rectangle(
        x0: f64,
        y0: f64,
        width: f64,
        length: f64,
        base_z: f64,
        top_z: f64,
        material: RenderMaterial,
    ) -> Self {
        let x1 = x0 + width;
        let y1 = y0 + length;
        Extrusion {
            profile: vec![
                Point2::new(x0, y0),
                Point2::new(x0, y1),
                Point2::new(x1, y1),
                Point2::new(x1, y0),
                Point2::new(x0, y0),
            ],
            base_z,
            top_z,
            material,
        }
    }

    /// Extrusion height (in)
    pub fn height(&self) -> f64 {
        self.top_z - self.base_z
    }

    /// Plan bounding box as (min, max)
    pub fn plan_bounds(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.profile {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}
