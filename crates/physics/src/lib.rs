//! 2D collision tests between circles, convex polygons, rectangles and
//! capsules, plus queries in a world that wraps around at the tile edges.
//!
//! Shapes are plain values.  Pairwise queries live on [Shape]; world queries
//! live on [ToricSpace] and take a [ColliderRegistry] by reference.
mod capsule;
mod circle;
mod collision_tests;
pub mod errors;
mod line;
mod polygon;
mod ray;
mod raycasting;
mod rect;
mod registry;
mod segment;
mod shape;
pub mod tolerances;
mod toric;
mod v2;

#[cfg(test)]
mod test_support;

pub use capsule::*;
pub use circle::*;
pub use collision_tests::{Contact, LineContact};
pub use errors::{Error, ShapeError, SpaceError};
pub use line::*;
pub use polygon::*;
pub use ray::*;
pub use raycasting::RaycastingResult;
pub use rect::*;
pub use registry::*;
pub use segment::*;
pub use shape::*;
pub use toric::*;
pub use v2::*;
