//! Queries against colliders in a world that wraps around at the tile edges.
mod circle_cast;
mod hit;
mod overlap;
mod raycast;
mod space;

pub use hit::*;
pub use space::*;
