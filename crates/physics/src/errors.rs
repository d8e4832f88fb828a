#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("Attempted to create a circle with negative radius {0}")]
    NegativeRadius(f64),

    #[error("Attempted to create a shape from non-finite coordinates")]
    NonFinite,

    #[error("A polygon needs at least 3 distinct vertices, but only {0} were given")]
    NotEnoughVertices(usize),

    #[error("Attempted to create a rectangle which would have an invalid width or height")]
    InvalidDims,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpaceError {
    #[error("Tile dimensions must be positive and finite, got {width}x{height}")]
    InvalidTileSize { width: f64, height: f64 },
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Shape error: {}", _0)]
    Shape(#[from] ShapeError),

    #[error("Space error: {}", _0)]
    Space(#[from] SpaceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
