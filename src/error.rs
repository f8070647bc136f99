use thiserror::Error;

/// Problems with a requested configuration. A run never starts with one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cannot simulate with zero trees")]
    NoTrees,

    #[error("species ratio must be within [0, 1], got {0}")]
    SpeciesRatio(f64),

    #[error("simulation years must be within 1..=100, got {0}")]
    Years(u32),

    #[error("grid must have a non-zero extent, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("{name} must be within [0, 1], got {value}")]
    Rate { name: &'static str, value: f32 },

    #[error("fire center ({x}, {y}) lies outside the {width}x{height} grid")]
    FireCenter {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}

/// Coordinate access outside the grid extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("patch ({x}, {y}) is outside the {width}x{height} grid")]
pub struct BoundsError {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}
