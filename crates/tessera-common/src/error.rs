//! Error types for Tessera.
//!
//! The render path never errors: unknown texture names resolve to the null
//! id and draw nothing, and fully clipped blits are a steady-state no-op.
//! Errors exist only at the configuration and generation boundaries, where
//! a contract violation must be loud instead of producing garbage tiles.

use thiserror::Error;

/// Top-level error type for Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    /// Map configuration errors
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Terrain generation errors
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),

    /// IO errors (engine config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-time contract violations. These fail fast: a bad index or
/// name in a configuration call is a host bug, not a recoverable state.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Elevation index past the end of the declared elevation list
    #[error("elevation index {index} out of range (have {len} elevations)")]
    ElevationIndexOutOfRange {
        /// Index given by the caller
        index: usize,
        /// Number of elevations declared so far
        len: usize,
    },

    /// Biome name not found in the addressed elevation band
    #[error("biome {name:?} not found in elevation {elevation}")]
    BiomeNotFound {
        /// Name given by the caller
        name: String,
        /// Elevation band that was searched
        elevation: usize,
    },

    /// Tile coordinate outside the map grid
    #[error("tile ({x}, {y}) outside map of {width}x{height}")]
    TileOutOfRange {
        /// Tile x coordinate
        x: i32,
        /// Tile y coordinate
        y: i32,
        /// Map width in tiles
        width: i32,
        /// Map height in tiles
        height: i32,
    },

    /// A tilemap call was made before `create_tilemap`
    #[error("no tilemap has been created")]
    NoTilemap,
}

/// Terrain generation precondition violations, checked before any tile is
/// written so a failed call leaves the grid untouched.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configuration declares no elevation bands
    #[error("map config has no elevation bands")]
    NoElevations,

    /// An elevation band declares no biomes
    #[error("elevation band {index} has no biomes")]
    EmptyElevationBand {
        /// Index of the offending band
        index: usize,
    },

    /// `num_cells` is zero or negative
    #[error("invalid anchor grid resolution: {num_cells}")]
    InvalidCellCount {
        /// Configured cell count
        num_cells: i32,
    },

    /// Map smaller than the anchor grid on some axis
    #[error("map {width}x{height} smaller than {num_cells}x{num_cells} anchor grid")]
    MapTooSmall {
        /// Map width in tiles
        width: i32,
        /// Map height in tiles
        height: i32,
        /// Configured cell count
        num_cells: i32,
    },

    /// Map size not evenly divisible by the anchor grid. Silent truncation
    /// would leave remainder tiles stale across regeneration, so this is
    /// reported instead.
    #[error("map {width}x{height} not divisible by {num_cells} cells per axis")]
    MapNotDivisible {
        /// Map width in tiles
        width: i32,
        /// Map height in tiles
        height: i32,
        /// Configured cell count
        num_cells: i32,
    },
}

/// Result type alias for Tessera operations.
pub type TesseraResult<T> = Result<T, TesseraError>;
