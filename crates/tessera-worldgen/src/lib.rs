//! # Tessera Worldgen
//!
//! Procedural terrain generation for the Tessera tile engine.
//!
//! A declarative [`MapConfig`] describes elevation bands, climate-selected
//! biomes, and vegetation weights. The [`MapGenerator`] seeds a grid of
//! jittered anchor points, blends them per tile with inverse-distance
//! weighting, and writes ground texture ids into the tilemap grid, with a
//! cliff-wall post-pass faking vertical relief. Texture names are resolved
//! once into a [`BiomePalette`] before generation; the config itself stays
//! immutable.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod generator;
pub mod palette;

pub use config::{Biome, Elevation, Item, MapConfig};
pub use generator::MapGenerator;
pub use palette::{BiomePalette, ResolvedBiome, ResolvedItem};
