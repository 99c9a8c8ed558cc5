//! Declarative map configuration tree.
//!
//! Built incrementally by the host's configuration calls and immutable once
//! generation starts. The tree carries names and weights only; resolved
//! texture ids live in the [`crate::palette::BiomePalette`], built after
//! configuration is finalized.

use serde::{Deserialize, Serialize};
use tessera_common::ConfigError;

/// A decorative item (vegetation) placed within a biome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Texture name, resolved at palette build time.
    pub name: String,
    /// Probability weight within the biome; weights are walked
    /// cumulatively like elevation percentages.
    pub percentage: f64,
}

/// A named terrain category within an elevation band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Biome {
    /// Ground texture name.
    pub name: String,
    /// Cliff-face texture name for the wall pass.
    pub wall_name: String,
    /// Maximum height contribution; 0 means flat, no height.
    pub max_height: i16,
    /// Rows of cliff face stamped beneath a height discontinuity.
    pub wall_height: i16,
    /// Marks generated ground tiles as blocking (stored as a negative
    /// grid id).
    pub blocking: bool,
    /// Vegetation items, in declaration order.
    pub items: Vec<Item>,
}

/// A contiguous slice of the [0, 1) elevation value range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elevation {
    /// Fraction of the elevation space this band occupies. Bands are
    /// summed in declaration order and compared cumulatively against the
    /// sampled value.
    pub percentage: f64,
    /// Biomes in this band, selected by temperature.
    pub biomes: Vec<Biome>,
    /// Temperature thresholds, one per biome; the last biome acts as the
    /// fallback and its threshold is never consulted.
    pub temperatures: Vec<i8>,
}

/// Full terrain configuration: elevation bands plus grid parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    /// Elevation bands, lowest first.
    pub elevations: Vec<Elevation>,
    /// Anchor grid resolution (NxN cells).
    pub num_cells: i16,
    /// Scales the maximum influence radius squared per anchor.
    pub sample_factor: i16,
    /// Kernel radius in cells (not tiles). Keep small; generation cost
    /// grows with its square.
    pub sample_distance: i16,
}

impl MapConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an elevation band.
    pub fn add_elevation(&mut self, percentage: f64) {
        self.elevations.push(Elevation {
            percentage,
            biomes: Vec::new(),
            temperatures: Vec::new(),
        });
    }

    /// Appends a biome to an existing elevation band.
    ///
    /// `max_temperature` is the threshold under which this biome is
    /// selected; the band's last biome serves as the fallback.
    #[allow(clippy::too_many_arguments)]
    pub fn add_biome(
        &mut self,
        elevation: usize,
        name: &str,
        max_temperature: i8,
        wall_name: &str,
        max_height: i16,
        wall_height: i16,
        blocking: bool,
    ) -> Result<(), ConfigError> {
        let len = self.elevations.len();
        let band = self
            .elevations
            .get_mut(elevation)
            .ok_or(ConfigError::ElevationIndexOutOfRange {
                index: elevation,
                len,
            })?;
        band.biomes.push(Biome {
            name: name.to_owned(),
            wall_name: wall_name.to_owned(),
            max_height,
            wall_height,
            blocking,
            items: Vec::new(),
        });
        band.temperatures.push(max_temperature);
        Ok(())
    }

    /// Appends a vegetation item to a biome, addressed by name within an
    /// existing elevation band. No forward references: the biome must
    /// already have been added.
    pub fn add_vegetation(
        &mut self,
        elevation: usize,
        biome: &str,
        item: &str,
        percentage: f64,
    ) -> Result<(), ConfigError> {
        let len = self.elevations.len();
        let band = self
            .elevations
            .get_mut(elevation)
            .ok_or(ConfigError::ElevationIndexOutOfRange {
                index: elevation,
                len,
            })?;
        let target = band
            .biomes
            .iter_mut()
            .find(|b| b.name == biome)
            .ok_or_else(|| ConfigError::BiomeNotFound {
                name: biome.to_owned(),
                elevation,
            })?;
        target.items.push(Item {
            name: item.to_owned(),
            percentage,
        });
        Ok(())
    }

    /// Sets the anchor grid parameters.
    pub fn set_generation_parameters(
        &mut self,
        num_cells: i16,
        sample_distance: i16,
        sample_factor: i16,
    ) {
        self.num_cells = num_cells;
        self.sample_distance = sample_distance;
        self.sample_factor = sample_factor;
    }
}
