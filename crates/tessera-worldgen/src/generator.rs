//! Anchor-based terrain generator.
//!
//! The algorithm seeds one jittered anchor per cell of an NxN grid, each
//! carrying an elevation value and a climate-cluster temperature, then
//! blends the anchors per tile with Manhattan-distance inverse-distance
//! weighting. The blended elevation picks a band, the blended temperature
//! picks a biome within the band, and a post-pass stamps cliff walls under
//! height discontinuities.
//!
//! Anchor sampling is always toroidal, independent of the camera's
//! wrap/clamp policy: neighbourhoods crossing the map edge reuse the
//! wrapped cell's anchor shifted by a whole map period, so terrain is
//! seamless even when infinite scrolling is off.

use tessera_common::{Extent, GenerateError, Point};
use tessera_kernel::{TextureId, TileId};
use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::palette::BiomePalette;

/// Cells per climate cluster edge; all anchors within one cluster share
/// the temperature drawn at its top-left cell.
const CLIMATE_CLUSTER_FACTOR: i32 = 4;

/// Fixed-point scale for anchor elevation values, avoiding floating point
/// during the weighted summation.
const ELEVATION_SCALE: i64 = 100_000;

/// Tolerance absorbing float accumulation error in band selection.
const BAND_EPSILON: f64 = 0.001;

/// Tolerance for the cumulative vegetation draw.
const ITEM_EPSILON: f64 = 0.01;

/// A seeded sample point: jittered tile position, fixed-point elevation,
/// cluster temperature. Regenerated on every call to the generator.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    pos: Point,
    elevation: i64,
    temperature: i8,
}

/// Seeded terrain generator. Deterministic for a given seed and config.
#[derive(Debug)]
pub struct MapGenerator {
    rng: fastrand::Rng,
}

impl MapGenerator {
    /// Creates a generator with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Fills `tiles` with ground texture ids for the whole map.
    ///
    /// The grid is overwritten in place; on error it is left untouched.
    /// Cost is `O(tiles * (2 * sample_distance + 1)^2)`; keep
    /// `sample_distance` at 3 or below for sub-second generation on
    /// typical map sizes.
    pub fn generate(
        &mut self,
        config: &MapConfig,
        palette: &BiomePalette,
        map_size: Extent,
        tiles: &mut [TileId],
    ) -> Result<(), GenerateError> {
        validate(config, map_size)?;
        debug_assert_eq!(tiles.len(), map_size.area());

        let num_cells = i32::from(config.num_cells);
        let cell_size = Extent::new(map_size.w / num_cells, map_size.h / num_cells);
        let max_samples = i64::from(cell_size.w) * i64::from(cell_size.h)
            * i64::from(config.sample_factor);
        let sample_distance = i32::from(config.sample_distance);

        let anchors = self.synthesize_anchors(num_cells, cell_size);
        let mut heights = vec![0u8; map_size.area()];
        let mut vegetation_hits = 0usize;

        // The top band's first biome drives height and the wall pass.
        let top_band = config.elevations.last().ok_or(GenerateError::NoElevations)?;
        let height_cutoff = 1.0 - top_band.percentage;

        for y_cell in 0..num_cells {
            for x_cell in 0..num_cells {
                let neighborhood = gather_neighborhood(
                    &anchors,
                    Point::new(x_cell, y_cell),
                    num_cells,
                    sample_distance,
                    map_size,
                );
                for y in y_cell * cell_size.h..(y_cell + 1) * cell_size.h {
                    for x in x_cell * cell_size.w..(x_cell + 1) * cell_size.w {
                        let tile = Point::new(x, y);
                        let (value, temperature) =
                            blend_anchors(&neighborhood, tile, max_samples);

                        let Some(band_idx) = select_band(config, value) else {
                            // Uncovered elevation value: the config's
                            // percentages sum below 1. The tile keeps its
                            // previous id.
                            continue;
                        };
                        let band = &config.elevations[band_idx];
                        let biome_idx = select_biome(band, temperature);
                        let biome = &band.biomes[biome_idx];

                        if biome.max_height > 0 {
                            let h = f64::from(biome.max_height)
                                * (value - height_cutoff)
                                / top_band.percentage;
                            heights[tile.to_index(map_size)] =
                                h.round().clamp(0.0, 255.0) as u8;
                        }

                        let ground = palette
                            .biome(band_idx, biome_idx)
                            .map_or(TextureId::NONE, |r| r.ground);
                        tiles[tile.to_index(map_size)] = ground.to_tile(biome.blocking);

                        // Independent draw against the biome's cumulative
                        // item weights. Placement onto a decoration layer
                        // is out of scope; the draw still advances the rng
                        // stream and exercises the resolved ids.
                        let roll = self.rng.f64();
                        let mut cumulative = 0.0;
                        for item in &biome.items {
                            cumulative += item.percentage;
                            if roll - cumulative <= ITEM_EPSILON {
                                vegetation_hits += 1;
                                break;
                            }
                        }
                    }
                }
            }
        }

        let mountain = &top_band.biomes[0];
        let wall = palette
            .biome(config.elevations.len() - 1, 0)
            .map_or(TextureId::NONE, |r| r.wall);
        if wall.is_none() && mountain.wall_height > 0 {
            warn!(
                name = mountain.wall_name.as_str(),
                "wall texture unresolved; skipping cliff pass"
            );
        } else {
            stamp_cliff_walls(tiles, &heights, map_size, wall, mountain.wall_height);
        }

        info!(
            map_w = map_size.w,
            map_h = map_size.h,
            cells = num_cells,
            anchors = anchors.len(),
            vegetation_hits,
            "terrain generated"
        );
        Ok(())
    }

    /// Seeds one anchor per cell, row-major. Cells at multiples of the
    /// climate cluster factor on both axes draw a fresh temperature in
    /// [20, 80]; every other cell copies its cluster's top-left anchor,
    /// which row-major order guarantees already exists.
    fn synthesize_anchors(&mut self, num_cells: i32, cell_size: Extent) -> Vec<Anchor> {
        let mut anchors: Vec<Anchor> = Vec::with_capacity((num_cells * num_cells) as usize);
        for y in 0..num_cells {
            for x in 0..num_cells {
                let temperature = if x % CLIMATE_CLUSTER_FACTOR == 0
                    && y % CLIMATE_CLUSTER_FACTOR == 0
                {
                    self.rng.i32(20..=80) as i8
                } else {
                    let cx = x - x % CLIMATE_CLUSTER_FACTOR;
                    let cy = y - y % CLIMATE_CLUSTER_FACTOR;
                    anchors[(cy * num_cells + cx) as usize].temperature
                };
                let pos = Point::new(
                    ((f64::from(x) + self.rng.f64()) * f64::from(cell_size.w)) as i32,
                    ((f64::from(y) + self.rng.f64()) * f64::from(cell_size.h)) as i32,
                );
                let elevation = (self.rng.f64() * ELEVATION_SCALE as f64) as i64;
                anchors.push(Anchor {
                    pos,
                    elevation,
                    temperature,
                });
            }
        }
        anchors
    }
}

fn validate(config: &MapConfig, map_size: Extent) -> Result<(), GenerateError> {
    if config.elevations.is_empty() {
        return Err(GenerateError::NoElevations);
    }
    for (index, band) in config.elevations.iter().enumerate() {
        if band.biomes.is_empty() {
            return Err(GenerateError::EmptyElevationBand { index });
        }
    }
    let num_cells = i32::from(config.num_cells);
    if num_cells <= 0 {
        return Err(GenerateError::InvalidCellCount { num_cells });
    }
    if map_size.w < num_cells || map_size.h < num_cells {
        return Err(GenerateError::MapTooSmall {
            width: map_size.w,
            height: map_size.h,
            num_cells,
        });
    }
    if map_size.w % num_cells != 0 || map_size.h % num_cells != 0 {
        return Err(GenerateError::MapNotDivisible {
            width: map_size.w,
            height: map_size.h,
            num_cells,
        });
    }
    Ok(())
}

/// Collects the anchors of all cells within `sample_distance` of `cell` in
/// each direction. Neighbour indices outside the grid wrap modulo
/// `num_cells`, and the wrapped anchor's position is shifted by a whole
/// map period so distances stay correct across the seam.
fn gather_neighborhood(
    anchors: &[Anchor],
    cell: Point,
    num_cells: i32,
    sample_distance: i32,
    map_size: Extent,
) -> Vec<Anchor> {
    let span = 2 * sample_distance + 1;
    let mut out = Vec::with_capacity((span * span) as usize);
    for y in cell.y - sample_distance..=cell.y + sample_distance {
        for x in cell.x - sample_distance..=cell.x + sample_distance {
            let mut cur_x = x;
            let mut offset_x = 0;
            if cur_x < 0 {
                offset_x = -map_size.w;
                cur_x += num_cells;
            } else if cur_x > num_cells - 1 {
                offset_x = map_size.w;
                cur_x -= num_cells;
            }
            let mut cur_y = y;
            let mut offset_y = 0;
            if cur_y < 0 {
                offset_y = -map_size.h;
                cur_y += num_cells;
            } else if cur_y > num_cells - 1 {
                offset_y = map_size.h;
                cur_y -= num_cells;
            }
            let mut anchor = anchors[(cur_y * num_cells + cur_x) as usize];
            anchor.pos += Point::new(offset_x, offset_y);
            out.push(anchor);
        }
    }
    out
}

/// Inverse-distance-weighted blend of a neighbourhood at one tile.
///
/// Weight per anchor is `max(1, max_samples - dist^2)` with Manhattan
/// distance, accumulated entirely in integers; returns the blended
/// elevation value in [0, 1) and the blended temperature.
fn blend_anchors(neighborhood: &[Anchor], tile: Point, max_samples: i64) -> (f64, f64) {
    let mut sum_elevation: i64 = 0;
    let mut sum_temperature: i64 = 0;
    let mut total_weight: i64 = 0;
    for anchor in neighborhood {
        let dist = i64::from(anchor.pos.manhattan_distance(tile));
        let weight = (max_samples - dist * dist).max(1);
        sum_elevation += weight * anchor.elevation;
        sum_temperature += weight * i64::from(anchor.temperature);
        total_weight += weight;
    }
    let value = sum_elevation as f64 / (total_weight as f64 * ELEVATION_SCALE as f64);
    let temperature = sum_temperature as f64 / total_weight as f64;
    (value, temperature)
}

/// Walks elevation bands in declared order accumulating percentages; the
/// first band whose cumulative sum covers `value` (within the epsilon) is
/// selected. Returns `None` when the percentages leave `value` uncovered.
fn select_band(config: &MapConfig, value: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    for (index, band) in config.elevations.iter().enumerate() {
        cumulative += band.percentage;
        if value - cumulative <= BAND_EPSILON {
            return Some(index);
        }
    }
    None
}

/// Picks a biome within a band by temperature: the first biome whose
/// threshold exceeds the tile's temperature, else the last as fallback.
fn select_biome(band: &crate::config::Elevation, temperature: f64) -> usize {
    if band.biomes.len() > 1 {
        for (index, &threshold) in band.temperatures[..band.biomes.len() - 1].iter().enumerate() {
            if temperature < f64::from(threshold) {
                return index;
            }
        }
    }
    band.biomes.len() - 1
}

/// Stamps `wall_height` rows of wall texture beneath every southward height
/// discontinuity, faking a cliff face on the flat projection.
///
/// Idempotent: stamped tiles carry no height of their own, so a second run
/// finds the same discontinuities and writes the same ids.
fn stamp_cliff_walls(
    tiles: &mut [TileId],
    heights: &[u8],
    map_size: Extent,
    wall: TextureId,
    wall_height: i16,
) {
    if wall_height <= 0 {
        return;
    }
    let wall_height = i32::from(wall_height);
    let w = map_size.w as usize;
    for y in 1..(map_size.h - wall_height) {
        for x in 1..map_size.w - 1 {
            let here = heights[y as usize * w + x as usize];
            let below = heights[(y + 1) as usize * w + x as usize];
            if here > below {
                for i in 1..=wall_height {
                    tiles[(y + i) as usize * w + x as usize] = wall.to_tile(false);
                }
            }
        }
    }
    debug!(wall_id = wall.0, wall_height, "cliff walls stamped");
}
