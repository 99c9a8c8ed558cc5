//! Resolved-texture cache for a map configuration.
//!
//! Built once from a finalized [`MapConfig`] and the texture registry,
//! before generation runs. This keeps the config immutable and removes the
//! "unresolved sentinel" pattern: the generator only ever reads ids from
//! here. Unknown texture names resolve to the null id — the affected tiles
//! render as gaps, they never crash the generator or the renderer.

use tessera_common::Extent;
use tessera_kernel::{TextureId, TextureRegistry};
use tracing::warn;

use crate::config::MapConfig;

/// Resolved ids for one vegetation item.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedItem {
    /// Texture id; null when the name was unknown.
    pub id: TextureId,
    /// Footprint in pixels, taken from the texture.
    pub footprint: Extent,
}

/// Resolved ids for one biome.
#[derive(Debug, Clone)]
pub struct ResolvedBiome {
    /// Ground texture id; null when the name was unknown.
    pub ground: TextureId,
    /// Wall texture id for the cliff pass; null when unknown.
    pub wall: TextureId,
    /// Items parallel to the biome's item list.
    pub items: Vec<ResolvedItem>,
}

/// Texture ids for every biome and item of a config, indexed in parallel
/// with `config.elevations[e].biomes[b]`.
#[derive(Debug, Clone, Default)]
pub struct BiomePalette {
    bands: Vec<Vec<ResolvedBiome>>,
}

impl BiomePalette {
    /// Resolves every texture name in the config against the registry.
    #[must_use]
    pub fn resolve(config: &MapConfig, registry: &TextureRegistry) -> Self {
        let bands = config
            .elevations
            .iter()
            .map(|band| {
                band.biomes
                    .iter()
                    .map(|biome| ResolvedBiome {
                        ground: lookup(registry, &biome.name),
                        wall: lookup(registry, &biome.wall_name),
                        items: biome
                            .items
                            .iter()
                            .map(|item| {
                                let id = lookup(registry, &item.name);
                                let footprint = registry
                                    .get(id)
                                    .map_or(Extent::new(0, 0), |t| t.size);
                                ResolvedItem { id, footprint }
                            })
                            .collect(),
                    })
                    .collect()
            })
            .collect();
        Self { bands }
    }

    /// Resolved entry for a biome by (elevation, biome) index.
    #[must_use]
    pub fn biome(&self, elevation: usize, biome: usize) -> Option<&ResolvedBiome> {
        self.bands.get(elevation)?.get(biome)
    }
}

fn lookup(registry: &TextureRegistry, name: &str) -> TextureId {
    registry.resolve(name).unwrap_or_else(|| {
        warn!(name, "texture not registered; tiles will render as gaps");
        TextureId::NONE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::Rgba8;

    fn config_with_two_bands() -> MapConfig {
        let mut config = MapConfig::new();
        config.add_elevation(0.6);
        config.add_elevation(0.4);
        config
            .add_biome(0, "water", 0, "water", 0, 0, true)
            .expect("elevation 0 exists");
        config
            .add_biome(1, "rock", 0, "cliff", 8, 2, false)
            .expect("elevation 1 exists");
        config
            .add_vegetation(1, "rock", "boulder", 0.05)
            .expect("rock exists");
        config
    }

    #[test]
    fn test_resolve_known_names() {
        let mut registry = TextureRegistry::new();
        let size = Extent::new(16, 16);
        for name in ["water", "rock", "cliff", "boulder"] {
            registry.register(name, vec![Rgba8::opaque(0, 0, 0); size.area()], size, false);
        }
        let palette = BiomePalette::resolve(&config_with_two_bands(), &registry);

        let water = palette.biome(0, 0).expect("band 0 biome 0");
        assert_eq!(water.ground, registry.resolve("water").expect("registered"));
        let rock = palette.biome(1, 0).expect("band 1 biome 0");
        assert_eq!(rock.wall, registry.resolve("cliff").expect("registered"));
        assert_eq!(rock.items[0].footprint, size);
    }

    #[test]
    fn test_unknown_names_resolve_to_null() {
        let registry = TextureRegistry::new();
        let palette = BiomePalette::resolve(&config_with_two_bands(), &registry);
        let water = palette.biome(0, 0).expect("band 0 biome 0");
        assert!(water.ground.is_none());
        assert!(water.wall.is_none());
        let rock = palette.biome(1, 0).expect("band 1 biome 0");
        assert!(rock.items[0].id.is_none());
    }

    #[test]
    fn test_out_of_range_indices_are_none() {
        let palette = BiomePalette::resolve(&MapConfig::new(), &TextureRegistry::new());
        assert!(palette.biome(0, 0).is_none());
    }
}
