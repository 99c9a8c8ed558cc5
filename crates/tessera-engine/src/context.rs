//! The engine context: one object owning every subsystem.
//!
//! Replaces process-wide singletons with an explicit context passed by the
//! host into every call. The host builds a [`MapConfig`] through the
//! configuration calls, creates a tilemap, regenerates terrain, and drives
//! `update` once per frame; the composited frame lives in the engine's
//! owned surface.

use tessera_common::{ConfigError, Extent, Point, Rgba8, TesseraResult};
use tessera_kernel::{Surface, TextureId, TextureRegistry, Tilemap};
use tessera_worldgen::{BiomePalette, MapConfig, MapGenerator};
use tracing::{info, warn};

use crate::config::EngineConfig;

/// Opaque handle to a created tilemap viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilemapHandle(usize);

/// Owns all engine subsystems and exposes the flat call surface.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    registry: TextureRegistry,
    map_config: MapConfig,
    generator: MapGenerator,
    surface: Surface,
    tilemaps: Vec<Tilemap>,
}

impl Engine {
    /// Creates an engine from a configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let seed = config.world_seed.unwrap_or_else(|| fastrand::u64(..));
        let surface = Surface::new(Extent::new(config.screen_width, config.screen_height));
        info!(
            width = config.screen_width,
            height = config.screen_height,
            seed,
            "engine initialised"
        );
        Self {
            config,
            registry: TextureRegistry::new(),
            map_config: MapConfig::new(),
            generator: MapGenerator::new(seed),
            surface,
            tilemaps: Vec::new(),
        }
    }

    /// The composited output surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The texture registry.
    #[must_use]
    pub fn registry(&self) -> &TextureRegistry {
        &self.registry
    }

    /// The map configuration built so far.
    #[must_use]
    pub fn map_config(&self) -> &MapConfig {
        &self.map_config
    }

    // === Texture boundary ===

    /// Registers a pixel buffer under a name, returning its id. Idempotent
    /// per name.
    pub fn register_texture(
        &mut self,
        name: &str,
        pixels: Vec<Rgba8>,
        size: Extent,
        transparent: bool,
    ) -> TextureId {
        self.registry.register(name, pixels, size, transparent)
    }

    /// True when a texture name has been registered.
    #[must_use]
    pub fn texture_registered(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Looks up the id for a registered texture name.
    #[must_use]
    pub fn resolve_texture(&self, name: &str) -> Option<TextureId> {
        self.registry.resolve(name)
    }

    // === Map configuration calls ===

    /// Appends an elevation band to the map configuration.
    pub fn add_elevation(&mut self, percentage: f64) {
        self.map_config.add_elevation(percentage);
    }

    /// Appends a biome to an elevation band. Fails fast on a bad index.
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
    ) -> TesseraResult<()> {
        self.map_config.add_biome(
            elevation,
            name,
            max_temperature,
            wall_name,
            max_height,
            wall_height,
            blocking,
        )?;
        Ok(())
    }

    /// Appends a vegetation item to a biome addressed by name. Fails fast
    /// on a bad index or unknown biome.
    pub fn add_vegetation(
        &mut self,
        elevation: usize,
        biome: &str,
        item: &str,
        percentage: f64,
    ) -> TesseraResult<()> {
        self.map_config.add_vegetation(elevation, biome, item, percentage)?;
        Ok(())
    }

    /// Sets the anchor grid parameters.
    pub fn set_generation_parameters(
        &mut self,
        num_cells: i16,
        sample_distance: i16,
        sample_factor: i16,
    ) {
        self.map_config
            .set_generation_parameters(num_cells, sample_distance, sample_factor);
    }

    // === Tilemap lifecycle ===

    /// Creates a tilemap and returns its handle. The camera policy comes
    /// from the engine configuration.
    pub fn create_tilemap(
        &mut self,
        viewport_size: Extent,
        map_size: Extent,
        tile_size: Extent,
    ) -> TilemapHandle {
        let mut tilemap = Tilemap::new(viewport_size, map_size, tile_size);
        tilemap.camera.infinite_scrolling = self.config.infinite_scrolling;
        self.tilemaps.push(tilemap);
        TilemapHandle(self.tilemaps.len() - 1)
    }

    /// Queues a camera movement intent for this frame.
    pub fn move_camera(&mut self, handle: TilemapHandle, dx: i32, dy: i32) -> TesseraResult<()> {
        self.tilemap_mut(handle)?
            .camera
            .queue_move(Point::new(dx, dy));
        Ok(())
    }

    /// Steps the camera one zoom level in.
    pub fn zoom_in(&mut self, handle: TilemapHandle) -> TesseraResult<()> {
        let tilemap = self.tilemap_mut(handle)?;
        let (tile, map) = (tilemap.tile_size(), tilemap.map_size());
        tilemap.camera.zoom_in(tile, map);
        Ok(())
    }

    /// Steps the camera one zoom level out.
    pub fn zoom_out(&mut self, handle: TilemapHandle) -> TesseraResult<()> {
        let tilemap = self.tilemap_mut(handle)?;
        let (tile, map) = (tilemap.tile_size(), tilemap.map_size());
        tilemap.camera.zoom_out(tile, map);
        Ok(())
    }

    /// Centers the viewport on a tile coordinate.
    pub fn center_on_tile(&mut self, handle: TilemapHandle, x: i32, y: i32) -> TesseraResult<()> {
        let tilemap = self.tilemap_mut(handle)?;
        let (tile, map) = (tilemap.tile_size(), tilemap.map_size());
        tilemap.camera.center_on_tile(Point::new(x, y), tile, map);
        Ok(())
    }

    /// Switches the camera between wrap and clamp bounds.
    pub fn set_infinite_scrolling(
        &mut self,
        handle: TilemapHandle,
        enabled: bool,
    ) -> TesseraResult<()> {
        self.tilemap_mut(handle)?.camera.infinite_scrolling = enabled;
        Ok(())
    }

    /// Regenerates the tilemap's terrain from the current map config.
    ///
    /// Resolves the biome palette against the registry, then overwrites the
    /// ground grid in place. Configuration must be complete: texture names
    /// referenced but not registered resolve to gaps, while structural
    /// problems (no elevations, indivisible map) are reported.
    pub fn regenerate(&mut self, handle: TilemapHandle) -> TesseraResult<()> {
        let palette = BiomePalette::resolve(&self.map_config, &self.registry);
        let tilemap = self
            .tilemaps
            .get_mut(handle.0)
            .ok_or(ConfigError::NoTilemap)?;
        let map_size = tilemap.map_size();
        self.generator
            .generate(&self.map_config, &palette, map_size, tilemap.tiles_ground_mut())?;
        Ok(())
    }

    /// Manually overrides one tile with a named texture.
    ///
    /// An unknown name clears the tile and logs a warning instead of
    /// failing: the render path treats missing textures as gaps.
    pub fn set_tile(
        &mut self,
        handle: TilemapHandle,
        x: i32,
        y: i32,
        texture_name: &str,
        ground: bool,
    ) -> TesseraResult<()> {
        let id = match self.registry.resolve(texture_name) {
            Some(id) => id,
            None => {
                warn!(name = texture_name, "set_tile with unregistered texture");
                TextureId::NONE
            }
        };
        self.tilemap_mut(handle)?
            .set_tile(Point::new(x, y), id, ground)?;
        Ok(())
    }

    /// Renders one frame: every tilemap integrates its pending camera
    /// movement and composites into the engine surface.
    pub fn update(&mut self) {
        for tilemap in &mut self.tilemaps {
            tilemap.draw(&mut self.surface, &self.registry);
        }
    }

    fn tilemap_mut(&mut self, handle: TilemapHandle) -> Result<&mut Tilemap, ConfigError> {
        self.tilemaps.get_mut(handle.0).ok_or(ConfigError::NoTilemap)
    }
}
