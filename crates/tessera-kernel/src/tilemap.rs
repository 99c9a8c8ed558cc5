//! Tilemap: the ground-tile grid plus the camera that views it.
//!
//! The grid is row-major `TileId`s, one per tile, owned here and fully
//! overwritten in place by the terrain generator on every regeneration.
//! Drawing wraps tile indices toroidally into the grid, so the rendered
//! world always appears seamless regardless of the camera's own wrap/clamp
//! policy.

use tessera_common::{ConfigError, Extent, Point, Rect};
use tracing::debug;

use crate::camera::Camera;
use crate::surface::Surface;
use crate::texture::{TextureId, TextureRegistry, TileId};

/// A scrollable, zoomable view onto a toroidal tile grid.
#[derive(Debug)]
pub struct Tilemap {
    /// Camera/viewport controller.
    pub camera: Camera,
    /// Screen position of the tilemap's top-left corner.
    pub origin: Point,
    map_size: Extent,
    tile_size: Extent,
    tiles_ground: Vec<TileId>,
}

impl Tilemap {
    /// Creates a tilemap with an all-null grid.
    #[must_use]
    pub fn new(viewport_size: Extent, map_size: Extent, tile_size: Extent) -> Self {
        debug!(
            map_w = map_size.w,
            map_h = map_size.h,
            tile_w = tile_size.w,
            tile_h = tile_size.h,
            "created tilemap"
        );
        Self {
            camera: Camera::new(viewport_size),
            origin: Point::ZERO,
            map_size,
            tile_size,
            tiles_ground: vec![0; map_size.area()],
        }
    }

    /// Map size in tiles.
    #[must_use]
    pub fn map_size(&self) -> Extent {
        self.map_size
    }

    /// Tile size in pixels (at zoom 1.0).
    #[must_use]
    pub fn tile_size(&self) -> Extent {
        self.tile_size
    }

    /// The ground grid, row-major.
    #[must_use]
    pub fn tiles_ground(&self) -> &[TileId] {
        &self.tiles_ground
    }

    /// Mutable access for the terrain generator.
    pub fn tiles_ground_mut(&mut self) -> &mut [TileId] {
        &mut self.tiles_ground
    }

    /// Ground id at a tile coordinate, wrapping toroidally.
    #[must_use]
    pub fn ground_at(&self, tile: Point) -> TileId {
        self.tiles_ground[tile.wrapped(self.map_size).to_index(self.map_size)]
    }

    /// Manually overrides one tile. Fails fast on out-of-range coordinates;
    /// manual overrides address the grid directly, without wrapping.
    pub fn set_tile(&mut self, tile: Point, id: TextureId, ground: bool) -> Result<(), ConfigError> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.map_size.w || tile.y >= self.map_size.h {
            return Err(ConfigError::TileOutOfRange {
                x: tile.x,
                y: tile.y,
                width: self.map_size.w,
                height: self.map_size.h,
            });
        }
        if ground {
            self.tiles_ground[tile.to_index(self.map_size)] = id.to_tile(false);
        }
        Ok(())
    }

    /// The inclusive tile-index window covered by the viewport, padded by
    /// one tile on each side so partial tiles at the edges never pop.
    ///
    /// Indices may lie outside `[0, map_size)`; they are wrapped at lookup.
    #[must_use]
    pub fn visible_tiles(&self) -> Rect {
        const PAD: i32 = 1;
        let zoom = self.camera.zoom();
        let cam = self.camera.pos;
        let view = self.camera.viewport;
        let tile_w = zoom * self.tile_size.w as f32;
        let tile_h = zoom * self.tile_size.h as f32;
        Rect::new(
            Point::new(
                (cam.x as f32 / tile_w) as i32 - PAD,
                (cam.y as f32 / tile_h) as i32 - PAD,
            ),
            Point::new(
                ((cam.x + view.w) as f32 / tile_w) as i32 + PAD,
                ((cam.y + view.h) as f32 / tile_h) as i32 + PAD,
            ),
        )
    }

    /// Renders one frame of the tilemap into the surface.
    ///
    /// Integrates the pending camera movement, fixes the camera against its
    /// bounds policy, then blits every tile in the visible window. Tile
    /// indices outside the grid wrap toroidally; negative ground ids (the
    /// blocking flag) are unsigned before texture lookup; unresolved ids
    /// draw nothing. Textures flagged transparent are alpha blended.
    pub fn draw(&mut self, surface: &mut Surface, registry: &TextureRegistry) {
        self.camera.apply_pending();
        self.camera.fix(self.tile_size, self.map_size);

        let canvas = Rect::from_origin(self.origin, self.camera.viewport);
        let visible = self.visible_tiles();
        let zoom = self.camera.zoom();
        let scaled_tile = self.tile_size.scaled(zoom);

        for y in visible.min.y..=visible.max.y {
            for x in visible.min.x..=visible.max.x {
                let raw = self.ground_at(Point::new(x, y));
                let Some(texture) = registry.get(TextureId::from_tile(raw)) else {
                    continue;
                };
                let start = Point::new(
                    self.origin.x - self.camera.pos.x + x * scaled_tile.w,
                    self.origin.y - self.camera.pos.y + y * scaled_tile.h,
                );
                surface.blit(
                    &texture.pixels,
                    texture.size,
                    start,
                    canvas,
                    texture.transparent,
                    zoom,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_common::Rgba8;

    fn registry_with(names: &[(&str, Rgba8)], tile: Extent) -> TextureRegistry {
        let mut reg = TextureRegistry::new();
        for (name, color) in names {
            reg.register(name, vec![*color; tile.area()], tile, false);
        }
        reg
    }

    #[test]
    fn test_visible_tiles_padding() {
        let map = Tilemap::new(Extent::new(160, 160), Extent::new(100, 100), Extent::new(16, 16));
        let visible = map.visible_tiles();
        // Camera at origin, zoom 1: tiles 0..=10 plus one pad on each side.
        assert_eq!(visible.min, Point::new(-1, -1));
        assert_eq!(visible.max, Point::new(11, 11));
    }

    #[test]
    fn test_ground_at_wraps() {
        let mut map = Tilemap::new(Extent::new(32, 32), Extent::new(4, 4), Extent::new(16, 16));
        map.tiles_ground_mut()[0] = 9;
        assert_eq!(map.ground_at(Point::new(0, 0)), 9);
        assert_eq!(map.ground_at(Point::new(4, 4)), 9);
        assert_eq!(map.ground_at(Point::new(-4, -8)), 9);
    }

    #[test]
    fn test_set_tile_bounds() {
        let mut map = Tilemap::new(Extent::new(32, 32), Extent::new(4, 4), Extent::new(16, 16));
        let id = TextureId(3);
        map.set_tile(Point::new(3, 3), id, true).expect("in range");
        assert_eq!(map.ground_at(Point::new(3, 3)), 3);
        assert!(matches!(
            map.set_tile(Point::new(4, 0), id, true),
            Err(ConfigError::TileOutOfRange { .. })
        ));
        assert!(matches!(
            map.set_tile(Point::new(0, -1), id, true),
            Err(ConfigError::TileOutOfRange { .. })
        ));
    }

    #[test]
    fn test_draw_fills_viewport_from_grid() {
        let tile = Extent::new(8, 8);
        let mut map = Tilemap::new(Extent::new(32, 32), Extent::new(4, 4), tile);
        let reg = registry_with(&[("grass", Rgba8::opaque(0, 200, 0))], tile);
        let grass = reg.resolve("grass").expect("registered");
        map.tiles_ground_mut().fill(grass.to_tile(false));

        let mut surface = Surface::new(Extent::new(32, 32));
        map.draw(&mut surface, &reg);

        for p in [Point::ZERO, Point::new(31, 31), Point::new(16, 7)] {
            assert_eq!(
                surface.pixel(p).expect("inside surface"),
                Rgba8::opaque(0, 200, 0)
            );
        }
    }

    #[test]
    fn test_draw_wraps_tiles_toroidally() {
        let tile = Extent::new(8, 8);
        // 8x8 map, 32x32 viewport: scrolling left pulls the window over
        // negative indices; those must render from wrapped lookups.
        let mut map = Tilemap::new(Extent::new(32, 32), Extent::new(8, 8), tile);
        let reg = registry_with(
            &[
                ("grass", Rgba8::opaque(0, 200, 0)),
                ("rock", Rgba8::opaque(80, 80, 80)),
            ],
            tile,
        );
        let grass = reg.resolve("grass").expect("registered");
        let rock = reg.resolve("rock").expect("registered");
        map.tiles_ground_mut().fill(grass.to_tile(false));
        // Column 0 is rock.
        for y in 0..8 {
            map.set_tile(Point::new(0, y), rock, true).expect("in range");
        }

        // Scroll two tiles to the left; column 0 shifts to mid-screen and
        // the left edge shows the wrapped far columns.
        map.camera.pos = Point::new(-16, 0);
        map.camera.infinite_scrolling = true;
        let mut surface = Surface::new(Extent::new(32, 32));
        map.draw(&mut surface, &reg);

        assert_eq!(
            surface.pixel(Point::new(16, 0)).expect("inside surface"),
            Rgba8::opaque(80, 80, 80)
        );
        assert_eq!(
            surface.pixel(Point::new(8, 0)).expect("inside surface"),
            Rgba8::opaque(0, 200, 0)
        );
    }

    #[test]
    fn test_draw_blocking_ids_render_same_texture() {
        let tile = Extent::new(8, 8);
        let mut map = Tilemap::new(Extent::new(16, 16), Extent::new(2, 2), tile);
        let reg = registry_with(&[("cliff", Rgba8::opaque(120, 100, 90))], tile);
        let cliff = reg.resolve("cliff").expect("registered");
        map.tiles_ground_mut().fill(cliff.to_tile(true));

        let mut surface = Surface::new(Extent::new(16, 16));
        map.draw(&mut surface, &reg);
        assert_eq!(
            surface.pixel(Point::new(5, 5)).expect("inside surface"),
            Rgba8::opaque(120, 100, 90)
        );
    }

    #[test]
    fn test_draw_unresolved_ids_draw_nothing() {
        let tile = Extent::new(8, 8);
        let mut map = Tilemap::new(Extent::new(16, 16), Extent::new(2, 2), tile);
        let reg = TextureRegistry::new();
        map.tiles_ground_mut().fill(42);

        let mut surface = Surface::new(Extent::new(16, 16));
        surface.clear(Rgba8::opaque(1, 1, 1));
        map.draw(&mut surface, &reg);
        assert_eq!(
            surface.pixel(Point::new(3, 3)).expect("inside surface"),
            Rgba8::opaque(1, 1, 1)
        );
    }
}
