//! Camera/viewport controller for the tilemap.
//!
//! The camera holds an integer pixel position, a discrete zoom index into a
//! fixed multiplier table, and a pending per-axis move intent that is
//! consumed once per frame. Bounds behave according to one of two policies:
//! wrap (infinite scrolling over a toroidal world) or clamp (hard stop at
//! the map edges).

use tessera_common::{Extent, Point};

/// Ascending table of zoom multipliers, stepped discretely.
pub const ZOOM_LEVELS: [f32; 6] = [0.125, 0.25, 0.5, 1.0, 2.0, 4.0];

/// Starting index into [`ZOOM_LEVELS`] (multiplier 1.0).
pub const DEFAULT_ZOOM_INDEX: usize = 3;

/// Scrollable, zoomable camera over a tile grid.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in zoomed pixels (top-left of the viewport).
    pub pos: Point,
    /// Viewport size in pixels.
    pub viewport: Extent,
    /// Wrap (true) or clamp (false) at the map bounds.
    pub infinite_scrolling: bool,
    zoom_idx: usize,
    pending: Point,
}

impl Camera {
    /// Creates a camera at the origin with the default zoom.
    #[must_use]
    pub fn new(viewport: Extent) -> Self {
        Self {
            pos: Point::ZERO,
            viewport,
            infinite_scrolling: true,
            zoom_idx: DEFAULT_ZOOM_INDEX,
            pending: Point::ZERO,
        }
    }

    /// Current zoom multiplier.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        ZOOM_LEVELS[self.zoom_idx]
    }

    /// Current index into [`ZOOM_LEVELS`].
    #[must_use]
    pub fn zoom_index(&self) -> usize {
        self.zoom_idx
    }

    /// Queues a movement intent for this frame.
    ///
    /// Each axis accepts only the first nonzero intent per frame, so two
    /// input sources cannot stack on the same axis between updates.
    pub fn queue_move(&mut self, v: Point) {
        if v.x != 0 && self.pending.x == 0 {
            self.pending.x = v.x;
        }
        if v.y != 0 && self.pending.y == 0 {
            self.pending.y = v.y;
        }
    }

    /// Applies and clears the pending movement. Called once per frame
    /// before fixing the camera against the bounds policy.
    pub fn apply_pending(&mut self) {
        self.pos += self.pending;
        self.pending = Point::ZERO;
    }

    /// Maximum camera position: world pixel size at the current zoom minus
    /// the viewport. Recomputed on every fix since zoom changes it.
    #[must_use]
    pub fn camera_max(&self, tile_size: Extent, map_size: Extent) -> Point {
        let zoom = self.zoom();
        Point::new(
            (zoom * (tile_size.w * map_size.w) as f32) as i32 - self.viewport.w,
            (zoom * (tile_size.h * map_size.h) as f32) as i32 - self.viewport.h,
        )
    }

    /// Fixes the camera position against the bounds policy.
    ///
    /// Wrap mode shifts by whole world periods (`camera_max + viewport`)
    /// until the position lies in `[-camera_max, 2 * camera_max)`; clamp
    /// mode pins it to `[0, camera_max]`.
    pub fn fix(&mut self, tile_size: Extent, map_size: Extent) {
        let max = self.camera_max(tile_size, map_size);
        if self.infinite_scrolling {
            while self.pos.x <= -max.x {
                self.pos.x += max.x + self.viewport.w;
            }
            while self.pos.y <= -max.y {
                self.pos.y += max.y + self.viewport.h;
            }
            while self.pos.x >= 2 * max.x {
                self.pos.x -= max.x + self.viewport.w;
            }
            while self.pos.y >= 2 * max.y {
                self.pos.y -= max.y + self.viewport.h;
            }
        } else {
            self.pos.x = self.pos.x.clamp(0, max.x);
            self.pos.y = self.pos.y.clamp(0, max.y);
        }
    }

    /// Steps one zoom level in. A no-op at the top of the table.
    ///
    /// The position is rescaled so the viewport center is approximately
    /// preserved across the doubling.
    pub fn zoom_in(&mut self, tile_size: Extent, map_size: Extent) {
        if self.zoom_idx + 1 >= ZOOM_LEVELS.len() {
            return;
        }
        self.zoom_idx += 1;
        self.pos.x = (self.pos.x + self.viewport.w / 4) * 2;
        self.pos.y = (self.pos.y + self.viewport.h / 4) * 2;
        self.fix(tile_size, map_size);
    }

    /// Steps one zoom level out. A no-op at the bottom of the table.
    pub fn zoom_out(&mut self, tile_size: Extent, map_size: Extent) {
        if self.zoom_idx == 0 {
            return;
        }
        self.zoom_idx -= 1;
        self.pos.x = (self.pos.x - self.viewport.w / 2) / 2;
        self.pos.y = (self.pos.y - self.viewport.h / 2) / 2;
        self.fix(tile_size, map_size);
    }

    /// Number of tiles spanned by the viewport per axis at the current
    /// zoom, including the 1-tile padding on both sides.
    #[must_use]
    pub fn visible_span(&self, tile_size: Extent) -> Extent {
        let zoom = self.zoom();
        Extent::new(
            (self.viewport.w as f32 / (zoom * tile_size.w as f32)) as i32 + 2,
            (self.viewport.h as f32 / (zoom * tile_size.h as f32)) as i32 + 2,
        )
    }

    /// Recomputes the position directly from a tile coordinate so the
    /// viewport is centered on it, then fixes against bounds.
    pub fn center_on_tile(&mut self, tile: Point, tile_size: Extent, map_size: Extent) {
        let zoom = self.zoom();
        self.pos = Point::new(
            (tile.x as f32 * tile_size.w as f32 * zoom) as i32,
            (tile.y as f32 * tile_size.h as f32 * zoom) as i32,
        );
        let span = self.visible_span(tile_size);
        let mid = Point::new(
            (zoom * tile_size.w as f32 * span.w as f32 / 2.0) as i32,
            (zoom * tile_size.h as f32 * span.h as f32 / 2.0) as i32,
        );
        self.pos = self.pos - mid;
        self.fix(tile_size, map_size);
    }
}
