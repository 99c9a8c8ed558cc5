//! Pixel surface and the shared blit primitive.
//!
//! `blit` is the one compositing routine for everything drawn on screen:
//! ground tiles, widget textures, glyph runs. It clips the source against a
//! destination rectangle independently per axis, samples the source with
//! nearest-neighbour `floor(i / zoom)` indexing when zoomed, and either
//! copies pixels or alpha-blends them with integer arithmetic only.

use tessera_common::{Extent, Point, Rect, Rgba8};

/// An owned RGBA pixel target.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: Vec<Rgba8>,
    size: Extent,
}

impl Surface {
    /// Creates a surface filled with opaque black.
    #[must_use]
    pub fn new(size: Extent) -> Self {
        Self {
            pixels: vec![Rgba8::opaque(0, 0, 0); size.area()],
            size,
        }
    }

    /// Surface size in pixels.
    #[must_use]
    pub fn size(&self) -> Extent {
        self.size
    }

    /// Read access to the pixel buffer, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Single-pixel read. Out-of-bounds coordinates yield `None`.
    #[must_use]
    pub fn pixel(&self, p: Point) -> Option<Rgba8> {
        if p.x < 0 || p.y < 0 || p.x >= self.size.w || p.y >= self.size.h {
            return None;
        }
        Some(self.pixels[p.to_index(self.size)])
    }

    /// The pixel buffer as raw RGBA bytes, for handing to a presentation
    /// layer.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fills the whole surface with one color.
    pub fn clear(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Blits a source pixel buffer onto the surface.
    ///
    /// * `src` is `src_size.w * src_size.h` row-major pixels.
    /// * `dest_origin` is where the (possibly zoomed) source's top-left
    ///   corner lands in surface space.
    /// * `clip` bounds the write; the source rectangle is clipped against
    ///   it per axis by adjusting a source-space start offset (origin left
    ///   of or above the clip) and an end cut (extent past the clip).
    /// * `alpha` selects integer alpha blending instead of a plain copy.
    /// * `zoom` scales the on-screen footprint to `src_size * zoom`,
    ///   sampling the source at `floor(i / zoom)`.
    ///
    /// Degenerates to a no-op when the clipped extent is non-positive on
    /// either axis; that is expected steady state at the screen edges, not
    /// an error.
    pub fn blit(
        &mut self,
        src: &[Rgba8],
        src_size: Extent,
        dest_origin: Point,
        clip: Rect,
        alpha: bool,
        zoom: f32,
    ) {
        if src_size.is_empty() {
            return;
        }
        // Never write outside the surface, whatever the caller's clip says.
        let clip = Rect::new(
            Point::new(clip.min.x.max(0), clip.min.y.max(0)),
            Point::new(clip.max.x.min(self.size.w), clip.max.y.min(self.size.h)),
        );

        let dest_size = src_size.scaled(zoom);
        let dest_end = dest_origin + Point::new(dest_size.w, dest_size.h);
        let mut start = dest_origin;
        let mut src_off = Point::ZERO;
        let mut end_cut = Point::ZERO;

        // Start offset and end cut are independent: a source larger than
        // the clip needs both on the same axis.
        if start.x < clip.min.x {
            src_off.x = clip.min.x - start.x;
            start.x = clip.min.x;
        }
        if dest_end.x > clip.max.x {
            end_cut.x = dest_end.x - clip.max.x;
        }
        if start.y < clip.min.y {
            src_off.y = clip.min.y - start.y;
            start.y = clip.min.y;
        }
        if dest_end.y > clip.max.y {
            end_cut.y = dest_end.y - clip.max.y;
        }

        let span_w = dest_size.w - src_off.x - end_cut.x;
        let span_h = dest_size.h - src_off.y - end_cut.y;
        if span_w <= 0 || span_h <= 0 {
            return;
        }

        let stride = self.size.w as usize;
        for y in 0..span_h {
            let sy = ((src_off.y + y) as f32 / zoom) as usize;
            let src_row = &src[sy * src_size.w as usize..(sy + 1) * src_size.w as usize];
            let dest_row_start = (start.y + y) as usize * stride + start.x as usize;
            let dest_row = &mut self.pixels[dest_row_start..dest_row_start + span_w as usize];
            if alpha {
                for (x, dest_px) in dest_row.iter_mut().enumerate() {
                    let sx = ((src_off.x + x as i32) as f32 / zoom) as usize;
                    *dest_px = dest_px.blended(src_row[sx]);
                }
            } else {
                for (x, dest_px) in dest_row.iter_mut().enumerate() {
                    let sx = ((src_off.x + x as i32) as f32 / zoom) as usize;
                    *dest_px = src_row[sx];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: Extent, a: Rgba8, b: Rgba8) -> Vec<Rgba8> {
        (0..size.area())
            .map(|i| {
                let x = i % size.w as usize;
                let y = i / size.w as usize;
                if (x + y) % 2 == 0 {
                    a
                } else {
                    b
                }
            })
            .collect()
    }

    fn canvas20() -> (Surface, Rect) {
        let surface = Surface::new(Extent::new(20, 20));
        let clip = Rect::from_origin(Point::ZERO, Extent::new(20, 20));
        (surface, clip)
    }

    #[test]
    fn test_blit_clips_top_left() {
        let (mut surface, clip) = canvas20();
        let size = Extent::new(10, 10);
        // Source pixel value encodes its coordinates so sampling is visible.
        let src: Vec<Rgba8> = (0..100)
            .map(|i| Rgba8::opaque((i % 10) as u8, (i / 10) as u8, 0))
            .collect();

        surface.blit(&src, size, Point::new(-5, -5), clip, false, 1.0);

        // Exactly a 5x5 region at the origin, sampled from [5..10) x [5..10).
        for y in 0..5 {
            for x in 0..5 {
                let px = surface.pixel(Point::new(x, y)).expect("inside surface");
                assert_eq!((px.r, px.g), ((x + 5) as u8, (y + 5) as u8));
            }
        }
        // Nothing written past the clipped region.
        assert_eq!(
            surface.pixel(Point::new(5, 0)).expect("inside surface"),
            Rgba8::opaque(0, 0, 0)
        );
        assert_eq!(
            surface.pixel(Point::new(0, 5)).expect("inside surface"),
            Rgba8::opaque(0, 0, 0)
        );
    }

    #[test]
    fn test_blit_clips_bottom_right() {
        let (mut surface, clip) = canvas20();
        let size = Extent::new(10, 10);
        let src = vec![Rgba8::opaque(255, 0, 0); size.area()];

        surface.blit(&src, size, Point::new(15, 15), clip, false, 1.0);

        assert_eq!(
            surface.pixel(Point::new(15, 15)).expect("inside surface"),
            Rgba8::opaque(255, 0, 0)
        );
        assert_eq!(
            surface.pixel(Point::new(19, 19)).expect("inside surface"),
            Rgba8::opaque(255, 0, 0)
        );
        assert_eq!(
            surface.pixel(Point::new(14, 14)).expect("inside surface"),
            Rgba8::opaque(0, 0, 0)
        );
    }

    #[test]
    fn test_blit_source_larger_than_clip_on_both_sides() {
        let (mut surface, clip) = canvas20();
        let size = Extent::new(30, 30);
        // Pixel value encodes its source coordinates.
        let src: Vec<Rgba8> = (0..900)
            .map(|i| Rgba8::opaque((i % 30) as u8, (i / 30) as u8, 0))
            .collect();

        // Overhangs the clip on every edge: both the start offset and the
        // end cut apply on each axis.
        surface.blit(&src, size, Point::new(-5, -5), clip, false, 1.0);

        let top_left = surface.pixel(Point::ZERO).expect("inside surface");
        assert_eq!((top_left.r, top_left.g), (5, 5));
        let bottom_right = surface.pixel(Point::new(19, 19)).expect("inside surface");
        assert_eq!((bottom_right.r, bottom_right.g), (24, 24));
        // No row bleed: the row below the top-left pixel samples the next
        // source row, not source column 25.
        let below = surface.pixel(Point::new(0, 1)).expect("inside surface");
        assert_eq!((below.r, below.g), (5, 6));
    }

    #[test]
    fn test_blit_fully_outside_is_noop() {
        let (mut surface, clip) = canvas20();
        let before = surface.pixels().to_vec();
        let size = Extent::new(10, 10);
        let src = vec![Rgba8::opaque(255, 255, 255); size.area()];

        surface.blit(&src, size, Point::new(-10, 0), clip, false, 1.0);
        surface.blit(&src, size, Point::new(0, 25), clip, false, 1.0);

        assert_eq!(surface.pixels(), &before[..]);
    }

    #[test]
    fn test_blit_zoom_nearest_neighbour() {
        let (mut surface, clip) = canvas20();
        let size = Extent::new(2, 2);
        let src = checker(size, Rgba8::opaque(255, 0, 0), Rgba8::opaque(0, 0, 255));

        // 2x2 source at zoom 4 covers 8x8 on screen in 4x4 blocks.
        surface.blit(&src, size, Point::ZERO, clip, false, 4.0);

        assert_eq!(
            surface.pixel(Point::new(3, 3)).expect("inside surface"),
            Rgba8::opaque(255, 0, 0)
        );
        assert_eq!(
            surface.pixel(Point::new(4, 3)).expect("inside surface"),
            Rgba8::opaque(0, 0, 255)
        );
        assert_eq!(
            surface.pixel(Point::new(7, 7)).expect("inside surface"),
            Rgba8::opaque(255, 0, 0)
        );
    }

    #[test]
    fn test_blit_zoom_down_samples_sparsely() {
        let (mut surface, clip) = canvas20();
        let size = Extent::new(8, 8);
        // Row-coloured source: row y has green = y * 30.
        let src: Vec<Rgba8> = (0..64)
            .map(|i| Rgba8::opaque(0, (i / 8 * 30) as u8, 0))
            .collect();

        // Zoom 0.5: 8x8 source covers 4x4 on screen, sampling every other row.
        surface.blit(&src, size, Point::ZERO, clip, false, 0.5);

        assert_eq!(
            surface.pixel(Point::new(0, 1)).expect("inside surface"),
            Rgba8::opaque(0, 60, 0)
        );
        assert_eq!(
            surface.pixel(Point::new(0, 4)).expect("inside surface"),
            Rgba8::opaque(0, 0, 0)
        );
    }

    #[test]
    fn test_blit_alpha_blend() {
        let (mut surface, clip) = canvas20();
        surface.clear(Rgba8::opaque(100, 100, 100));
        let size = Extent::new(1, 1);

        surface.blit(
            &[Rgba8::new(200, 0, 100, 255)],
            size,
            Point::ZERO,
            clip,
            true,
            1.0,
        );
        assert_eq!(
            surface.pixel(Point::ZERO).expect("inside surface"),
            Rgba8::opaque(200, 0, 100)
        );

        surface.blit(
            &[Rgba8::new(200, 0, 100, 0)],
            size,
            Point::new(1, 0),
            clip,
            true,
            1.0,
        );
        assert_eq!(
            surface.pixel(Point::new(1, 0)).expect("inside surface"),
            Rgba8::opaque(100, 100, 100)
        );
    }

    #[test]
    fn test_blit_respects_surface_bounds_over_clip() {
        let mut surface = Surface::new(Extent::new(10, 10));
        // Clip claims more than the surface has.
        let clip = Rect::from_origin(Point::ZERO, Extent::new(50, 50));
        let size = Extent::new(10, 10);
        let src = vec![Rgba8::opaque(1, 2, 3); size.area()];

        surface.blit(&src, size, Point::new(5, 5), clip, false, 1.0);

        assert_eq!(
            surface.pixel(Point::new(9, 9)).expect("inside surface"),
            Rgba8::opaque(1, 2, 3)
        );
        // No panic, nothing else to assert: the write stopped at the edge.
    }
}
