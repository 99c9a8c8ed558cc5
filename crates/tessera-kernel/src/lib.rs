//! # Tessera Kernel
//!
//! Software rendering core for the Tessera tile engine: the texture
//! registry, the camera/viewport controller, the pixel surface with its
//! clipping blitter, and the tilemap compositor that ties them together.
//!
//! Everything here is synchronous and single-threaded; each operation is a
//! direct computation over owned buffers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod camera;
pub mod surface;
pub mod texture;
pub mod tilemap;

pub use camera::{Camera, DEFAULT_ZOOM_INDEX, ZOOM_LEVELS};
pub use surface::Surface;
pub use texture::{Texture, TextureId, TextureRegistry, TileId};
pub use tilemap::Tilemap;
