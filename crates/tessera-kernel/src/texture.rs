//! Texture registry: name → pixel buffer + sequential id.
//!
//! Ids are small integers handed out in registration order starting at 1;
//! id 0 is reserved as "no texture" and draws nothing. The registry is a
//! dense vector indexed by id, so lookup stays O(1) without the fixed
//! capacity ceiling of a static table.

use ahash::AHashMap;
use tessera_common::{Extent, Rgba8};
use tracing::debug;

/// Raw per-tile value stored in the tilemap grid.
///
/// The magnitude is a [`TextureId`]; a negative value marks the blocking
/// variant of the same texture (the sign bit is repurposed as a flag).
pub type TileId = i16;

/// Identifier of a registered texture. 0 means "no texture".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub i16);

impl TextureId {
    /// The reserved null id.
    pub const NONE: Self = Self(0);

    /// True for the reserved null id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Extracts the texture id from a grid value, dropping the blocking
    /// flag.
    #[must_use]
    pub const fn from_tile(raw: TileId) -> Self {
        Self(raw.unsigned_abs() as i16)
    }

    /// Converts to a grid value, applying the blocking flag as a negative
    /// sign.
    #[must_use]
    pub const fn to_tile(self, blocking: bool) -> TileId {
        if blocking {
            -self.0
        } else {
            self.0
        }
    }
}

/// A registered pixel buffer.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Row-major RGBA pixels, `size.w * size.h` of them.
    pub pixels: Vec<Rgba8>,
    /// Size in pixels.
    pub size: Extent,
    /// Whether the texture carries meaningful alpha and must be blended.
    pub transparent: bool,
}

/// Maps texture names to pixel buffers and sequential ids.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: Vec<Texture>,
    by_name: AHashMap<String, TextureId>,
}

impl TextureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a texture under a name and returns its id.
    ///
    /// Registration is idempotent: a name registered twice keeps its first
    /// pixels and id.
    pub fn register(
        &mut self,
        name: &str,
        pixels: Vec<Rgba8>,
        size: Extent,
        transparent: bool,
    ) -> TextureId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        self.textures.push(Texture {
            pixels,
            size,
            transparent,
        });
        let id = TextureId(self.textures.len() as i16);
        self.by_name.insert(name.to_owned(), id);
        debug!(name, id = id.0, "registered texture");
        id
    }

    /// Looks up the id for a name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// True when a name has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Fetches the texture for an id. The null id and unknown ids yield
    /// `None`.
    #[must_use]
    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        if id.0 <= 0 {
            return None;
        }
        self.textures.get(id.0 as usize - 1)
    }

    /// Number of registered textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
