//! # Tessera Common
//!
//! Common types, utilities, and shared abstractions for the Tessera tile
//! engine.
//!
//! This crate provides foundational types used across all Tessera subsystems:
//! - Geometry value types (point, extent, rectangle)
//! - Packed pixel color with integer blend arithmetic
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod error;
pub mod geometry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::*;
    pub use crate::error::*;
    pub use crate::geometry::*;
}

pub use prelude::*;
