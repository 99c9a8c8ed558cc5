//! # Tessera Engine
//!
//! The host-facing layer of the Tessera tile engine: an explicit [`Engine`]
//! context owning every subsystem (texture registry, map configuration,
//! tilemaps, output surface), a flat call surface for configuration and the
//! frame loop, and a TOML engine configuration file.
//!
//! There are no process-wide singletons; the host creates an `Engine`,
//! drives it, and drops it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod telemetry;

pub use config::EngineConfig;
pub use context::{Engine, TilemapHandle};
