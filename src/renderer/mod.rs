//! Rendering module
//!
//! All drawing goes through [`DrawingSurface`], a minimal path/stroke API that
//! the browser canvas implements directly. [`Recorder`] captures the same calls
//! for headless runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use surface::{DrawCommand, DrawingSurface, Recorder};

/// Stroke colour for the background grid
pub const GRID_COLOR: &str = "lightgray";
/// Stroke colour for terrain and player
pub const INK_COLOR: &str = "black";
