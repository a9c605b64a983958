//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Display-refresh callbacks (game loop)
//! - Interval timers (music loop)
//!
//! Native builds drive the loops by hand, so only the web side lives here.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{AnimationLoop, Interval};
