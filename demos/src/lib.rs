//! # Frameline Demos
//!
//! Demo programs for the Frameline frame pipeline.
//!
//! ## Available Demos
//!
//! - `headless_frame` - Producer and render threads driving the whole
//!   pipeline against a headless backend

pub mod scene;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
