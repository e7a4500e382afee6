//! # Frameline Core
//!
//! Core utilities shared by the Frameline renderer: structured task
//! scheduling, math types and profiling hooks.

pub mod compute;
pub mod math;
pub mod profiling;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("Frameline Core v{} initialized", VERSION);
}
