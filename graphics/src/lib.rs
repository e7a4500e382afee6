//! # Frameline Graphics
//!
//! Multi-threaded frame pipeline of the Frameline renderer.
//!
//! ## Overview
//!
//! A frame flows through this crate in three stages:
//! - [`RenderSnapshot`] - immutable description of one frame, filled by the
//!   scene and claimed field by field
//! - [`pass`] and [`command`] - parallel render-pass compilation (culling,
//!   sorting) and conversion into ordered [`RenderCommandList`]s queued in a
//!   [`RenderCommandBuffer`]
//! - [`RenderCommandProcessor`] - single-threaded replay of the buffer
//!   against a [`RenderBackend`]
//!
//! [`Renderer`] drives the first two stages; [`FrameQueue`] and
//! [`ResourceCommandQueue`] connect them to the render thread.
//!
//! ## Example
//!
//! ```ignore
//! use frameline_graphics::{DummyBackend, RenderCommandProcessor, Renderer, RendererConfig};
//!
//! let mut renderer = Renderer::new(RendererConfig::default())?;
//! let mut processor = RenderCommandProcessor::new(DummyBackend::new());
//! let snapshot = renderer.new_snapshot(Resolution::new(1280, 720));
//! // Fill the snapshot...
//! let buffer = renderer.render_snapshot(snapshot);
//! let stats = processor.process(buffer);
//! ```

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod pass;
pub mod processor;
pub mod queue;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod types;

// Re-export main types for convenience
pub use backend::{DummyBackend, LoggingBackend, RenderBackend};
pub use command::{
    RenderCommand, RenderCommandBuffer, RenderCommandCompiler, RenderCommandKind,
    RenderCommandList,
};
pub use config::RendererConfig;
pub use error::{GraphicsError, GraphicsResult};
pub use pass::{CameraRenderPassGroup, RenderPass, RenderPassObject, VisibilityPredicate};
pub use processor::{ProcessStats, RenderCommandProcessor};
pub use queue::{FrameQueue, ResourceCommandQueue};
pub use renderer::Renderer;
pub use resources::{
    MaterialFlags, RenderDynamicMesh, RenderMaterial, RenderMaterialGroup, RenderMesh,
    RenderPassKind, RenderShader, RenderTexture, ResourceId,
};
pub use scene::{
    AmbientRenderLight, DirectionalRenderLight, PointRenderLight, RenderCamera, RenderLayer,
    RenderObject, RenderObjectMesh, RenderSnapshot,
};
pub use types::{
    Colour, MeshDescriptor, Resolution, TextureDescriptor, TextureFormat, VertexFormat,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the graphics library version.
pub fn init() {
    log::info!("Frameline Graphics v{} initialized", VERSION);
}
