//! Scene descriptors handed from the simulation side to the renderer.
//!
//! - [`RenderObject`] - mesh, material group, transform and layer of a drawable
//! - [`RenderCamera`] - camera transform and projection
//! - Ambient, directional and point lights
//! - [`RenderSnapshot`] - the move-only container carrying one frame
//!
//! The scene layer fills a snapshot on its own thread, then moves it to the
//! render thread where each field is claimed exactly once.

mod camera;
mod light;
mod object;
mod snapshot;

pub use camera::RenderCamera;
pub use light::{AmbientRenderLight, DirectionalRenderLight, PointRenderLight};
pub use object::{RenderLayer, RenderObject, RenderObjectMesh};
pub use snapshot::RenderSnapshot;
