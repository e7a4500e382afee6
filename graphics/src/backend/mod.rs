//! Graphics backend abstraction.
//!
//! A [`RenderBackend`] is the explicit context object the command processor
//! replays commands against. All graphics API calls are confined to backend
//! handlers; nothing else in the crate talks to the graphics API.
//!
//! # Available Backends
//!
//! - [`DummyBackend`]: records every call, for tests
//! - [`LoggingBackend`]: logs every call at trace level, for headless runs
//!
//! # Resource ownership
//!
//! `create_*` returns a backend-native object which the processor attaches to
//! the front-end resource. The processor hands it back to `destroy_*` when it
//! runs the matching unload. A native object still attached when its
//! front-end resource dies is dropped with it.

mod dummy;
mod logging;

use frameline_core::math::{Mat4, Vec3};

use crate::error::GraphicsResult;
use crate::resources::{
    RenderDynamicMesh, RenderMaterial, RenderMaterialGroup, RenderMesh, RenderShader,
    RenderTexture,
};
use crate::types::{Colour, Resolution};

pub use dummy::{BackendCall, DummyBackend, DummyMesh, DummyShader, DummyTexture};
pub use logging::LoggingBackend;

/// Handlers the command processor dispatches to.
pub trait RenderBackend {
    /// Backend-native shader program.
    type Shader: Send + Sync + 'static;
    /// Backend-native texture.
    type Texture: Send + Sync + 'static;
    /// Backend-native mesh.
    type Mesh: Send + Sync + 'static;

    /// Get the backend name.
    fn name(&self) -> &'static str;

    // Resources

    fn create_shader(&mut self, shader: &RenderShader) -> GraphicsResult<Self::Shader>;
    fn destroy_shader(&mut self, shader: Self::Shader);

    fn create_texture(
        &mut self,
        texture: &RenderTexture,
        pixels: &[u8],
    ) -> GraphicsResult<Self::Texture>;
    fn destroy_texture(&mut self, texture: Self::Texture);

    fn create_mesh(
        &mut self,
        mesh: &RenderMesh,
        vertex_data: &[u8],
        index_data: &[u16],
    ) -> GraphicsResult<Self::Mesh>;
    fn destroy_mesh(&mut self, mesh: Self::Mesh);

    /// Prepare group-level state. Backends without any do nothing.
    fn load_material_group(&mut self, _group: &RenderMaterialGroup) {}

    /// Release group-level state. Backends without any do nothing.
    fn unload_material_group(&mut self, _group: &RenderMaterialGroup) {}

    // Frame

    fn begin(&mut self, resolution: Resolution, clear_colour: Colour);
    fn apply_camera(&mut self, position: &Vec3, view: &Mat4, view_projection: &Mat4);
    fn apply_ambient_light(&mut self, colour: Colour);
    fn apply_material(&mut self, material: &RenderMaterial, shader: &Self::Shader);
    fn bind_texture(&mut self, unit: u32, texture: &RenderTexture, native: &Self::Texture);
    fn apply_mesh(&mut self, mesh: &RenderMesh, native: &Self::Mesh);
    fn apply_dynamic_mesh(&mut self, mesh: &RenderDynamicMesh);
    /// Draw the bound mesh with the bound material.
    fn render_instance(&mut self, world_matrix: &Mat4);
    fn end(&mut self);
}
