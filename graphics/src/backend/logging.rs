//! Backend that logs every call instead of drawing.

use frameline_core::math::{Mat4, Vec3};

use crate::error::{GraphicsError, GraphicsResult};
use crate::resources::{
    RenderDynamicMesh, RenderMaterial, RenderMaterialGroup, RenderMesh, RenderShader,
    RenderTexture, ResourceId,
};
use crate::types::{Colour, Resolution};

use super::RenderBackend;

/// Logs each handler call at trace level and keeps simple frame counters.
#[derive(Debug, Default)]
pub struct LoggingBackend {
    frames: u64,
    draws_this_frame: u32,
    total_draws: u64,
}

impl LoggingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Number of instances drawn across all frames.
    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }
}

impl RenderBackend for LoggingBackend {
    type Shader = ResourceId;
    type Texture = ResourceId;
    type Mesh = ResourceId;

    fn name(&self) -> &'static str {
        "Logging Backend"
    }

    fn create_shader(&mut self, shader: &RenderShader) -> GraphicsResult<ResourceId> {
        log::trace!(
            "LoggingBackend: creating shader '{}' {} ({} + {} bytes)",
            shader.name(),
            shader.id(),
            shader.vertex_source().len(),
            shader.fragment_source().len()
        );
        Ok(shader.id())
    }

    fn destroy_shader(&mut self, shader: ResourceId) {
        log::trace!("LoggingBackend: destroying shader {}", shader);
    }

    fn create_texture(
        &mut self,
        texture: &RenderTexture,
        pixels: &[u8],
    ) -> GraphicsResult<ResourceId> {
        log::trace!(
            "LoggingBackend: creating texture '{}' {} ({}x{}, {} bytes)",
            texture.name(),
            texture.id(),
            texture.dimensions().width,
            texture.dimensions().height,
            pixels.len()
        );
        let dimensions = texture.dimensions();
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "texture '{}' has zero size",
                texture.name()
            )));
        }
        Ok(texture.id())
    }

    fn destroy_texture(&mut self, texture: ResourceId) {
        log::trace!("LoggingBackend: destroying texture {}", texture);
    }

    fn create_mesh(
        &mut self,
        mesh: &RenderMesh,
        vertex_data: &[u8],
        index_data: &[u16],
    ) -> GraphicsResult<ResourceId> {
        log::trace!(
            "LoggingBackend: creating mesh '{}' {} ({} vertex bytes, {} indices)",
            mesh.name(),
            mesh.id(),
            vertex_data.len(),
            index_data.len()
        );
        Ok(mesh.id())
    }

    fn destroy_mesh(&mut self, mesh: ResourceId) {
        log::trace!("LoggingBackend: destroying mesh {}", mesh);
    }

    fn load_material_group(&mut self, group: &RenderMaterialGroup) {
        log::trace!("LoggingBackend: material group '{}' loaded", group.name());
    }

    fn unload_material_group(&mut self, group: &RenderMaterialGroup) {
        log::trace!("LoggingBackend: material group '{}' unloaded", group.name());
    }

    fn begin(&mut self, resolution: Resolution, clear_colour: Colour) {
        self.draws_this_frame = 0;
        log::trace!(
            "LoggingBackend: begin {}x{} clear {:?}",
            resolution.width,
            resolution.height,
            clear_colour.to_array()
        );
    }

    fn apply_camera(&mut self, position: &Vec3, _view: &Mat4, _view_projection: &Mat4) {
        log::trace!(
            "LoggingBackend: camera at ({:.2}, {:.2}, {:.2})",
            position.x,
            position.y,
            position.z
        );
    }

    fn apply_ambient_light(&mut self, colour: Colour) {
        log::trace!("LoggingBackend: ambient {:?}", colour.to_array());
    }

    fn apply_material(&mut self, material: &RenderMaterial, shader: &ResourceId) {
        log::trace!(
            "LoggingBackend: material '{}' with shader {} (flags {:?})",
            material.name(),
            shader,
            material.flags()
        );
    }

    fn bind_texture(&mut self, unit: u32, texture: &RenderTexture, _native: &ResourceId) {
        log::trace!("LoggingBackend: texture '{}' on unit {}", texture.name(), unit);
    }

    fn apply_mesh(&mut self, mesh: &RenderMesh, _native: &ResourceId) {
        log::trace!("LoggingBackend: mesh '{}'", mesh.name());
    }

    fn apply_dynamic_mesh(&mut self, mesh: &RenderDynamicMesh) {
        log::trace!(
            "LoggingBackend: dynamic mesh {} ({} vertices)",
            mesh.id(),
            mesh.num_vertices()
        );
    }

    fn render_instance(&mut self, _world_matrix: &Mat4) {
        self.draws_this_frame += 1;
        self.total_draws += 1;
    }

    fn end(&mut self) {
        self.frames += 1;
        log::trace!(
            "LoggingBackend: end of frame {} ({} draws)",
            self.frames,
            self.draws_this_frame
        );
    }
}
