//! Dummy backend for testing and development.
//!
//! This backend doesn't perform any graphics API calls. It records every
//! handler invocation so tests can assert on the exact call sequence, and
//! counts how many native objects have been destroyed.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use frameline_core::math::{Mat4, Vec3};

use crate::error::{GraphicsError, GraphicsResult};
use crate::resources::{
    RenderDynamicMesh, RenderMaterial, RenderMaterialGroup, RenderMesh, RenderShader,
    RenderTexture, ResourceId,
};
use crate::types::{Colour, Resolution};

use super::RenderBackend;

/// Marker that makes a dummy shader build fail.
const SHADER_ERROR_MARKER: &str = "#error";

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateShader(ResourceId),
    DestroyShader(ResourceId),
    CreateTexture(ResourceId),
    DestroyTexture(ResourceId),
    CreateMesh(ResourceId),
    DestroyMesh(ResourceId),
    LoadMaterialGroup(ResourceId),
    UnloadMaterialGroup(ResourceId),
    Begin(Resolution),
    ApplyCamera(Vec3),
    ApplyAmbientLight(Colour),
    ApplyMaterial(ResourceId),
    BindTexture(u32, ResourceId),
    ApplyMesh(ResourceId),
    ApplyDynamicMesh(ResourceId),
    RenderInstance(Mat4),
    End,
}

/// Counts native objects on drop.
#[derive(Debug)]
struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Native shader of the dummy backend.
#[derive(Debug)]
pub struct DummyShader {
    pub id: ResourceId,
    _counter: DropCounter,
}

/// Native texture of the dummy backend.
#[derive(Debug)]
pub struct DummyTexture {
    pub id: ResourceId,
    pub size: usize,
    _counter: DropCounter,
}

/// Native mesh of the dummy backend.
#[derive(Debug)]
pub struct DummyMesh {
    pub id: ResourceId,
    pub num_indices: usize,
    _counter: DropCounter,
}

/// Dummy backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    calls: Vec<BackendCall>,
    destroyed: Arc<AtomicUsize>,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of native objects dropped so far, wherever they were dropped.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn counter(&self) -> DropCounter {
        DropCounter(Arc::clone(&self.destroyed))
    }
}

impl RenderBackend for DummyBackend {
    type Shader = DummyShader;
    type Texture = DummyTexture;
    type Mesh = DummyMesh;

    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn create_shader(&mut self, shader: &RenderShader) -> GraphicsResult<DummyShader> {
        self.calls.push(BackendCall::CreateShader(shader.id()));
        if shader.vertex_source().contains(SHADER_ERROR_MARKER)
            || shader.fragment_source().contains(SHADER_ERROR_MARKER)
        {
            return Err(GraphicsError::ShaderCompileFailed {
                name: shader.name().to_string(),
                log: format!("source contains {}", SHADER_ERROR_MARKER),
            });
        }
        Ok(DummyShader {
            id: shader.id(),
            _counter: self.counter(),
        })
    }

    fn destroy_shader(&mut self, shader: DummyShader) {
        self.calls.push(BackendCall::DestroyShader(shader.id));
    }

    fn create_texture(
        &mut self,
        texture: &RenderTexture,
        pixels: &[u8],
    ) -> GraphicsResult<DummyTexture> {
        self.calls.push(BackendCall::CreateTexture(texture.id()));
        let dimensions = texture.dimensions();
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "texture '{}' has zero size {}x{}",
                texture.name(),
                dimensions.width,
                dimensions.height
            )));
        }
        Ok(DummyTexture {
            id: texture.id(),
            size: pixels.len(),
            _counter: self.counter(),
        })
    }

    fn destroy_texture(&mut self, texture: DummyTexture) {
        self.calls.push(BackendCall::DestroyTexture(texture.id));
    }

    fn create_mesh(
        &mut self,
        mesh: &RenderMesh,
        _vertex_data: &[u8],
        index_data: &[u16],
    ) -> GraphicsResult<DummyMesh> {
        self.calls.push(BackendCall::CreateMesh(mesh.id()));
        Ok(DummyMesh {
            id: mesh.id(),
            num_indices: index_data.len(),
            _counter: self.counter(),
        })
    }

    fn destroy_mesh(&mut self, mesh: DummyMesh) {
        self.calls.push(BackendCall::DestroyMesh(mesh.id));
    }

    fn load_material_group(&mut self, group: &RenderMaterialGroup) {
        self.calls.push(BackendCall::LoadMaterialGroup(group.id()));
    }

    fn unload_material_group(&mut self, group: &RenderMaterialGroup) {
        self.calls.push(BackendCall::UnloadMaterialGroup(group.id()));
    }

    fn begin(&mut self, resolution: Resolution, _clear_colour: Colour) {
        self.calls.push(BackendCall::Begin(resolution));
    }

    fn apply_camera(&mut self, position: &Vec3, _view: &Mat4, _view_projection: &Mat4) {
        self.calls.push(BackendCall::ApplyCamera(*position));
    }

    fn apply_ambient_light(&mut self, colour: Colour) {
        self.calls.push(BackendCall::ApplyAmbientLight(colour));
    }

    fn apply_material(&mut self, material: &RenderMaterial, _shader: &DummyShader) {
        self.calls.push(BackendCall::ApplyMaterial(material.id()));
    }

    fn bind_texture(&mut self, unit: u32, texture: &RenderTexture, _native: &DummyTexture) {
        self.calls.push(BackendCall::BindTexture(unit, texture.id()));
    }

    fn apply_mesh(&mut self, mesh: &RenderMesh, _native: &DummyMesh) {
        self.calls.push(BackendCall::ApplyMesh(mesh.id()));
    }

    fn apply_dynamic_mesh(&mut self, mesh: &RenderDynamicMesh) {
        self.calls.push(BackendCall::ApplyDynamicMesh(mesh.id()));
    }

    fn render_instance(&mut self, world_matrix: &Mat4) {
        self.calls.push(BackendCall::RenderInstance(*world_matrix));
    }

    fn end(&mut self) {
        self.calls.push(BackendCall::End);
    }
}
