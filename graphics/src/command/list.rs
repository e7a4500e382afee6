//! Ordered, append-only command sequence.

use std::sync::Arc;

use frameline_core::math::Mat4;

use crate::resources::{
    RenderDynamicMesh, RenderMaterial, RenderMaterialGroup, RenderMesh, RenderShader,
    RenderTexture,
};
use crate::scene::RenderCamera;
use crate::types::{Colour, Resolution};

use super::{RenderCommand, RenderCommandKind};

/// Type-erased entry of the ordered view: the raw kind tag and the position
/// of the command in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedCommand {
    tag: u8,
    index: u32,
}

impl OrderedCommand {
    /// Raw command kind tag.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Position of the command in the owning pool.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// An ordered sequence of render commands.
///
/// Commands are owned by one pool and exposed through an insertion-ordered
/// view. The view is never reordered or deduplicated. A list is built by a
/// single thread; separate lists may be built concurrently and queued in a
/// [`RenderCommandBuffer`](super::RenderCommandBuffer).
#[derive(Default)]
pub struct RenderCommandList {
    pool: Vec<RenderCommand>,
    ordered: Vec<OrderedCommand>,
}

impl RenderCommandList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of commands added so far.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if no command has been added.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// The insertion-ordered view.
    pub fn ordered(&self) -> &[OrderedCommand] {
        &self.ordered
    }

    /// Resolve an ordered entry to its command.
    ///
    /// # Panics
    ///
    /// Panics if the entry does not belong to this list.
    pub fn command(&self, entry: &OrderedCommand) -> &RenderCommand {
        match self.pool.get(entry.index()) {
            Some(command) => command,
            None => panic!(
                "Ordered command index {} out of range for a pool of {}",
                entry.index(),
                self.pool.len()
            ),
        }
    }

    /// Commands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderCommand> + '_ {
        self.ordered.iter().map(|entry| self.command(entry))
    }

    /// Kinds of the commands in insertion order.
    pub fn kinds(&self) -> Vec<RenderCommandKind> {
        self.iter().map(RenderCommand::kind).collect()
    }

    /// Move every command of `other` to the end of this list, keeping their
    /// order.
    pub fn append(&mut self, other: RenderCommandList) {
        for command in other.into_commands() {
            self.push(command);
        }
    }

    /// Commands by value, in insertion order.
    pub(crate) fn into_commands(self) -> Vec<RenderCommand> {
        self.pool
    }

    pub(crate) fn push(&mut self, command: RenderCommand) {
        let index = self.pool.len() as u32;
        self.ordered.push(OrderedCommand {
            tag: command.kind().raw(),
            index,
        });
        self.pool.push(command);
    }

    // ------------------------------------------------------------------------
    // Resource commands
    // ------------------------------------------------------------------------

    /// Build a backend program from the shader's sources.
    pub fn add_load_shader_command(&mut self, shader: &Arc<RenderShader>) {
        self.push(RenderCommand::LoadShader {
            shader: Arc::clone(shader),
        });
    }

    /// Upload a texture. `pixels` is moved in as one-shot staging data.
    ///
    /// # Panics
    ///
    /// Panics if the data size does not match the texture descriptor.
    pub fn add_load_texture_command(&mut self, texture: &Arc<RenderTexture>, pixels: Vec<u8>) {
        assert_eq!(
            pixels.len(),
            texture.descriptor().data_size(),
            "Texture '{}' staging data does not match its descriptor",
            texture.name()
        );
        self.push(RenderCommand::LoadTexture {
            texture: Arc::clone(texture),
            pixels,
        });
    }

    /// Upload a mesh. Vertex and index data are moved in as staging data.
    ///
    /// # Panics
    ///
    /// Panics if the data sizes do not match the mesh descriptor.
    pub fn add_load_mesh_command(
        &mut self,
        mesh: &Arc<RenderMesh>,
        vertex_data: Vec<u8>,
        index_data: Vec<u16>,
    ) {
        let descriptor = mesh.descriptor();
        assert!(
            vertex_data.len() == descriptor.vertex_data_size()
                && index_data.len() == descriptor.num_indices as usize,
            "Mesh '{}' staging data does not match its descriptor",
            mesh.name()
        );
        self.push(RenderCommand::LoadMesh {
            mesh: Arc::clone(mesh),
            vertex_data,
            index_data,
        });
    }

    pub fn add_load_material_group_command(&mut self, group: &Arc<RenderMaterialGroup>) {
        self.push(RenderCommand::LoadMaterialGroup {
            group: Arc::clone(group),
        });
    }

    /// Destroy the shader's backend program. Takes the caller's handle.
    pub fn add_unload_shader_command(&mut self, shader: Arc<RenderShader>) {
        self.push(RenderCommand::UnloadShader { shader });
    }

    /// Destroy the texture's backend object. Takes the caller's handle.
    pub fn add_unload_texture_command(&mut self, texture: Arc<RenderTexture>) {
        self.push(RenderCommand::UnloadTexture { texture });
    }

    /// Destroy the mesh's backend object. Takes the caller's handle.
    pub fn add_unload_mesh_command(&mut self, mesh: Arc<RenderMesh>) {
        self.push(RenderCommand::UnloadMesh { mesh });
    }

    pub fn add_unload_material_group_command(&mut self, group: Arc<RenderMaterialGroup>) {
        self.push(RenderCommand::UnloadMaterialGroup { group });
    }

    // ------------------------------------------------------------------------
    // Frame commands
    // ------------------------------------------------------------------------

    pub fn add_begin_command(&mut self, resolution: Resolution, clear_colour: Colour) {
        self.push(RenderCommand::Begin {
            resolution,
            clear_colour,
        });
    }

    /// Bind the camera's position, view and view-projection matrices.
    pub fn add_apply_camera_command(&mut self, camera: &RenderCamera) {
        self.push(RenderCommand::ApplyCamera {
            position: camera.position(),
            view: camera.view_matrix(),
            view_projection: camera.view_projection_matrix(),
        });
    }

    pub fn add_apply_ambient_light_command(&mut self, colour: Colour) {
        self.push(RenderCommand::ApplyAmbientLight { colour });
    }

    pub fn add_apply_material_command(&mut self, material: &Arc<RenderMaterial>) {
        self.push(RenderCommand::ApplyMaterial {
            material: Arc::clone(material),
        });
    }

    pub fn add_apply_mesh_command(&mut self, mesh: &Arc<RenderMesh>) {
        self.push(RenderCommand::ApplyMesh {
            mesh: Arc::clone(mesh),
        });
    }

    pub fn add_apply_dynamic_mesh_command(&mut self, mesh: &Arc<RenderDynamicMesh>) {
        self.push(RenderCommand::ApplyDynamicMesh {
            mesh: Arc::clone(mesh),
        });
    }

    /// Draw the bound mesh with the bound material.
    pub fn add_render_instance_command(&mut self, world_matrix: Mat4) {
        self.push(RenderCommand::RenderInstance { world_matrix });
    }

    pub fn add_end_command(&mut self) {
        self.push(RenderCommand::End);
    }

    /// Overwrite the tag of an ordered entry.
    #[cfg(test)]
    pub(crate) fn overwrite_kind_tag(&mut self, position: usize, tag: u8) {
        self.ordered[position].tag = tag;
    }
}

impl std::fmt::Debug for RenderCommandList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCommandList")
            .field("len", &self.len())
            .field("kinds", &self.kinds())
            .finish()
    }
}

static_assertions::assert_impl_all!(RenderCommandList: Send);
