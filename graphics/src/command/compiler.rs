//! Builds the per-frame command buffer from compiled passes.

use std::sync::Arc;

use frameline_core::compute::{Task, TaskContext};

use crate::pass::{CameraRenderPassGroup, RenderPass};
use crate::resources::{RenderDynamicMesh, ResourceId};
use crate::scene::{RenderCamera, RenderObjectMesh};
use crate::types::{Colour, Resolution};

use super::{RenderCommandBuffer, RenderCommandList};

/// Last material and mesh bound while walking one pass.
#[derive(Debug, Default)]
struct StateCache {
    material: Option<ResourceId>,
    mesh: Option<ResourceId>,
}

fn compile_pass_commands(
    camera: Option<&RenderCamera>,
    pass: &RenderPass,
    list: &mut RenderCommandList,
) {
    if let Some(camera) = camera {
        list.add_apply_camera_command(camera);
    }
    list.add_apply_ambient_light_command(pass.ambient_light().colour);

    let mut cache = StateCache::default();
    for object in pass.objects() {
        if cache.material != Some(object.material_id()) {
            cache.material = Some(object.material_id());
            // Binding a material unbinds the mesh on some backends.
            cache.mesh = None;
            list.add_apply_material_command(object.material());
        }

        if cache.mesh != Some(object.mesh_id()) {
            cache.mesh = Some(object.mesh_id());
            match object.mesh() {
                RenderObjectMesh::Static(mesh) => list.add_apply_mesh_command(mesh),
                RenderObjectMesh::Dynamic(mesh) => list.add_apply_dynamic_mesh_command(mesh),
            }
        }

        list.add_render_instance_command(*object.world_matrix());
    }
}

/// Turns compiled passes into a [`RenderCommandBuffer`].
pub struct RenderCommandCompiler;

impl RenderCommandCompiler {
    /// Build the command buffer for one frame.
    ///
    /// Lists are queued as: the pre-render list (if non-empty), a frame-begin
    /// list (`Begin`), one list per non-empty pass, a frame-end list (`End`),
    /// and the post-render list (if non-empty). The first pass list of each
    /// camera group starts with that group's `ApplyCamera`; groups with
    /// nothing to draw emit nothing. Pass lists are built in parallel and
    /// queued in group and pass order.
    pub fn compile(
        ctx: &TaskContext,
        groups: &[CameraRenderPassGroup],
        pre_render_commands: RenderCommandList,
        post_render_commands: RenderCommandList,
        dynamic_meshes: Vec<Arc<RenderDynamicMesh>>,
        resolution: Resolution,
        clear_colour: Colour,
    ) -> RenderCommandBuffer {
        frameline_core::profile_function!();

        let mut buffer = RenderCommandBuffer::new(dynamic_meshes);
        if !pre_render_commands.is_empty() {
            buffer.push_list(pre_render_commands);
        }

        let mut begin = RenderCommandList::new();
        begin.add_begin_command(resolution, clear_colour);
        buffer.push_list(begin);

        let mut jobs: Vec<(Option<&RenderCamera>, &RenderPass)> = Vec::new();
        for group in groups {
            let mut camera = Some(group.camera());
            for pass in group.passes().iter().filter(|pass| !pass.is_empty()) {
                jobs.push((camera.take(), pass));
            }
        }

        let mut pass_lists: Vec<RenderCommandList> =
            jobs.iter().map(|_| RenderCommandList::new()).collect();
        let tasks: Vec<Task<'_>> = jobs
            .iter()
            .zip(pass_lists.iter_mut())
            .map(|(&(camera, pass), list)| {
                Box::new(move |_ctx: &TaskContext| compile_pass_commands(camera, pass, list))
                    as Task<'_>
            })
            .collect();
        ctx.process_child_tasks(tasks);
        for list in pass_lists {
            buffer.push_list(list);
        }

        let mut end = RenderCommandList::new();
        end.add_end_command();
        buffer.push_list(end);

        if !post_render_commands.is_empty() {
            buffer.push_list(post_render_commands);
        }

        log::debug!(
            "Compiled {} commands in {} lists",
            buffer.num_commands(),
            buffer.num_lists()
        );
        buffer
    }
}
