//! Frame orchestration: snapshot in, command buffer out.

use frameline_core::compute::TaskPool;

use crate::command::{RenderCommandBuffer, RenderCommandCompiler};
use crate::config::RendererConfig;
use crate::error::GraphicsResult;
use crate::pass::{AcceptAll, RenderFrame, VisibilityPredicate, compile_camera_render_passes};
use crate::scene::RenderSnapshot;
use crate::types::Resolution;

/// Turns render snapshots into command buffers on the producer side.
///
/// A `Renderer` never touches the backend; the buffers it returns are handed
/// to a [`RenderCommandProcessor`](crate::processor::RenderCommandProcessor)
/// on the render thread.
#[derive(Debug)]
pub struct Renderer {
    config: RendererConfig,
    pool: TaskPool,
    frame_index: u64,
}

impl Renderer {
    /// Create a renderer, validating `config`.
    pub fn new(config: RendererConfig) -> GraphicsResult<Self> {
        config.validate()?;
        let pool = match config.worker_threads {
            Some(threads) => TaskPool::new(threads),
            None => TaskPool::default_threads(),
        };
        log::info!(
            "Renderer created with {} worker threads, visibility batch {}",
            pool.num_threads(),
            config.visibility_batch_size
        );
        Ok(Self {
            config,
            pool,
            frame_index: 0,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Number of snapshots rendered so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// A new snapshot cleared with the configured colour.
    pub fn new_snapshot(&self, resolution: Resolution) -> RenderSnapshot {
        RenderSnapshot::new(resolution, self.config.clear_colour)
    }

    /// Compile `snapshot` with every object considered visible.
    pub fn render_snapshot(&mut self, snapshot: RenderSnapshot) -> RenderCommandBuffer {
        self.render_snapshot_with_predicate(snapshot, &AcceptAll)
    }

    /// Compile `snapshot`, culling pass objects with `predicate`.
    ///
    /// Every snapshot field is claimed exactly once; the snapshot is dropped
    /// on return.
    pub fn render_snapshot_with_predicate<P>(
        &mut self,
        mut snapshot: RenderSnapshot,
        predicate: &P,
    ) -> RenderCommandBuffer
    where
        P: VisibilityPredicate + ?Sized,
    {
        frameline_core::profile_function!();

        let ctx = self.pool.context();
        let frame = RenderFrame::claim(&mut snapshot);
        let dynamic_meshes = snapshot.claim_render_dynamic_meshes();
        let pre_render_commands = snapshot.claim_pre_render_command_list();
        let post_render_commands = snapshot.claim_post_render_command_list();
        debug_assert!(snapshot.is_fully_claimed());

        let groups = {
            frameline_core::profile_scope!("compile_camera_render_passes");
            compile_camera_render_passes(&ctx, &frame, predicate, self.config.visibility_batch_size)
        };

        let buffer = {
            frameline_core::profile_scope!("compile_render_commands");
            RenderCommandCompiler::compile(
                &ctx,
                &groups,
                pre_render_commands,
                post_render_commands,
                dynamic_meshes,
                frame.resolution,
                frame.clear_colour,
            )
        };

        log::debug!(
            "Frame {}: {} objects, {} passes, {} lists, {} commands",
            self.frame_index,
            frame.objects.len(),
            groups
                .iter()
                .flat_map(|group| group.passes())
                .filter(|pass| !pass.is_empty())
                .count(),
            buffer.num_lists(),
            buffer.num_commands()
        );
        frameline_core::profile_plot!("render_commands", buffer.num_commands());
        self.frame_index += 1;
        frameline_core::frame_mark!();
        buffer
    }
}
