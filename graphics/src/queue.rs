//! Hand-off between the thread producing snapshots and the render thread.
//!
//! - [`ResourceCommandQueue`] collects load and unload requests from any
//!   thread and injects them into the next snapshot's pre and post lists.
//! - [`FrameQueue`] is the bounded queue of compiled command buffers waiting
//!   for the render thread.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::command::{RenderCommand, RenderCommandBuffer, RenderCommandKind, RenderCommandList};
use crate::resources::{RenderMaterialGroup, RenderMesh, RenderShader, RenderTexture};
use crate::scene::RenderSnapshot;

/// Number of compiled frames allowed to wait for the render thread.
pub const DEFAULT_FRAME_QUEUE_CAPACITY: usize = 1;

#[derive(Default)]
struct PendingCommands {
    loads: RenderCommandList,
    unloads: RenderCommandList,
}

/// Pending resource load and unload requests.
///
/// Loads are injected at the end of the snapshot's pre-render list so that
/// resources exist before the frame draws with them; unloads go to the
/// post-render list so that nothing drawn this frame is destroyed early.
#[derive(Default)]
pub struct ResourceCommandQueue {
    pending: Mutex<PendingCommands>,
}

impl ResourceCommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_shader(&self, shader: &Arc<RenderShader>) {
        self.pending.lock().loads.add_load_shader_command(shader);
    }

    /// # Panics
    ///
    /// Panics if `pixels` does not match the texture's descriptor.
    pub fn load_texture(&self, texture: &Arc<RenderTexture>, pixels: Vec<u8>) {
        self.pending
            .lock()
            .loads
            .add_load_texture_command(texture, pixels);
    }

    /// # Panics
    ///
    /// Panics if the staging data does not match the mesh's descriptor.
    pub fn load_mesh(&self, mesh: &Arc<RenderMesh>, vertex_data: Vec<u8>, index_data: Vec<u16>) {
        self.pending
            .lock()
            .loads
            .add_load_mesh_command(mesh, vertex_data, index_data);
    }

    pub fn load_material_group(&self, group: &Arc<RenderMaterialGroup>) {
        self.pending.lock().loads.add_load_material_group_command(group);
    }

    pub fn unload_shader(&self, shader: Arc<RenderShader>) {
        self.pending.lock().unloads.add_unload_shader_command(shader);
    }

    pub fn unload_texture(&self, texture: Arc<RenderTexture>) {
        self.pending.lock().unloads.add_unload_texture_command(texture);
    }

    pub fn unload_mesh(&self, mesh: Arc<RenderMesh>) {
        self.pending.lock().unloads.add_unload_mesh_command(mesh);
    }

    pub fn unload_material_group(&self, group: Arc<RenderMaterialGroup>) {
        self.pending
            .lock()
            .unloads
            .add_unload_material_group_command(group);
    }

    /// Number of requests not yet handed to a snapshot.
    pub fn num_pending(&self) -> usize {
        let pending = self.pending.lock();
        pending.loads.len() + pending.unloads.len()
    }

    /// Move every pending request into `snapshot`.
    pub fn on_render_snapshot(&self, snapshot: &mut RenderSnapshot) {
        let PendingCommands { loads, unloads } = std::mem::take(&mut *self.pending.lock());
        if !loads.is_empty() || !unloads.is_empty() {
            log::debug!(
                "Injecting {} load and {} unload commands into snapshot",
                loads.len(),
                unloads.len()
            );
        }
        snapshot.pre_render_command_list_mut().append(loads);
        snapshot.post_render_command_list_mut().append(unloads);
    }

    /// Take back the resource commands of a buffer that will never be
    /// processed, so that they are issued with the next snapshot instead.
    ///
    /// Recycled commands are queued ahead of requests made since. Frame
    /// commands are dropped.
    pub fn recycle(&self, buffer: RenderCommandBuffer) {
        let (lists, _dynamic_meshes) = buffer.into_parts();
        let mut recycled = PendingCommands::default();
        for command in lists.into_iter().flat_map(RenderCommandList::into_commands) {
            if is_load(&command) {
                recycled.loads.push(command);
            } else if is_unload(&command) {
                recycled.unloads.push(command);
            }
        }
        log::debug!(
            "Recycled {} load and {} unload commands",
            recycled.loads.len(),
            recycled.unloads.len()
        );

        let mut pending = self.pending.lock();
        let newer = std::mem::take(&mut *pending);
        recycled.loads.append(newer.loads);
        recycled.unloads.append(newer.unloads);
        *pending = recycled;
    }
}

fn is_load(command: &RenderCommand) -> bool {
    matches!(
        command.kind(),
        RenderCommandKind::LoadShader
            | RenderCommandKind::LoadTexture
            | RenderCommandKind::LoadMesh
            | RenderCommandKind::LoadMaterialGroup
    )
}

fn is_unload(command: &RenderCommand) -> bool {
    matches!(
        command.kind(),
        RenderCommandKind::UnloadShader
            | RenderCommandKind::UnloadTexture
            | RenderCommandKind::UnloadMesh
            | RenderCommandKind::UnloadMaterialGroup
    )
}

struct FrameQueueState {
    buffers: VecDeque<RenderCommandBuffer>,
    discarding: bool,
    closed: bool,
}

/// Bounded, blocking queue of compiled frames.
///
/// The producer blocks in [`push`](Self::push) while the queue is full and
/// the render thread blocks in [`pop`](Self::pop) while it is empty. While
/// suspended, pushed buffers are handed straight back to the producer.
pub struct FrameQueue {
    state: Mutex<FrameQueueState>,
    condition: Condvar,
    capacity: usize,
}

impl FrameQueue {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "frame queue capacity must be non-zero");
        Self {
            state: Mutex::new(FrameQueueState {
                buffers: VecDeque::with_capacity(capacity),
                discarding: false,
                closed: false,
            }),
            condition: Condvar::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queue a frame, waiting for space.
    ///
    /// Returns the buffer back if the queue is suspended or closed; the
    /// caller should hand it to [`ResourceCommandQueue::recycle`].
    pub fn push(&self, buffer: RenderCommandBuffer) -> Result<(), RenderCommandBuffer> {
        frameline_core::profile_function!();

        let mut state = self.state.lock();
        while state.buffers.len() >= self.capacity && !state.discarding && !state.closed {
            self.condition.wait(&mut state);
        }
        if state.discarding || state.closed {
            return Err(buffer);
        }
        state.buffers.push_back(buffer);
        self.condition.notify_all();
        Ok(())
    }

    /// Take the oldest frame, waiting for one to arrive.
    ///
    /// Returns `None` once the queue is closed and drained.
    pub fn pop(&self) -> Option<RenderCommandBuffer> {
        frameline_core::profile_function!();

        let mut state = self.state.lock();
        while state.buffers.is_empty() && !state.closed {
            self.condition.wait(&mut state);
        }
        let buffer = state.buffers.pop_front();
        self.condition.notify_all();
        buffer
    }

    /// Stop accepting frames and return the ones still queued.
    pub fn suspend(&self) -> Vec<RenderCommandBuffer> {
        let mut state = self.state.lock();
        state.discarding = true;
        let drained: Vec<_> = state.buffers.drain(..).collect();
        log::debug!("Frame queue suspended, discarding {} frames", drained.len());
        self.condition.notify_all();
        drained
    }

    /// Accept frames again after [`suspend`](Self::suspend).
    pub fn resume(&self) {
        self.state.lock().discarding = false;
        log::debug!("Frame queue resumed");
    }

    /// Wake every waiter and refuse further frames. Frames already queued can
    /// still be popped.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.condition.notify_all();
    }
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_QUEUE_CAPACITY)
    }
}

static_assertions::assert_impl_all!(ResourceCommandQueue: Send, Sync);
static_assertions::assert_impl_all!(FrameQueue: Send, Sync);
