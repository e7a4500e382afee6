//! Per-frame queue of command lists.

use std::sync::Arc;

use crate::resources::RenderDynamicMesh;

use super::{RenderCommandKind, RenderCommandList};

/// The command lists of one frame in execution order, plus the frame's
/// dynamic meshes.
///
/// The buffer keeps the dynamic meshes alive until it is dropped, which
/// happens once the processor has consumed it.
#[derive(Debug, Default)]
pub struct RenderCommandBuffer {
    lists: Vec<RenderCommandList>,
    dynamic_meshes: Vec<Arc<RenderDynamicMesh>>,
}

impl RenderCommandBuffer {
    /// Create an empty buffer owning the frame's dynamic meshes.
    pub fn new(dynamic_meshes: Vec<Arc<RenderDynamicMesh>>) -> Self {
        Self {
            lists: Vec::new(),
            dynamic_meshes,
        }
    }

    /// Queue a list after the ones already queued.
    pub fn push_list(&mut self, list: RenderCommandList) {
        self.lists.push(list);
    }

    /// Queued lists in execution order.
    pub fn lists(&self) -> &[RenderCommandList] {
        &self.lists
    }

    /// Number of queued lists.
    pub fn num_lists(&self) -> usize {
        self.lists.len()
    }

    /// Total number of commands across all lists.
    pub fn num_commands(&self) -> usize {
        self.lists.iter().map(RenderCommandList::len).sum()
    }

    /// Dynamic meshes owned by this frame.
    pub fn dynamic_meshes(&self) -> &[Arc<RenderDynamicMesh>] {
        &self.dynamic_meshes
    }

    /// Kinds of every command in execution order.
    pub fn kinds(&self) -> Vec<RenderCommandKind> {
        self.lists.iter().flat_map(RenderCommandList::kinds).collect()
    }

    pub(crate) fn into_parts(self) -> (Vec<RenderCommandList>, Vec<Arc<RenderDynamicMesh>>) {
        (self.lists, self.dynamic_meshes)
    }
}

static_assertions::assert_impl_all!(RenderCommandBuffer: Send);
