//! Render commands and the structures that carry them to the processor.
//!
//! - [`RenderCommand`] - the closed set of commands understood by the
//!   processor
//! - [`RenderCommandList`] - an ordered, append-only command sequence
//! - [`RenderCommandBuffer`] - the per-frame queue of lists
//! - [`RenderCommandCompiler`] - turns compiled passes into a buffer

mod buffer;
mod compiler;
mod list;

use std::sync::Arc;

use frameline_core::math::{Mat4, Vec3};

use crate::resources::{
    RenderDynamicMesh, RenderMaterial, RenderMaterialGroup, RenderMesh, RenderShader,
    RenderTexture,
};
use crate::types::{Colour, Resolution};

pub use buffer::RenderCommandBuffer;
pub use compiler::RenderCommandCompiler;
pub use list::{OrderedCommand, RenderCommandList};

/// Discriminant of a [`RenderCommand`].
///
/// Stored as a raw `u8` tag in the ordered view of a command list and decoded
/// by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderCommandKind {
    LoadShader = 0,
    LoadTexture = 1,
    LoadMesh = 2,
    LoadMaterialGroup = 3,
    UnloadShader = 4,
    UnloadTexture = 5,
    UnloadMesh = 6,
    UnloadMaterialGroup = 7,
    Begin = 8,
    ApplyCamera = 9,
    ApplyAmbientLight = 10,
    ApplyMaterial = 11,
    ApplyMesh = 12,
    ApplyDynamicMesh = 13,
    RenderInstance = 14,
    End = 15,
}

impl RenderCommandKind {
    /// Number of command kinds.
    pub const COUNT: usize = 16;

    /// Decode a raw tag. Returns `None` for tags outside the command set.
    pub fn from_raw(tag: u8) -> Option<Self> {
        let kind = match tag {
            0 => Self::LoadShader,
            1 => Self::LoadTexture,
            2 => Self::LoadMesh,
            3 => Self::LoadMaterialGroup,
            4 => Self::UnloadShader,
            5 => Self::UnloadTexture,
            6 => Self::UnloadMesh,
            7 => Self::UnloadMaterialGroup,
            8 => Self::Begin,
            9 => Self::ApplyCamera,
            10 => Self::ApplyAmbientLight,
            11 => Self::ApplyMaterial,
            12 => Self::ApplyMesh,
            13 => Self::ApplyDynamicMesh,
            14 => Self::RenderInstance,
            15 => Self::End,
            _ => return None,
        };
        Some(kind)
    }

    /// Raw tag of this kind.
    pub fn raw(self) -> u8 {
        self as u8
    }
}

/// One backend operation.
///
/// Load commands carry one-shot staging data by value. Unload commands own a
/// reference to the resource being destroyed, so it stays alive until the
/// processor runs the unload or the list is dropped unprocessed.
#[derive(Debug)]
pub enum RenderCommand {
    LoadShader {
        shader: Arc<RenderShader>,
    },
    LoadTexture {
        texture: Arc<RenderTexture>,
        pixels: Vec<u8>,
    },
    LoadMesh {
        mesh: Arc<RenderMesh>,
        vertex_data: Vec<u8>,
        index_data: Vec<u16>,
    },
    LoadMaterialGroup {
        group: Arc<RenderMaterialGroup>,
    },
    UnloadShader {
        shader: Arc<RenderShader>,
    },
    UnloadTexture {
        texture: Arc<RenderTexture>,
    },
    UnloadMesh {
        mesh: Arc<RenderMesh>,
    },
    UnloadMaterialGroup {
        group: Arc<RenderMaterialGroup>,
    },
    Begin {
        resolution: Resolution,
        clear_colour: Colour,
    },
    ApplyCamera {
        position: Vec3,
        view: Mat4,
        view_projection: Mat4,
    },
    ApplyAmbientLight {
        colour: Colour,
    },
    ApplyMaterial {
        material: Arc<RenderMaterial>,
    },
    ApplyMesh {
        mesh: Arc<RenderMesh>,
    },
    ApplyDynamicMesh {
        mesh: Arc<RenderDynamicMesh>,
    },
    RenderInstance {
        world_matrix: Mat4,
    },
    End,
}

impl RenderCommand {
    /// Discriminant of this command.
    pub fn kind(&self) -> RenderCommandKind {
        match self {
            Self::LoadShader { .. } => RenderCommandKind::LoadShader,
            Self::LoadTexture { .. } => RenderCommandKind::LoadTexture,
            Self::LoadMesh { .. } => RenderCommandKind::LoadMesh,
            Self::LoadMaterialGroup { .. } => RenderCommandKind::LoadMaterialGroup,
            Self::UnloadShader { .. } => RenderCommandKind::UnloadShader,
            Self::UnloadTexture { .. } => RenderCommandKind::UnloadTexture,
            Self::UnloadMesh { .. } => RenderCommandKind::UnloadMesh,
            Self::UnloadMaterialGroup { .. } => RenderCommandKind::UnloadMaterialGroup,
            Self::Begin { .. } => RenderCommandKind::Begin,
            Self::ApplyCamera { .. } => RenderCommandKind::ApplyCamera,
            Self::ApplyAmbientLight { .. } => RenderCommandKind::ApplyAmbientLight,
            Self::ApplyMaterial { .. } => RenderCommandKind::ApplyMaterial,
            Self::ApplyMesh { .. } => RenderCommandKind::ApplyMesh,
            Self::ApplyDynamicMesh { .. } => RenderCommandKind::ApplyDynamicMesh,
            Self::RenderInstance { .. } => RenderCommandKind::RenderInstance,
            Self::End => RenderCommandKind::End,
        }
    }
}
