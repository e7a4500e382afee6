//! Front-end render resources.
//!
//! This module contains the handles shared between the scene side and the
//! render thread:
//! - [`RenderShader`], [`RenderTexture`], [`RenderMesh`] - loadable resources
//!   with an opaque backend slot
//! - [`RenderMaterial`] and [`RenderMaterialGroup`] - per-pass material tables
//! - [`RenderDynamicMesh`] - per-frame CPU geometry
//!
//! Resources are reference-counted with [`Arc`](std::sync::Arc) and can be
//! shared across threads. Backend-native data is attached and detached only
//! by the command processor.

mod backend_data;
mod material;
mod mesh;
mod shader;
mod texture;

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) use backend_data::BackendData;
pub use material::{MaterialFlags, RenderMaterial, RenderMaterialGroup, RenderPassKind};
pub use mesh::{RenderDynamicMesh, RenderMesh};
pub use shader::RenderShader;
pub use texture::RenderTexture;

/// Process-wide unique identifier of a render resource.
///
/// Identifiers are allocated monotonically, so sorting by id orders resources
/// by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u64);

static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

impl ResourceId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        Self(NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value of the identifier.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
