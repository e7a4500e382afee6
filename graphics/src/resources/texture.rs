//! Texture resource.

use crate::types::{Resolution, TextureDescriptor, TextureFormat};

use super::{BackendData, ResourceId};

/// A texture described by its descriptor.
///
/// Pixel data is not retained here; it travels with the load command as
/// one-shot staging data.
pub struct RenderTexture {
    id: ResourceId,
    name: String,
    descriptor: TextureDescriptor,
    backend_data: BackendData,
}

impl RenderTexture {
    /// Create a new, unloaded texture.
    pub fn new(name: impl Into<String>, descriptor: TextureDescriptor) -> Self {
        Self {
            id: ResourceId::next(),
            name: name.into(),
            descriptor,
            backend_data: BackendData::new(),
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the texture descriptor.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// Get the texture size.
    pub fn dimensions(&self) -> Resolution {
        self.descriptor.dimensions
    }

    /// Get the texture format.
    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    /// Returns true if a backend texture is attached.
    pub fn is_loaded(&self) -> bool {
        self.backend_data.is_set()
    }

    pub(crate) fn backend_data(&self) -> &BackendData {
        &self.backend_data
    }
}

impl std::fmt::Debug for RenderTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTexture")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("dimensions", &self.descriptor.dimensions)
            .field("format", &self.descriptor.format)
            .finish()
    }
}

static_assertions::assert_impl_all!(RenderTexture: Send, Sync);
