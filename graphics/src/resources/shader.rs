//! Shader program resource.

use super::{BackendData, ResourceId};

/// A shader program described by its stage sources.
///
/// The sources are borrowed by the processor when the backend builds the
/// program; a build failure leaves the shader unloaded.
pub struct RenderShader {
    id: ResourceId,
    name: String,
    vertex_source: String,
    fragment_source: String,
    backend_data: BackendData,
}

impl RenderShader {
    /// Create a new, unloaded shader.
    pub fn new(
        name: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            id: ResourceId::next(),
            name: name.into(),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
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

    /// Vertex stage source.
    pub fn vertex_source(&self) -> &str {
        &self.vertex_source
    }

    /// Fragment stage source.
    pub fn fragment_source(&self) -> &str {
        &self.fragment_source
    }

    /// Returns true if a backend program is attached.
    pub fn is_loaded(&self) -> bool {
        self.backend_data.is_set()
    }

    pub(crate) fn backend_data(&self) -> &BackendData {
        &self.backend_data
    }
}

impl std::fmt::Debug for RenderShader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderShader")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

static_assertions::assert_impl_all!(RenderShader: Send, Sync);
