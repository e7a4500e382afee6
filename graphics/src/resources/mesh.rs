//! Static and per-frame mesh resources.

use bytemuck::Pod;
use frameline_core::math::Sphere;

use crate::types::{MeshDescriptor, PolygonType, VertexFormat};

use super::{BackendData, ResourceId};

/// A GPU-resident mesh described by its descriptor.
pub struct RenderMesh {
    id: ResourceId,
    name: String,
    descriptor: MeshDescriptor,
    backend_data: BackendData,
}

impl RenderMesh {
    /// Create a new, unloaded mesh.
    pub fn new(name: impl Into<String>, descriptor: MeshDescriptor) -> Self {
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

    /// Get the mesh descriptor.
    pub fn descriptor(&self) -> &MeshDescriptor {
        &self.descriptor
    }

    /// Local-space bounding sphere.
    pub fn bounding_sphere(&self) -> Sphere {
        self.descriptor.bounding_sphere
    }

    /// Returns true if a backend mesh is attached.
    pub fn is_loaded(&self) -> bool {
        self.backend_data.is_set()
    }

    pub(crate) fn backend_data(&self) -> &BackendData {
        &self.backend_data
    }
}

impl std::fmt::Debug for RenderMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderMesh")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("vertices", &self.descriptor.num_vertices)
            .field("indices", &self.descriptor.num_indices)
            .finish()
    }
}

/// CPU-side geometry valid for a single frame.
///
/// Owned by the snapshot that carries it and kept alive by the frame's
/// command buffer until processing completes.
#[derive(Debug, Clone)]
pub struct RenderDynamicMesh {
    id: ResourceId,
    polygon_type: PolygonType,
    vertex_format: VertexFormat,
    vertex_data: Vec<u8>,
    index_data: Vec<u16>,
}

impl RenderDynamicMesh {
    /// Create a dynamic mesh from raw interleaved vertex bytes.
    ///
    /// # Panics
    ///
    /// Panics if `vertex_data` is not a whole number of vertices.
    pub fn new(
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        vertex_data: Vec<u8>,
        index_data: Vec<u16>,
    ) -> Self {
        let stride = vertex_format.stride() as usize;
        assert!(
            stride > 0 && vertex_data.len() % stride == 0,
            "Dynamic mesh vertex data ({} bytes) is not a multiple of the vertex stride ({})",
            vertex_data.len(),
            stride
        );
        Self {
            id: ResourceId::next(),
            polygon_type,
            vertex_format,
            vertex_data,
            index_data,
        }
    }

    /// Create a dynamic mesh from typed vertices.
    pub fn from_vertices<V: Pod>(
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        vertices: &[V],
        indices: &[u16],
    ) -> Self {
        Self::new(
            polygon_type,
            vertex_format,
            bytemuck::cast_slice(vertices).to_vec(),
            indices.to_vec(),
        )
    }

    /// Unique identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Primitive topology.
    pub fn polygon_type(&self) -> PolygonType {
        self.polygon_type
    }

    /// Vertex layout.
    pub fn vertex_format(&self) -> &VertexFormat {
        &self.vertex_format
    }

    /// Interleaved vertex bytes.
    pub fn vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    /// Index data.
    pub fn index_data(&self) -> &[u16] {
        &self.index_data
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertex_data.len() / self.vertex_format.stride() as usize
    }
}

static_assertions::assert_impl_all!(RenderMesh: Send, Sync);
static_assertions::assert_impl_all!(RenderDynamicMesh: Send, Sync);
