//! Mesh layout types and descriptors.

use frameline_core::math::Sphere;

/// Primitive topology used when drawing a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonType {
    /// Independent triangles.
    #[default]
    Triangle,
    /// Triangle strip.
    TriangleStrip,
    /// Independent lines.
    Line,
}

/// Index element format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit unsigned indices.
    #[default]
    Short,
}

impl IndexFormat {
    /// Size of one index in bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Short => 2,
        }
    }
}

/// Semantic of a single vertex element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexElement {
    /// 4 x f32 position.
    Position4,
    /// 3 x f32 normal.
    Normal3,
    /// 2 x f32 texture coordinate.
    Uv2,
    /// 4 x u8 colour.
    Colour4,
    /// 4 x f32 joint weights.
    Weight4,
    /// 4 x u8 joint indices.
    JointIndex4,
}

impl VertexElement {
    /// Size of the element in bytes.
    pub fn size(&self) -> u32 {
        match self {
            Self::Position4 | Self::Weight4 => 16,
            Self::Normal3 => 12,
            Self::Uv2 => 8,
            Self::Colour4 | Self::JointIndex4 => 4,
        }
    }
}

/// Ordered set of vertex elements making up one interleaved vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexFormat {
    elements: Vec<VertexElement>,
}

impl VertexFormat {
    /// Create a vertex format from its elements.
    pub fn new(elements: Vec<VertexElement>) -> Self {
        Self { elements }
    }

    /// Position, normal and texture coordinate.
    pub fn static_mesh() -> Self {
        Self::new(vec![
            VertexElement::Position4,
            VertexElement::Normal3,
            VertexElement::Uv2,
        ])
    }

    /// Position, texture coordinate and colour, as used by sprites.
    pub fn sprite() -> Self {
        Self::new(vec![
            VertexElement::Position4,
            VertexElement::Uv2,
            VertexElement::Colour4,
        ])
    }

    /// The elements of this format.
    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    /// Size of one vertex in bytes.
    pub fn stride(&self) -> u32 {
        self.elements.iter().map(VertexElement::size).sum()
    }
}

impl Default for VertexFormat {
    fn default() -> Self {
        Self::static_mesh()
    }
}

/// Descriptor for a mesh resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDescriptor {
    /// Primitive topology.
    pub polygon_type: PolygonType,
    /// Interleaved vertex layout.
    pub vertex_format: VertexFormat,
    /// Index element format.
    pub index_format: IndexFormat,
    /// Number of vertices.
    pub num_vertices: u32,
    /// Number of indices (0 for non-indexed meshes).
    pub num_indices: u32,
    /// Local-space bounding sphere.
    pub bounding_sphere: Sphere,
}

impl MeshDescriptor {
    /// Create a descriptor for an indexed triangle mesh.
    pub fn new(vertex_format: VertexFormat, num_vertices: u32, num_indices: u32) -> Self {
        Self {
            polygon_type: PolygonType::default(),
            vertex_format,
            index_format: IndexFormat::default(),
            num_vertices,
            num_indices,
            bounding_sphere: Sphere::zero(),
        }
    }

    /// Set the primitive topology.
    pub fn with_polygon_type(mut self, polygon_type: PolygonType) -> Self {
        self.polygon_type = polygon_type;
        self
    }

    /// Set the local-space bounding sphere.
    pub fn with_bounding_sphere(mut self, sphere: Sphere) -> Self {
        self.bounding_sphere = sphere;
        self
    }

    /// Expected size of the vertex staging data in bytes.
    pub fn vertex_data_size(&self) -> usize {
        self.num_vertices as usize * self.vertex_format.stride() as usize
    }

    /// Expected size of the index staging data in bytes.
    pub fn index_data_size(&self) -> usize {
        self.num_indices as usize * self.index_format.size() as usize
    }
}
