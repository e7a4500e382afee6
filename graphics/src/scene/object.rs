//! Render Objects: immutable per-frame draw descriptors.

use std::sync::Arc;

use frameline_core::math::{Mat4, Sphere, Vec3, mat4_translation};

use crate::resources::{RenderDynamicMesh, RenderMaterialGroup, RenderMesh, ResourceId};

/// The geometry a Render Object draws.
#[derive(Debug, Clone)]
pub enum RenderObjectMesh {
    /// A resident mesh loaded through the command list.
    Static(Arc<RenderMesh>),
    /// Per-frame geometry owned by the snapshot.
    Dynamic(Arc<RenderDynamicMesh>),
}

impl RenderObjectMesh {
    /// Identifier of the underlying mesh.
    pub fn id(&self) -> ResourceId {
        match self {
            Self::Static(mesh) => mesh.id(),
            Self::Dynamic(mesh) => mesh.id(),
        }
    }

    /// Returns true for per-frame geometry.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

/// Draw group a Render Object belongs to.
///
/// Each layer is drawn with its own camera: standard objects with the scene
/// camera, skybox objects with the scene camera moved to the origin, and UI
/// objects with a pixel-space orthographic camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderLayer {
    #[default]
    Standard,
    Skybox,
    Ui,
}

/// Mesh, material group and transform of one drawable.
///
/// Produced by the scene layer and consumed by value; the render pipeline
/// never mutates it.
#[derive(Debug, Clone)]
pub struct RenderObject {
    material_group: Arc<RenderMaterialGroup>,
    mesh: RenderObjectMesh,
    world_matrix: Mat4,
    bounding_sphere: Sphere,
    layer: RenderLayer,
    priority: i32,
}

impl RenderObject {
    /// Create a Render Object.
    ///
    /// The world-space bounding sphere is derived from the mesh; dynamic
    /// meshes get a zero-radius sphere at the object origin unless one is set
    /// with [`with_bounding_sphere`](Self::with_bounding_sphere).
    pub fn new(
        material_group: Arc<RenderMaterialGroup>,
        mesh: RenderObjectMesh,
        world_matrix: Mat4,
    ) -> Self {
        let bounding_sphere = match &mesh {
            RenderObjectMesh::Static(mesh) => mesh.bounding_sphere().transformed(&world_matrix),
            RenderObjectMesh::Dynamic(_) => Sphere::new(mat4_translation(&world_matrix), 0.0),
        };
        Self {
            material_group,
            mesh,
            world_matrix,
            bounding_sphere,
            layer: RenderLayer::default(),
            priority: 0,
        }
    }

    /// Override the world-space bounding sphere.
    pub fn with_bounding_sphere(mut self, sphere: Sphere) -> Self {
        self.bounding_sphere = sphere;
        self
    }

    /// Move the object to another draw layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Set the draw priority used to order the UI layer.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn material_group(&self) -> &Arc<RenderMaterialGroup> {
        &self.material_group
    }

    pub fn mesh(&self) -> &RenderObjectMesh {
        &self.mesh
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// World-space bounding sphere.
    pub fn bounding_sphere(&self) -> Sphere {
        self.bounding_sphere
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// World-space position of the object origin.
    pub fn position(&self) -> Vec3 {
        mat4_translation(&self.world_matrix)
    }
}
