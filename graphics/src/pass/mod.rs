//! Render pass compilation.
//!
//! Turns the Render Objects of a frame into immutable, sorted, per-pass draw
//! lists:
//!
//! 1. **Filter** - resolve each object to the material it uses for a pass,
//!    dropping objects that opt out of the pass
//! 2. **Cull** - test objects against a visibility predicate in parallel
//!    batches
//! 3. **Sort** - apply a total order, which is what makes the output
//!    deterministic
//!
//! Passes are grouped by the camera they are drawn with; see
//! [`compile_camera_render_passes`] for the full forward layout.

pub mod sort;
mod utils;
mod visibility;

use std::sync::Arc;

use frameline_core::math::{Mat4, Sphere, Vec3, mat4_translation};

use crate::resources::{RenderMaterial, ResourceId};
use crate::scene::{AmbientRenderLight, RenderCamera, RenderObject, RenderObjectMesh};

pub use utils::{
    RenderFrame, compile_camera_render_passes, compile_render_pass,
    compile_render_pass_with_batch_size, get_base_render_pass_objects,
    get_directional_light_render_pass_objects, get_layer_render_pass_objects,
    get_point_light_render_pass_objects, get_render_pass_objects,
    get_skybox_render_pass_objects, get_transparent_render_pass_objects,
    get_ui_render_pass_objects,
};
pub use visibility::{
    AcceptAll, DEFAULT_VISIBILITY_BATCH_SIZE, VisibilityPredicate, calculate_visible_objects,
    calculate_visible_objects_with_batch_size,
};

/// A Render Object resolved to the material it uses in one pass.
#[derive(Debug, Clone)]
pub struct RenderPassObject {
    material: Arc<RenderMaterial>,
    mesh: RenderObjectMesh,
    world_matrix: Mat4,
    bounding_sphere: Sphere,
    priority: i32,
    source_index: u32,
}

impl RenderPassObject {
    /// Resolve `object` to `material`. `source_index` is the position of the
    /// object in the frame's object list.
    pub fn new(object: &RenderObject, material: Arc<RenderMaterial>, source_index: u32) -> Self {
        Self {
            material,
            mesh: object.mesh().clone(),
            world_matrix: *object.world_matrix(),
            bounding_sphere: object.bounding_sphere(),
            priority: object.priority(),
            source_index,
        }
    }

    pub fn material(&self) -> &Arc<RenderMaterial> {
        &self.material
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

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Position of the originating object in the frame's object list.
    ///
    /// Used as the final tie-breaker when sorting.
    pub fn source_index(&self) -> u32 {
        self.source_index
    }

    /// Material identifier.
    pub fn material_id(&self) -> ResourceId {
        self.material.id()
    }

    /// Mesh identifier.
    pub fn mesh_id(&self) -> ResourceId {
        self.mesh.id()
    }

    /// World-space position of the object origin.
    pub fn position(&self) -> Vec3 {
        mat4_translation(&self.world_matrix)
    }
}

/// One ambient light plus a sorted list of visible objects.
#[derive(Debug, Clone, Default)]
pub struct RenderPass {
    ambient_light: AmbientRenderLight,
    objects: Vec<RenderPassObject>,
}

impl RenderPass {
    /// Create a pass from already sorted objects.
    pub fn new(ambient_light: AmbientRenderLight, objects: Vec<RenderPassObject>) -> Self {
        Self {
            ambient_light,
            objects,
        }
    }

    pub fn ambient_light(&self) -> &AmbientRenderLight {
        &self.ambient_light
    }

    /// Objects in draw order.
    pub fn objects(&self) -> &[RenderPassObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Passes drawn one after another with the same camera.
#[derive(Debug, Clone, Default)]
pub struct CameraRenderPassGroup {
    camera: RenderCamera,
    passes: Vec<RenderPass>,
}

impl CameraRenderPassGroup {
    pub fn new(camera: RenderCamera, passes: Vec<RenderPass>) -> Self {
        Self { camera, passes }
    }

    pub fn camera(&self) -> &RenderCamera {
        &self.camera
    }

    /// Passes in draw order. Some may be empty.
    pub fn passes(&self) -> &[RenderPass] {
        &self.passes
    }

    /// Returns true if no pass of the group has anything to draw.
    pub fn is_empty(&self) -> bool {
        self.passes.iter().all(RenderPass::is_empty)
    }
}
