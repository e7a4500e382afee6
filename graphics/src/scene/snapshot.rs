//! Per-frame, move-only bridge between the scene and the render thread.
//!
//! The scene layer populates a [`RenderSnapshot`] on the producer thread,
//! moves it to the render thread, and the pipeline claims every field exactly
//! once. Claiming a field twice means a pipeline stage ran twice or out of
//! order and is treated as a fatal contract violation.

use std::sync::Arc;

use crate::command::RenderCommandList;
use crate::resources::RenderDynamicMesh;
use crate::types::{Colour, Resolution};

use super::{
    AmbientRenderLight, DirectionalRenderLight, PointRenderLight, RenderCamera, RenderObject,
};

/// A value that can be moved out exactly once.
struct Claimable<T> {
    field: &'static str,
    value: T,
    claimed: bool,
}

impl<T: Default> Claimable<T> {
    fn new(field: &'static str) -> Self {
        Self {
            field,
            value: T::default(),
            claimed: false,
        }
    }

    fn get_mut(&mut self) -> &mut T {
        if self.claimed {
            log::error!("RenderSnapshot field '{}' modified after claim", self.field);
            panic!(
                "RenderSnapshot field '{}' cannot be modified after it has been claimed",
                self.field
            );
        }
        &mut self.value
    }

    fn claim(&mut self) -> T {
        if self.claimed {
            log::error!("RenderSnapshot field '{}' claimed twice", self.field);
            panic!(
                "RenderSnapshot field '{}' has already been claimed",
                self.field
            );
        }
        self.claimed = true;
        std::mem::take(&mut self.value)
    }
}

/// Everything the renderer needs to draw one frame.
///
/// # Example
///
/// ```ignore
/// let mut snapshot = RenderSnapshot::new(Resolution::new(1280, 720), Colour::BLACK);
/// snapshot.set_render_camera(camera);
/// snapshot.add_render_object(object);
///
/// // Hand the snapshot to the render thread by move.
/// let buffer = renderer.render_snapshot(snapshot);
/// ```
pub struct RenderSnapshot {
    resolution: Resolution,
    clear_colour: Colour,
    camera: Claimable<RenderCamera>,
    ambient_lights: Claimable<Vec<AmbientRenderLight>>,
    directional_lights: Claimable<Vec<DirectionalRenderLight>>,
    point_lights: Claimable<Vec<PointRenderLight>>,
    objects: Claimable<Vec<RenderObject>>,
    dynamic_meshes: Claimable<Vec<Arc<RenderDynamicMesh>>>,
    pre_render_commands: Claimable<RenderCommandList>,
    post_render_commands: Claimable<RenderCommandList>,
}

impl RenderSnapshot {
    /// Create an empty snapshot.
    pub fn new(resolution: Resolution, clear_colour: Colour) -> Self {
        Self {
            resolution,
            clear_colour,
            camera: Claimable::new("camera"),
            ambient_lights: Claimable::new("ambient_lights"),
            directional_lights: Claimable::new("directional_lights"),
            point_lights: Claimable::new("point_lights"),
            objects: Claimable::new("render_objects"),
            dynamic_meshes: Claimable::new("dynamic_meshes"),
            pre_render_commands: Claimable::new("pre_render_command_list"),
            post_render_commands: Claimable::new("post_render_command_list"),
        }
    }

    /// Viewport resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Colour the frame is cleared to.
    pub fn clear_colour(&self) -> Colour {
        self.clear_colour
    }

    // ------------------------------------------------------------------------
    // Population
    // ------------------------------------------------------------------------

    /// Set the camera the frame is drawn from.
    pub fn set_render_camera(&mut self, camera: RenderCamera) {
        *self.camera.get_mut() = camera;
    }

    pub fn add_render_ambient_light(&mut self, light: AmbientRenderLight) {
        self.ambient_lights.get_mut().push(light);
    }

    pub fn add_render_directional_light(&mut self, light: DirectionalRenderLight) {
        self.directional_lights.get_mut().push(light);
    }

    pub fn add_render_point_light(&mut self, light: PointRenderLight) {
        self.point_lights.get_mut().push(light);
    }

    pub fn add_render_object(&mut self, object: RenderObject) {
        self.objects.get_mut().push(object);
    }

    /// Take ownership of per-frame geometry.
    ///
    /// The returned handle is what Render Objects reference. The mesh stays
    /// alive until the frame's command buffer has been processed.
    pub fn add_render_dynamic_mesh(&mut self, mesh: RenderDynamicMesh) -> Arc<RenderDynamicMesh> {
        let mesh = Arc::new(mesh);
        self.dynamic_meshes.get_mut().push(Arc::clone(&mesh));
        mesh
    }

    /// Commands run before the frame, such as resource loads.
    pub fn pre_render_command_list_mut(&mut self) -> &mut RenderCommandList {
        self.pre_render_commands.get_mut()
    }

    /// Commands run after the frame, such as resource unloads.
    pub fn post_render_command_list_mut(&mut self) -> &mut RenderCommandList {
        self.post_render_commands.get_mut()
    }

    // ------------------------------------------------------------------------
    // Claiming
    // ------------------------------------------------------------------------

    /// Move the camera out. Yields the default camera if none was set.
    pub fn claim_render_camera(&mut self) -> RenderCamera {
        self.camera.claim()
    }

    pub fn claim_ambient_render_lights(&mut self) -> Vec<AmbientRenderLight> {
        self.ambient_lights.claim()
    }

    pub fn claim_directional_render_lights(&mut self) -> Vec<DirectionalRenderLight> {
        self.directional_lights.claim()
    }

    pub fn claim_point_render_lights(&mut self) -> Vec<PointRenderLight> {
        self.point_lights.claim()
    }

    pub fn claim_render_objects(&mut self) -> Vec<RenderObject> {
        self.objects.claim()
    }

    pub fn claim_render_dynamic_meshes(&mut self) -> Vec<Arc<RenderDynamicMesh>> {
        self.dynamic_meshes.claim()
    }

    pub fn claim_pre_render_command_list(&mut self) -> RenderCommandList {
        self.pre_render_commands.claim()
    }

    pub fn claim_post_render_command_list(&mut self) -> RenderCommandList {
        self.post_render_commands.claim()
    }

    /// Returns true once every field has been claimed.
    pub fn is_fully_claimed(&self) -> bool {
        self.camera.claimed
            && self.ambient_lights.claimed
            && self.directional_lights.claimed
            && self.point_lights.claimed
            && self.objects.claimed
            && self.dynamic_meshes.claimed
            && self.pre_render_commands.claimed
            && self.post_render_commands.claimed
    }
}

impl std::fmt::Debug for RenderSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSnapshot")
            .field("resolution", &self.resolution)
            .field("clear_colour", &self.clear_colour)
            .field("fully_claimed", &self.is_fully_claimed())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(RenderSnapshot: Send);
static_assertions::assert_not_impl_any!(RenderSnapshot: Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PolygonType, VertexFormat};
    use frameline_core::math::{Mat4, Vec3, mat4_from_translation};

    fn snapshot() -> RenderSnapshot {
        RenderSnapshot::new(Resolution::new(640, 480), Colour::BLACK)
    }

    #[test]
    fn getters_are_repeatable() {
        let snapshot = snapshot();
        assert_eq!(snapshot.resolution(), Resolution::new(640, 480));
        assert_eq!(snapshot.resolution(), Resolution::new(640, 480));
        assert_eq!(snapshot.clear_colour(), Colour::BLACK);
    }

    #[test]
    fn claims_move_values_out() {
        let mut snapshot = snapshot();
        let camera = RenderCamera::new(
            mat4_from_translation(Vec3::new(1.0, 0.0, 0.0)),
            Mat4::identity(),
        );
        snapshot.set_render_camera(camera);
        snapshot.add_render_ambient_light(AmbientRenderLight::new(Colour::WHITE));
        snapshot.pre_render_command_list_mut().add_end_command();

        assert_eq!(snapshot.claim_render_camera(), camera);
        assert_eq!(snapshot.claim_ambient_render_lights().len(), 1);
        assert_eq!(snapshot.claim_pre_render_command_list().len(), 1);
        assert!(!snapshot.is_fully_claimed());
    }

    #[test]
    fn unset_camera_claims_default() {
        let mut snapshot = snapshot();
        assert_eq!(snapshot.claim_render_camera(), RenderCamera::default());
    }

    #[test]
    fn dynamic_mesh_handle_is_shared() {
        let mut snapshot = snapshot();
        let handle = snapshot.add_render_dynamic_mesh(RenderDynamicMesh::new(
            PolygonType::Triangle,
            VertexFormat::static_mesh(),
            vec![0; 36],
            vec![0],
        ));
        let owned = snapshot.claim_render_dynamic_meshes();
        assert_eq!(owned.len(), 1);
        assert!(Arc::ptr_eq(&owned[0], &handle));
    }

    #[test]
    fn every_field_claimed_once() {
        let mut snapshot = snapshot();
        snapshot.claim_render_camera();
        snapshot.claim_ambient_render_lights();
        snapshot.claim_directional_render_lights();
        snapshot.claim_point_render_lights();
        snapshot.claim_render_objects();
        snapshot.claim_render_dynamic_meshes();
        snapshot.claim_pre_render_command_list();
        snapshot.claim_post_render_command_list();
        assert!(snapshot.is_fully_claimed());
    }

    #[test]
    #[should_panic(expected = "'render_objects' has already been claimed")]
    fn double_claim_panics() {
        let mut snapshot = snapshot();
        snapshot.claim_render_objects();
        snapshot.claim_render_objects();
    }

    #[test]
    #[should_panic(expected = "'post_render_command_list' cannot be modified")]
    fn command_list_access_after_claim_panics() {
        let mut snapshot = snapshot();
        snapshot.claim_post_render_command_list();
        snapshot.post_render_command_list_mut();
    }

    #[test]
    #[should_panic(expected = "'point_lights' cannot be modified")]
    fn add_after_claim_panics() {
        let mut snapshot = snapshot();
        snapshot.claim_point_render_lights();
        snapshot.add_render_point_light(PointRenderLight::new(
            Colour::WHITE,
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            10.0,
        ));
    }
}
