//! Render camera.

use frameline_core::math::{
    Mat4, Vec3, mat4_inverse_or_identity, mat4_translation, orthographic_lh, perspective_rh,
};

use crate::types::Resolution;

/// Depth range of the UI camera.
const UI_NEAR: f32 = 0.0;
const UI_FAR: f32 = 1.0;

/// Camera transform and projection captured for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    /// Camera-to-world transform.
    pub world_matrix: Mat4,
    /// View-to-clip projection.
    pub projection_matrix: Mat4,
}

impl RenderCamera {
    /// Create a camera from its world transform and projection.
    pub fn new(world_matrix: Mat4, projection_matrix: Mat4) -> Self {
        Self {
            world_matrix,
            projection_matrix,
        }
    }

    /// Create a camera with a right-handed perspective projection.
    pub fn perspective(world_matrix: Mat4, yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self::new(world_matrix, perspective_rh(yfov, aspect, znear, zfar))
    }

    /// Pixel-space camera used by the UI layer.
    ///
    /// The origin is the bottom-left corner of the surface and one unit is one
    /// pixel.
    pub fn ui(resolution: Resolution) -> Self {
        Self::new(
            Mat4::identity(),
            orthographic_lh(
                0.0,
                resolution.width as f32,
                0.0,
                resolution.height as f32,
                UI_NEAR,
                UI_FAR,
            ),
        )
    }

    /// This camera with its translation removed, used by the skybox layer.
    pub fn skybox(&self) -> Self {
        let mut world_matrix = self.world_matrix;
        world_matrix[(0, 3)] = 0.0;
        world_matrix[(1, 3)] = 0.0;
        world_matrix[(2, 3)] = 0.0;
        Self::new(world_matrix, self.projection_matrix)
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        mat4_inverse_or_identity(&self.world_matrix)
    }

    /// World-to-clip transform.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }

    /// World-space camera position.
    pub fn position(&self) -> Vec3 {
        mat4_translation(&self.world_matrix)
    }
}

impl Default for RenderCamera {
    fn default() -> Self {
        Self::new(Mat4::identity(), Mat4::identity())
    }
}
