//! Math type aliases, bounding volumes and helper functions.
//!
//! All render-side math is f32 and backed by `nalgebra`.

pub use nalgebra;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Bounding sphere in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Centre of the sphere.
    pub centre: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere.
    pub fn new(centre: Vec3, radius: f32) -> Self {
        Self { centre, radius }
    }

    /// A zero-radius sphere at the origin.
    pub fn zero() -> Self {
        Self::new(Vec3::zeros(), 0.0)
    }

    /// Returns true if the two spheres overlap or touch.
    pub fn intersects(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        (self.centre - other.centre).norm_squared() <= reach * reach
    }

    /// Returns the sphere transformed by `matrix`.
    ///
    /// The radius is scaled by the largest axis scale so the result always
    /// encloses the transformed volume.
    pub fn transformed(&self, matrix: &Mat4) -> Sphere {
        let centre = matrix.transform_point(&nalgebra::Point3::from(self.centre));
        let scale_x = Vec3::new(matrix[(0, 0)], matrix[(1, 0)], matrix[(2, 0)]).norm();
        let scale_y = Vec3::new(matrix[(0, 1)], matrix[(1, 1)], matrix[(2, 1)]).norm();
        let scale_z = Vec3::new(matrix[(0, 2)], matrix[(1, 2)], matrix[(2, 2)]).norm();
        let scale = scale_x.max(scale_y).max(scale_z);
        Sphere::new(centre.coords, self.radius * scale)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::zero()
    }
}

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Extract the translation column of an affine matrix.
pub fn mat4_translation(m: &Mat4) -> Vec3 {
    Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Invert an affine matrix, falling back to identity for singular input.
pub fn mat4_inverse_or_identity(m: &Mat4) -> Mat4 {
    m.try_inverse().unwrap_or_else(|| {
        log::warn!("Attempted to invert a singular matrix, using identity");
        Mat4::identity()
    })
}

/// Build a right-handed perspective projection with depth range [0, 1].
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}

/// Build a left-handed orthographic projection with depth range [0, 1].
pub fn orthographic_lh(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    znear: f32,
    zfar: f32,
) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = zfar - znear;
    #[rustfmt::skip]
    let result = Mat4::new(
        2.0 / width, 0.0,          0.0,         -(right + left) / width,
        0.0,         2.0 / height, 0.0,         -(top + bottom) / height,
        0.0,         0.0,          1.0 / depth, -znear / depth,
        0.0,         0.0,          0.0,         1.0,
    );
    result
}
