//! Comparators used to order compiled passes.
//!
//! Each comparator has the signature expected by
//! [`compile_render_pass`](super::compile_render_pass). Ties left by a
//! comparator are broken by the object's source index, so every pass has a
//! total order.

use std::cmp::Ordering;

use crate::scene::RenderCamera;

use super::RenderPassObject;

fn camera_distance_squared(camera: &RenderCamera, object: &RenderPassObject) -> f32 {
    (object.bounding_sphere().centre - camera.position()).norm_squared()
}

/// Minimise state changes: material, then mesh, then front to back.
pub fn opaque_sort(camera: &RenderCamera, a: &RenderPassObject, b: &RenderPassObject) -> Ordering {
    a.material_id()
        .cmp(&b.material_id())
        .then_with(|| a.mesh_id().cmp(&b.mesh_id()))
        .then_with(|| {
            camera_distance_squared(camera, a).total_cmp(&camera_distance_squared(camera, b))
        })
}

/// Back to front by distance from the camera.
pub fn transparent_sort(
    camera: &RenderCamera,
    a: &RenderPassObject,
    b: &RenderPassObject,
) -> Ordering {
    camera_distance_squared(camera, b).total_cmp(&camera_distance_squared(camera, a))
}

/// Ascending draw priority, used by the UI layer.
pub fn priority_sort(
    _camera: &RenderCamera,
    a: &RenderPassObject,
    b: &RenderPassObject,
) -> Ordering {
    a.priority().cmp(&b.priority())
}

/// Ascending material id.
pub fn material_id_sort(
    _camera: &RenderCamera,
    a: &RenderPassObject,
    b: &RenderPassObject,
) -> Ordering {
    a.material_id().cmp(&b.material_id())
}
