//! Parallel visibility culling.

use frameline_core::compute::{Task, TaskContext};
use parking_lot::Mutex;

use crate::scene::RenderCamera;

use super::RenderPassObject;

/// Number of objects tested per culling task.
pub const DEFAULT_VISIBILITY_BATCH_SIZE: usize = 25;

/// Decides whether an object is visible from a camera.
///
/// Predicates are shared by every culling task, so they must be `Sync`.
pub trait VisibilityPredicate: Sync {
    fn is_visible(&self, camera: &RenderCamera, object: &RenderPassObject) -> bool;
}

/// Treats every object as visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl VisibilityPredicate for AcceptAll {
    fn is_visible(&self, _camera: &RenderCamera, _object: &RenderPassObject) -> bool {
        true
    }
}

impl<F> VisibilityPredicate for F
where
    F: Fn(&RenderCamera, &RenderPassObject) -> bool + Sync,
{
    fn is_visible(&self, camera: &RenderCamera, object: &RenderPassObject) -> bool {
        self(camera, object)
    }
}

/// Collect the objects `predicate` accepts, using the default batch size.
///
/// The order of the result is unspecified.
pub fn calculate_visible_objects<P>(
    ctx: &TaskContext,
    camera: &RenderCamera,
    objects: &[RenderPassObject],
    predicate: &P,
) -> Vec<RenderPassObject>
where
    P: VisibilityPredicate + ?Sized,
{
    calculate_visible_objects_with_batch_size(
        ctx,
        camera,
        objects,
        predicate,
        DEFAULT_VISIBILITY_BATCH_SIZE,
    )
}

/// Collect the objects `predicate` accepts.
///
/// `objects` is split into batches of `batch_size`, one child task per
/// batch. Each task appends its hits to a single shared list behind one
/// mutex, so the order of the result depends on task completion order and is
/// unspecified.
///
/// # Panics
///
/// Panics if `batch_size` is zero.
pub fn calculate_visible_objects_with_batch_size<P>(
    ctx: &TaskContext,
    camera: &RenderCamera,
    objects: &[RenderPassObject],
    predicate: &P,
    batch_size: usize,
) -> Vec<RenderPassObject>
where
    P: VisibilityPredicate + ?Sized,
{
    frameline_core::profile_function!();
    assert!(batch_size > 0, "Visibility batch size must be non-zero");

    let visible = Mutex::new(Vec::with_capacity(objects.len()));
    let tasks: Vec<Task<'_>> = objects
        .chunks(batch_size)
        .map(|batch| {
            let visible = &visible;
            Box::new(move |_ctx: &TaskContext| {
                let hits: Vec<RenderPassObject> = batch
                    .iter()
                    .filter(|object| predicate.is_visible(camera, object))
                    .cloned()
                    .collect();
                visible.lock().extend(hits);
            }) as Task<'_>
        })
        .collect();

    ctx.process_child_tasks(tasks);

    let visible = visible.into_inner();
    log::trace!("{} of {} objects visible", visible.len(), objects.len());
    visible
}
