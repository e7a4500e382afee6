//! Pass filtering and compilation.

use std::cmp::Ordering;

use frameline_core::compute::{Task, TaskContext};

use crate::resources::RenderPassKind;
use crate::scene::{
    AmbientRenderLight, DirectionalRenderLight, PointRenderLight, RenderCamera, RenderLayer,
    RenderObject, RenderSnapshot,
};
use crate::types::{Colour, Resolution};

use super::visibility::{
    DEFAULT_VISIBILITY_BATCH_SIZE, VisibilityPredicate, calculate_visible_objects_with_batch_size,
};
use super::{CameraRenderPassGroup, RenderPass, RenderPassObject, sort};

// ============================================================================
// Filtering
// ============================================================================

/// Resolve every object that has a material for `pass`.
///
/// Objects without one are skipped; the relative order of the rest is kept.
pub fn get_render_pass_objects(
    objects: &[RenderObject],
    pass: RenderPassKind,
) -> Vec<RenderPassObject> {
    objects
        .iter()
        .enumerate()
        .filter_map(|(index, object)| {
            object
                .material_group()
                .material(pass)
                .map(|material| RenderPassObject::new(object, material.clone(), index as u32))
        })
        .collect()
}

/// Like [`get_render_pass_objects`], restricted to objects in `layer`.
///
/// Source indices still refer to positions in `objects`.
pub fn get_layer_render_pass_objects(
    objects: &[RenderObject],
    layer: RenderLayer,
    pass: RenderPassKind,
) -> Vec<RenderPassObject> {
    objects
        .iter()
        .enumerate()
        .filter(|(_, object)| object.layer() == layer)
        .filter_map(|(index, object)| {
            object
                .material_group()
                .material(pass)
                .map(|material| RenderPassObject::new(object, material.clone(), index as u32))
        })
        .collect()
}

pub fn get_base_render_pass_objects(objects: &[RenderObject]) -> Vec<RenderPassObject> {
    get_layer_render_pass_objects(objects, RenderLayer::Standard, RenderPassKind::Base)
}

pub fn get_directional_light_render_pass_objects(
    objects: &[RenderObject],
) -> Vec<RenderPassObject> {
    get_layer_render_pass_objects(
        objects,
        RenderLayer::Standard,
        RenderPassKind::DirectionalLight,
    )
}

/// Objects with a point light material that lie within the light's range.
pub fn get_point_light_render_pass_objects(
    objects: &[RenderObject],
    light: &PointRenderLight,
) -> Vec<RenderPassObject> {
    let light_sphere = light.bounding_sphere();
    let mut pass_objects =
        get_layer_render_pass_objects(objects, RenderLayer::Standard, RenderPassKind::PointLight);
    pass_objects.retain(|object| light_sphere.intersects(&object.bounding_sphere()));
    pass_objects
}

pub fn get_transparent_render_pass_objects(objects: &[RenderObject]) -> Vec<RenderPassObject> {
    get_layer_render_pass_objects(objects, RenderLayer::Standard, RenderPassKind::Transparent)
}

pub fn get_skybox_render_pass_objects(objects: &[RenderObject]) -> Vec<RenderPassObject> {
    get_layer_render_pass_objects(objects, RenderLayer::Skybox, RenderPassKind::Skybox)
}

/// UI objects are drawn with their transparent material.
pub fn get_ui_render_pass_objects(objects: &[RenderObject]) -> Vec<RenderPassObject> {
    get_layer_render_pass_objects(objects, RenderLayer::Ui, RenderPassKind::Transparent)
}

// ============================================================================
// Compilation
// ============================================================================

/// Cull and sort `objects` into a pass, using the default batch size.
pub fn compile_render_pass<P, S>(
    ctx: &TaskContext,
    camera: &RenderCamera,
    ambient_light: AmbientRenderLight,
    objects: &[RenderPassObject],
    predicate: &P,
    sort: S,
) -> RenderPass
where
    P: VisibilityPredicate + ?Sized,
    S: Fn(&RenderCamera, &RenderPassObject, &RenderPassObject) -> Ordering,
{
    compile_render_pass_with_batch_size(
        ctx,
        camera,
        ambient_light,
        objects,
        predicate,
        sort,
        DEFAULT_VISIBILITY_BATCH_SIZE,
    )
}

/// Cull and sort `objects` into a pass.
///
/// The draw order is `sort` with ties broken by source index, so it does not
/// depend on the order culling tasks finished in.
pub fn compile_render_pass_with_batch_size<P, S>(
    ctx: &TaskContext,
    camera: &RenderCamera,
    ambient_light: AmbientRenderLight,
    objects: &[RenderPassObject],
    predicate: &P,
    sort: S,
    batch_size: usize,
) -> RenderPass
where
    P: VisibilityPredicate + ?Sized,
    S: Fn(&RenderCamera, &RenderPassObject, &RenderPassObject) -> Ordering,
{
    let mut visible =
        calculate_visible_objects_with_batch_size(ctx, camera, objects, predicate, batch_size);
    visible.sort_unstable_by(|a, b| {
        sort(camera, a, b).then_with(|| a.source_index().cmp(&b.source_index()))
    });
    RenderPass::new(ambient_light, visible)
}

/// The claimed scene contents of one frame.
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub resolution: Resolution,
    pub clear_colour: Colour,
    pub camera: RenderCamera,
    /// Sum of every ambient light in the snapshot.
    pub ambient_light: AmbientRenderLight,
    pub directional_lights: Vec<DirectionalRenderLight>,
    pub point_lights: Vec<PointRenderLight>,
    pub objects: Vec<RenderObject>,
}

impl RenderFrame {
    /// Claim the camera, lights and objects of `snapshot`.
    ///
    /// Dynamic meshes and the auxiliary command lists are left for the
    /// command compiler.
    pub fn claim(snapshot: &mut RenderSnapshot) -> Self {
        Self {
            resolution: snapshot.resolution(),
            clear_colour: snapshot.clear_colour(),
            camera: snapshot.claim_render_camera(),
            ambient_light: AmbientRenderLight::combined(&snapshot.claim_ambient_render_lights()),
            directional_lights: snapshot.claim_directional_render_lights(),
            point_lights: snapshot.claim_point_render_lights(),
            objects: snapshot.claim_render_objects(),
        }
    }
}

type SortFn = fn(&RenderCamera, &RenderPassObject, &RenderPassObject) -> Ordering;

enum PassJob<'f> {
    Base,
    Directional(&'f DirectionalRenderLight),
    Point(&'f PointRenderLight),
    Skybox,
    Transparent,
    Ui,
}

impl PassJob<'_> {
    fn compile<P>(
        &self,
        ctx: &TaskContext,
        frame: &RenderFrame,
        camera: &RenderCamera,
        predicate: &P,
        batch_size: usize,
    ) -> RenderPass
    where
        P: VisibilityPredicate + ?Sized,
    {
        // Light passes are additive; the ambient term is drawn once by the
        // base pass.
        let (objects, ambient, sort): (Vec<RenderPassObject>, AmbientRenderLight, SortFn) =
            match self {
                Self::Base => (
                    get_base_render_pass_objects(&frame.objects),
                    frame.ambient_light,
                    sort::opaque_sort,
                ),
                Self::Directional(_) => (
                    get_directional_light_render_pass_objects(&frame.objects),
                    AmbientRenderLight::default(),
                    sort::opaque_sort,
                ),
                Self::Point(light) => (
                    get_point_light_render_pass_objects(&frame.objects, light),
                    AmbientRenderLight::default(),
                    sort::opaque_sort,
                ),
                // Surrounds the camera, so it is never culled.
                Self::Skybox => {
                    return RenderPass::new(
                        AmbientRenderLight::default(),
                        get_skybox_render_pass_objects(&frame.objects),
                    );
                }
                Self::Transparent => (
                    get_transparent_render_pass_objects(&frame.objects),
                    frame.ambient_light,
                    sort::transparent_sort,
                ),
                Self::Ui => (
                    get_ui_render_pass_objects(&frame.objects),
                    AmbientRenderLight::default(),
                    sort::priority_sort,
                ),
            };
        compile_render_pass_with_batch_size(
            ctx,
            camera,
            ambient,
            &objects,
            predicate,
            sort,
            batch_size,
        )
    }
}

/// Camera group a pass job belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CameraGroup {
    SceneOpaque,
    Skybox,
    SceneTransparent,
    Ui,
}

impl CameraGroup {
    const ALL: [CameraGroup; 4] = [
        Self::SceneOpaque,
        Self::Skybox,
        Self::SceneTransparent,
        Self::Ui,
    ];

    fn camera(self, frame: &RenderFrame) -> RenderCamera {
        match self {
            Self::SceneOpaque | Self::SceneTransparent => frame.camera,
            Self::Skybox => frame.camera.skybox(),
            Self::Ui => RenderCamera::ui(frame.resolution),
        }
    }
}

/// Compile every forward pass of a frame, grouped by camera.
///
/// Produces four groups in draw order:
///
/// 1. Scene camera: the base pass, one pass per directional light and one
///    pass per point light over the standard layer
/// 2. Skybox camera: the unculled skybox layer, drawn after the opaque scene
/// 3. Scene camera: the back-to-front transparent pass over the standard
///    layer
/// 4. UI camera: the UI layer in ascending priority
///
/// Each pass is compiled as an independent child task. Passes may be empty.
pub fn compile_camera_render_passes<P>(
    ctx: &TaskContext,
    frame: &RenderFrame,
    predicate: &P,
    batch_size: usize,
) -> Vec<CameraRenderPassGroup>
where
    P: VisibilityPredicate + ?Sized,
{
    frameline_core::profile_function!();

    let jobs: Vec<(CameraGroup, PassJob<'_>)> = std::iter::once(PassJob::Base)
        .chain(frame.directional_lights.iter().map(PassJob::Directional))
        .chain(frame.point_lights.iter().map(PassJob::Point))
        .map(|job| (CameraGroup::SceneOpaque, job))
        .chain([
            (CameraGroup::Skybox, PassJob::Skybox),
            (CameraGroup::SceneTransparent, PassJob::Transparent),
            (CameraGroup::Ui, PassJob::Ui),
        ])
        .collect();
    let cameras: Vec<RenderCamera> = CameraGroup::ALL
        .iter()
        .map(|group| group.camera(frame))
        .collect();

    let mut passes: Vec<RenderPass> = jobs.iter().map(|_| RenderPass::default()).collect();
    let tasks: Vec<Task<'_>> = jobs
        .iter()
        .zip(passes.iter_mut())
        .map(|((group, job), slot)| {
            let camera = &cameras[*group as usize];
            Box::new(move |ctx: &TaskContext| {
                *slot = job.compile(ctx, frame, camera, predicate, batch_size);
            }) as Task<'_>
        })
        .collect();
    ctx.process_child_tasks(tasks);

    let mut grouped: Vec<Vec<RenderPass>> = CameraGroup::ALL.iter().map(|_| Vec::new()).collect();
    for ((group, _), pass) in jobs.iter().zip(passes) {
        grouped[*group as usize].push(pass);
    }
    let groups: Vec<CameraRenderPassGroup> = cameras
        .into_iter()
        .zip(grouped)
        .map(|(camera, passes)| CameraRenderPassGroup::new(camera, passes))
        .collect();

    log::debug!(
        "Compiled {} passes ({} directional, {} point) in {} camera groups from {} objects",
        jobs.len(),
        frame.directional_lights.len(),
        frame.point_lights.len(),
        groups.len(),
        frame.objects.len()
    );
    groups
}
