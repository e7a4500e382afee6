//! Integration tests for the frame pipeline.
//!
//! These tests drive snapshots through pass compilation, command building and
//! processing against the dummy backend, which records every backend call.
//! Parallel stages are parameterized over worker thread counts with `rstest`.
//!
//! # Test Categories
//!
//! - **Pass Tests**: filtering, culling completeness and sort determinism
//! - **Command Tests**: insertion order and unload ownership
//! - **Frame Tests**: whole frames from snapshot to backend calls
//! - **Threading Tests**: producer and render threads joined by queues
//!
//! ```bash
//! cargo test --test pipeline_tests
//! ```

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::{THREAD_COUNTS, TestAssets, camera_at, task_pool};
use frameline_core::compute::{TaskContext, TaskPool};
use frameline_core::math::{Mat4, Vec3, mat4_from_translation};
use frameline_graphics::backend::BackendCall;
use frameline_graphics::pass::sort::{material_id_sort, transparent_sort};
use frameline_graphics::pass::{
    AcceptAll, RenderFrame, calculate_visible_objects_with_batch_size, compile_render_pass,
    compile_render_pass_with_batch_size, get_directional_light_render_pass_objects,
    get_render_pass_objects,
};
use frameline_graphics::types::PolygonType;
use frameline_graphics::{
    AmbientRenderLight, CameraRenderPassGroup, Colour, DirectionalRenderLight, DummyBackend,
    FrameQueue, PointRenderLight, RenderCommand, RenderCommandBuffer, RenderCommandCompiler,
    RenderCommandKind, RenderCommandList, RenderCommandProcessor, RenderDynamicMesh,
    RenderLayer, RenderObject, RenderObjectMesh, RenderPassKind, RenderShader, RenderSnapshot,
    Renderer, RendererConfig, Resolution, ResourceCommandQueue, VertexFormat,
};

const RESOLUTION: Resolution = Resolution::new(640, 480);

fn buffer_of(list: RenderCommandList) -> RenderCommandBuffer {
    let mut buffer = RenderCommandBuffer::default();
    buffer.push_list(list);
    buffer
}

fn renderer(threads: usize) -> Renderer {
    Renderer::new(RendererConfig {
        worker_threads: Some(threads),
        ..RendererConfig::default()
    })
    .unwrap()
}

fn loaded_processor(assets: &[&TestAssets]) -> RenderCommandProcessor<DummyBackend> {
    let mut list = RenderCommandList::new();
    for asset in assets {
        asset.add_load_commands(&mut list);
    }
    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let stats = processor.process(buffer_of(list));
    assert_eq!(stats.failed_loads, 0);
    processor.backend_mut().take_calls();
    processor
}

fn approx_colour(a: Colour, b: Colour) -> bool {
    (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
}

// ============================================================================
// Pass Tests
// ============================================================================

/// Filtering keeps exactly the objects with a material for the pass, in
/// input order.
#[test]
fn test_filter_preserves_relative_order() {
    let lit = TestAssets::new("lit", &[RenderPassKind::Base, RenderPassKind::DirectionalLight]);
    let unlit = TestAssets::new("unlit", &[RenderPassKind::Base]);
    let objects: Vec<RenderObject> = (0..12)
        .map(|i| {
            let assets = if i % 3 == 0 { &unlit } else { &lit };
            assets.object_at(Vec3::new(i as f32, 0.0, 0.0))
        })
        .collect();

    let directional = get_directional_light_render_pass_objects(&objects);
    let indices: Vec<u32> = directional.iter().map(|o| o.source_index()).collect();
    assert_eq!(indices, vec![1, 2, 4, 5, 7, 8, 10, 11]);

    let transparent = get_render_pass_objects(&objects, RenderPassKind::Transparent);
    assert!(transparent.is_empty());
}

/// Accept-all culling returns every input object exactly once, whatever the
/// batch size and thread count.
#[rstest]
fn test_visibility_returns_complete_set(
    #[values(1, 25, 1000)] num_objects: usize,
    #[values(1, 7, 25)] batch_size: usize,
    #[values(1, 4)] threads: usize,
) {
    let assets = TestAssets::new("vis", &[RenderPassKind::Base]);
    let objects: Vec<RenderObject> = (0..num_objects)
        .map(|i| assets.object_at(Vec3::new(i as f32, 0.0, 0.0)))
        .collect();
    let pass_objects = get_render_pass_objects(&objects, RenderPassKind::Base);

    let pool = task_pool(threads);
    let visible = calculate_visible_objects_with_batch_size(
        &pool.context(),
        &camera_at(Vec3::zeros()),
        &pass_objects,
        &AcceptAll,
        batch_size,
    );

    let mut indices: Vec<u32> = visible.iter().map(|o| o.source_index()).collect();
    indices.sort_unstable();
    let expected: Vec<u32> = (0..num_objects as u32).collect();
    assert_eq!(indices, expected);
}

/// A predicate removes exactly the objects it rejects.
#[rstest]
#[case::sequential(0)]
#[case::pooled(4)]
fn test_visibility_predicate_filters(#[case] threads: usize) {
    let assets = TestAssets::new("pred", &[RenderPassKind::Base]);
    let objects: Vec<RenderObject> = (0..100)
        .map(|i| assets.object_at(Vec3::new(0.0, 0.0, -(i as f32))))
        .collect();
    let pass_objects = get_render_pass_objects(&objects, RenderPassKind::Base);
    let ctx = if threads == 0 {
        TaskContext::sequential()
    } else {
        task_pool(threads).context()
    };

    let near = |camera: &frameline_graphics::RenderCamera,
                object: &frameline_graphics::RenderPassObject| {
        (object.position() - camera.position()).norm() < 50.0
    };
    let visible = calculate_visible_objects_with_batch_size(
        &ctx,
        &camera_at(Vec3::zeros()),
        &pass_objects,
        &near,
        10,
    );
    assert_eq!(visible.len(), 50);
    assert!(visible.iter().all(|o| o.source_index() < 50));
}

/// The compiled order is the comparator's order and never depends on how
/// culling was scheduled.
#[test]
fn test_compile_order_is_deterministic() {
    let assets = TestAssets::new("sorted", &[RenderPassKind::Transparent]);
    let objects: Vec<RenderObject> = (0..300)
        .map(|i| {
            let depth = ((i * 37) % 101) as f32;
            assets.object_at(Vec3::new(0.0, 0.0, -depth))
        })
        .collect();
    let pass_objects = get_render_pass_objects(&objects, RenderPassKind::Transparent);
    let camera = camera_at(Vec3::zeros());

    let mut expected: Vec<(u32, f32)> = pass_objects
        .iter()
        .map(|o| (o.source_index(), -o.position().z))
        .collect();
    expected.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let expected: Vec<u32> = expected.into_iter().map(|(index, _)| index).collect();

    for threads in THREAD_COUNTS {
        for batch_size in [1, 25, 64] {
            let pass = compile_render_pass_with_batch_size(
                &TaskPool::new(threads).context(),
                &camera,
                AmbientRenderLight::default(),
                &pass_objects,
                &AcceptAll,
                transparent_sort,
                batch_size,
            );
            let order: Vec<u32> = pass.objects().iter().map(|o| o.source_index()).collect();
            assert_eq!(order, expected, "threads {} batch {}", threads, batch_size);
        }
    }
}

/// An empty object list compiles to an empty, valid pass.
#[test]
fn test_empty_pass() {
    let pass = compile_render_pass(
        &TaskContext::sequential(),
        &camera_at(Vec3::zeros()),
        AmbientRenderLight::new(Colour::WHITE),
        &[],
        &AcceptAll,
        transparent_sort,
    );
    assert!(pass.is_empty());
    assert_eq!(pass.ambient_light().colour, Colour::WHITE);
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[test]
#[should_panic(expected = "'render_objects' has already been claimed")]
fn test_snapshot_double_claim_aborts() {
    let mut snapshot = RenderSnapshot::new(RESOLUTION, Colour::BLACK);
    let _ = snapshot.claim_render_objects();
    let _ = snapshot.claim_render_objects();
}

#[test]
fn test_renderer_claims_every_field() {
    let assets = TestAssets::new("claim", &[RenderPassKind::Base]);
    let mut snapshot = RenderSnapshot::new(RESOLUTION, Colour::BLACK);
    snapshot.add_render_object(assets.object_at(Vec3::zeros()));
    let frame = RenderFrame::claim(&mut snapshot);
    assert_eq!(frame.objects.len(), 1);
    assert!(!snapshot.is_fully_claimed());
    let _ = snapshot.claim_render_dynamic_meshes();
    let _ = snapshot.claim_pre_render_command_list();
    let _ = snapshot.claim_post_render_command_list();
    assert!(snapshot.is_fully_claimed());
}

// ============================================================================
// Command Tests
// ============================================================================

/// The ordered view has one entry per add call, in call order.
#[rstest]
#[case(0)]
#[case(1)]
#[case(97)]
fn test_list_insertion_order(#[case] num_calls: usize) {
    let mut list = RenderCommandList::new();
    let mut expected = Vec::with_capacity(num_calls);
    for i in 0..num_calls {
        match i % 3 {
            0 => {
                list.add_render_instance_command(Mat4::identity());
                expected.push(RenderCommandKind::RenderInstance);
            }
            1 => {
                list.add_apply_ambient_light_command(Colour::BLACK);
                expected.push(RenderCommandKind::ApplyAmbientLight);
            }
            _ => {
                list.add_end_command();
                expected.push(RenderCommandKind::End);
            }
        }
    }
    assert_eq!(list.len(), num_calls);
    assert_eq!(list.kinds(), expected);
}

/// Executing an unload destroys the backend object once.
#[test]
fn test_unload_destroys_once_when_processed() {
    let shader = Arc::new(RenderShader::new("shader", "", ""));
    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let mut load = RenderCommandList::new();
    load.add_load_shader_command(&shader);
    processor.process(buffer_of(load));
    assert!(shader.is_loaded());

    let id = shader.id();
    let weak = Arc::downgrade(&shader);
    let mut unload = RenderCommandList::new();
    unload.add_unload_shader_command(shader);
    processor.process(buffer_of(unload));

    assert!(weak.upgrade().is_none());
    assert_eq!(processor.backend().destroyed_count(), 1);
    assert_eq!(
        processor.backend().calls().last(),
        Some(&BackendCall::DestroyShader(id))
    );
}

/// Dropping an unprocessed unload releases the backend object with the
/// resource, also exactly once.
#[test]
fn test_unload_destroys_once_when_dropped() {
    let shader = Arc::new(RenderShader::new("shader", "", ""));
    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let mut load = RenderCommandList::new();
    load.add_load_shader_command(&shader);
    processor.process(buffer_of(load));

    let weak = Arc::downgrade(&shader);
    let mut unload = RenderCommandList::new();
    unload.add_unload_shader_command(shader);
    assert!(weak.upgrade().is_some());
    drop(unload);

    assert!(weak.upgrade().is_none());
    assert_eq!(processor.backend().destroyed_count(), 1);
    assert!(
        !processor
            .backend()
            .calls()
            .iter()
            .any(|call| matches!(call, BackendCall::DestroyShader(_)))
    );
}

// ============================================================================
// Frame Tests
// ============================================================================

/// Three objects lit by one directional light, sorted by material id, replay
/// as Begin, ApplyCamera, ApplyAmbientLight, three draw triples and End.
#[rstest]
fn test_directional_pass_end_to_end(#[values(1, 2, 8)] threads: usize) {
    let passes = [RenderPassKind::Base, RenderPassKind::DirectionalLight];
    let first = TestAssets::new("first", &passes);
    let second = TestAssets::new("second", &passes);
    let third = TestAssets::new("third", &passes);
    let camera = camera_at(Vec3::new(0.0, 1.0, 5.0));

    let mut snapshot = RenderSnapshot::new(RESOLUTION, Colour::BLACK);
    snapshot.set_render_camera(camera);
    snapshot.add_render_directional_light(DirectionalRenderLight::new(
        Colour::WHITE,
        Vec3::new(0.0, -1.0, 0.0),
    ));
    snapshot.add_render_object(third.object_at(Vec3::new(3.0, 0.0, 0.0)));
    snapshot.add_render_object(first.object_at(Vec3::new(1.0, 0.0, 0.0)));
    snapshot.add_render_object(second.object_at(Vec3::new(2.0, 0.0, 0.0)));
    let frame = RenderFrame::claim(&mut snapshot);
    assert_eq!(frame.directional_lights.len(), 1);

    let pool = task_pool(threads);
    let ctx = pool.context();
    let objects = get_directional_light_render_pass_objects(&frame.objects);
    let pass = compile_render_pass(
        &ctx,
        &frame.camera,
        AmbientRenderLight::default(),
        &objects,
        &AcceptAll,
        material_id_sort,
    );
    let sorted: Vec<_> = pass.objects().iter().map(|o| o.material_id()).collect();
    let ordered_assets = [&first, &second, &third];
    let expected: Vec<_> = ordered_assets
        .iter()
        .map(|a| a.material(RenderPassKind::DirectionalLight).id())
        .collect();
    assert_eq!(sorted, expected);

    let buffer = RenderCommandCompiler::compile(
        &ctx,
        &[CameraRenderPassGroup::new(frame.camera, vec![pass])],
        RenderCommandList::new(),
        RenderCommandList::new(),
        Vec::new(),
        frame.resolution,
        frame.clear_colour,
    );

    let mut processor = loaded_processor(&ordered_assets);
    let stats = processor.process(buffer);
    assert_eq!(stats.draw_calls, 3);
    assert!(processor.state().is_reset());

    let mut expected_calls = vec![
        BackendCall::Begin(RESOLUTION),
        BackendCall::ApplyCamera(camera.position()),
        BackendCall::ApplyAmbientLight(Colour::BLACK),
    ];
    for (assets, x) in ordered_assets.iter().zip([1.0, 2.0, 3.0]) {
        expected_calls.push(BackendCall::ApplyMaterial(
            assets.material(RenderPassKind::DirectionalLight).id(),
        ));
        expected_calls.push(BackendCall::ApplyMesh(assets.mesh.id()));
        expected_calls.push(BackendCall::RenderInstance(mat4_from_translation(
            Vec3::new(x, 0.0, 0.0),
        )));
    }
    expected_calls.push(BackendCall::End);
    assert_eq!(processor.backend().calls(), expected_calls.as_slice());
}

/// A whole frame through the renderer: every pass kind, ambient handling,
/// point light range and transparent ordering.
#[rstest]
fn test_full_frame(#[values(1, 4)] threads: usize) {
    let lit = TestAssets::new(
        "lit",
        &[
            RenderPassKind::Base,
            RenderPassKind::DirectionalLight,
            RenderPassKind::PointLight,
        ],
    );
    let glass = TestAssets::new("glass", &[RenderPassKind::Transparent]);

    let mut renderer = renderer(threads);
    let mut snapshot = renderer.new_snapshot(RESOLUTION);
    lit.add_load_commands(snapshot.pre_render_command_list_mut());
    glass.add_load_commands(snapshot.pre_render_command_list_mut());
    snapshot.add_render_ambient_light(AmbientRenderLight::new(Colour::rgb(0.1, 0.1, 0.1)));
    snapshot.add_render_ambient_light(AmbientRenderLight::new(Colour::rgb(0.2, 0.2, 0.2)));
    snapshot.add_render_directional_light(DirectionalRenderLight::new(
        Colour::WHITE,
        Vec3::new(0.0, 0.0, -1.0),
    ));
    snapshot.add_render_point_light(PointRenderLight::new(
        Colour::WHITE,
        Vec3::new(0.0, 0.0, -5.0),
        Vec3::new(1.0, 0.0, 0.0),
        2.0,
    ));
    snapshot.add_render_object(lit.object_at(Vec3::new(0.0, 0.0, -5.0)));
    snapshot.add_render_object(lit.object_at(Vec3::new(0.0, 0.0, -50.0)));
    snapshot.add_render_object(glass.object_at(Vec3::new(0.0, 0.0, -3.0)));
    snapshot.add_render_object(glass.object_at(Vec3::new(0.0, 0.0, -10.0)));

    let buffer = renderer.render_snapshot(snapshot);
    // pre, begin, base, directional, point, transparent, end
    assert_eq!(buffer.num_lists(), 7);
    let lists = buffer.lists();

    // The first pass list of a camera group leads with its ApplyCamera.
    let ambient_of = |list: &RenderCommandList| {
        let mut commands = list
            .iter()
            .skip_while(|command| matches!(command, RenderCommand::ApplyCamera { .. }));
        match commands.next() {
            Some(RenderCommand::ApplyAmbientLight { colour }) => *colour,
            other => panic!("pass list starts with {:?}", other.map(RenderCommand::kind)),
        }
    };
    assert_eq!(lists[2].kinds()[0], RenderCommandKind::ApplyCamera);
    assert_ne!(lists[3].kinds()[0], RenderCommandKind::ApplyCamera);
    let frame_ambient = Colour::rgb(0.3, 0.3, 0.3);
    assert!(approx_colour(ambient_of(&lists[2]), frame_ambient));
    assert!(approx_colour(ambient_of(&lists[3]), Colour::BLACK));
    assert!(approx_colour(ambient_of(&lists[4]), Colour::BLACK));
    assert!(approx_colour(ambient_of(&lists[5]), frame_ambient));

    let instance_depths = |list: &RenderCommandList| -> Vec<f32> {
        list.iter()
            .filter_map(|command| match command {
                RenderCommand::RenderInstance { world_matrix } => Some(world_matrix[(2, 3)]),
                _ => None,
            })
            .collect()
    };
    assert_eq!(instance_depths(&lists[4]), vec![-5.0]);
    assert_eq!(instance_depths(&lists[5]), vec![-10.0, -3.0]);

    // Both transparent objects share material and mesh.
    assert_eq!(
        lists[5].kinds(),
        vec![
            RenderCommandKind::ApplyCamera,
            RenderCommandKind::ApplyAmbientLight,
            RenderCommandKind::ApplyMaterial,
            RenderCommandKind::ApplyMesh,
            RenderCommandKind::RenderInstance,
            RenderCommandKind::RenderInstance,
        ]
    );

    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let stats = processor.process(buffer);
    assert_eq!(stats.failed_loads, 0);
    assert_eq!(stats.draw_calls, 7);
    assert_eq!(stats.skipped_draws, 0);
    assert!(lit.shader.is_loaded() && glass.mesh.is_loaded());
}

/// Layers are drawn as opaque scene, skybox, transparent scene, then UI,
/// each group behind its own camera.
#[rstest]
fn test_layer_draw_order(#[values(1, 4)] threads: usize) {
    let scene = TestAssets::new(
        "scene",
        &[RenderPassKind::Base, RenderPassKind::Transparent],
    );
    let sky = TestAssets::new("sky", &[RenderPassKind::Skybox]);
    let hud = TestAssets::new("hud", &[RenderPassKind::Transparent]);

    let mut renderer = renderer(threads);
    let mut snapshot = renderer.new_snapshot(RESOLUTION);
    for assets in [&scene, &sky, &hud] {
        assets.add_load_commands(snapshot.pre_render_command_list_mut());
    }
    let camera_position = Vec3::new(0.0, 1.0, 4.0);
    snapshot.set_render_camera(camera_at(camera_position));
    snapshot.add_render_object(
        hud.object_at(Vec3::new(1.0, 0.0, 0.5))
            .with_layer(RenderLayer::Ui)
            .with_priority(5),
    );
    snapshot.add_render_object(sky.object_at(Vec3::zeros()).with_layer(RenderLayer::Skybox));
    snapshot.add_render_object(scene.object_at(Vec3::new(0.0, 0.0, -2.0)));
    snapshot.add_render_object(
        hud.object_at(Vec3::new(2.0, 0.0, 0.5))
            .with_layer(RenderLayer::Ui)
            .with_priority(-5),
    );

    let buffer = renderer.render_snapshot(snapshot);
    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let stats = processor.process(buffer);
    assert_eq!(stats.draw_calls, 5);

    let sequence: Vec<BackendCall> = processor
        .backend()
        .calls()
        .iter()
        .filter(|call| {
            matches!(
                call,
                BackendCall::ApplyCamera(_)
                    | BackendCall::ApplyMaterial(_)
                    | BackendCall::RenderInstance(_)
            )
        })
        .cloned()
        .collect();
    let instance = |position: Vec3| BackendCall::RenderInstance(mat4_from_translation(position));
    assert_eq!(
        sequence,
        vec![
            BackendCall::ApplyCamera(camera_position),
            BackendCall::ApplyMaterial(scene.material(RenderPassKind::Base).id()),
            instance(Vec3::new(0.0, 0.0, -2.0)),
            BackendCall::ApplyCamera(Vec3::zeros()),
            BackendCall::ApplyMaterial(sky.material(RenderPassKind::Skybox).id()),
            instance(Vec3::zeros()),
            BackendCall::ApplyCamera(camera_position),
            BackendCall::ApplyMaterial(scene.material(RenderPassKind::Transparent).id()),
            instance(Vec3::new(0.0, 0.0, -2.0)),
            BackendCall::ApplyCamera(Vec3::zeros()),
            BackendCall::ApplyMaterial(hud.material(RenderPassKind::Transparent).id()),
            instance(Vec3::new(2.0, 0.0, 0.5)),
            instance(Vec3::new(1.0, 0.0, 0.5)),
        ]
    );
}

/// Dynamic meshes are drawn through ApplyDynamicMesh and live until the
/// frame has been processed.
#[test]
fn test_dynamic_mesh_frame() {
    let assets = TestAssets::new("sprite", &[RenderPassKind::Base]);
    let mut renderer = renderer(2);
    let mut snapshot = renderer.new_snapshot(RESOLUTION);
    assets.add_load_commands(snapshot.pre_render_command_list_mut());

    let vertex_format = VertexFormat::sprite();
    let vertex_data = vec![0u8; vertex_format.stride() as usize * 3];
    let mesh = snapshot.add_render_dynamic_mesh(RenderDynamicMesh::new(
        PolygonType::Triangle,
        vertex_format,
        vertex_data,
        vec![0, 1, 2],
    ));
    let mesh_id = mesh.id();
    let weak = Arc::downgrade(&mesh);
    snapshot.add_render_object(RenderObject::new(
        assets.group.clone(),
        RenderObjectMesh::Dynamic(mesh),
        Mat4::identity(),
    ));

    let buffer = renderer.render_snapshot(snapshot);
    assert_eq!(buffer.dynamic_meshes().len(), 1);
    assert!(weak.upgrade().is_some());

    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let stats = processor.process(buffer);
    assert_eq!(stats.draw_calls, 1);
    assert!(
        processor
            .backend()
            .calls()
            .contains(&BackendCall::ApplyDynamicMesh(mesh_id))
    );
    assert!(weak.upgrade().is_none());
}

/// A shader that fails to build leaves its draws skipped but the frame
/// completes.
#[test]
fn test_failed_shader_frame_continues() {
    let broken = TestAssets {
        shader: Arc::new(RenderShader::new("broken", "#error", "")),
        ..TestAssets::new("broken", &[])
    };
    let group = Arc::new(frameline_graphics::RenderMaterialGroup::new("broken").with_material(
        RenderPassKind::Base,
        Arc::new(frameline_graphics::RenderMaterial::new(
            "broken",
            broken.shader.clone(),
        )),
    ));
    let working = TestAssets::new("working", &[RenderPassKind::Base]);

    let mut renderer = renderer(2);
    let mut snapshot = renderer.new_snapshot(RESOLUTION);
    broken.add_load_commands(snapshot.pre_render_command_list_mut());
    working.add_load_commands(snapshot.pre_render_command_list_mut());
    snapshot.add_render_object(RenderObject::new(
        group,
        RenderObjectMesh::Static(broken.mesh.clone()),
        Mat4::identity(),
    ));
    snapshot.add_render_object(working.object_at(Vec3::zeros()));

    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let stats = processor.process(renderer.render_snapshot(snapshot));
    assert_eq!(stats.failed_loads, 1);
    assert_eq!(stats.skipped_draws, 1);
    assert_eq!(stats.draw_calls, 1);
    assert!(!broken.shader.is_loaded());
    assert_eq!(processor.backend().calls().last(), Some(&BackendCall::End));
}

// ============================================================================
// Threading Tests
// ============================================================================

/// Frames compiled on one thread and processed on another, with resource
/// requests flowing through the resource queue.
#[rstest]
fn test_producer_and_render_threads(#[values(1, 3)] capacity: usize) {
    const FRAMES: usize = 6;

    let assets = TestAssets::new("threaded", &[RenderPassKind::Base]);
    let frames = FrameQueue::new(capacity);
    let resources = ResourceCommandQueue::new();
    resources.load_shader(&assets.shader);
    resources.load_mesh(
        &assets.mesh,
        vec![0; assets.mesh.descriptor().vertex_data_size()],
        vec![0, 1, 2],
    );

    std::thread::scope(|scope| {
        let render = scope.spawn(|| {
            let mut processor = RenderCommandProcessor::new(DummyBackend::new());
            let mut draws = 0;
            let mut processed = 0;
            while let Some(buffer) = frames.pop() {
                draws += processor.process(buffer).draw_calls;
                processed += 1;
            }
            (processed, draws, processor.into_backend())
        });

        let mut renderer = renderer(2);
        for frame in 0..=FRAMES {
            let mut snapshot = renderer.new_snapshot(RESOLUTION);
            if frame == FRAMES {
                resources.unload_shader(assets.shader.clone());
                resources.unload_mesh(assets.mesh.clone());
            } else {
                snapshot.add_render_object(assets.object_at(Vec3::zeros()));
            }
            resources.on_render_snapshot(&mut snapshot);
            if let Err(buffer) = frames.push(renderer.render_snapshot(snapshot)) {
                resources.recycle(buffer);
            }
        }
        frames.close();

        let (processed, draws, backend) = render.join().unwrap();
        assert_eq!(processed, FRAMES + 1);
        assert_eq!(draws, FRAMES);
        assert_eq!(backend.destroyed_count(), 2);
    });

    assert!(!assets.shader.is_loaded());
    assert_eq!(resources.num_pending(), 0);
}

/// Resource commands of frames discarded while suspended are issued again
/// after resuming.
#[test]
fn test_suspended_frames_are_recycled() {
    let assets = TestAssets::new("suspend", &[RenderPassKind::Base]);
    let frames = FrameQueue::new(1);
    let resources = ResourceCommandQueue::new();
    resources.load_shader(&assets.shader);

    let mut renderer = renderer(1);
    let mut snapshot = renderer.new_snapshot(RESOLUTION);
    resources.on_render_snapshot(&mut snapshot);
    assert!(frames.push(renderer.render_snapshot(snapshot)).is_ok());

    for buffer in frames.suspend() {
        resources.recycle(buffer);
    }
    assert_eq!(resources.num_pending(), 1);

    let snapshot = renderer.new_snapshot(RESOLUTION);
    assert!(frames.push(renderer.render_snapshot(snapshot)).is_err());
    frames.resume();

    let mut snapshot = renderer.new_snapshot(RESOLUTION);
    resources.on_render_snapshot(&mut snapshot);
    assert!(frames.push(renderer.render_snapshot(snapshot)).is_ok());

    let mut processor = RenderCommandProcessor::new(DummyBackend::new());
    let buffer = frames.pop().unwrap();
    processor.process(buffer);
    assert!(assets.shader.is_loaded());
}
