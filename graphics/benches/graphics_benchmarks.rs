use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use frameline_core::compute::TaskPool;
use frameline_core::math::{Sphere, Vec3, mat4_from_translation};
use frameline_graphics::pass::sort::opaque_sort;
use frameline_graphics::pass::{
    AcceptAll, calculate_visible_objects_with_batch_size, compile_render_pass,
    get_base_render_pass_objects,
};
use frameline_graphics::{
    AmbientRenderLight, Colour, DirectionalRenderLight, DummyBackend, MeshDescriptor,
    RenderCommandProcessor, RenderMaterial, RenderMaterialGroup, RenderMesh, RenderObject,
    RenderObjectMesh, RenderPassKind, RenderShader, Renderer, RendererConfig, Resolution,
    VertexFormat,
};

fn scene_objects(count: usize, num_materials: usize) -> Vec<RenderObject> {
    let shader = Arc::new(RenderShader::new("bench", "", ""));
    let mesh = Arc::new(RenderMesh::new(
        "bench",
        MeshDescriptor::new(VertexFormat::static_mesh(), 3, 3)
            .with_bounding_sphere(Sphere::new(Vec3::zeros(), 1.0)),
    ));
    let groups: Vec<Arc<RenderMaterialGroup>> = (0..num_materials)
        .map(|i| {
            let material = Arc::new(RenderMaterial::new(format!("m{}", i), shader.clone()));
            Arc::new(
                RenderMaterialGroup::new(format!("g{}", i))
                    .with_material(RenderPassKind::Base, material.clone())
                    .with_material(RenderPassKind::DirectionalLight, material),
            )
        })
        .collect();
    (0..count)
        .map(|i| {
            RenderObject::new(
                groups[i % num_materials].clone(),
                RenderObjectMesh::Static(mesh.clone()),
                mat4_from_translation(Vec3::new(i as f32, 0.0, -(i as f32))),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Culling and sorting
// ---------------------------------------------------------------------------

fn bench_visibility(c: &mut Criterion) {
    let objects = scene_objects(10_000, 16);
    let pass_objects = get_base_render_pass_objects(&objects);
    let pool = TaskPool::default_threads();
    let camera = Default::default();

    let mut group = c.benchmark_group("calculate_visible_objects_10k");
    for batch_size in [25, 250, 2500] {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    calculate_visible_objects_with_batch_size(
                        &pool.context(),
                        &camera,
                        black_box(&pass_objects),
                        &AcceptAll,
                        batch_size,
                    )
                });
            },
        );
    }
    group.finish();
}

fn bench_compile_render_pass(c: &mut Criterion) {
    let objects = scene_objects(10_000, 16);
    let pass_objects = get_base_render_pass_objects(&objects);
    let pool = TaskPool::default_threads();
    let camera = Default::default();

    c.bench_function("compile_render_pass_10k_opaque", |b| {
        b.iter(|| {
            compile_render_pass(
                &pool.context(),
                &camera,
                AmbientRenderLight::default(),
                black_box(&pass_objects),
                &AcceptAll,
                opaque_sort,
            )
        });
    });
}

// ---------------------------------------------------------------------------
// Whole frame
// ---------------------------------------------------------------------------

fn bench_frame(c: &mut Criterion) {
    let objects = scene_objects(2_000, 8);
    let mut renderer = Renderer::new(RendererConfig::default()).expect("default config is valid");
    let mut processor = RenderCommandProcessor::new(DummyBackend::new());

    c.bench_function("render_and_process_frame_2k", |b| {
        b.iter(|| {
            let mut snapshot = renderer.new_snapshot(Resolution::new(1280, 720));
            snapshot.add_render_ambient_light(AmbientRenderLight::new(Colour::rgb(0.1, 0.1, 0.1)));
            snapshot.add_render_directional_light(DirectionalRenderLight::new(
                Colour::WHITE,
                Vec3::new(0.0, -1.0, 0.0),
            ));
            for object in &objects {
                snapshot.add_render_object(object.clone());
            }
            let buffer = renderer.render_snapshot(snapshot);
            let stats = processor.process(buffer);
            processor.backend_mut().take_calls();
            black_box(stats)
        });
    });
}

criterion_group!(benches, bench_visibility, bench_compile_render_pass, bench_frame);
criterion_main!(benches);
