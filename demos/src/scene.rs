//! A small animated scene: a grid of lit cubes, a few glass panes, a skybox
//! and a per-frame HUD badge drawn in the UI layer.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use frameline_core::math::{Mat4, Sphere, Vec3, mat4_from_translation};
use frameline_graphics::types::{PolygonType, VertexElement};
use frameline_graphics::{
    AmbientRenderLight, Colour, DirectionalRenderLight, MaterialFlags, MeshDescriptor,
    PointRenderLight, RenderCamera, RenderDynamicMesh, RenderMaterial, RenderMaterialGroup,
    RenderLayer, RenderMesh, RenderObject, RenderObjectMesh, RenderPassKind, RenderShader,
    RenderSnapshot, RenderTexture, ResourceCommandQueue, TextureDescriptor, TextureFormat,
    VertexFormat,
};

/// Size of the HUD badge in pixels.
const HUD_SIZE: f32 = 48.0;

const LIT_VERTEX_SHADER: &str = "uniform mat4 u_wvp; attribute vec4 a_position; \
    void main() { gl_Position = u_wvp * a_position; }";
const LIT_FRAGMENT_SHADER: &str = "uniform vec4 u_ambient; \
    void main() { gl_FragColor = u_ambient; }";

/// Interleaved position, normal and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct StaticVertex {
    position: [f32; 4],
    normal: [f32; 3],
    uv: [f32; 2],
}

/// Interleaved position, texture coordinate and packed colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SpriteVertex {
    position: [f32; 4],
    uv: [f32; 2],
    colour: [u8; 4],
}

/// Resources shared by every frame of the demo.
pub struct DemoScene {
    shader: Arc<RenderShader>,
    texture: Arc<RenderTexture>,
    cube: Arc<RenderMesh>,
    lit: Arc<RenderMaterialGroup>,
    glass: Arc<RenderMaterialGroup>,
    sky: Arc<RenderMaterialGroup>,
    sprite: Arc<RenderMaterialGroup>,
    num_objects: usize,
}

impl DemoScene {
    pub fn new(num_objects: usize) -> Self {
        let shader = Arc::new(RenderShader::new(
            "lit",
            LIT_VERTEX_SHADER,
            LIT_FRAGMENT_SHADER,
        ));
        let texture = Arc::new(RenderTexture::new(
            "checker",
            TextureDescriptor::new_2d(8, 8, TextureFormat::Rgba8888),
        ));
        let cube = Arc::new(RenderMesh::new(
            "cube",
            MeshDescriptor::new(VertexFormat::static_mesh(), 8, 36)
                .with_bounding_sphere(Sphere::new(Vec3::zeros(), 3.0_f32.sqrt())),
        ));

        let opaque = Arc::new(
            RenderMaterial::new("cube_base", shader.clone())
                .with_texture(texture.clone())
                .with_diffuse(Colour::rgb(0.8, 0.8, 0.8)),
        );
        let additive = Arc::new(
            RenderMaterial::new("cube_light", shader.clone())
                .with_flags(MaterialFlags::DEPTH_TEST | MaterialFlags::FACE_CULLING),
        );
        let lit = Arc::new(
            RenderMaterialGroup::new("cube")
                .with_material(RenderPassKind::Base, opaque)
                .with_material(RenderPassKind::DirectionalLight, additive.clone())
                .with_material(RenderPassKind::PointLight, additive),
        );

        let glass_material = Arc::new(
            RenderMaterial::new("glass", shader.clone())
                .with_flags(MaterialFlags::TRANSPARENT | MaterialFlags::DEPTH_TEST)
                .with_diffuse(Colour::new(0.6, 0.8, 1.0, 0.4)),
        );
        let glass = Arc::new(
            RenderMaterialGroup::new("glass")
                .with_material(RenderPassKind::Transparent, glass_material),
        );

        let sky_material = Arc::new(
            RenderMaterial::new("sky", shader.clone())
                .with_flags(MaterialFlags::DEPTH_TEST)
                .with_emissive(Colour::rgb(0.2, 0.3, 0.5)),
        );
        let sky = Arc::new(
            RenderMaterialGroup::new("sky")
                .with_material(RenderPassKind::Skybox, sky_material),
        );

        let sprite_material = Arc::new(
            RenderMaterial::new("sprite", shader.clone())
                .with_flags(MaterialFlags::TRANSPARENT),
        );
        let sprite = Arc::new(
            RenderMaterialGroup::new("sprite")
                .with_material(RenderPassKind::Transparent, sprite_material),
        );

        Self {
            shader,
            texture,
            cube,
            lit,
            glass,
            sky,
            sprite,
            num_objects,
        }
    }

    /// Queue the loads for every resource of the scene.
    pub fn queue_loads(&self, resources: &ResourceCommandQueue) {
        resources.load_shader(&self.shader);
        resources.load_texture(&self.texture, checker_pixels(8, 8));
        let (vertices, indices) = cube_geometry();
        resources.load_mesh(&self.cube, bytemuck::cast_slice(&vertices).to_vec(), indices);
        resources.load_material_group(&self.lit);
        resources.load_material_group(&self.glass);
        resources.load_material_group(&self.sky);
        resources.load_material_group(&self.sprite);
    }

    /// Queue the unloads for every resource of the scene.
    pub fn queue_unloads(&self, resources: &ResourceCommandQueue) {
        resources.unload_material_group(self.sprite.clone());
        resources.unload_material_group(self.sky.clone());
        resources.unload_material_group(self.glass.clone());
        resources.unload_material_group(self.lit.clone());
        resources.unload_mesh(self.cube.clone());
        resources.unload_texture(self.texture.clone());
        resources.unload_shader(self.shader.clone());
    }

    /// Fill `snapshot` with the scene as it looks at `frame`.
    pub fn populate(&self, snapshot: &mut RenderSnapshot, frame: u64) {
        frameline_core::profile_function!();

        let time = frame as f32 / 60.0;
        let aspect = snapshot.resolution().aspect_ratio();
        snapshot.set_render_camera(RenderCamera::perspective(
            mat4_from_translation(Vec3::new(0.0, 4.0, 20.0)),
            std::f32::consts::FRAC_PI_3,
            aspect,
            0.1,
            200.0,
        ));

        snapshot.add_render_ambient_light(AmbientRenderLight::new(Colour::rgb(0.05, 0.05, 0.08)));
        snapshot.add_render_ambient_light(AmbientRenderLight::new(Colour::rgb(0.05, 0.04, 0.02)));
        snapshot.add_render_directional_light(DirectionalRenderLight::new(
            Colour::rgb(1.0, 0.95, 0.9),
            Vec3::new(-0.3, -1.0, -0.2),
        ));
        snapshot.add_render_point_light(PointRenderLight::new(
            Colour::rgb(1.0, 0.4, 0.2),
            Vec3::new(4.0 * time.cos(), 1.0, 4.0 * time.sin()),
            Vec3::new(1.0, 0.1, 0.01),
            6.0,
        ));

        let side = (self.num_objects as f32).sqrt().ceil().max(1.0) as usize;
        for i in 0..self.num_objects {
            let x = (i % side) as f32 * 3.0 - side as f32 * 1.5;
            let z = -((i / side) as f32) * 3.0;
            let bob = (time + i as f32 * 0.3).sin() * 0.5;
            snapshot.add_render_object(RenderObject::new(
                self.lit.clone(),
                RenderObjectMesh::Static(self.cube.clone()),
                mat4_from_translation(Vec3::new(x, bob, z)),
            ));
        }

        for pane in 0..3 {
            snapshot.add_render_object(RenderObject::new(
                self.glass.clone(),
                RenderObjectMesh::Static(self.cube.clone()),
                mat4_from_translation(Vec3::new(pane as f32 * 4.0 - 4.0, 1.0, 5.0)),
            ));
        }

        snapshot.add_render_object(
            RenderObject::new(
                self.sky.clone(),
                RenderObjectMesh::Static(self.cube.clone()),
                Mat4::new_scaling(100.0),
            )
            .with_layer(RenderLayer::Skybox),
        );

        // Backdrop first, then the pulsing badge on top of it.
        let hud_centre = Vec3::new(HUD_SIZE, HUD_SIZE, 0.5);
        let pulse = ((time.sin() * 0.5 + 0.5) * 255.0) as u8;
        for (priority, alpha, scale) in [(0, 160, 1.25), (1, pulse, 1.0)] {
            let quad = snapshot.add_render_dynamic_mesh(sprite_quad(alpha));
            let world_matrix =
                mat4_from_translation(hud_centre) * Mat4::new_scaling(HUD_SIZE * 0.5 * scale);
            snapshot.add_render_object(
                RenderObject::new(
                    self.sprite.clone(),
                    RenderObjectMesh::Dynamic(quad),
                    world_matrix,
                )
                .with_bounding_sphere(Sphere::new(hud_centre, HUD_SIZE * scale))
                .with_layer(RenderLayer::Ui)
                .with_priority(priority),
            );
        }
    }
}

fn checker_pixels(width: u32, height: u32) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let on = ((i % width) + (i / width)) % 2 == 0;
            if on {
                [255, 255, 255, 255]
            } else {
                [32, 32, 32, 255]
            }
        })
        .collect()
}

fn cube_geometry() -> (Vec<StaticVertex>, Vec<u16>) {
    let vertices = (0..8)
        .map(|corner| {
            let sign = |bit: u32| if corner & bit == 0 { -1.0 } else { 1.0 };
            let position = [sign(1), sign(2), sign(4), 1.0];
            let length = 3.0_f32.sqrt();
            StaticVertex {
                position,
                normal: [position[0] / length, position[1] / length, position[2] / length],
                uv: [(corner & 1) as f32, ((corner >> 1) & 1) as f32],
            }
        })
        .collect();
    let indices = vec![
        0, 2, 1, 1, 2, 3, // -z
        4, 5, 6, 5, 7, 6, // +z
        0, 1, 4, 1, 5, 4, // -y
        2, 6, 3, 3, 6, 7, // +y
        0, 4, 2, 2, 4, 6, // -x
        1, 3, 5, 3, 7, 5, // +x
    ];
    (vertices, indices)
}

fn sprite_quad(alpha: u8) -> RenderDynamicMesh {
    let corner = |x: f32, y: f32| SpriteVertex {
        position: [x, y, 0.0, 1.0],
        uv: [x * 0.5 + 0.5, y * 0.5 + 0.5],
        colour: [255, 255, 255, alpha],
    };
    let vertices = [
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(-1.0, 1.0),
        corner(1.0, 1.0),
    ];
    RenderDynamicMesh::from_vertices(
        PolygonType::TriangleStrip,
        VertexFormat::new(vec![
            VertexElement::Position4,
            VertexElement::Uv2,
            VertexElement::Colour4,
        ]),
        &vertices,
        &[0, 1, 2, 3],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layouts_match_formats() {
        assert_eq!(
            std::mem::size_of::<StaticVertex>(),
            VertexFormat::static_mesh().stride() as usize
        );
        assert_eq!(
            std::mem::size_of::<SpriteVertex>(),
            VertexFormat::sprite().stride() as usize
        );
    }

    #[test]
    fn cube_matches_descriptor() {
        let (vertices, indices) = cube_geometry();
        let descriptor = MeshDescriptor::new(VertexFormat::static_mesh(), 8, 36);
        assert_eq!(
            bytemuck::cast_slice::<_, u8>(&vertices).len(),
            descriptor.vertex_data_size()
        );
        assert_eq!(indices.len(), 36);
    }

    #[test]
    fn populated_snapshot_has_every_object() {
        let scene = DemoScene::new(10);
        let mut snapshot =
            RenderSnapshot::new(frameline_graphics::Resolution::new(64, 64), Colour::BLACK);
        scene.populate(&mut snapshot, 0);
        let objects = snapshot.claim_render_objects();
        assert_eq!(objects.len(), 10 + 3 + 1 + 2);
        let ui: Vec<i32> = objects
            .iter()
            .filter(|object| object.layer() == RenderLayer::Ui)
            .map(RenderObject::priority)
            .collect();
        assert_eq!(ui, vec![0, 1]);
    }
}
