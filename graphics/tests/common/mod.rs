//! Scene-building helpers shared by the pipeline integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use frameline_core::compute::TaskPool;
use frameline_core::math::{Mat4, Sphere, Vec3, mat4_from_translation};
use frameline_graphics::{
    MaterialFlags, MeshDescriptor, RenderCommandList, RenderMaterial, RenderMaterialGroup,
    RenderMesh, RenderObject, RenderObjectMesh, RenderPassKind, RenderShader, VertexFormat,
};

/// Worker thread counts the parallel stages are exercised with.
pub const THREAD_COUNTS: [usize; 3] = [1, 2, 8];

pub fn task_pool(threads: usize) -> TaskPool {
    TaskPool::new(threads)
}

/// A shader, mesh and per-pass materials that can be loaded together.
pub struct TestAssets {
    pub shader: Arc<RenderShader>,
    pub mesh: Arc<RenderMesh>,
    pub group: Arc<RenderMaterialGroup>,
}

impl TestAssets {
    /// Assets with an opaque material for each of `passes`.
    pub fn new(name: &str, passes: &[RenderPassKind]) -> Self {
        let shader = Arc::new(RenderShader::new(
            format!("{}_shader", name),
            "void main() {}",
            "void main() {}",
        ));
        let mesh = Arc::new(triangle_mesh(name));
        let group = passes
            .iter()
            .fold(RenderMaterialGroup::new(name), |group, pass| {
                let material = RenderMaterial::new(
                    format!("{}_{}", name, pass.name()),
                    shader.clone(),
                );
                let material = if *pass == RenderPassKind::Transparent {
                    material.with_flags(MaterialFlags::TRANSPARENT | MaterialFlags::DEPTH_TEST)
                } else {
                    material
                };
                group.with_material(*pass, Arc::new(material))
            });
        Self {
            shader,
            mesh,
            group: Arc::new(group),
        }
    }

    /// Material used for `pass`.
    pub fn material(&self, pass: RenderPassKind) -> &Arc<RenderMaterial> {
        self.group
            .material(pass)
            .unwrap_or_else(|| panic!("no material for {}", pass.name()))
    }

    /// Append load commands for the shader and mesh.
    pub fn add_load_commands(&self, list: &mut RenderCommandList) {
        list.add_load_shader_command(&self.shader);
        list.add_load_mesh_command(
            &self.mesh,
            vec![0; self.mesh.descriptor().vertex_data_size()],
            vec![0, 1, 2],
        );
        list.add_load_material_group_command(&self.group);
    }

    /// A Render Object drawing the mesh at `position`.
    pub fn object_at(&self, position: Vec3) -> RenderObject {
        RenderObject::new(
            self.group.clone(),
            RenderObjectMesh::Static(self.mesh.clone()),
            mat4_from_translation(position),
        )
    }
}

/// Unit-sphere bounded triangle.
pub fn triangle_mesh(name: &str) -> RenderMesh {
    RenderMesh::new(
        format!("{}_mesh", name),
        MeshDescriptor::new(VertexFormat::static_mesh(), 3, 3)
            .with_bounding_sphere(Sphere::new(Vec3::zeros(), 1.0)),
    )
}

/// Camera at `position` with an identity projection.
pub fn camera_at(position: Vec3) -> frameline_graphics::RenderCamera {
    frameline_graphics::RenderCamera::new(mat4_from_translation(position), Mat4::identity())
}
