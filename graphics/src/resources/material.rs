//! Materials and per-pass material groups.

use std::sync::Arc;

use bitflags::bitflags;

use crate::types::Colour;

use super::{RenderShader, RenderTexture, ResourceId};

bitflags! {
    /// Blend, depth and rasteriser state of a material.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialFlags: u32 {
        /// Alpha blended; drawn in the transparent pass.
        const TRANSPARENT = 1 << 0;
        /// Writes to the depth buffer.
        const DEPTH_WRITE = 1 << 1;
        /// Tests against the depth buffer.
        const DEPTH_TEST = 1 << 2;
        /// Back faces are culled.
        const FACE_CULLING = 1 << 3;
    }
}

impl Default for MaterialFlags {
    fn default() -> Self {
        Self::DEPTH_WRITE | Self::DEPTH_TEST | Self::FACE_CULLING
    }
}

/// A shader plus the textures, colour factors and render state it is drawn
/// with.
#[derive(Debug)]
pub struct RenderMaterial {
    id: ResourceId,
    name: String,
    shader: Arc<RenderShader>,
    textures: Vec<Arc<RenderTexture>>,
    emissive: Colour,
    ambient: Colour,
    diffuse: Colour,
    specular: Colour,
    flags: MaterialFlags,
}

impl RenderMaterial {
    /// Create a material with white diffuse, black emissive and default
    /// render state.
    pub fn new(name: impl Into<String>, shader: Arc<RenderShader>) -> Self {
        Self {
            id: ResourceId::next(),
            name: name.into(),
            shader,
            textures: Vec::new(),
            emissive: Colour::BLACK,
            ambient: Colour::WHITE,
            diffuse: Colour::WHITE,
            specular: Colour::BLACK,
            flags: MaterialFlags::default(),
        }
    }

    /// Bind a texture to the next texture unit.
    pub fn with_texture(mut self, texture: Arc<RenderTexture>) -> Self {
        self.textures.push(texture);
        self
    }

    /// Set the diffuse colour factor.
    pub fn with_diffuse(mut self, colour: Colour) -> Self {
        self.diffuse = colour;
        self
    }

    /// Set the emissive colour factor.
    pub fn with_emissive(mut self, colour: Colour) -> Self {
        self.emissive = colour;
        self
    }

    /// Set the ambient colour factor.
    pub fn with_ambient(mut self, colour: Colour) -> Self {
        self.ambient = colour;
        self
    }

    /// Set the specular colour factor.
    pub fn with_specular(mut self, colour: Colour) -> Self {
        self.specular = colour;
        self
    }

    /// Replace the render state flags.
    pub fn with_flags(mut self, flags: MaterialFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shader program.
    pub fn shader(&self) -> &Arc<RenderShader> {
        &self.shader
    }

    /// Bound textures in unit order.
    pub fn textures(&self) -> &[Arc<RenderTexture>] {
        &self.textures
    }

    pub fn emissive(&self) -> Colour {
        self.emissive
    }

    pub fn ambient(&self) -> Colour {
        self.ambient
    }

    pub fn diffuse(&self) -> Colour {
        self.diffuse
    }

    pub fn specular(&self) -> Colour {
        self.specular
    }

    /// Render state flags.
    pub fn flags(&self) -> MaterialFlags {
        self.flags
    }

    /// Returns true if the material is alpha blended.
    pub fn is_transparent(&self) -> bool {
        self.flags.contains(MaterialFlags::TRANSPARENT)
    }
}

/// Identifies one forward render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderPassKind {
    /// Unlit base colour and ambient term.
    Base,
    /// Additive pass per directional light.
    DirectionalLight,
    /// Additive pass per point light.
    PointLight,
    /// Background drawn behind the opaque scene.
    Skybox,
    /// Alpha blended geometry, also used by the UI layer.
    Transparent,
}

impl RenderPassKind {
    /// Number of pass kinds.
    pub const COUNT: usize = 5;

    /// Every pass kind in draw order.
    pub const ALL: [RenderPassKind; Self::COUNT] = [
        Self::Base,
        Self::DirectionalLight,
        Self::PointLight,
        Self::Skybox,
        Self::Transparent,
    ];

    /// Dense index of the pass kind.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::DirectionalLight => "directional",
            Self::PointLight => "point",
            Self::Skybox => "skybox",
            Self::Transparent => "transparent",
        }
    }
}

/// Per-pass material table of a Render Object.
///
/// A group with no material for a pass opts out of that pass.
#[derive(Debug)]
pub struct RenderMaterialGroup {
    id: ResourceId,
    name: String,
    materials: [Option<Arc<RenderMaterial>>; RenderPassKind::COUNT],
}

impl RenderMaterialGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::next(),
            name: name.into(),
            materials: Default::default(),
        }
    }

    /// Set the material used for `pass`.
    pub fn with_material(mut self, pass: RenderPassKind, material: Arc<RenderMaterial>) -> Self {
        self.materials[pass.index()] = Some(material);
        self
    }

    /// Unique identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The material for `pass`, if the group takes part in it.
    pub fn material(&self, pass: RenderPassKind) -> Option<&Arc<RenderMaterial>> {
        self.materials[pass.index()].as_ref()
    }

    /// Iterate over the defined materials with their pass.
    pub fn materials(&self) -> impl Iterator<Item = (RenderPassKind, &Arc<RenderMaterial>)> {
        RenderPassKind::ALL
            .into_iter()
            .filter_map(|pass| self.material(pass).map(|material| (pass, material)))
    }
}

static_assertions::assert_impl_all!(RenderMaterial: Send, Sync);
static_assertions::assert_impl_all!(RenderMaterialGroup: Send, Sync);
