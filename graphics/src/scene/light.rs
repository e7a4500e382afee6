//! Light descriptors captured per frame.

use frameline_core::math::{Sphere, Vec3};

use crate::types::Colour;

/// Uniform ambient light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientRenderLight {
    pub colour: Colour,
}

impl AmbientRenderLight {
    pub fn new(colour: Colour) -> Self {
        Self { colour }
    }

    /// Combine several ambient lights into one by summing their colours.
    pub fn combined(lights: &[AmbientRenderLight]) -> Self {
        lights
            .iter()
            .fold(Self::default(), |acc, light| Self::new(acc.colour.add_rgb(light.colour)))
    }
}

impl Default for AmbientRenderLight {
    fn default() -> Self {
        Self::new(Colour::BLACK)
    }
}

/// Light arriving from a single direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalRenderLight {
    pub colour: Colour,
    /// Normalised direction the light travels in.
    pub direction: Vec3,
}

impl DirectionalRenderLight {
    pub fn new(colour: Colour, direction: Vec3) -> Self {
        Self {
            colour,
            direction: direction.try_normalize(f32::EPSILON).unwrap_or(-Vec3::z()),
        }
    }
}

/// Point light with distance attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRenderLight {
    pub colour: Colour,
    pub position: Vec3,
    /// Constant, linear and quadratic attenuation factors.
    pub attenuation: Vec3,
    /// Distance past which the light has no visible effect.
    pub range_of_influence: f32,
}

impl PointRenderLight {
    pub fn new(colour: Colour, position: Vec3, attenuation: Vec3, range_of_influence: f32) -> Self {
        Self {
            colour,
            position,
            attenuation,
            range_of_influence,
        }
    }

    /// Volume lit by this light.
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::new(self.position, self.range_of_influence)
    }
}
