//! Cross-command state of the processor.

use frameline_core::math::Vec3;

use crate::resources::ResourceId;
use crate::types::Colour;

/// A bound material or mesh, and whether its backend object exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub id: ResourceId,
    pub usable: bool,
}

/// What is currently bound. Starts empty and is reset by `Begin` and `End`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessorState {
    pub camera_position: Option<Vec3>,
    pub ambient_light: Option<Colour>,
    pub material: Option<Binding>,
    pub mesh: Option<Binding>,
}

impl ProcessorState {
    /// Returns true if nothing is bound.
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Counters gathered while processing one command buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Command lists replayed.
    pub lists: usize,
    /// Commands dispatched.
    pub commands: usize,
    /// Instances drawn.
    pub draw_calls: usize,
    /// Instances skipped because their material or mesh is unusable.
    pub skipped_draws: usize,
    /// Resource loads the backend rejected.
    pub failed_loads: usize,
}
