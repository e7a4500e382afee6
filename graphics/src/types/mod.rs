//! Common value types and resource descriptors.
//!
//! This module contains colour and resolution values, texture formats and
//! mesh layouts used throughout the render pipeline.

mod common;
mod mesh;
mod texture;

pub use common::{Colour, Resolution};
pub use mesh::{IndexFormat, MeshDescriptor, PolygonType, VertexElement, VertexFormat};
pub use texture::{FilterMode, TextureDescriptor, TextureFormat, WrapMode};
