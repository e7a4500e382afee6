//! Texture types and descriptors.

use super::Resolution;

/// Pixel format of texture staging data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// 8-bit luminance.
    L8,
    /// 8-bit luminance with 8-bit alpha.
    La88,
    /// 8-bit RGB channels.
    Rgb888,
    /// 8-bit RGBA channels.
    #[default]
    Rgba8888,
    /// 4-bit RGBA channels.
    Rgba4444,
    /// 5-6-5 packed RGB.
    Rgb565,
    /// 16-bit depth.
    Depth16,
    /// 32-bit depth.
    Depth32,
}

impl TextureFormat {
    /// Returns the size in bytes per pixel.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            Self::L8 => 1,
            Self::La88 | Self::Rgba4444 | Self::Rgb565 | Self::Depth16 => 2,
            Self::Rgb888 => 3,
            Self::Rgba8888 | Self::Depth32 => 4,
        }
    }

    /// Returns true if this is a depth format.
    pub fn is_depth(&self) -> bool {
        matches!(self, Self::Depth16 | Self::Depth32)
    }
}

/// Texture coordinate wrapping behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Clamp to the edge texel.
    #[default]
    Clamp,
    /// Repeat the texture.
    Repeat,
}

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Bilinear filtering.
    #[default]
    Bilinear,
}

/// Descriptor for a texture resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Size of the texture.
    pub dimensions: Resolution,
    /// Pixel format of the staging data.
    pub format: TextureFormat,
    /// Horizontal wrapping.
    pub wrap_s: WrapMode,
    /// Vertical wrapping.
    pub wrap_t: WrapMode,
    /// Filtering mode.
    pub filter: FilterMode,
    /// Whether mipmaps should be generated on load.
    pub mipmapped: bool,
}

impl TextureDescriptor {
    /// Create a new 2D texture descriptor with default sampling state.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            dimensions: Resolution::new(width, height),
            format,
            wrap_s: WrapMode::default(),
            wrap_t: WrapMode::default(),
            filter: FilterMode::default(),
            mipmapped: false,
        }
    }

    /// Set both wrap modes.
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap_s = wrap;
        self.wrap_t = wrap;
        self
    }

    /// Set the filtering mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Enable mipmap generation.
    pub fn with_mipmaps(mut self) -> Self {
        self.mipmapped = true;
        self
    }

    /// Number of bytes a full upload of this texture occupies.
    pub fn data_size(&self) -> usize {
        self.dimensions.width as usize
            * self.dimensions.height as usize
            * self.format.bytes_per_pixel() as usize
    }
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self::new_2d(1, 1, TextureFormat::default())
    }
}
