//! Native textures with power-of-two dimensions.
//!
//! OpenGL ES 1.x only accepts power-of-two textures, so every upload goes
//! through [`valid_texture_dimension`]. Raw pixel uploads are padded onto a
//! square canvas; decoded images (with the `image` feature) are rescaled.

use ember_core::geometry::Size;
use ember_core::profiling::profile_function;
use ember_test_utils::{RenderSurface, TextureHandle};

/// Errors that can occur while creating a texture.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    /// Pixel buffer length does not match `width * height * channels`.
    SizeMismatch { expected: usize, actual: usize },

    /// Image has a zero width or height.
    EmptyImage,

    /// Image data could not be decoded.
    Decode(String),
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::SizeMismatch { expected, actual } => write!(
                f,
                "Pixel buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            TextureError::EmptyImage => write!(f, "Image has no pixels"),
            TextureError::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
        }
    }
}

impl std::error::Error for TextureError {}

#[cfg(feature = "image")]
impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        TextureError::Decode(err.to_string())
    }
}

/// Result type for texture operations.
pub type TextureResult<T> = Result<T, TextureError>;

/// Smallest power of two that is `>= size`.
///
/// ```
/// use ember_render::valid_texture_dimension;
///
/// assert_eq!(valid_texture_dimension(100), 128);
/// assert_eq!(valid_texture_dimension(256), 256);
/// ```
pub fn valid_texture_dimension(size: u32) -> u32 {
    size.max(1).next_power_of_two()
}

/// A texture living in the native context.
///
/// The texture does not free itself on drop since it has no access to the
/// surface; call [`Texture::release`] when done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    handle: TextureHandle,
    size: Size<u32>,
    content_size: Size<u32>,
    source_size: Size<u32>,
    transparent: bool,
}

impl Texture {
    /// Upload tightly packed RGBA8 (`transparent`) or RGB8 pixels.
    ///
    /// Non power-of-two images are padded to a square canvas; the original
    /// image occupies the top-left corner, see [`Texture::content_uv`].
    pub fn upload_rgba(
        surface: &dyn RenderSurface,
        width: u32,
        height: u32,
        pixels: &[u8],
        transparent: bool,
    ) -> TextureResult<Self> {
        profile_function!();

        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage);
        }

        let channels = if transparent { 4 } else { 3 };
        let expected = width as usize * height as usize * channels;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let dim = valid_texture_dimension(width).max(valid_texture_dimension(height));
        let handle = if dim == width && dim == height {
            surface.create_rgba_texture(dim, dim, pixels, transparent)
        } else {
            let row = width as usize * channels;
            let padded_row = dim as usize * channels;
            let mut padded = vec![0u8; padded_row * dim as usize];
            for (src, dst) in pixels
                .chunks_exact(row)
                .zip(padded.chunks_exact_mut(padded_row))
            {
                dst[..row].copy_from_slice(src);
            }
            surface.create_rgba_texture(dim, dim, &padded, transparent)
        };

        tracing::debug!(
            "Uploaded {}x{} texture as {}x{} (transparent: {})",
            width,
            height,
            dim,
            dim,
            transparent
        );

        Ok(Self {
            handle,
            size: Size::new(dim, dim),
            content_size: Size::new(width, height),
            source_size: Size::new(width, height),
            transparent,
        })
    }

    /// Decode an encoded image (PNG) and upload it, rescaled to a square
    /// power-of-two texture.
    #[cfg(feature = "image")]
    pub fn decode(
        surface: &dyn RenderSurface,
        bytes: &[u8],
        transparent: bool,
    ) -> TextureResult<Self> {
        profile_function!();

        let image = image::load_from_memory(bytes)?;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage);
        }

        let dim = valid_texture_dimension(width).max(valid_texture_dimension(height));
        let image = if dim != width || dim != height {
            image.resize_exact(dim, dim, image::imageops::FilterType::Triangle)
        } else {
            image
        };

        let pixels = if transparent {
            image.to_rgba8().into_raw()
        } else {
            image.to_rgb8().into_raw()
        };

        let mut texture = Self::upload_rgba(surface, dim, dim, &pixels, transparent)?;
        texture.source_size = Size::new(width, height);
        Ok(texture)
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Uploaded (power-of-two) size.
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// Size of the image before it was padded or rescaled.
    pub fn source_size(&self) -> Size<u32> {
        self.source_size
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Bottom-right UV of the image content.
    ///
    /// `(1.0, 1.0)` unless the texture was padded by [`Texture::upload_rgba`].
    pub fn content_uv(&self) -> (f32, f32) {
        (
            self.content_size.width as f32 / self.size.width as f32,
            self.content_size.height as f32 / self.size.height as f32,
        )
    }

    /// Delete the native texture.
    pub fn release(self, surface: &dyn RenderSurface) {
        surface.delete_texture(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_test_utils::MockRenderSurface;

    #[test]
    fn test_valid_texture_dimension() {
        assert_eq!(valid_texture_dimension(0), 1);
        assert_eq!(valid_texture_dimension(1), 1);
        assert_eq!(valid_texture_dimension(3), 4);
        assert_eq!(valid_texture_dimension(64), 64);
        assert_eq!(valid_texture_dimension(65), 128);
    }

    #[test]
    fn test_upload_power_of_two_unpadded() {
        let surface = MockRenderSurface::new();
        let pixels = vec![255u8; 4 * 4 * 4];

        let texture = Texture::upload_rgba(&surface, 4, 4, &pixels, true).unwrap();

        assert_eq!(texture.size(), Size::new(4, 4));
        assert_eq!(texture.content_uv(), (1.0, 1.0));
        assert_eq!(surface.texture(texture.handle()).unwrap().data, pixels);
    }

    #[test]
    fn test_upload_pads_to_square() {
        let surface = MockRenderSurface::new();
        let pixels = vec![7u8; 3 * 2 * 3];

        let texture = Texture::upload_rgba(&surface, 3, 2, &pixels, false).unwrap();
        let uploaded = surface.texture(texture.handle()).unwrap();

        assert_eq!(texture.size(), Size::new(4, 4));
        assert_eq!(texture.content_uv(), (0.75, 0.5));
        assert_eq!(uploaded.channels, 3);
        assert_eq!(uploaded.data.len(), 4 * 4 * 3);
        assert_eq!(&uploaded.data[..9], &[7u8; 9]);
        assert_eq!(&uploaded.data[9..12], &[0u8; 3]);
        assert!(uploaded.data[2 * 12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_upload_rejects_bad_length() {
        let surface = MockRenderSurface::new();
        let result = Texture::upload_rgba(&surface, 2, 2, &[0u8; 5], true);

        assert_eq!(
            result,
            Err(TextureError::SizeMismatch {
                expected: 16,
                actual: 5
            })
        );
        assert_eq!(surface.count_texture_creates(), 0);
    }

    #[test]
    fn test_release_deletes_texture() {
        let surface = MockRenderSurface::new();
        let texture = Texture::upload_rgba(&surface, 1, 1, &[1, 2, 3], false).unwrap();

        texture.release(&surface);

        assert!(surface.texture(texture.handle()).is_none());
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_decode_png_rescales() {
        let mut png = Vec::new();
        let image = image::RgbaImage::from_pixel(3, 5, image::Rgba([10, 20, 30, 255]));
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let surface = MockRenderSurface::new();
        let texture = Texture::decode(&surface, &png, true).unwrap();

        assert_eq!(texture.size(), Size::new(8, 8));
        assert_eq!(texture.source_size(), Size::new(3, 5));
        assert_eq!(texture.content_uv(), (1.0, 1.0));
        assert_eq!(surface.texture(texture.handle()).unwrap().data.len(), 8 * 8 * 4);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_decode_garbage_fails() {
        let surface = MockRenderSurface::new();
        let result = Texture::decode(&surface, b"not an image", false);
        assert!(matches!(result, Err(TextureError::Decode(_))));
    }
}
