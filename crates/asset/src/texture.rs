//! Texture data for material maps (RGBA8).

use std::path::Path;

use anyhow::Context;
use corelib::Vec4;

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Create a new texture with given dimensions and RGBA8 format.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<Self> {
        let expected = byte_len(width, height, 4);
        anyhow::ensure!(
            expected == Some(data.len()),
            "{} bytes do not match a {width}x{height} RGBA8 texture",
            data.len()
        );
        Ok(Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        })
    }

    /// Load a texture file (PNG or TGA) and convert it to RGBA8.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path)
            .with_context(|| format!("Failed to open image {path:?}"))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Self::new_rgba8(width, height, data)
    }

    /// 1x1 texture of a single color, components clamped to `[0, 1]`.
    pub fn solid(color: Vec4) -> Self {
        let data = color
            .clamp(Vec4::ZERO, Vec4::ONE)
            .to_array()
            .map(|c| (c * 255.0).round() as u8)
            .to_vec();
        Self {
            data,
            width: 1,
            height: 1,
            format: TextureFormat::Rgba8,
        }
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = byte_len(self.width, self.height, self.bytes_per_pixel());
        expected_size == Some(self.data.len()) && self.width > 0 && self.height > 0
    }
}

/// `width * height * bytes_per_pixel`, or `None` if it does not fit `usize`.
fn byte_len(width: u32, height: u32, bytes_per_pixel: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(bytes_per_pixel as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::vec4;

    #[test]
    fn solid_texture_is_one_pixel() {
        let texture = TextureData::solid(vec4(1.0, 0.5, -1.0, 2.0));
        assert!(texture.is_valid());
        assert_eq!(texture.data, vec![255, 128, 0, 255]);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        assert!(TextureData::new_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(TextureData::new_rgba8(2, 2, vec![0; 16]).unwrap().is_valid());
    }

    #[test]
    fn huge_dimensions_do_not_wrap() {
        // 65536 * 65536 * 4 wraps to 0 in 32-bit arithmetic.
        assert!(TextureData::new_rgba8(65_536, 65_536, Vec::new()).is_err());
        let texture = TextureData {
            data: Vec::new(),
            width: u32::MAX,
            height: u32::MAX,
            format: TextureFormat::Rgba8,
        };
        assert!(!texture.is_valid());
        assert_eq!(byte_len(u32::MAX, u32::MAX, 4), None);
        assert_eq!(byte_len(2, 3, 4), Some(24));
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = std::env::temp_dir().join(format!("glus-texture-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("checker.png");
        let mut img = image::RgbaImage::new(2, 2);
        img.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let texture = TextureData::load(&path).unwrap();
        assert_eq!((texture.width, texture.height), (2, 2));
        assert_eq!(&texture.data[4..8], &[255, 0, 0, 255]);

        assert!(TextureData::load(dir.join("missing.png")).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
