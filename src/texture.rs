use std::path::Path;

use anyhow::{ensure, Context, Result};
use image::GenericImageView;

use crate::ribbon::MaterialSlot;

const FRONT_PNG: &[u8] = include_bytes!("../assets/ribbon_front.png");
const BACK_PNG: &[u8] = include_bytes!("../assets/ribbon_back.png");

/// Decoded RGBA8 image, tightly packed
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).context("failed to decode ribbon texture")?;
        let (width, height) = image.dimensions();
        ensure!(width > 0 && height > 0, "ribbon texture has invalid dimensions");

        Ok(Self {
            width,
            height,
            rgba: image.to_rgba8().into_raw(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read texture {}", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("in {}", path.display()))
    }

    /// Image shipped with the binary for `slot`
    pub fn embedded(slot: MaterialSlot) -> Result<Self> {
        match slot {
            MaterialSlot::Front => Self::from_bytes(FRONT_PNG),
            MaterialSlot::Back => Self::from_bytes(BACK_PNG),
        }
    }

    /// `path` when given, the embedded image otherwise
    pub fn load(path: Option<&Path>, slot: MaterialSlot) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(slot),
        }
    }
}

/// Sampled ribbon texture living on the GPU
pub struct GpuTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        label: &str,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

/// Linear, anisotropic, wrapping in both directions so scrolling offsets tile
pub fn create_repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Ribbon Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        anisotropy_clamp: 16,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_textures_decode() {
        for slot in [MaterialSlot::Front, MaterialSlot::Back] {
            let image = TextureImage::embedded(slot).unwrap();
            assert!(image.width > 0 && image.height > 0);
            assert_eq!(image.rgba.len(), (image.width * image.height * 4) as usize);
        }
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(TextureImage::from_bytes(b"not an image").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = TextureImage::from_path(Path::new("/nonexistent/ribbon.png")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/ribbon.png"));
    }
}
