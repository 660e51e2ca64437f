use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ribbon::MaterialSlot;
use crate::types::MaterialUniform;

/// `uv' = uv * repeat + offset`, sampled with repeat addressing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureTransform {
    pub repeat: Vec2,
    pub offset: Vec2,
}

impl TextureTransform {
    /// Front face: flipped vertically, started half a turn along the band
    pub fn front() -> Self {
        Self {
            repeat: Vec2::new(1.0, -1.0),
            offset: Vec2::new(0.5, 0.0),
        }
    }

    /// Back face: mirrored on both axes so the image reads correctly from behind
    pub fn back() -> Self {
        Self {
            repeat: Vec2::new(-1.0, -1.0),
            offset: Vec2::new(0.5, 0.0),
        }
    }

    pub fn apply(&self, uv: Vec2) -> Vec2 {
        uv * self.repeat + self.offset
    }
}

/// Surface response shared by both ribbon faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    pub roughness: f32,
    pub metalness: f32,
    /// Fragments with alpha below this are discarded. A boolean alpha test
    /// (`true` coerced to 1.0) would drop every texel that is not fully
    /// opaque, antialiased edges included; 0.5 keeps those edges.
    pub alpha_cutoff: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            roughness: 0.65,
            metalness: 0.25,
            alpha_cutoff: 0.5,
        }
    }
}

/// One textured face of the ribbon
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub slot: MaterialSlot,
    pub transform: TextureTransform,
    pub surface: SurfaceParams,
}

impl Material {
    pub fn new(slot: MaterialSlot, surface: SurfaceParams) -> Self {
        let transform = match slot {
            MaterialSlot::Front => TextureTransform::front(),
            MaterialSlot::Back => TextureTransform::back(),
        };
        Self {
            slot,
            transform,
            surface,
        }
    }

    pub fn set_offset_x(&mut self, x: f32) {
        self.transform.offset.x = x;
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            uv_repeat: self.transform.repeat.to_array(),
            uv_offset: self.transform.offset.to_array(),
            roughness: self.surface.roughness,
            metalness: self.surface.metalness,
            alpha_cutoff: self.surface.alpha_cutoff,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_transform_flips_v() {
        let uv = TextureTransform::front().apply(Vec2::new(0.25, 1.0));
        assert!((uv - Vec2::new(0.75, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_back_transform_mirrors_u() {
        let uv = TextureTransform::back().apply(Vec2::new(0.25, 0.0));
        assert!((uv - Vec2::new(0.25, 0.0)).length() < 1e-6);
        let uv = TextureTransform::back().apply(Vec2::new(1.0, 0.0));
        assert!((uv - Vec2::new(-0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_offset_update_reaches_uniform() {
        let mut material = Material::new(MaterialSlot::Back, SurfaceParams::default());
        material.set_offset_x(-0.3);
        let uniform = material.to_uniform();
        assert_eq!(uniform.uv_offset, [-0.3, 0.0]);
        assert_eq!(uniform.uv_repeat, [-1.0, -1.0]);
        assert_eq!(uniform.roughness, 0.65);
    }

    #[test]
    fn test_default_alpha_cutoff_keeps_soft_edges() {
        let surface = SurfaceParams::default();
        assert_eq!(surface.alpha_cutoff, 0.5);

        let uniform = Material::new(MaterialSlot::Front, surface).to_uniform();
        assert_eq!(uniform.alpha_cutoff, 0.5);
        assert!(uniform.alpha_cutoff < 1.0);
    }
}
