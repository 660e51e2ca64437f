use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::animation::AnimationParams;
use crate::camera::CameraParams;
use crate::material::SurfaceParams;
use crate::ribbon::{RibbonParams, DEFAULT_POLAR_JITTER};
use crate::scene::LightParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ribbon".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    #[serde(flatten)]
    pub params: RibbonParams,
    /// Spread of the random polar offset around the equator, in radians
    pub polar_jitter: f32,
    /// Fixed seed for reproducible ribbons; entropy when absent
    pub seed: Option<u64>,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            params: RibbonParams::default(),
            polar_jitter: DEFAULT_POLAR_JITTER,
            seed: None,
        }
    }
}

/// Image overrides; the embedded textures are used for any face left empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub front: Option<PathBuf>,
    pub back: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// `0xRRGGBB`, sRGB
    pub clear_color: u32,
    pub msaa_samples: u32,
    pub show_ui: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: 0xeeeeee,
            msaa_samples: 4,
            show_ui: true,
        }
    }
}

/// Everything the sketch can be tuned with. Every field has a default, so an
/// empty JSON object is a complete config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub window: WindowConfig,
    pub ribbon: RibbonConfig,
    pub animation: AnimationParams,
    pub camera: CameraParams,
    pub lights: LightParams,
    pub material: SurfaceParams,
    pub textures: TextureConfig,
    pub renderer: RendererConfig,
}

impl SketchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid sketch config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.ribbon.params.validate()?;

        if !self.ribbon.polar_jitter.is_finite() {
            bail!("ribbon.polar_jitter must be finite");
        }
        if self.window.width == 0 || self.window.height == 0 {
            bail!(
                "window size must be non-zero, got {}x{}",
                self.window.width,
                self.window.height
            );
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            bail!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near,
                self.camera.far
            );
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            bail!("camera.fov_degrees must be in (0, 180), got {}", self.camera.fov_degrees);
        }
        if !matches!(self.renderer.msaa_samples, 1 | 2 | 4 | 8) {
            bail!(
                "renderer.msaa_samples must be 1, 2, 4 or 8, got {}",
                self.renderer.msaa_samples
            );
        }
        if !(0.0..=1.0).contains(&self.material.alpha_cutoff) {
            bail!("material.alpha_cutoff must be in [0, 1], got {}", self.material.alpha_cutoff);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::CurveType;

    #[test]
    fn test_empty_object_is_default() {
        let config = SketchConfig::from_json("{}").unwrap();
        assert_eq!(config, SketchConfig::default());
        assert_eq!(config.ribbon.params.samples, 1000);
        assert_eq!(config.renderer.clear_color, 0xeeeeee);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = SketchConfig::from_json(
            r#"{
                "ribbon": { "samples": 64, "seed": 7, "curve_type": { "kind": "chordal" } },
                "renderer": { "msaa_samples": 1 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.ribbon.params.samples, 64);
        assert_eq!(config.ribbon.params.control_points, 7);
        assert_eq!(config.ribbon.params.curve_type, CurveType::Chordal);
        assert_eq!(config.ribbon.seed, Some(7));
        assert_eq!(config.renderer.msaa_samples, 1);
        assert!(config.renderer.show_ui);
    }

    #[test]
    fn test_rejects_too_few_control_points() {
        let err = SketchConfig::from_json(r#"{ "ribbon": { "control_points": 2 } }"#).unwrap_err();
        assert!(format!("{err:#}").contains("control points"));
    }

    #[test]
    fn test_rejects_bad_msaa() {
        assert!(SketchConfig::from_json(r#"{ "renderer": { "msaa_samples": 3 } }"#).is_err());
    }

    #[test]
    fn test_rejects_inverted_camera_planes() {
        assert!(SketchConfig::from_json(r#"{ "camera": { "near": 10.0, "far": 1.0 } }"#).is_err());
    }
}
