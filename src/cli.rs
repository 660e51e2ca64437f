// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::SketchConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "ribbon-sketch")]
#[command(about = "Textured ribbon that follows the pointer", long_about = None)]
pub struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the control point jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Route to open
    #[arg(long, default_value = "home")]
    pub route: String,

    /// Front face image
    #[arg(long)]
    pub front: Option<PathBuf>,

    /// Back face image
    #[arg(long)]
    pub back: Option<PathBuf>,

    /// Samples along the spline
    #[arg(long)]
    pub samples: Option<usize>,

    /// Control points on the sphere
    #[arg(long = "control-points")]
    pub control_points: Option<usize>,

    /// Disable UI elements
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn resolve_config(&self) -> Result<SketchConfig> {
        let mut config = match &self.config {
            Some(path) => SketchConfig::load(path)?,
            None => SketchConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut SketchConfig) {
        if let Some(seed) = self.seed {
            config.ribbon.seed = Some(seed);
        }
        if let Some(samples) = self.samples {
            config.ribbon.params.samples = samples;
        }
        if let Some(count) = self.control_points {
            config.ribbon.params.control_points = count;
        }
        if let Some(front) = &self.front {
            config.textures.front = Some(front.clone());
        }
        if let Some(back) = &self.back {
            config.textures.back = Some(back.clone());
        }
        if self.no_ui {
            config.renderer.show_ui = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["ribbon-sketch"]);
        assert_eq!(cli.route, "home");
        assert!(!cli.no_ui);
        assert_eq!(cli.resolve_config().unwrap(), SketchConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "ribbon-sketch",
            "--seed",
            "42",
            "--samples",
            "250",
            "--control-points",
            "5",
            "--front",
            "front.png",
            "--no-ui",
        ]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.ribbon.seed, Some(42));
        assert_eq!(config.ribbon.params.samples, 250);
        assert_eq!(config.ribbon.params.control_points, 5);
        assert_eq!(config.textures.front, Some(PathBuf::from("front.png")));
        assert_eq!(config.textures.back, None);
        assert!(!config.renderer.show_ui);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let cli = Cli::parse_from(["ribbon-sketch", "--samples", "0"]);
        assert!(cli.resolve_config().is_err());
    }
}
