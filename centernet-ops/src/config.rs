//! Label encoding configuration format.

use crate::{common::*, LetterboxOptions, RadiusMode};
use std::str::FromStr;

/// The label encoding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub letterbox: LetterboxOptions,
    /// The number of instance slots in per-image target arrays.
    #[serde(default = "default_max_instances")]
    pub max_instances: usize,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = text
            .parse::<Self>()
            .with_context(|| format!("unable to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let config: Self = json5::from_str(text)?;
        config.heatmap.warn_suspicious_values();
        Ok(config)
    }
}

/// Heatmap rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// The IoU a detection must keep with the ground truth inside the Gaussian radius.
    #[serde(default = "default_min_overlap")]
    pub min_overlap: R64,
    #[serde(default)]
    pub radius_mode: RadiusMode,
    /// The peak value of each blob.
    #[serde(default = "default_scaling_factor")]
    pub scaling_factor: R64,
    pub num_classes: NonZeroUsize,
    /// The heatmap `[height, width]`.
    pub output_size: [usize; 2],
}

impl HeatmapConfig {
    /// Logs values outside of their meaningful range without rejecting them.
    fn warn_suspicious_values(&self) {
        let min_overlap = self.min_overlap.raw();
        if !(min_overlap > 0.0 && min_overlap <= 1.0) {
            warn!(
                "min_overlap = {} is outside of (0, 1], Gaussian radii will be NaN or negative",
                min_overlap
            );
        }
        if self.output_size.contains(&0) {
            warn!(
                "output_size = {:?} is empty, all heatmaps will be empty",
                self.output_size
            );
        }
    }
}

fn default_min_overlap() -> R64 {
    r64(0.7)
}

fn default_scaling_factor() -> R64 {
    r64(1.0)
}

fn default_max_instances() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() -> Result<()> {
        let config: Config = r#"{
            // only the required fields
            heatmap: {
                num_classes: 80,
                output_size: [128, 128],
            },
        }"#
        .parse()?;

        assert_eq!(config.heatmap.min_overlap, r64(0.7));
        assert_eq!(config.heatmap.radius_mode, RadiusMode::Legacy);
        assert_eq!(config.heatmap.scaling_factor, r64(1.0));
        assert_eq!(config.heatmap.num_classes.get(), 80);
        assert_eq!(config.letterbox, LetterboxOptions::default());
        assert_eq!(config.max_instances, 128);
        Ok(())
    }

    #[test]
    fn parse_full_config() -> Result<()> {
        let config: Config = r#"{
            heatmap: {
                min_overlap: 0.5,
                radius_mode: "corrected",
                scaling_factor: 2.0,
                num_classes: 3,
                output_size: [96, 64],
            },
            letterbox: {
                xs: 0.0,
                ys: 1.0,
                target_dim: 512,
            },
            max_instances: 20,
        }"#
        .parse()?;

        assert_eq!(config.heatmap.radius_mode, RadiusMode::Corrected);
        assert_eq!(config.heatmap.output_size, [96, 64]);
        assert_eq!(config.letterbox.target_dim, Some(512));
        assert_eq!(config.letterbox.ys, 1.0);
        assert_eq!(config.max_instances, 20);
        Ok(())
    }

    #[test]
    fn reject_malformed_config() {
        assert!("{ heatmap: { output_size: [8, 8] } }".parse::<Config>().is_err());
        assert!(r#"{ heatmap: { num_classes: 0, output_size: [8, 8] } }"#
            .parse::<Config>()
            .is_err());
        assert!(r#"{ heatmap: { num_classes: 1, output_size: [8, 8], radius_mode: "exact" } }"#
            .parse::<Config>()
            .is_err());
    }

    #[test]
    fn out_of_range_overlap_is_accepted() -> Result<()> {
        let config: Config =
            "{ heatmap: { min_overlap: 1.5, num_classes: 1, output_size: [8, 8] } }".parse()?;
        assert_eq!(config.heatmap.min_overlap, r64(1.5));
        Ok(())
    }
}
