//! Heuristic constants used by the measurement engine.
//!
//! Every ratio and allowance lives here so it can be tuned from a TOML
//! file without touching control flow. Missing keys fall back to the
//! defaults below.
//!
//! ```toml
//! [measurement]
//! chest_circumference_multiplier = 2.4
//!
//! [ease]
//! standard_chest_cm = 14.0
//!
//! [placeholders]
//! wrist_circumference_cm = 20.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub measurement: MeasurementConfig,
    #[serde(default)]
    pub ease: EaseConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub placeholders: PlaceholderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Head height as a multiple of the nose-to-shoulder-line gap
    #[serde(default = "default_head_height_multiplier")]
    pub head_height_multiplier: f64,
    /// Fraction of the head height that lies above the nose
    #[serde(default = "default_head_top_fraction")]
    pub head_top_fraction: f64,
}

/// Body proportions applied to the calibrated keypoint distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementConfig {
    /// Front-view chest width to circumference factor
    #[serde(default = "default_chest_circumference_multiplier")]
    pub chest_circumference_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EaseConfig {
    /// Chest ease for the "Standard" fit (cm)
    #[serde(default = "default_standard_chest")]
    pub standard_chest_cm: f64,
    /// Chest ease for any slim fit (cm)
    #[serde(default = "default_slim_chest")]
    pub slim_chest_cm: f64,
    /// Sleeve allowance for cuff drop (cm)
    #[serde(default = "default_cuff_drop")]
    pub cuff_drop_cm: f64,
    /// Height of the C7 vertebra above the shoulder line (cm)
    #[serde(default = "default_neck_offset")]
    pub neck_offset_cm: f64,
    /// Length removed so the hem does not drag (cm)
    #[serde(default = "default_hem_trim")]
    pub hem_trim_cm: f64,
}

/// Height ratios used when no pose is detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_thobe_length_ratio")]
    pub thobe_length_ratio: f64,
    #[serde(default = "default_shoulder_width_ratio")]
    pub shoulder_width_ratio: f64,
    #[serde(default = "default_sleeve_length_ratio")]
    pub sleeve_length_ratio: f64,
    #[serde(default = "default_chest_circumference_ratio")]
    pub chest_circumference_ratio: f64,
}

/// Fixed values for measurements no keypoint can provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    #[serde(default = "default_neck_circumference")]
    pub neck_circumference_cm: f64,
    #[serde(default = "default_wrist_circumference")]
    pub wrist_circumference_cm: f64,
}

fn default_head_height_multiplier() -> f64 { 2.0 }
fn default_head_top_fraction() -> f64 { 0.5 }
fn default_chest_circumference_multiplier() -> f64 { 2.2 }
fn default_standard_chest() -> f64 { 12.0 }
fn default_slim_chest() -> f64 { 8.0 }
fn default_cuff_drop() -> f64 { 2.0 }
fn default_neck_offset() -> f64 { 2.0 }
fn default_hem_trim() -> f64 { 1.0 }
fn default_thobe_length_ratio() -> f64 { 0.8 }
fn default_shoulder_width_ratio() -> f64 { 0.25 }
fn default_sleeve_length_ratio() -> f64 { 0.35 }
fn default_chest_circumference_ratio() -> f64 { 0.55 }
fn default_neck_circumference() -> f64 { 40.0 }
fn default_wrist_circumference() -> f64 { 22.0 }

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            head_height_multiplier: default_head_height_multiplier(),
            head_top_fraction: default_head_top_fraction(),
        }
    }
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            chest_circumference_multiplier: default_chest_circumference_multiplier(),
        }
    }
}

impl Default for EaseConfig {
    fn default() -> Self {
        Self {
            standard_chest_cm: default_standard_chest(),
            slim_chest_cm: default_slim_chest(),
            cuff_drop_cm: default_cuff_drop(),
            neck_offset_cm: default_neck_offset(),
            hem_trim_cm: default_hem_trim(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            thobe_length_ratio: default_thobe_length_ratio(),
            shoulder_width_ratio: default_shoulder_width_ratio(),
            sleeve_length_ratio: default_sleeve_length_ratio(),
            chest_circumference_ratio: default_chest_circumference_ratio(),
        }
    }
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            neck_circumference_cm: default_neck_circumference(),
            wrist_circumference_cm: default_wrist_circumference(),
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, or use defaults if the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using default engine config");
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the measurements meaningless.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("calibration.head_height_multiplier", self.calibration.head_height_multiplier),
            ("calibration.head_top_fraction", self.calibration.head_top_fraction),
            (
                "measurement.chest_circumference_multiplier",
                self.measurement.chest_circumference_multiplier,
            ),
            ("fallback.thobe_length_ratio", self.fallback.thobe_length_ratio),
            ("fallback.shoulder_width_ratio", self.fallback.shoulder_width_ratio),
            ("fallback.sleeve_length_ratio", self.fallback.sleeve_length_ratio),
            ("fallback.chest_circumference_ratio", self.fallback.chest_circumference_ratio),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("ease.standard_chest_cm", self.ease.standard_chest_cm),
            ("ease.slim_chest_cm", self.ease.slim_chest_cm),
            ("ease.cuff_drop_cm", self.ease.cuff_drop_cm),
            ("ease.neck_offset_cm", self.ease.neck_offset_cm),
            ("ease.hem_trim_cm", self.ease.hem_trim_cm),
            ("placeholders.neck_circumference_cm", self.placeholders.neck_circumference_cm),
            ("placeholders.wrist_circumference_cm", self.placeholders.wrist_circumference_cm),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!("{name} must be >= 0, got {value}")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tailoring_heuristics() {
        let config = EngineConfig::default();
        assert_eq!(config.calibration.head_height_multiplier, 2.0);
        assert_eq!(config.measurement.chest_circumference_multiplier, 2.2);
        assert_eq!(config.ease.standard_chest_cm - config.ease.slim_chest_cm, 4.0);
        assert_eq!(config.placeholders.neck_circumference_cm, 40.0);
        assert_eq!(config.placeholders.wrist_circumference_cm, 22.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [ease]
            standard_chest_cm = 14.0
            "#,
        )
        .unwrap();
        assert_eq!(config.ease.standard_chest_cm, 14.0);
        assert_eq!(config.ease.slim_chest_cm, 8.0);
        assert_eq!(config.fallback, FallbackConfig::default());
    }

    #[test]
    fn chest_factor_is_read_from_measurement_section() {
        let config = EngineConfig::from_toml_str(
            r#"
            [measurement]
            chest_circumference_multiplier = 2.4
            "#,
        )
        .unwrap();
        assert_eq!(config.measurement.chest_circumference_multiplier, 2.4);
        assert_eq!(config.calibration, CalibrationConfig::default());
    }

    #[test]
    fn chest_factor_is_not_a_calibration_key() {
        let config = EngineConfig::from_toml_str(
            r#"
            [calibration]
            chest_circumference_multiplier = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.measurement, MeasurementConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn non_positive_ratio_is_rejected() {
        let result = EngineConfig::from_toml_str(
            r#"
            [fallback]
            sleeve_length_ratio = 0.0
            "#,
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn negative_ease_is_rejected() {
        let mut config = EngineConfig::default();
        config.ease.slim_chest_cm = -1.0;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("[ease\nstandard_chest_cm = "),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("tailor_measure_no_such_config.toml");
        assert_eq!(EngineConfig::load_or_default(path), EngineConfig::default());
    }
}
