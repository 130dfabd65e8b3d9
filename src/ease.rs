//! Garment ease: turning body measurements into finished thobe dimensions.

use std::fmt;

use serde::Serialize;

use crate::config::{EaseConfig, PlaceholderConfig};
use crate::measure::RawMeasurements;
use crate::result::GarmentMeasurements;

/// Fit selector controlling how much ease is added to the chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FitType {
    Standard,
    Slim,
}

impl FitType {
    pub const STANDARD_LABEL: &'static str = "Standard";

    /// `"Standard"` selects the standard fit; any other label means slim.
    pub fn from_label(label: &str) -> Self {
        if label == Self::STANDARD_LABEL {
            Self::Standard
        } else {
            Self::Slim
        }
    }

    pub fn chest_ease(self, config: &EaseConfig) -> f64 {
        match self {
            Self::Standard => config.standard_chest_cm,
            Self::Slim => config.slim_chest_cm,
        }
    }
}

impl From<&str> for FitType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl fmt::Display for FitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("Standard"),
            Self::Slim => f.write_str("Slim"),
        }
    }
}

/// Apply tailoring allowances to `raw` and round to one decimal place.
///
/// Neck and wrist circumference have no keypoint source and come from
/// `placeholders` unchanged.
pub fn apply_ease(
    raw: &RawMeasurements,
    fit: FitType,
    ease: &EaseConfig,
    placeholders: &PlaceholderConfig,
) -> GarmentMeasurements {
    let chest = raw.chest_circumference + fit.chest_ease(ease);
    let sleeve = raw.sleeve_length + ease.cuff_drop_cm;
    let length = raw.body_length + ease.neck_offset_cm - ease.hem_trim_cm;

    GarmentMeasurements {
        shoulder_width: raw.shoulder_width,
        sleeve_length: sleeve,
        chest_circumference: chest,
        thobe_length: length,
        neck_circumference: placeholders.neck_circumference_cm,
        wrist_circumference: placeholders.wrist_circumference_cm,
    }
    .rounded()
}
