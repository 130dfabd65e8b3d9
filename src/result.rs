//! Output contract of the measurement engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationContext;
use crate::error::Result;
use crate::fallback::FALLBACK_NOTE;

/// Finished-garment measurements in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarmentMeasurements {
    pub shoulder_width: f64,
    pub sleeve_length: f64,
    pub chest_circumference: f64,
    pub thobe_length: f64,
    pub neck_circumference: f64,
    pub wrist_circumference: f64,
}

impl GarmentMeasurements {
    /// Round every value to one decimal place.
    pub fn rounded(self) -> Self {
        Self {
            shoulder_width: round_to_tenth(self.shoulder_width),
            sleeve_length: round_to_tenth(self.sleeve_length),
            chest_circumference: round_to_tenth(self.chest_circumference),
            thobe_length: round_to_tenth(self.thobe_length),
            neck_circumference: round_to_tenth(self.neck_circumference),
            wrist_circumference: round_to_tenth(self.wrist_circumference),
        }
    }

    /// Named values in output order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("shoulder_width", self.shoulder_width),
            ("sleeve_length", self.sleeve_length),
            ("chest_circumference", self.chest_circumference),
            ("thobe_length", self.thobe_length),
            ("neck_circumference", self.neck_circumference),
            ("wrist_circumference", self.wrist_circumference),
        ]
    }
}

/// Round the exact binary value to one decimal, ties to even.
///
/// Scaling by ten first would turn values such as 51.449999… into a tie and
/// round them up; formatting works on the exact value instead.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Calibration diagnostics, present only when keypoints were used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub pixels_per_cm: f64,
    pub fit_type: String,
    pub raw_height_pixels: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub measurements: GarmentMeasurements,
    /// The caller's fit label, echoed verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_type: Option<String>,
    /// Fallback path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Calibrated path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

impl MeasurementResult {
    pub fn calibrated(
        measurements: GarmentMeasurements,
        fit_label: &str,
        calibration: &CalibrationContext,
    ) -> Self {
        Self {
            measurements,
            fit_type: Some(fit_label.to_string()),
            note: None,
            debug: Some(DebugInfo {
                pixels_per_cm: calibration.pixels_per_cm(),
                fit_type: fit_label.to_string(),
                raw_height_pixels: calibration.pixel_height(),
            }),
        }
    }

    pub fn fallback(measurements: GarmentMeasurements, fit_label: &str) -> Self {
        Self {
            measurements,
            fit_type: Some(fit_label.to_string()),
            note: Some(FALLBACK_NOTE.to_string()),
            debug: None,
        }
    }

    /// Whether the measurements came from keypoints rather than height ratios.
    pub fn is_calibrated(&self) -> bool {
        self.debug.is_some()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for MeasurementResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fit) = &self.fit_type {
            writeln!(f, "Fit: {}", fit)?;
        }
        writeln!(f, "Measurements (cm):")?;
        for (name, value) in self.measurements.entries() {
            writeln!(f, "  {:<20} {:>6.1}", name, value)?;
        }
        if let Some(note) = &self.note {
            writeln!(f, "\nNote: {}", note)?;
        }
        if let Some(debug) = &self.debug {
            writeln!(f, "\nCalibration:")?;
            writeln!(f, "  pixels/cm:    {:.4}", debug.pixels_per_cm)?;
            writeln!(f, "  body height:  {:.1} px", debug.raw_height_pixels)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GarmentMeasurements {
        GarmentMeasurements {
            shoulder_width: 45.0,
            sleeve_length: 63.0,
            chest_circumference: 99.0,
            thobe_length: 144.0,
            neck_circumference: 40.0,
            wrist_circumference: 22.0,
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to_tenth(74.0899), 74.1);
        assert_eq!(round_to_tenth(36.000004), 36.0);
        assert_eq!(round_to_tenth(-1.26), -1.3);
    }

    #[test]
    fn rounding_uses_exact_value_with_ties_to_even() {
        // 147 * 0.35 is stored as 51.449999999999996.
        assert_eq!(round_to_tenth(147.0 * 0.35), 51.4);
        assert_eq!(round_to_tenth(169.0 * 0.25), 42.2);
        assert_eq!(round_to_tenth(173.0 * 0.25), 43.2);
        assert_eq!(round_to_tenth(173.0 * 0.35), 60.5);
        assert_eq!(round_to_tenth(32.75), 32.8);
        assert_eq!(round_to_tenth(125.44999999999999), 125.4);
    }

    #[test]
    fn fallback_json_omits_debug() {
        let result = MeasurementResult::fallback(sample(), "Slim");
        let value: serde_json::Value = serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["fit_type"], "Slim");
        assert_eq!(value["note"], FALLBACK_NOTE);
        assert!(value.get("debug").is_none());
        assert_eq!(value["measurements"]["thobe_length"], 144.0);
        assert_eq!(value["measurements"].as_object().unwrap().len(), 6);
    }

    #[test]
    fn json_round_trip_preserves_result() {
        let result = MeasurementResult::fallback(sample(), "Standard");
        let json = serde_json::to_string(&result).unwrap();
        let back: MeasurementResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert!(!back.is_calibrated());
    }

    #[test]
    fn display_lists_every_measurement() {
        let text = MeasurementResult::fallback(sample(), "Standard").to_string();
        for (name, _) in sample().entries() {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains(FALLBACK_NOTE));
    }
}
