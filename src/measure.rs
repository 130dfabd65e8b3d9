//! Raw body measurements from calibrated keypoints.

use serde::Serialize;

use crate::calibration::CalibrationContext;
use crate::config::MeasurementConfig;
use crate::landmarks::{JointLabel, LandmarkSet};

/// Body measurements in centimetres, before any garment ease.
///
/// Values keep full precision; rounding happens when the finished garment
/// measurements are produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawMeasurements {
    /// Acromion to acromion.
    pub shoulder_width: f64,
    pub sleeve_left: f64,
    pub sleeve_right: f64,
    /// Mean of the left and right shoulder-to-wrist lengths.
    pub sleeve_length: f64,
    /// Shoulder-line midpoint to ankle midpoint.
    pub body_length: f64,
    /// Front-view chest width. No chest-level landmark exists, so this is
    /// the shoulder width.
    pub chest_width: f64,
    pub chest_circumference: f64,
}

/// Measure `landmarks` with the scale from `calibration`.
pub fn extract(
    landmarks: &LandmarkSet,
    calibration: &CalibrationContext,
    config: &MeasurementConfig,
) -> RawMeasurements {
    let cm = |a: JointLabel, b: JointLabel| calibration.to_cm(landmarks.get(a).distance(&landmarks.get(b)));

    let shoulder_width = cm(JointLabel::LeftShoulder, JointLabel::RightShoulder);

    let sleeve_left = cm(JointLabel::LeftShoulder, JointLabel::LeftWrist);
    let sleeve_right = cm(JointLabel::RightShoulder, JointLabel::RightWrist);
    let sleeve_length = (sleeve_left + sleeve_right) / 2.0;

    let mid_shoulder = landmarks
        .get(JointLabel::LeftShoulder)
        .midpoint(&landmarks.get(JointLabel::RightShoulder));
    let mid_ankle = landmarks
        .get(JointLabel::LeftAnkle)
        .midpoint(&landmarks.get(JointLabel::RightAnkle));
    let body_length = calibration.to_cm(mid_shoulder.distance(&mid_ankle));

    let chest_width = shoulder_width;
    let chest_circumference = chest_width * config.chest_circumference_multiplier;

    RawMeasurements {
        shoulder_width,
        sleeve_left,
        sleeve_right,
        sleeve_length,
        body_length,
        chest_width,
        chest_circumference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::calibrate;
    use crate::calibration::tests::reference_pose;
    use crate::config::CalibrationConfig;
    use approx::assert_relative_eq;

    fn measure(set: &LandmarkSet, height: f64) -> RawMeasurements {
        let ctx = calibrate(set, height, &CalibrationConfig::default()).unwrap();
        extract(set, &ctx, &MeasurementConfig::default())
    }

    #[test]
    fn reference_pose_measurements() {
        let raw = measure(&reference_pose(), 180.0);
        let scale = 180.0 / 500.0;

        assert_relative_eq!(raw.shoulder_width, 100.0 * scale, epsilon = 1e-9);
        assert_relative_eq!(raw.sleeve_left, 40100f64.sqrt() * scale, epsilon = 1e-9);
        assert_relative_eq!(raw.sleeve_length, raw.sleeve_left, epsilon = 1e-9);
        assert_relative_eq!(raw.body_length, 380.0 * scale, epsilon = 1e-9);
        assert_relative_eq!(raw.chest_width, raw.shoulder_width);
        assert_relative_eq!(raw.chest_circumference, 36.0 * 2.2, epsilon = 1e-9);
    }

    #[test]
    fn chest_factor_comes_from_measurement_config() {
        let set = reference_pose();
        let ctx = calibrate(&set, 180.0, &CalibrationConfig::default()).unwrap();
        let config = MeasurementConfig {
            chest_circumference_multiplier: 3.0,
        };
        let raw = extract(&set, &ctx, &config);
        assert_relative_eq!(raw.chest_circumference, 36.0 * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn mirrored_pose_has_same_widths() {
        let set = reference_pose();
        let raw = measure(&set, 175.0);
        let mirrored = measure(&set.mirrored(), 175.0);

        assert_eq!(raw.shoulder_width, mirrored.shoulder_width);
        assert_eq!(raw.sleeve_length, mirrored.sleeve_length);
        assert_eq!(raw.sleeve_left, mirrored.sleeve_right);
    }

    #[test]
    fn scaled_pose_has_same_measurements() {
        let set = reference_pose();
        let raw = measure(&set, 180.0);
        let scaled = measure(&set.scaled(3.5), 180.0);

        assert_relative_eq!(raw.shoulder_width, scaled.shoulder_width, max_relative = 1e-12);
        assert_relative_eq!(raw.sleeve_length, scaled.sleeve_length, max_relative = 1e-12);
        assert_relative_eq!(raw.body_length, scaled.body_length, max_relative = 1e-12);
    }
}
