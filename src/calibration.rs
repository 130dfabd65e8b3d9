//! Pixel-to-centimetre calibration from a declared body height.
//!
//! A single photo carries no absolute scale, so the subject's own height is
//! the only ground truth. The detector reports no head-top landmark; the
//! crown is extrapolated from the nose and the shoulder line, and the lowest
//! of the heel/ankle points is taken as ground contact.

use serde::Serialize;

use crate::config::CalibrationConfig;
use crate::error::{Error, Result};
use crate::landmarks::{JointLabel, LandmarkSet};

/// Scale factor for one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationContext {
    /// Always > 0.
    pixels_per_cm: f64,
    /// Estimated crown-to-floor height of the subject in pixels.
    pixel_height: f64,
    /// Highest face landmark (nose or ears).
    face_top_y: f64,
    /// Lowest foot landmark (heels or ankles).
    foot_y: f64,
    /// Extrapolated top of the head.
    head_top_y: f64,
}

impl CalibrationContext {
    pub fn pixels_per_cm(&self) -> f64 {
        self.pixels_per_cm
    }

    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }

    pub fn face_top_y(&self) -> f64 {
        self.face_top_y
    }

    pub fn foot_y(&self) -> f64 {
        self.foot_y
    }

    pub fn head_top_y(&self) -> f64 {
        self.head_top_y
    }

    /// Convert a pixel distance to centimetres.
    pub fn to_cm(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_cm
    }
}

/// Derive the pixels-per-centimetre scale for `landmarks`.
///
/// `true_height_cm` must already be validated as finite and positive.
/// Returns [`Error::InvalidGeometry`] when the estimated body height is not
/// positive, which happens for inverted or badly cropped detections.
pub fn calibrate(
    landmarks: &LandmarkSet,
    true_height_cm: f64,
    config: &CalibrationConfig,
) -> Result<CalibrationContext> {
    let nose = landmarks.get(JointLabel::Nose);

    let face_top_y = [JointLabel::Nose, JointLabel::LeftEar, JointLabel::RightEar]
        .iter()
        .map(|label| landmarks.get(*label).y)
        .fold(f64::INFINITY, f64::min);

    let foot_y = [
        JointLabel::LeftHeel,
        JointLabel::RightHeel,
        JointLabel::LeftAnkle,
        JointLabel::RightAnkle,
    ]
    .iter()
    .map(|label| landmarks.get(*label).y)
    .fold(f64::NEG_INFINITY, f64::max);

    let avg_shoulder_y =
        (landmarks.get(JointLabel::LeftShoulder).y + landmarks.get(JointLabel::RightShoulder).y) / 2.0;
    let head_height = (avg_shoulder_y - nose.y) * config.head_height_multiplier;
    let head_top_y = nose.y - head_height * config.head_top_fraction;

    let pixel_height = foot_y - head_top_y;

    tracing::debug!(
        face_top_y,
        foot_y,
        head_top_y,
        pixel_height,
        "estimated body extent"
    );

    if !(pixel_height.is_finite() && pixel_height > 0.0) {
        return Err(Error::InvalidGeometry { pixel_height });
    }

    let pixels_per_cm = pixel_height / true_height_cm;
    if !(pixels_per_cm.is_finite() && pixels_per_cm > 0.0) {
        return Err(Error::InvalidGeometry { pixel_height });
    }

    Ok(CalibrationContext {
        pixels_per_cm,
        pixel_height,
        face_top_y,
        foot_y,
        head_top_y,
    })
}
