use tracing::{debug, info, warn};

use image::GenericImageView;

use crate::calibration::calibrate;
use crate::config::EngineConfig;
use crate::ease::{apply_ease, FitType};
use crate::error::{Error, Result};
use crate::fallback::estimate_from_height;
use crate::landmarks::{Detection, LandmarkSet};
use crate::measure::extract;
use crate::provider::LandmarkProvider;
use crate::result::MeasurementResult;

/// Turns a photo, a declared height and a fit label into garment
/// measurements.
///
/// The engine is stateless between calls. Keypoints come from the
/// [`LandmarkProvider`] passed to [`measure`](Self::measure); when the
/// provider finds nobody, measurements are estimated from height alone.
#[derive(Debug, Clone, Default)]
pub struct MeasurementEngine {
    config: EngineConfig,
}

impl MeasurementEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Measure the person in `image_bytes`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHeight`] if `true_height_cm` is not finite and positive
    /// - [`Error::ImageDecode`] if the bytes are not a decodable image
    /// - [`Error::MissingKeypoint`] / [`Error::InvalidKeypoint`] if the provider
    ///   reports a person with an incomplete keypoint set
    /// - [`Error::InvalidGeometry`] if the detected pose is degenerate
    /// - whatever the provider itself returns
    pub fn measure<P>(
        &self,
        provider: &mut P,
        image_bytes: &[u8],
        true_height_cm: f64,
        fit_label: &str,
    ) -> Result<MeasurementResult>
    where
        P: LandmarkProvider + ?Sized,
    {
        validate_height(true_height_cm)?;

        let image = image::load_from_memory(image_bytes)?;
        let (width, height) = image.dimensions();
        debug!(width, height, "decoded image");

        let output = provider.detect(&image)?;
        let detection = output.to_detection()?;

        self.measure_detection(&detection, true_height_cm, fit_label)
    }

    /// Measure from detector output that has already been obtained.
    pub fn measure_detection(
        &self,
        detection: &Detection,
        true_height_cm: f64,
        fit_label: &str,
    ) -> Result<MeasurementResult> {
        match detection {
            Detection::NoDetection => {
                warn!("no pose detected, estimating measurements from height");
                self.estimate_from_height(true_height_cm, fit_label)
            }
            Detection::Detected(landmarks) => {
                self.measure_landmarks(landmarks, true_height_cm, fit_label)
            }
        }
    }

    /// Calibrated path: scale, measure, add ease.
    pub fn measure_landmarks(
        &self,
        landmarks: &LandmarkSet,
        true_height_cm: f64,
        fit_label: &str,
    ) -> Result<MeasurementResult> {
        validate_height(true_height_cm)?;

        debug!(
            mean_confidence = landmarks.mean_confidence(),
            "measuring from keypoints"
        );

        let calibration = calibrate(landmarks, true_height_cm, &self.config.calibration)?;
        let raw = extract(landmarks, &calibration, &self.config.measurement);
        debug!(?raw, "raw body measurements");

        let fit = FitType::from_label(fit_label);
        let measurements = apply_ease(&raw, fit, &self.config.ease, &self.config.placeholders);

        info!(
            pixels_per_cm = calibration.pixels_per_cm(),
            %fit,
            "calibrated measurements"
        );

        Ok(MeasurementResult::calibrated(measurements, fit_label, &calibration))
    }

    /// Fallback path: standard body ratios applied to the declared height.
    pub fn estimate_from_height(
        &self,
        true_height_cm: f64,
        fit_label: &str,
    ) -> Result<MeasurementResult> {
        validate_height(true_height_cm)?;

        let measurements = estimate_from_height(
            true_height_cm,
            &self.config.fallback,
            &self.config.placeholders,
        );
        Ok(MeasurementResult::fallback(measurements, fit_label))
    }
}

fn validate_height(true_height_cm: f64) -> Result<()> {
    if true_height_cm.is_finite() && true_height_cm > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidHeight(true_height_cm))
    }
}
