//! # tailor-measure
//!
//! Garment measurements for custom tailoring from a single front-facing
//! photograph and the subject's declared height.
//!
//! This crate provides:
//! - **Calibration**: a pixels-per-centimetre scale derived from body
//!   keypoints and the declared height
//! - **Measurement**: shoulder width, sleeve length and body length from
//!   keypoint distances
//! - **Ease**: finished thobe measurements with fit-dependent allowances
//! - **Fallback**: height-ratio estimates when no person is detected
//!
//! Keypoint detection itself is delegated to a [`LandmarkProvider`].
//!
//! ## Pipeline
//!
//! 1. Decode the image
//! 2. Ask the provider for keypoints (normalized coordinates)
//! 3. If a person was found:
//!    - Estimate the crown-to-floor pixel height and divide by the true height
//!    - Convert keypoint distances to centimetres
//!    - Add chest, cuff and length allowances
//! 4. Otherwise scale the true height by standard body ratios
//! 5. Round to one decimal place and return a [`MeasurementResult`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tailor_measure::{Detection, ImageSize, JointLabel, LandmarkSet, MeasurementEngine, Point};
//!
//! let landmarks = LandmarkSet::from_pixels(
//!     [
//!         (JointLabel::Nose, Point::new(150.0, 150.0)),
//!         (JointLabel::LeftEar, Point::new(140.0, 145.0)),
//!         (JointLabel::RightEar, Point::new(160.0, 145.0)),
//!         (JointLabel::LeftShoulder, Point::new(100.0, 200.0)),
//!         (JointLabel::RightShoulder, Point::new(200.0, 200.0)),
//!         (JointLabel::LeftWrist, Point::new(90.0, 400.0)),
//!         (JointLabel::RightWrist, Point::new(210.0, 400.0)),
//!         (JointLabel::LeftAnkle, Point::new(95.0, 580.0)),
//!         (JointLabel::RightAnkle, Point::new(205.0, 580.0)),
//!         (JointLabel::LeftHeel, Point::new(95.0, 600.0)),
//!         (JointLabel::RightHeel, Point::new(205.0, 600.0)),
//!     ],
//!     ImageSize::new(300, 700),
//! )
//! .unwrap();
//!
//! let engine = MeasurementEngine::default();
//! let result = engine
//!     .measure_detection(&Detection::Detected(landmarks), 180.0, "Standard")
//!     .unwrap();
//!
//! assert_eq!(result.measurements.shoulder_width, 36.0);
//! println!("{}", result);
//! ```
//!
//! ## Custom Providers
//!
//! Implement [`LandmarkProvider`] to plug in a pose model:
//!
//! ```rust
//! use image::DynamicImage;
//! use tailor_measure::{DetectorOutput, ImageSize, LandmarkProvider, Result};
//!
//! struct MyPoseModel { /* ... */ }
//!
//! impl LandmarkProvider for MyPoseModel {
//!     fn detect(&mut self, image: &DynamicImage) -> Result<DetectorOutput> {
//!         // Run inference and return normalized keypoints
//!         Ok(DetectorOutput::none(ImageSize::new(image.width(), image.height())))
//!     }
//! }
//! ```

mod calibration;
mod config;
mod ease;
mod engine;
mod error;
mod fallback;
mod landmarks;
mod measure;
mod provider;
mod result;
mod types;

pub use calibration::{calibrate, CalibrationContext};
pub use config::{
    CalibrationConfig, EaseConfig, EngineConfig, FallbackConfig, MeasurementConfig,
    PlaceholderConfig,
};
pub use ease::{apply_ease, FitType};
pub use engine::MeasurementEngine;
pub use error::{Error, Result};
pub use fallback::{estimate_from_height, FALLBACK_NOTE};
pub use landmarks::{Detection, DetectorOutput, JointLabel, LandmarkSet, NormalizedKeypoint};
pub use measure::{extract, RawMeasurements};
pub use provider::{BoxedProvider, LandmarkProvider, NoPersonProvider, SharedProvider, StaticProvider};
pub use result::{DebugInfo, GarmentMeasurements, MeasurementResult};
pub use types::{ImageSize, Point};
