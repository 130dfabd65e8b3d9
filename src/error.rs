use thiserror::Error;

use crate::landmarks::JointLabel;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Could not decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Invalid height: {0} cm (must be a finite value greater than zero)")]
    InvalidHeight(f64),

    #[error("Detector reported a person but keypoint {0} is missing")]
    MissingKeypoint(JointLabel),

    #[error("Detector returned a non-finite coordinate for keypoint {0}")]
    InvalidKeypoint(JointLabel),

    #[error("Invalid pose detection: body height of {pixel_height} px is not positive")]
    InvalidGeometry { pixel_height: f64 },

    #[error("Landmark provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, Error>;
