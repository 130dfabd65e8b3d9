//! Body keypoint vocabulary and the detector output contract.
//!
//! A landmark provider reports keypoints in normalized [0,1] image
//! coordinates. [`DetectorOutput::to_detection`] scales them into pixel
//! space and produces a [`Detection`], which is either
//! [`Detection::NoDetection`] or a complete [`LandmarkSet`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ImageSize, Point};

/// Body joints the measurement engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum JointLabel {
    Nose = 0,
    LeftEar = 1,
    RightEar = 2,
    LeftShoulder = 3,
    RightShoulder = 4,
    LeftWrist = 5,
    RightWrist = 6,
    LeftAnkle = 7,
    RightAnkle = 8,
    LeftHeel = 9,
    RightHeel = 10,
}

impl JointLabel {
    pub const COUNT: usize = 11;

    pub const ALL: [JointLabel; Self::COUNT] = [
        Self::Nose,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Index of this joint in the 33-point BlazePose (MediaPipe Pose) topology.
    pub fn mediapipe_index(self) -> usize {
        match self {
            Self::Nose => 0,
            Self::LeftEar => 7,
            Self::RightEar => 8,
            Self::LeftShoulder => 11,
            Self::RightShoulder => 12,
            Self::LeftWrist => 15,
            Self::RightWrist => 16,
            Self::LeftAnkle => 27,
            Self::RightAnkle => 28,
            Self::LeftHeel => 29,
            Self::RightHeel => 30,
        }
    }

    pub fn from_mediapipe_index(index: usize) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.mediapipe_index() == index)
    }

    /// The same joint on the opposite side of the body.
    pub fn mirror(self) -> Self {
        match self {
            Self::Nose => Self::Nose,
            Self::LeftEar => Self::RightEar,
            Self::RightEar => Self::LeftEar,
            Self::LeftShoulder => Self::RightShoulder,
            Self::RightShoulder => Self::LeftShoulder,
            Self::LeftWrist => Self::RightWrist,
            Self::RightWrist => Self::LeftWrist,
            Self::LeftAnkle => Self::RightAnkle,
            Self::RightAnkle => Self::LeftAnkle,
            Self::LeftHeel => Self::RightHeel,
            Self::RightHeel => Self::LeftHeel,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
        }
    }
}

impl fmt::Display for JointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_visibility() -> f32 {
    1.0
}

/// A keypoint as reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedKeypoint {
    /// Normalized X coordinate (0.0 to 1.0)
    pub x: f64,
    /// Normalized Y coordinate (0.0 to 1.0)
    pub y: f64,
    /// Detector confidence that the joint is visible (0.0 to 1.0)
    #[serde(default = "default_visibility")]
    pub visibility: f32,
}

impl NormalizedKeypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visibility: default_visibility(),
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Output contract of a landmark provider for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorOutput {
    pub detected: bool,
    #[serde(default)]
    pub keypoints: BTreeMap<JointLabel, NormalizedKeypoint>,
    #[serde(default)]
    pub image_width: u32,
    #[serde(default)]
    pub image_height: u32,
}

impl DetectorOutput {
    /// Output for an image in which no person was found.
    pub fn none(size: ImageSize) -> Self {
        Self {
            detected: false,
            keypoints: BTreeMap::new(),
            image_width: size.width,
            image_height: size.height,
        }
    }

    /// Build from a full 33-point BlazePose landmark list, keeping the joints
    /// the engine uses.
    pub fn from_mediapipe(landmarks: &[NormalizedKeypoint], size: ImageSize) -> Self {
        let keypoints = landmarks
            .iter()
            .enumerate()
            .filter_map(|(i, kp)| JointLabel::from_mediapipe_index(i).map(|label| (label, *kp)))
            .collect::<BTreeMap<_, _>>();

        Self {
            detected: !keypoints.is_empty(),
            keypoints,
            image_width: size.width,
            image_height: size.height,
        }
    }

    pub fn image_size(&self) -> ImageSize {
        ImageSize::new(self.image_width, self.image_height)
    }

    /// Scale keypoints into pixel space.
    ///
    /// A detected output must contain every [`JointLabel`] with finite
    /// coordinates.
    pub fn to_detection(&self) -> Result<Detection> {
        if !self.detected {
            return Ok(Detection::NoDetection);
        }

        let size = self.image_size();
        let mut points = [Point::zero(); JointLabel::COUNT];
        let mut confidence = [0.0f32; JointLabel::COUNT];

        for label in JointLabel::ALL {
            let kp = self
                .keypoints
                .get(&label)
                .ok_or(Error::MissingKeypoint(label))?;
            let p = size.denormalize(kp.x, kp.y);
            if !p.is_finite() {
                return Err(Error::InvalidKeypoint(label));
            }
            points[label as usize] = p;
            confidence[label as usize] = kp.visibility;
        }

        Ok(Detection::Detected(LandmarkSet {
            points,
            confidence,
            size,
        }))
    }
}

/// What the provider saw in one image.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    NoDetection,
    Detected(LandmarkSet),
}

/// Pixel-space keypoints for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Point; JointLabel::COUNT],
    confidence: [f32; JointLabel::COUNT],
    size: ImageSize,
}

impl LandmarkSet {
    /// Build directly from pixel coordinates. Every joint must be present.
    pub fn from_pixels<I>(points: I, size: ImageSize) -> Result<Self>
    where
        I: IntoIterator<Item = (JointLabel, Point)>,
    {
        let mut slots: [Option<Point>; JointLabel::COUNT] = [None; JointLabel::COUNT];
        for (label, p) in points {
            if !p.is_finite() {
                return Err(Error::InvalidKeypoint(label));
            }
            slots[label as usize] = Some(p);
        }

        let mut resolved = [Point::zero(); JointLabel::COUNT];
        for label in JointLabel::ALL {
            resolved[label as usize] = slots[label as usize].ok_or(Error::MissingKeypoint(label))?;
        }

        Ok(Self {
            points: resolved,
            confidence: [1.0; JointLabel::COUNT],
            size,
        })
    }

    pub fn get(&self, label: JointLabel) -> Point {
        self.points[label as usize]
    }

    /// Mean detector visibility over all joints. Diagnostic only; the
    /// measurements do not depend on it.
    pub fn mean_confidence(&self) -> f32 {
        let sum: f32 = self.confidence.iter().sum();
        sum / JointLabel::COUNT as f32
    }

    pub fn image_size(&self) -> ImageSize {
        self.size
    }

    /// Swap every left joint with its right counterpart.
    pub fn mirrored(&self) -> Self {
        let mut points = self.points;
        let mut confidence = self.confidence;
        for label in JointLabel::ALL {
            points[label as usize] = self.points[label.mirror() as usize];
            confidence[label as usize] = self.confidence[label.mirror() as usize];
        }
        Self {
            points,
            confidence,
            size: self.size,
        }
    }

    /// Uniformly scale all pixel coordinates (and the image) by `k`.
    pub fn scaled(&self, k: f64) -> Self {
        let mut points = self.points;
        for p in points.iter_mut() {
            *p = *p * k;
        }
        let size = ImageSize::new(
            (f64::from(self.size.width) * k).round() as u32,
            (f64::from(self.size.height) * k).round() as u32,
        );
        Self {
            points,
            confidence: self.confidence,
            size,
        }
    }
}
