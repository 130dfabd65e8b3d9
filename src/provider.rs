//! Landmark providers and the process-wide provider handle.
//!
//! Pose models (MediaPipe, ONNX sessions) keep mutable inference state, so
//! [`LandmarkProvider::detect`] takes `&mut self`. [`SharedProvider`] wraps
//! one provider behind a mutex so concurrent requests share a single
//! instance, with calls serialized.

use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use image::{DynamicImage, GenericImageView};

use crate::error::{Error, Result};
use crate::landmarks::DetectorOutput;
use crate::types::ImageSize;

/// A body keypoint detector.
pub trait LandmarkProvider {
    /// Detect body keypoints in a decoded image.
    ///
    /// A photo without a person is `Ok` with `detected = false`; errors are
    /// reserved for the provider itself failing.
    fn detect(&mut self, image: &DynamicImage) -> Result<DetectorOutput>;
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for Box<P> {
    fn detect(&mut self, image: &DynamicImage) -> Result<DetectorOutput> {
        (**self).detect(image)
    }
}

/// Provider that never finds a person.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersonProvider;

impl LandmarkProvider for NoPersonProvider {
    fn detect(&mut self, image: &DynamicImage) -> Result<DetectorOutput> {
        let (width, height) = image.dimensions();
        Ok(DetectorOutput::none(ImageSize::new(width, height)))
    }
}

/// Replays a recorded detector output for every image.
///
/// Keypoints are normalized, so the recording is scaled to whatever image
/// it is paired with; the reported dimensions are those of that image.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    output: DetectorOutput,
}

impl StaticProvider {
    pub fn new(output: DetectorOutput) -> Self {
        Self { output }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn output(&self) -> &DetectorOutput {
        &self.output
    }
}

impl LandmarkProvider for StaticProvider {
    fn detect(&mut self, image: &DynamicImage) -> Result<DetectorOutput> {
        let (width, height) = image.dimensions();
        let mut output = self.output.clone();
        output.image_width = width;
        output.image_height = height;
        Ok(output)
    }
}

/// An owned provider that can move between threads.
pub type BoxedProvider = Box<dyn LandmarkProvider + Send>;

static SHARED: OnceLock<SharedProvider> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// A provider shared across threads, with calls serialized.
pub struct SharedProvider {
    inner: Mutex<BoxedProvider>,
}

impl SharedProvider {
    pub fn new(provider: BoxedProvider) -> Self {
        Self {
            inner: Mutex::new(provider),
        }
    }

    /// The process-wide provider, initializing it with `init` on first use.
    ///
    /// `init` runs at most once at a time; concurrent callers wait for it and
    /// then share the result. If it fails or panics, the slot stays empty and
    /// a later call may try again.
    pub fn get_or_try_init<F>(init: F) -> Result<&'static SharedProvider>
    where
        F: FnOnce() -> Result<BoxedProvider>,
    {
        if let Some(shared) = SHARED.get() {
            return Ok(shared);
        }

        // The lock guards no data; a panicking initializer leaves nothing to repair.
        let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(shared) = SHARED.get() {
            return Ok(shared);
        }

        tracing::info!("initializing landmark provider");
        let provider = init()?;
        Ok(SHARED.get_or_init(|| SharedProvider::new(provider)))
    }

    /// The process-wide provider, if it has been initialized.
    pub fn get() -> Option<&'static SharedProvider> {
        SHARED.get()
    }

    pub fn detect(&self, image: &DynamicImage) -> Result<DetectorOutput> {
        let mut provider = self
            .inner
            .lock()
            .map_err(|_| Error::Provider("landmark provider lock poisoned".into()))?;
        provider.detect(image)
    }
}

impl LandmarkProvider for &SharedProvider {
    fn detect(&mut self, image: &DynamicImage) -> Result<DetectorOutput> {
        SharedProvider::detect(*self, image)
    }
}
