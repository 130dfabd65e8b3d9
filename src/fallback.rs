//! Height-only estimates for photos in which no person was detected.

use crate::config::{FallbackConfig, PlaceholderConfig};
use crate::result::GarmentMeasurements;

/// Note attached to every fallback result.
pub const FALLBACK_NOTE: &str = "Estimated from height (No pose detected)";

/// Coarse garment measurements from standard body proportions.
///
/// Infallible; every field is non-negative for any non-negative height.
pub fn estimate_from_height(
    true_height_cm: f64,
    ratios: &FallbackConfig,
    placeholders: &PlaceholderConfig,
) -> GarmentMeasurements {
    GarmentMeasurements {
        shoulder_width: true_height_cm * ratios.shoulder_width_ratio,
        sleeve_length: true_height_cm * ratios.sleeve_length_ratio,
        chest_circumference: true_height_cm * ratios.chest_circumference_ratio,
        thobe_length: true_height_cm * ratios.thobe_length_ratio,
        neck_circumference: placeholders.neck_circumference_cm,
        wrist_circumference: placeholders.wrist_circumference_cm,
    }
    .rounded()
}
