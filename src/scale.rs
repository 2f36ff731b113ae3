//! Target normalization
//!
//! Regression targets are rescaled with precomputed dataset-level statistics
//! for stabler gradient magnitudes. Training compares raw predictions
//! against normalized labels; validation compares de-normalized predictions
//! against raw labels, so validation loss is reported in original label
//! units. The two loss scales are therefore not directly comparable when
//! `std != 1` or `mean != 0`.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Dataset-level mean/std used to rescale regression targets
///
/// # Example
///
/// ```
/// use grafeno::scale::TargetScaler;
/// use ndarray::array;
///
/// let scaler = TargetScaler::new(2.0, 4.0);
/// let normalized = scaler.normalize(&array![6.0]);
/// assert_eq!(normalized[0], 1.0);
/// assert_eq!(scaler.denormalize(&normalized), array![6.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetScaler {
    /// Dataset mean of the target
    pub mean: f32,
    /// Dataset standard deviation of the target
    pub std: f32,
}

impl TargetScaler {
    /// Create a scaler from precomputed statistics
    pub fn new(mean: f32, std: f32) -> Self {
        Self { mean, std }
    }

    /// The no-op scaler (`mean = 0`, `std = 1`)
    pub fn identity() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Rescale raw labels into normalized units: `(label - mean) / std`
    pub fn normalize(&self, labels: &Array1<f32>) -> Array1<f32> {
        labels.mapv(|x| (x - self.mean) / self.std)
    }

    /// Map normalized predictions back to label units: `mean + pred * std`
    pub fn denormalize(&self, preds: &Array1<f32>) -> Array1<f32> {
        preds.mapv(|p| self.mean + p * self.std)
    }
}

impl Default for TargetScaler {
    fn default() -> Self {
        Self::identity()
    }
}
