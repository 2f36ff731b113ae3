//! Loss functions
//!
//! A [`LossFn`] reduces a prediction/target pair to a scalar loss and
//! exposes the analytic gradient of that loss w.r.t. the predictions. The
//! training step feeds the gradient to [`GraphModel::backward`] so the
//! model can accumulate parameter gradients without the loop knowing
//! anything about its internals.
//!
//! [`GraphModel::backward`]: crate::model::GraphModel::backward

use ndarray::Array1;

/// Trait for regression loss functions
pub trait LossFn {
    /// Compute the scalar loss for a batch
    fn forward(&self, predictions: &Array1<f32>, targets: &Array1<f32>) -> f32;

    /// Compute d(loss)/d(predictions) for the same batch
    fn gradient(&self, predictions: &Array1<f32>, targets: &Array1<f32>) -> Array1<f32>;

    /// Name of the loss function
    fn name(&self) -> &'static str;
}

/// Mean squared error: `mean((pred - target)^2)`
pub struct MseLoss;

impl LossFn for MseLoss {
    fn forward(&self, predictions: &Array1<f32>, targets: &Array1<f32>) -> f32 {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );
        let diff = predictions - targets;
        (&diff * &diff).mean().unwrap_or(0.0)
    }

    fn gradient(&self, predictions: &Array1<f32>, targets: &Array1<f32>) -> Array1<f32> {
        // d(MSE)/d(pred) = 2 * (pred - target) / n
        let n = predictions.len() as f32;
        let diff = predictions - targets;
        &diff * (2.0 / n)
    }

    fn name(&self) -> &'static str {
        "MSE"
    }
}

/// Mean absolute error: `mean(|pred - target|)`
pub struct L1Loss;

impl LossFn for L1Loss {
    fn forward(&self, predictions: &Array1<f32>, targets: &Array1<f32>) -> f32 {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );
        (predictions - targets).mapv(f32::abs).mean().unwrap_or(0.0)
    }

    fn gradient(&self, predictions: &Array1<f32>, targets: &Array1<f32>) -> Array1<f32> {
        // d(MAE)/d(pred) = sign(pred - target) / n
        let n = predictions.len() as f32;
        (predictions - targets).mapv(|d| d.signum() / n)
    }

    fn name(&self) -> &'static str {
        "L1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_mse_forward() {
        let loss = MseLoss.forward(&array![1.0, 2.0], &array![1.5, 2.5]);
        assert_abs_diff_eq!(loss, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_mse_zero_for_exact_predictions() {
        let pred = array![1.0, -2.0, 3.0];
        assert_eq!(MseLoss.forward(&pred, &pred), 0.0);
    }

    #[test]
    fn test_mse_gradient() {
        let grad = MseLoss.gradient(&array![1.0, 2.0], &array![0.0, 0.0]);
        // 2 * diff / n with n = 2
        assert_abs_diff_eq!(grad[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(grad[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_l1_forward() {
        let loss = L1Loss.forward(&array![1.0, -1.0], &array![0.0, 0.0]);
        assert_abs_diff_eq!(loss, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_l1_gradient_signs() {
        let grad = L1Loss.gradient(&array![1.0, -1.0], &array![0.0, 0.0]);
        assert_abs_diff_eq!(grad[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(grad[1], -0.5, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_mse_length_mismatch() {
        MseLoss.forward(&array![1.0], &array![1.0, 2.0]);
    }

    #[test]
    fn test_loss_names() {
        assert_eq!(MseLoss.name(), "MSE");
        assert_eq!(L1Loss.name(), "L1");
    }
}
