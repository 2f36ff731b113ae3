//! Collaborator traits for the training loop
//!
//! The trainer treats the model, the optimizer, and the learning-rate
//! scheduler as opaque units behind narrow traits. Graph convolution,
//! parameter storage, and gradient bookkeeping are the implementation's
//! business; the loop only drives mode switches, forward/backward passes,
//! optimizer steps, and state snapshots.
//!
//! State snapshots are JSON blobs. Checkpoints bundle them verbatim, so an
//! implementation is free to choose its own layout as long as it can restore
//! from what it produced.

use ndarray::{Array1, Array2};
use serde_json::Value;

use crate::graph::MaterialGraph;

/// A graph network producing one scalar prediction per example
pub trait GraphModel {
    /// Forward pass over a batched graph
    ///
    /// Returns predictions of shape `(num_examples, 1)`; the step functions
    /// squeeze the singleton dimension before computing the loss.
    fn forward(
        &mut self,
        graph: &MaterialGraph,
        edge_feats: &Array2<f32>,
        node_feats: &Array1<i64>,
        attrs: &Array2<f32>,
    ) -> Array2<f32>;

    /// Propagate the loss gradient w.r.t. the predictions back through the
    /// network, accumulating parameter gradients
    fn backward(&mut self, pred_grad: &Array1<f32>);

    /// Enable gradient tracking and training-only behavior such as dropout
    fn train_mode(&mut self);

    /// Disable gradient tracking; no parameter mutation until the next
    /// `train_mode`
    fn eval_mode(&mut self);

    /// Serialize the current parameter state
    fn state_snapshot(&self) -> Value;
}

/// An optimizer tied 1:1 to the parameters of one model
pub trait Optimizer {
    /// Clear accumulated gradients
    fn zero_grad(&mut self);

    /// Apply one update step from the accumulated gradients
    fn step(&mut self);

    /// Serialize optimizer internals (moments, step counts)
    fn state_snapshot(&self) -> Value;
}

/// A learning-rate schedule advanced once per epoch
pub trait LrScheduler {
    /// Advance the schedule by one epoch
    fn step(&mut self);

    /// Serialize scheduler internals
    fn state_snapshot(&self) -> Value;
}
