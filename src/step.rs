//! Epoch step functions
//!
//! One full pass of the dataset through the model, accumulating loss and
//! measuring wall-clock time. Training normalizes the labels before
//! comparing; validation de-normalizes the predictions instead, so the two
//! losses live in different units. That asymmetry is deliberate and must
//! not be "fixed" here.

use std::time::Instant;

use ndarray::{Array1, Array2};

use crate::loader::GraphLoader;
use crate::loss::LossFn;
use crate::model::{GraphModel, Optimizer};
use crate::scale::TargetScaler;

/// Drop the singleton output dimension, one scalar per example
fn squeeze(pred: Array2<f32>) -> Array1<f32> {
    pred.iter().copied().collect()
}

/// Run one training pass over the loader
///
/// Per batch: clear gradients, forward, squeeze, compute loss against the
/// normalized labels, backpropagate, apply one optimizer step, and
/// accumulate the raw loss value. Mutates model parameters and optimizer
/// state once per batch.
///
/// Returns the average loss (sum divided by the loader length) and the
/// wall-clock seconds for the full pass. An empty loader yields NaN; the
/// divisor is not guarded.
pub fn train_one_step(
    model: &mut dyn GraphModel,
    optimizer: &mut dyn Optimizer,
    loss_fn: &dyn LossFn,
    scaler: &TargetScaler,
    loader: &dyn GraphLoader,
) -> (f32, f64) {
    model.train_mode();

    let mut loss_sum = 0.0f32;
    let start = Instant::now();

    for batch in loader.batches() {
        optimizer.zero_grad();

        let node_feats = &batch.graph.node_types;
        let edge_feats = &batch.graph.edge_attrs;

        let pred = model.forward(&batch.graph, edge_feats, node_feats, &batch.attrs);
        let pred = squeeze(pred);

        let target = scaler.normalize(&batch.labels);
        let loss = loss_fn.forward(&pred, &target);

        model.backward(&loss_fn.gradient(&pred, &target));
        optimizer.step();

        loss_sum += loss;
    }

    let elapsed = start.elapsed().as_secs_f64();
    (loss_sum / loader.len() as f32, elapsed)
}

/// Run one validation pass over the loader
///
/// No gradient tracking and no parameter mutation. The loss compares the
/// de-normalized prediction against the raw label, so validation loss is
/// reported in original label units.
pub fn validate_one_step(
    model: &mut dyn GraphModel,
    loss_fn: &dyn LossFn,
    scaler: &TargetScaler,
    loader: &dyn GraphLoader,
) -> (f32, f64) {
    model.eval_mode();

    let mut loss_sum = 0.0f32;
    let start = Instant::now();

    for batch in loader.batches() {
        let node_feats = &batch.graph.node_types;
        let edge_feats = &batch.graph.edge_attrs;

        let pred = model.forward(&batch.graph, edge_feats, node_feats, &batch.attrs);
        let pred = scaler.denormalize(&squeeze(pred));

        loss_sum += loss_fn.forward(&pred, &batch.labels);
    }

    let elapsed = start.elapsed().as_secs_f64();
    (loss_sum / loader.len() as f32, elapsed)
}
