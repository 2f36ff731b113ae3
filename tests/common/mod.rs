//! Shared fakes for trainer integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use grafeno::{GraphBatch, GraphModel, LossFn, LrScheduler, MaterialGraph, Optimizer};
use ndarray::{array, Array1, Array2};
use serde_json::{json, Value};

/// One single-example batch with the given label
pub fn single_batch(label: f32) -> GraphBatch {
    let graph = MaterialGraph::new(vec![0, 1], vec![1, 0], array![6, 8], array![[1.5], [1.5]]);
    GraphBatch::new(graph, array![label], array![[0.0, 0.0]])
}

/// Predicts a constant and counts epochs via `train_mode` switches
///
/// The state snapshot carries the epoch count so tests can tell which
/// epoch a checkpoint or best-model artifact was written at.
pub struct EpochCountingModel {
    pub epochs_seen: usize,
    pub backward_calls: usize,
    training: bool,
}

impl EpochCountingModel {
    pub fn new() -> Self {
        Self {
            epochs_seen: 0,
            backward_calls: 0,
            training: false,
        }
    }
}

impl GraphModel for EpochCountingModel {
    fn forward(
        &mut self,
        _graph: &MaterialGraph,
        _edge_feats: &Array2<f32>,
        _node_feats: &Array1<i64>,
        attrs: &Array2<f32>,
    ) -> Array2<f32> {
        Array2::zeros((attrs.nrows(), 1))
    }

    fn backward(&mut self, _pred_grad: &Array1<f32>) {
        self.backward_calls += 1;
    }

    fn train_mode(&mut self) {
        self.training = true;
        self.epochs_seen += 1;
    }

    fn eval_mode(&mut self) {
        self.training = false;
    }

    fn state_snapshot(&self) -> Value {
        json!({ "epoch": self.epochs_seen })
    }
}

#[derive(Default)]
pub struct CountingOptimizer {
    pub zero_grad_calls: usize,
    pub step_calls: usize,
}

impl Optimizer for CountingOptimizer {
    fn zero_grad(&mut self) {
        self.zero_grad_calls += 1;
    }

    fn step(&mut self) {
        self.step_calls += 1;
    }

    fn state_snapshot(&self) -> Value {
        json!({ "steps": self.step_calls })
    }
}

#[derive(Default)]
pub struct CountingScheduler {
    pub step_calls: usize,
}

impl LrScheduler for CountingScheduler {
    fn step(&mut self) {
        self.step_calls += 1;
    }

    fn state_snapshot(&self) -> Value {
        json!({ "steps": self.step_calls })
    }
}

/// Returns a scripted loss value per call, zero gradient
pub struct ScriptedLoss {
    values: RefCell<VecDeque<f32>>,
}

impl ScriptedLoss {
    pub fn new(values: &[f32]) -> Self {
        Self {
            values: RefCell::new(values.iter().copied().collect()),
        }
    }
}

impl LossFn for ScriptedLoss {
    fn forward(&self, _predictions: &Array1<f32>, _targets: &Array1<f32>) -> f32 {
        self.values
            .borrow_mut()
            .pop_front()
            .expect("scripted loss exhausted")
    }

    fn gradient(&self, predictions: &Array1<f32>, _targets: &Array1<f32>) -> Array1<f32> {
        Array1::zeros(predictions.len())
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}
