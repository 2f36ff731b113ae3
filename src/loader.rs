//! Batch loaders
//!
//! A [`GraphLoader`] yields a finite, ordered sequence of batches and is
//! restarted fresh for every epoch pass. Internally a loader may prefetch
//! with worker threads; the trainer only sees a blocking iterator. The
//! loader length is used as the averaging divisor for epoch losses and is
//! expected to be non-zero.

use crate::graph::GraphBatch;

/// A restartable source of training or validation batches
pub trait GraphLoader {
    /// Number of batches per pass
    fn len(&self) -> usize;

    /// Whether a pass yields no batches
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a fresh pass over the dataset
    ///
    /// Batches arrive in loader-defined order; the trainer does not
    /// re-order them.
    fn batches(&self) -> Box<dyn Iterator<Item = &GraphBatch> + '_>;
}

/// Loader over a pre-built vector of batches
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    batches: Vec<GraphBatch>,
}

impl InMemoryLoader {
    /// Create a loader from pre-built batches
    pub fn new(batches: Vec<GraphBatch>) -> Self {
        Self { batches }
    }
}

impl GraphLoader for InMemoryLoader {
    fn len(&self) -> usize {
        self.batches.len()
    }

    fn batches(&self) -> Box<dyn Iterator<Item = &GraphBatch> + '_> {
        Box::new(self.batches.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MaterialGraph;
    use ndarray::array;

    fn batch(label: f32) -> GraphBatch {
        let graph = MaterialGraph::new(vec![0], vec![0], array![1], array![[0.5]]);
        GraphBatch::new(graph, array![label], array![[0.0]])
    }

    #[test]
    fn test_in_memory_loader_len() {
        let loader = InMemoryLoader::new(vec![batch(1.0), batch(2.0)]);
        assert_eq!(loader.len(), 2);
        assert!(!loader.is_empty());
    }

    #[test]
    fn test_loader_restarts_each_pass() {
        let loader = InMemoryLoader::new(vec![batch(1.0), batch(2.0)]);
        for _ in 0..2 {
            let labels: Vec<f32> = loader.batches().map(|b| b.labels[0]).collect();
            assert_eq!(labels, vec![1.0, 2.0]);
        }
    }

    #[test]
    fn test_empty_loader() {
        let loader = InMemoryLoader::default();
        assert!(loader.is_empty());
        assert_eq!(loader.batches().count(), 0);
    }
}
