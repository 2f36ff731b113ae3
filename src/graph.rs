//! Graph batch data structures
//!
//! A [`MaterialGraph`] is a single combined structure representing one or
//! more molecular/material graphs: edge connectivity, per-node categorical
//! types, and per-edge continuous attributes. A [`GraphBatch`] pairs a graph
//! with its regression labels and global state attributes and is consumed
//! once per training step.

use ndarray::{Array1, Array2};

/// A batched material graph
///
/// Node features are categorical atom/element types consumed as integer
/// indices by the embedding layer of the model; edge features are continuous
/// attributes such as expanded bond distances.
#[derive(Debug, Clone)]
pub struct MaterialGraph {
    /// Source node index per edge
    pub src: Vec<usize>,
    /// Destination node index per edge
    pub dst: Vec<usize>,
    /// Categorical node type per node
    pub node_types: Array1<i64>,
    /// Continuous edge attributes, one row per edge
    pub edge_attrs: Array2<f32>,
}

impl MaterialGraph {
    /// Create a graph from edge lists and feature arrays
    pub fn new(
        src: Vec<usize>,
        dst: Vec<usize>,
        node_types: Array1<i64>,
        edge_attrs: Array2<f32>,
    ) -> Self {
        assert_eq!(src.len(), dst.len(), "edge lists must have equal length");
        assert_eq!(
            src.len(),
            edge_attrs.nrows(),
            "one edge attribute row per edge"
        );
        Self {
            src,
            dst,
            node_types,
            edge_attrs,
        }
    }

    /// Number of nodes in the batched graph
    pub fn num_nodes(&self) -> usize {
        self.node_types.len()
    }

    /// Number of edges in the batched graph
    pub fn num_edges(&self) -> usize {
        self.src.len()
    }
}

/// One training batch: a batched graph, its labels, and global attributes
#[derive(Debug, Clone)]
pub struct GraphBatch {
    /// Batched graph structure and node/edge features
    pub graph: MaterialGraph,
    /// Regression target per example
    pub labels: Array1<f32>,
    /// Global state attributes, one row per example
    pub attrs: Array2<f32>,
}

impl GraphBatch {
    /// Create a new batch
    pub fn new(graph: MaterialGraph, labels: Array1<f32>, attrs: Array2<f32>) -> Self {
        Self {
            graph,
            labels,
            attrs,
        }
    }

    /// Number of examples in the batch
    pub fn size(&self) -> usize {
        self.labels.len()
    }
}
