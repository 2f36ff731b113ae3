//! grafeno — training-loop driver for MEGNet-style graph networks
//!
//! This crate orchestrates training sessions for graph neural networks that
//! predict material properties. It provides:
//! - Epoch step functions ([`train_one_step`], [`validate_one_step`])
//! - A [`Trainer`] running the epoch loop with checkpoint/best-model
//!   selection on strict validation improvement
//! - A streaming JSON append-log ([`tracking::StreamingJsonWriter`]) that
//!   keeps the log file valid JSON after every write
//!
//! Model architecture, optimizer and scheduler internals, and batch
//! construction live behind the narrow traits in [`model`] and [`loader`];
//! the loop drives them without knowing their internals.
//!
//! Training loss is computed against normalized labels while validation
//! loss compares de-normalized predictions against raw labels. The two are
//! intentionally not in the same units; see [`scale`].

pub mod checkpoint;
pub mod error;
pub mod graph;
pub mod loader;
pub mod logging;
pub mod loss;
pub mod model;
pub mod scale;
pub mod step;
pub mod tracking;
pub mod trainer;

pub use checkpoint::{BestModelSnapshot, Checkpoint, BEST_MODEL_FILE};
pub use error::{Result, TrainError};
pub use graph::{GraphBatch, MaterialGraph};
pub use loader::{GraphLoader, InMemoryLoader};
pub use logging::{LogFacade, RecordingLogger, TrainLogger};
pub use loss::{L1Loss, LossFn, MseLoss};
pub use model::{GraphModel, LrScheduler, Optimizer};
pub use scale::TargetScaler;
pub use step::{train_one_step, validate_one_step};
pub use tracking::{EpochRecord, StreamingJsonWriter};
pub use trainer::{ResetPolicy, RunConfig, TrainResult, Trainer};
