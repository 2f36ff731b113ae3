//! Checkpoint and best-model artifacts
//!
//! A [`Checkpoint`] bundles model/optimizer/scheduler state snapshots with
//! the epoch and validation loss that produced them. Checkpoint files
//! accumulate in the checkpoint directory, named
//! `<epoch zero-padded to 5>-<val_loss %6.5f>.pt`; the single best-model
//! artifact `best-model.pt` is overwritten on every improvement and holds
//! only the model state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// File name of the overwritten best-model artifact
pub const BEST_MODEL_FILE: &str = "best-model.pt";

/// Snapshot of a training session at one improving epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// 1-based epoch that produced this checkpoint
    pub epoch: usize,
    /// Model parameter state
    pub model: Value,
    /// Optimizer internal state
    pub optimizer: Value,
    /// Scheduler internal state
    pub scheduler: Value,
    /// Validation loss at this epoch, in original label units
    pub val_loss: f32,
    /// When the checkpoint was written
    pub created_at: DateTime<Utc>,
}

impl Checkpoint {
    /// File name for this checkpoint, e.g. `00007-0.31425.pt`
    pub fn file_name(&self) -> String {
        format!("{:05}-{:6.5}.pt", self.epoch, self.val_loss)
    }

    /// Write the checkpoint into `dir`, returning the file path
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Read a checkpoint back from disk
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// The latest best model state, holding only the model snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestModelSnapshot {
    /// Model parameter state
    pub model: Value,
}

impl BestModelSnapshot {
    /// Overwrite `dir/best-model.pt` with this snapshot
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(BEST_MODEL_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Read the best-model artifact from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let json = fs::read_to_string(dir.join(BEST_MODEL_FILE))?;
        Ok(serde_json::from_str(&json)?)
    }
}
