//! Trainer orchestrator
//!
//! Owns mutable references to the model, optimizer, and scheduler for the
//! session's lifetime and drives the epoch loop: train pass, validation
//! pass, scheduler step, progress line, and — on strict validation
//! improvement only — checkpoint file, epoch record, and best-model
//! artifact.
//!
//! Execution is single-threaded and blocking. All file writes are flushed
//! before the next epoch begins, so a crash after epoch N leaves a
//! consistent on-disk state reflecting epochs `<= N`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;

use crate::checkpoint::{BestModelSnapshot, Checkpoint};
use crate::error::Result;
use crate::loader::GraphLoader;
use crate::logging::{LogFacade, TrainLogger};
use crate::loss::LossFn;
use crate::model::{GraphModel, LrScheduler, Optimizer};
use crate::scale::TargetScaler;
use crate::step::{train_one_step, validate_one_step};
use crate::tracking::{EpochRecord, StreamingJsonWriter};

/// Subdirectory holding the overwritten best-model artifact
pub const BEST_MODEL_DIR: &str = "BestModel";
/// Subdirectory accumulating per-improvement checkpoint files
pub const CHECKPOINT_DIR: &str = "CheckPoints";

/// How to treat existing checkpoint storage at the start of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Delete `BestModel/` and `CheckPoints/` recursively and recreate them
    /// empty. The session starts with clean checkpoint storage; no merge
    /// with prior runs.
    CleanSlate,
    /// Keep existing directory contents, creating the directories only if
    /// missing.
    ResumeExisting,
}

/// Configuration for one training session
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of epochs to run, strictly sequential
    pub num_epochs: usize,
    /// Path of the streaming JSON log; an existing file is resumed
    pub log_path: PathBuf,
    /// Root for `BestModel/` and `CheckPoints/`; defaults to the current
    /// working directory
    pub output_dir: Option<PathBuf>,
    /// Checkpoint-storage reset policy
    pub reset_policy: ResetPolicy,
}

impl RunConfig {
    /// Create a config with the default clean-slate policy rooted at the
    /// current working directory
    pub fn new(num_epochs: usize, log_path: impl Into<PathBuf>) -> Self {
        Self {
            num_epochs,
            log_path: log_path.into(),
            output_dir: None,
            reset_policy: ResetPolicy::CleanSlate,
        }
    }

    /// Root the artifact directories somewhere other than the cwd
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Override the checkpoint-storage reset policy
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}

/// Summary of a completed training session
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Last epoch that ran
    pub final_epoch: usize,
    /// Average training loss of the last epoch, in normalized units
    pub final_train_loss: f32,
    /// Lowest validation loss seen, in original label units
    pub best_val_loss: f32,
    /// Number of checkpoint files written
    pub checkpoints_written: usize,
    /// Total wall-clock seconds for the session
    pub elapsed_secs: f64,
}

/// Drives the epoch loop over injected collaborators
///
/// The trainer borrows its collaborators for the session; it takes no
/// ownership copy. There is no early stopping and no in-loop resumption:
/// the loop runs to completion or returns the first error.
pub struct Trainer<'a> {
    model: &'a mut dyn GraphModel,
    optimizer: &'a mut dyn Optimizer,
    scheduler: &'a mut dyn LrScheduler,
    logger: Box<dyn TrainLogger>,
}

impl<'a> Trainer<'a> {
    /// Create a trainer over borrowed collaborators, logging through the
    /// `log` facade
    pub fn new(
        model: &'a mut dyn GraphModel,
        optimizer: &'a mut dyn Optimizer,
        scheduler: &'a mut dyn LrScheduler,
    ) -> Self {
        Self {
            model,
            optimizer,
            scheduler,
            logger: Box::new(LogFacade),
        }
    }

    /// Replace the injected logging collaborator
    pub fn with_logger(mut self, logger: Box<dyn TrainLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run the full training session
    ///
    /// A checkpoint file, a log record, and a best-model overwrite happen
    /// if and only if the epoch's validation loss strictly improves on all
    /// prior epochs of the session. The scheduler advances once per epoch
    /// unconditionally.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        config: &RunConfig,
        train_loss_fn: &dyn LossFn,
        val_loss_fn: &dyn LossFn,
        scaler: &TargetScaler,
        train_loader: &dyn GraphLoader,
        val_loader: &dyn GraphLoader,
    ) -> Result<TrainResult> {
        let root = match &config.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let best_dir = root.join(BEST_MODEL_DIR);
        let check_dir = root.join(CHECKPOINT_DIR);
        prepare_dir(&best_dir, config.reset_policy)?;
        prepare_dir(&check_dir, config.reset_policy)?;

        let mut journal = StreamingJsonWriter::open(&config.log_path)?;

        self.logger.info("## Training started ##");
        let start = Instant::now();

        let mut best_val_loss = f32::INFINITY;
        let mut final_train_loss = 0.0;
        let mut checkpoints_written = 0;

        for epoch in 1..=config.num_epochs {
            let (train_loss, train_time) = train_one_step(
                self.model,
                self.optimizer,
                train_loss_fn,
                scaler,
                train_loader,
            );
            let (val_loss, val_time) =
                validate_one_step(self.model, val_loss_fn, scaler, val_loader);

            self.scheduler.step();

            self.logger.info(&format!(
                "Epoch: {epoch:03} Train Loss: {train_loss:.4} Val Loss: {val_loss:.4} \
                 Train Time: {train_time:.2} s. Val Time: {val_time:.2} s."
            ));

            if val_loss < best_val_loss {
                let checkpoint = Checkpoint {
                    epoch,
                    model: self.model.state_snapshot(),
                    optimizer: self.optimizer.state_snapshot(),
                    scheduler: self.scheduler.state_snapshot(),
                    val_loss,
                    created_at: Utc::now(),
                };
                checkpoint.save(&check_dir)?;

                journal.append(&EpochRecord {
                    epoch,
                    train_loss,
                    val_loss,
                    train_time,
                    val_time,
                })?;

                best_val_loss = val_loss;
                BestModelSnapshot {
                    model: self.model.state_snapshot(),
                }
                .save(&best_dir)?;
                checkpoints_written += 1;
            }

            final_train_loss = train_loss;
        }

        journal.close()?;
        self.logger.info("## Training finished ##");

        Ok(TrainResult {
            final_epoch: config.num_epochs,
            final_train_loss,
            best_val_loss,
            checkpoints_written,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }
}

/// Apply the reset policy to one artifact directory
fn prepare_dir(dir: &Path, policy: ResetPolicy) -> Result<()> {
    match policy {
        ResetPolicy::CleanSlate => {
            if dir.exists() {
                fs::remove_dir_all(dir)?;
            }
            fs::create_dir_all(dir)?;
        }
        ResetPolicy::ResumeExisting => {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new(10, "log.json");
        assert_eq!(config.num_epochs, 10);
        assert_eq!(config.log_path, PathBuf::from("log.json"));
        assert!(config.output_dir.is_none());
        assert_eq!(config.reset_policy, ResetPolicy::CleanSlate);
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new(5, "log.json")
            .with_output_dir("/tmp/run")
            .with_reset_policy(ResetPolicy::ResumeExisting);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/run")));
        assert_eq!(config.reset_policy, ResetPolicy::ResumeExisting);
    }

    #[test]
    fn test_clean_slate_empties_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CHECKPOINT_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.pt"), "old").unwrap();

        prepare_dir(&dir, ResetPolicy::CleanSlate).unwrap();

        assert!(dir.exists());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_resume_existing_preserves_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CHECKPOINT_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("00001-0.50000.pt"), "{}").unwrap();

        prepare_dir(&dir, ResetPolicy::ResumeExisting).unwrap();

        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_resume_existing_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(BEST_MODEL_DIR);

        prepare_dir(&dir, ResetPolicy::ResumeExisting).unwrap();

        assert!(dir.exists());
    }
}
