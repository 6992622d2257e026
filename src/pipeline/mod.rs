//! Self-play and training pipeline
//!
//! - [`self_play`]: plays one game between two learners
//! - [`training`]: repeats self-play and learning for many games
//! - [`observers`]: progress, metrics, batch reports and JSONL export

pub mod observers;
pub mod self_play;
pub mod training;

pub use observers::{
    BatchReport, BatchReportObserver, DEFAULT_REPORT_INTERVAL, JsonlObserver, MetricsObserver,
    MetricsSummary, Observation, OutcomeTally, ProgressObserver, StepObservation,
};
pub use self_play::{GameRecord, play_game};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
