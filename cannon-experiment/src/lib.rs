pub mod config;
pub mod entity;
pub mod error;
pub mod hud;
pub mod input;
pub mod launch;
pub mod persistence;
pub mod state;
pub mod table;
pub mod training;
pub mod trial;

pub use config::{GameSettings, SessionConfig, TaskSettings};
pub use entity::AssetManifest;
pub use error::ExperimentError;
pub use hud::{BonusText, Cue, ExplodeBars, Hud};
pub use launch::LaunchParams;
pub use persistence::{DataSaver, JsonFilePersistence, Persistence, SubjectRecord, TrainingHooks};
pub use state::{GameEvent, Job, SessionPhase, TrialHooks, TrialStateMachine};
pub use table::{TrialRecord, TrialTable};
pub use training::{Overlay, TrainingController};
pub use trial::ActiveTrial;
