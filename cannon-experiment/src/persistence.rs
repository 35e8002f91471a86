//! Saving the session log.
//!
//! A [`Persistence`] backend stores one record per subject. [`DataSaver`]
//! sits between the state machine and the backend: it remembers whether the
//! subject record was ever created, skips every save if it was not, and turns
//! backend failures into warnings so the session keeps running.

use crate::error::ExperimentError;
use crate::launch::LaunchParams;
use crate::state::TrialHooks;
use cannon_core::{SessionLog, TaskVariant};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub trait Persistence {
    /// Creates the subject's record. Called once, before the first trial.
    fn init_subject(&mut self, params: &LaunchParams, task: TaskVariant) -> Result<(), ExperimentError>;
    /// Replaces the stored trial data with `log`.
    fn persist(&mut self, log: &SessionLog) -> Result<(), ExperimentError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRecord {
    #[serde(rename = "subjectID")]
    pub subject_id: String,
    #[serde(rename = "studyID")]
    pub study_id: String,
    pub task: TaskVariant,
    pub testing: bool,
    pub started_unix_s: u64,
    pub trial_data: SessionLog,
}

/// Writes `<dir>/<subject>.json`, replacing it on every save.
#[derive(Debug)]
pub struct JsonFilePersistence {
    dir: PathBuf,
    record: Option<SubjectRecord>,
}

impl JsonFilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            record: None,
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.record
            .as_ref()
            .map(|r| self.dir.join(format!("{}.json", r.subject_id)))
    }

    fn write(&self, path: &Path, record: &SubjectRecord) -> Result<(), ExperimentError> {
        let write_err = |source: std::io::Error| ExperimentError::Write {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(record).map_err(|e| write_err(std::io::Error::other(e)))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(write_err)
    }
}

impl Persistence for JsonFilePersistence {
    fn init_subject(&mut self, params: &LaunchParams, task: TaskVariant) -> Result<(), ExperimentError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ExperimentError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let started_unix_s = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let record = SubjectRecord {
            subject_id: params.subject_id.clone(),
            study_id: params.study_key(),
            task,
            testing: params.testing,
            started_unix_s,
            trial_data: SessionLog::new(),
        };
        let path = self.dir.join(format!("{}.json", record.subject_id));
        self.write(&path, &record)?;
        self.record = Some(record);
        Ok(())
    }

    fn persist(&mut self, log: &SessionLog) -> Result<(), ExperimentError> {
        let path = self.path().ok_or(ExperimentError::SubjectNotInitialised)?;
        let Some(record) = self.record.as_mut() else {
            return Err(ExperimentError::SubjectNotInitialised);
        };
        record.trial_data = log.clone();
        let record = record.clone();
        self.write(&path, &record)
    }
}

/// Persistence hook used by the game: saves through a backend, never fails.
#[derive(Debug)]
pub struct DataSaver<P: Persistence> {
    backend: P,
    init_failed: bool,
    saves: usize,
}

impl<P: Persistence> DataSaver<P> {
    /// Creates the subject record. A failure is logged and disables every
    /// later save for the session.
    pub fn init(mut backend: P, params: &LaunchParams, task: TaskVariant) -> Self {
        let init_failed = match backend.init_subject(params, task) {
            Ok(()) => false,
            Err(e) => {
                warn!("Subject initialisation failed: {e}");
                true
            }
        };
        Self {
            backend,
            init_failed,
            saves: 0,
        }
    }

    pub fn init_failed(&self) -> bool {
        self.init_failed
    }

    /// Successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    pub fn save(&mut self, log: &SessionLog) {
        if self.init_failed {
            warn!("Failed to save data because subject initialization failed.");
            return;
        }
        match self.backend.persist(log) {
            Ok(()) => {
                self.saves += 1;
                debug!("Saved {} trials", log.len());
            }
            Err(e) => warn!("Failed to save data: {e}"),
        }
    }
}

impl<P: Persistence> TrialHooks for DataSaver<P> {
    fn save(&mut self, log: &SessionLog) {
        DataSaver::save(self, log);
    }
}

/// Hooks for the training walkthrough: one trial held open, nothing saved,
/// nothing explodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingHooks;

impl TrialHooks for TrainingHooks {
    fn save(&mut self, _log: &SessionLog) {}

    fn holds_trial(&self) -> bool {
        true
    }

    fn explosions_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cannon_core::{TrialOutcome, TrialType, UNSET};

    struct Flaky {
        fail_init: bool,
        fail_persist: bool,
        persisted: usize,
    }

    impl Persistence for Flaky {
        fn init_subject(&mut self, _: &LaunchParams, _: TaskVariant) -> Result<(), ExperimentError> {
            if self.fail_init {
                Err(ExperimentError::SubjectNotInitialised)
            } else {
                Ok(())
            }
        }

        fn persist(&mut self, _: &SessionLog) -> Result<(), ExperimentError> {
            self.persisted += 1;
            if self.fail_persist {
                Err(ExperimentError::SubjectNotInitialised)
            } else {
                Ok(())
            }
        }
    }

    fn params(subject: &str) -> LaunchParams {
        LaunchParams {
            subject_id: subject.to_string(),
            testing: true,
            study_id: "Pilot".to_string(),
            short: false,
            task: "MB".to_string(),
        }
    }

    fn log_with(n: usize) -> SessionLog {
        let mut log = SessionLog::new();
        for trial in 0..n {
            log.record(TrialOutcome {
                trial,
                trial_type: TrialType::Trial,
                score: 100 * trial as i64,
                n_hits: trial as u32,
                response: 1,
                ball_colour: None,
                exploded: false,
                rt: 300.0,
                confidence: UNSET,
                pink_bet: UNSET,
                purple_bet: UNSET,
                bet_scaling: UNSET as f64,
            });
        }
        log
    }

    #[test]
    fn failed_init_skips_every_save() {
        let backend = Flaky {
            fail_init: true,
            fail_persist: false,
            persisted: 0,
        };
        let mut saver = DataSaver::init(backend, &params("s1"), TaskVariant::ModelBased);
        assert!(saver.init_failed());
        saver.save(&log_with(2));
        saver.save(&log_with(3));
        assert_eq!(saver.backend().persisted, 0);
        assert_eq!(saver.saves(), 0);
    }

    #[test]
    fn backend_failure_is_retried_at_next_save() {
        let backend = Flaky {
            fail_init: false,
            fail_persist: true,
            persisted: 0,
        };
        let mut saver = DataSaver::init(backend, &params("s2"), TaskVariant::ModelBased);
        saver.save(&log_with(1));
        saver.save(&log_with(2));
        assert_eq!(saver.backend().persisted, 2);
        assert_eq!(saver.saves(), 0);
    }

    #[test]
    fn json_file_holds_latest_log() {
        let dir = std::env::temp_dir().join(format!("cannon-persist-{}", std::process::id()));
        let mut backend = JsonFilePersistence::new(&dir);
        assert!(matches!(
            backend.persist(&log_with(1)),
            Err(ExperimentError::SubjectNotInitialised)
        ));

        backend.init_subject(&params("abc"), TaskVariant::Hybrid).unwrap();
        backend.persist(&log_with(2)).unwrap();
        backend.persist(&log_with(4)).unwrap();

        let path = backend.path().unwrap();
        let stored: SubjectRecord = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.subject_id, "abc");
        assert_eq!(stored.study_id, "pilot");
        assert_eq!(stored.task, TaskVariant::Hybrid);
        assert_eq!(stored.trial_data.len(), 4);

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["trialData"]["3"]["nHits"], 3);
        assert_eq!(raw["trialData"]["0"]["RT"], 300.0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn training_hooks_hold_and_defuse() {
        let hooks = TrainingHooks;
        assert!(hooks.holds_trial());
        assert!(!hooks.explosions_enabled());
    }
}
