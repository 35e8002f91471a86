//! Session configuration.
//!
//! [`GameSettings`] is the deployable settings file (TOML). Any top-level key
//! may be left out and falls back to the value the study shipped with; a task
//! table (`[mb]`, `[mbmf]`, `[mf]`) that is present must be complete.
//!
//! [`SessionConfig`] is the immutable view a single session runs with. It is
//! built once by [`SessionConfig::apply`] and handed to the state machine.

use crate::error::ExperimentError;
use cannon_core::TaskVariant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub redirect_url: String,
    pub alien_speed: f64,
    pub debug_physics: bool,
    /// Save the session log every this many trials (0 disables periodic saves).
    pub data_save_interval: usize,
    /// Trial count used when the session is launched with the short flag.
    pub short_trial_count: usize,
    pub score_announcement_interval: i64,
    /// Directory the per-task trial files are resolved against.
    pub trial_info_dir: PathBuf,
    #[serde(default = "TaskSettings::model_based")]
    pub mb: TaskSettings,
    #[serde(default = "TaskSettings::hybrid")]
    pub mbmf: TaskSettings,
    #[serde(default = "TaskSettings::model_free")]
    pub mf: TaskSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            redirect_url: "www.redirecturl.com".to_string(),
            alien_speed: 120.0,
            debug_physics: false,
            data_save_interval: 5,
            short_trial_count: 5,
            score_announcement_interval: 1000,
            trial_info_dir: PathBuf::from("trial_info"),
            mb: TaskSettings::model_based(),
            mbmf: TaskSettings::hybrid(),
            mf: TaskSettings::model_free(),
        }
    }
}

impl GameSettings {
    pub fn from_toml_str(s: &str) -> Result<Self, ExperimentError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ExperimentError> {
        let text = std::fs::read_to_string(path).map_err(|source| ExperimentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn task(&self, task: TaskVariant) -> &TaskSettings {
        match task {
            TaskVariant::ModelBased => &self.mb,
            TaskVariant::Hybrid => &self.mbmf,
            TaskVariant::ModelFree => &self.mf,
        }
    }
}

/// Presentation settings that differ between task variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSettings {
    pub show_explode_chance_bars: bool,
    pub show_ball_colour_probabilities: bool,
    pub balls_are_grey: bool,
    /// Fixed chance of a pink ball from each container; negative shows grey.
    pub left_pink_chance: f64,
    pub right_pink_chance: f64,
    pub show_broken_instructions: bool,
    pub trial_info_file: String,
}

impl TaskSettings {
    pub fn model_based() -> Self {
        Self {
            show_explode_chance_bars: true,
            show_ball_colour_probabilities: false,
            balls_are_grey: false,
            left_pink_chance: 0.7,
            right_pink_chance: 0.3,
            show_broken_instructions: true,
            trial_info_file: "trial_info_transition-learning.json".to_string(),
        }
    }

    pub fn hybrid() -> Self {
        Self {
            show_explode_chance_bars: false,
            show_ball_colour_probabilities: true,
            balls_are_grey: false,
            left_pink_chance: 0.7,
            right_pink_chance: 0.3,
            show_broken_instructions: false,
            trial_info_file: "trial_info_two-step.json".to_string(),
        }
    }

    pub fn model_free() -> Self {
        Self {
            show_explode_chance_bars: false,
            show_ball_colour_probabilities: false,
            balls_are_grey: true,
            left_pink_chance: -1.0,
            right_pink_chance: -1.0,
            show_broken_instructions: false,
            trial_info_file: "trial_info_model-free.json".to_string(),
        }
    }
}

/// Everything one session needs to know, fixed at bootstrap.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub task: TaskVariant,
    pub short: bool,
    pub short_trial_count: usize,
    pub redirect_url: String,
    pub alien_speed: f64,
    pub debug_physics: bool,
    pub data_save_interval: usize,
    pub score_announcement_interval: i64,
    pub show_explode_chance_bars: bool,
    pub show_ball_colour_probabilities: bool,
    pub balls_are_grey: bool,
    pub left_pink_chance: f64,
    pub right_pink_chance: f64,
    pub show_broken_instructions: bool,
    pub trial_info_path: PathBuf,
}

impl SessionConfig {
    /// Resolves the settings for `task`. An unrecognised task aborts startup.
    pub fn apply(settings: &GameSettings, task: &str, short: bool) -> Result<Self, ExperimentError> {
        let task: TaskVariant = task.parse()?;
        let per_task = settings.task(task);
        Ok(Self {
            task,
            short,
            short_trial_count: settings.short_trial_count,
            redirect_url: settings.redirect_url.clone(),
            alien_speed: settings.alien_speed,
            debug_physics: settings.debug_physics,
            data_save_interval: settings.data_save_interval,
            score_announcement_interval: settings.score_announcement_interval,
            show_explode_chance_bars: per_task.show_explode_chance_bars,
            show_ball_colour_probabilities: per_task.show_ball_colour_probabilities,
            balls_are_grey: per_task.balls_are_grey,
            left_pink_chance: per_task.left_pink_chance,
            right_pink_chance: per_task.right_pink_chance,
            show_broken_instructions: per_task.show_broken_instructions,
            trial_info_path: settings.trial_info_dir.join(&per_task.trial_info_file),
        })
    }

    /// Trial cap applied to the table, if any.
    pub fn trial_cap(&self) -> Option<usize> {
        self.short.then_some(self.short_trial_count)
    }

    /// Whether trial `n` is a periodic save point.
    pub fn is_save_point(&self, n: usize) -> bool {
        self.data_save_interval > 0 && n != 0 && n % self.data_save_interval == 0
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::apply(&GameSettings::default(), TaskVariant::ModelBased.code(), false)
            .unwrap_or_else(|_| unreachable!("built-in task code parses"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let cfg = SessionConfig::apply(&GameSettings::default(), "MBMF", false).unwrap();
        assert_eq!(cfg.task, TaskVariant::Hybrid);
        assert_eq!(cfg.alien_speed, 120.0);
        assert_eq!(cfg.data_save_interval, 5);
        assert!(cfg.show_ball_colour_probabilities);
        assert!(!cfg.show_explode_chance_bars);
        assert_eq!(
            cfg.trial_info_path,
            PathBuf::from("trial_info").join("trial_info_two-step.json")
        );
    }

    #[test]
    fn unknown_task_is_fatal() {
        let err = SessionConfig::apply(&GameSettings::default(), "XYZ", false).unwrap_err();
        assert!(matches!(err, ExperimentError::UnknownTask(_)));
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let settings = GameSettings::from_toml_str(
            r#"
            alien_speed = 90.0
            data_save_interval = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.alien_speed, 90.0);
        assert_eq!(settings.data_save_interval, 10);
        assert_eq!(settings.mf, TaskSettings::model_free());
        assert_eq!(settings.redirect_url, "www.redirecturl.com");
    }

    #[test]
    fn incomplete_task_table_is_rejected() {
        let result = GameSettings::from_toml_str(
            r#"
            [mf]
            balls_are_grey = true
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn save_points() {
        let cfg = SessionConfig::default();
        assert!(!cfg.is_save_point(0));
        assert!(!cfg.is_save_point(4));
        assert!(cfg.is_save_point(5));
        assert!(cfg.is_save_point(10));

        let never = SessionConfig {
            data_save_interval: 0,
            ..SessionConfig::default()
        };
        assert!(!never.is_save_point(5));
    }

    #[test]
    fn short_sessions_cap_trials() {
        let cfg = SessionConfig::apply(&GameSettings::default(), "MB", true).unwrap();
        assert_eq!(cfg.trial_cap(), Some(5));
        assert_eq!(SessionConfig::default().trial_cap(), None);
    }
}
