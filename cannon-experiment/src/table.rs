//! Per-trial parameters, loaded once before the first trial.

use crate::entity::BallId;
use crate::error::ExperimentError;
use cannon_core::Side;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Bet scaling used when a bonus round is shown for a record that carries no
/// `confidenceScaling` (the training walkthrough does this).
pub const DEFAULT_BET_SCALING: f64 = 10.0;

/// Parameters of one trial, as authored in the trial file.
///
/// Flag fields keep the authored encoding. In particular `pink_explode` and
/// `purple_explode` are inverted: `0` means a ball of that colour explodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    /// Values above 1 mark the trial as broken.
    pub pink_explode_chance: f64,
    pub purple_explode_chance: f64,
    #[serde(deserialize_with = "whole_number")]
    pub pink_explode: i64,
    #[serde(deserialize_with = "whole_number")]
    pub purple_explode: i64,
    #[serde(deserialize_with = "whole_number")]
    pub purple_option1: i64,
    #[serde(deserialize_with = "whole_number")]
    pub purple_option2: i64,
    /// -1 none, 0 left, 1 right
    #[serde(deserialize_with = "whole_number")]
    pub blocked_side: i64,
    #[serde(deserialize_with = "whole_number")]
    pub confidence: i64,
    #[serde(default)]
    pub confidence_scaling: Option<f64>,
}

/// Accepts `1` as well as `1.0` for integer-coded fields.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let v = f64::deserialize(deserializer)?;
    if v.fract() != 0.0 || !v.is_finite() {
        return Err(serde::de::Error::custom(format!("expected a whole number, got {v}")));
    }
    Ok(v as i64)
}

impl TrialRecord {
    pub fn is_broken(&self) -> bool {
        self.pink_explode_chance > 1.0
    }

    /// Betting trial: flagged for confidence and not broken.
    pub fn is_confidence(&self) -> bool {
        self.confidence == 1 && !self.is_broken()
    }

    /// Flagged for confidence but suppressed because the trial is broken.
    pub fn is_forced_choice(&self) -> bool {
        self.confidence == 1 && self.is_broken()
    }

    pub fn blocked(&self) -> Option<Side> {
        Side::from_index(self.blocked_side)
    }

    /// Which ball a response on `side` fires.
    pub fn ball_for(&self, side: Side) -> BallId {
        let purple = match side {
            Side::Left => self.purple_option1,
            Side::Right => self.purple_option2,
        };
        if purple == 1 { BallId::Purple } else { BallId::Pink }
    }

    /// Whether firing `ball` this trial ends in an explosion (flag `0`).
    pub fn explodes(&self, ball: BallId) -> bool {
        match ball {
            BallId::Pink => self.pink_explode == 0,
            BallId::Purple => self.purple_explode == 0,
        }
    }

    pub fn bet_scaling(&self) -> f64 {
        self.confidence_scaling.unwrap_or(DEFAULT_BET_SCALING)
    }

    fn validate(&self, trial: usize) -> Result<(), ExperimentError> {
        let invalid = |reason: String| ExperimentError::InvalidTrial { trial, reason };
        for (name, v) in [
            ("pinkExplode", self.pink_explode),
            ("purpleExplode", self.purple_explode),
            ("purpleOption1", self.purple_option1),
            ("purpleOption2", self.purple_option2),
            ("confidence", self.confidence),
        ] {
            if v != 0 && v != 1 {
                return Err(invalid(format!("{name} must be 0 or 1, got {v}")));
            }
        }
        if !(-1..=1).contains(&self.blocked_side) {
            return Err(invalid(format!(
                "blockedSide must be -1, 0 or 1, got {}",
                self.blocked_side
            )));
        }
        if self.is_confidence() {
            match self.confidence_scaling {
                Some(s) if s.is_finite() => {}
                _ => return Err(invalid("confidence trial without confidenceScaling".into())),
            }
        }
        Ok(())
    }
}

/// Ordered trial records plus the number of trials this session runs.
#[derive(Debug, Clone)]
pub struct TrialTable {
    records: Vec<TrialRecord>,
    total_trials: usize,
}

impl TrialTable {
    /// Builds a table, capping the session length at `cap` when given.
    pub fn from_records(records: Vec<TrialRecord>, cap: Option<usize>) -> Result<Self, ExperimentError> {
        if records.is_empty() {
            return Err(ExperimentError::EmptyTable);
        }
        for (i, r) in records.iter().enumerate() {
            r.validate(i)?;
        }
        let total_trials = match cap {
            Some(cap) => cap.min(records.len()),
            None => records.len(),
        };
        Ok(Self {
            records,
            total_trials,
        })
    }

    /// Parses either the keyed form (`{"0": {...}, "1": {...}}`) or a plain
    /// array. Keyed tables must cover `0..n` without gaps.
    pub fn from_json_str(json: &str, cap: Option<usize>) -> Result<Self, ExperimentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let parse = |trial: usize, v: serde_json::Value| {
            serde_json::from_value::<TrialRecord>(v).map_err(|e| ExperimentError::InvalidTrial {
                trial,
                reason: e.to_string(),
            })
        };

        let records = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| parse(i, v))
                .collect::<Result<Vec<_>, _>>()?,
            serde_json::Value::Object(map) => {
                let mut keyed = Vec::with_capacity(map.len());
                for (k, v) in map {
                    let trial: usize = k.parse().map_err(|_| ExperimentError::InvalidTrial {
                        trial: keyed.len(),
                        reason: format!("key {k:?} is not a trial index"),
                    })?;
                    keyed.push((trial, parse(trial, v)?));
                }
                keyed.sort_by_key(|(i, _)| *i);
                for (expected, (i, _)) in keyed.iter().enumerate() {
                    if *i != expected {
                        return Err(ExperimentError::MissingTrial(expected));
                    }
                }
                keyed.into_iter().map(|(_, r)| r).collect()
            }
            _ => {
                return Err(ExperimentError::InvalidTrial {
                    trial: 0,
                    reason: "trial file must be an object or an array".into(),
                });
            }
        };
        Self::from_records(records, cap)
    }

    pub fn load(path: &Path, cap: Option<usize>) -> Result<Self, ExperimentError> {
        let text = std::fs::read_to_string(path).map_err(|source| ExperimentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, cap)
    }

    pub fn total_trials(&self) -> usize {
        self.total_trials
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Record for `trial`.
    ///
    /// # Panics
    /// If `trial` is not below [`total_trials`](Self::total_trials). The state
    /// machine ends the session before asking for such an index.
    pub fn get(&self, trial: usize) -> &TrialRecord {
        match self.try_get(trial) {
            Some(r) => r,
            None => panic!(
                "trial {trial} requested but the session only runs {} trials",
                self.total_trials
            ),
        }
    }

    pub fn try_get(&self, trial: usize) -> Option<&TrialRecord> {
        if trial < self.total_trials {
            self.records.get(trial)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYED: &str = r#"{
        "1": {"pinkExplodeChance": 2, "purpleExplodeChance": 2, "pinkExplode": 1,
              "purpleExplode": 0, "purpleOption1": 0, "purpleOption2": 1,
              "blockedSide": 0, "confidence": 1},
        "0": {"pinkExplodeChance": 0.8, "purpleExplodeChance": 0.2, "pinkExplode": 1.0,
              "purpleExplode": 0, "purpleOption1": 1, "purpleOption2": 0,
              "blockedSide": -1, "confidence": 1, "confidenceScaling": 10}
    }"#;

    #[test]
    fn keyed_table_is_ordered_by_index() {
        let table = TrialTable::from_json_str(KEYED, None).unwrap();
        assert_eq!(table.total_trials(), 2);
        let first = table.get(0);
        assert!(first.is_confidence());
        assert_eq!(first.bet_scaling(), 10.0);
        assert_eq!(first.ball_for(Side::Left), BallId::Purple);
        assert!(!first.explodes(BallId::Pink));
        assert!(first.explodes(BallId::Purple));

        let second = table.get(1);
        assert!(second.is_broken());
        assert!(second.is_forced_choice());
        assert!(!second.is_confidence());
        assert_eq!(second.blocked(), Some(Side::Left));
    }

    #[test]
    fn broken_detection_is_strictly_above_one() {
        let mut r = *TrialTable::from_json_str(KEYED, None).unwrap().get(0);
        r.pink_explode_chance = 1.0;
        assert!(!r.is_broken());
        r.pink_explode_chance = 1.0001;
        assert!(r.is_broken());
        assert_eq!(r.is_broken(), r.is_broken());
    }

    #[test]
    fn short_sessions_take_the_smaller_count() {
        let table = TrialTable::from_json_str(KEYED, Some(5)).unwrap();
        assert_eq!(table.total_trials(), 2);
        let table = TrialTable::from_json_str(KEYED, Some(1)).unwrap();
        assert_eq!(table.total_trials(), 1);
        assert!(table.try_get(1).is_none());
        assert_eq!(table.record_count(), 2);
    }

    #[test]
    #[should_panic(expected = "only runs 1 trials")]
    fn lookup_past_the_end_panics() {
        let table = TrialTable::from_json_str(KEYED, Some(1)).unwrap();
        table.get(1);
    }

    #[test]
    fn missing_field_is_fatal() {
        let json = r#"[{"pinkExplodeChance": 0.5, "purpleExplodeChance": 0.5,
                        "pinkExplode": 1, "purpleExplode": 1, "purpleOption1": 1,
                        "purpleOption2": 0, "confidence": 0}]"#;
        let err = TrialTable::from_json_str(json, None).unwrap_err();
        match err {
            ExperimentError::InvalidTrial { trial, reason } => {
                assert_eq!(trial, 0);
                assert!(reason.contains("blockedSide"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn gaps_are_rejected() {
        let json = r#"{"0": {"pinkExplodeChance": 0.5, "purpleExplodeChance": 0.5,
                        "pinkExplode": 1, "purpleExplode": 1, "purpleOption1": 1,
                        "purpleOption2": 0, "blockedSide": -1, "confidence": 0},
                       "2": {"pinkExplodeChance": 0.5, "purpleExplodeChance": 0.5,
                        "pinkExplode": 1, "purpleExplode": 1, "purpleOption1": 1,
                        "purpleOption2": 0, "blockedSide": -1, "confidence": 0}}"#;
        assert!(matches!(
            TrialTable::from_json_str(json, None),
            Err(ExperimentError::MissingTrial(1))
        ));
    }

    #[test]
    fn out_of_range_flags_are_rejected() {
        let json = r#"[{"pinkExplodeChance": 0.5, "purpleExplodeChance": 0.5,
                        "pinkExplode": 1, "purpleExplode": 1, "purpleOption1": 1,
                        "purpleOption2": 0, "blockedSide": 2, "confidence": 0}]"#;
        assert!(matches!(
            TrialTable::from_json_str(json, None),
            Err(ExperimentError::InvalidTrial { .. })
        ));
        assert!(matches!(
            TrialTable::from_json_str("[]", None),
            Err(ExperimentError::EmptyTable)
        ));
    }

    #[test]
    fn confidence_trial_needs_scaling() {
        let json = r#"[{"pinkExplodeChance": 0.5, "purpleExplodeChance": 0.5,
                        "pinkExplode": 1, "purpleExplode": 1, "purpleOption1": 1,
                        "purpleOption2": 0, "blockedSide": -1, "confidence": 1}]"#;
        assert!(TrialTable::from_json_str(json, None).is_err());
    }
}
