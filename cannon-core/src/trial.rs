use crate::BallColour;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel for "not set yet" in recorded numeric fields.
pub const UNSET: i64 = -999;

/// Presentation a trial ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialType {
    #[default]
    Trial,
    ForcedChoice,
    Confidence,
}

impl TrialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialType::Trial => "trial",
            TrialType::ForcedChoice => "forced_choice",
            TrialType::Confidence => "confidence",
        }
    }
}

/// Recorded result of one completed trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialOutcome {
    pub trial: usize,
    pub trial_type: TrialType,
    pub score: i64,
    pub n_hits: u32,
    /// 1 = left, 2 = right, [`UNSET`] when no shot was taken
    pub response: i32,
    pub ball_colour: Option<BallColour>,
    pub exploded: bool,
    /// Milliseconds from trial start to the accepted response
    #[serde(rename = "RT")]
    pub rt: f64,
    pub confidence: i64,
    pub pink_bet: i64,
    pub purple_bet: i64,
    pub bet_scaling: f64,
}

/// Session-long, append-only record of trial outcomes keyed by trial index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLog {
    outcomes: BTreeMap<usize, TrialOutcome>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an outcome under its trial index. An index that already has an
    /// outcome keeps the first one and `false` is returned.
    pub fn record(&mut self, outcome: TrialOutcome) -> bool {
        use std::collections::btree_map::Entry;
        match self.outcomes.entry(outcome.trial) {
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, trial: usize) -> Option<&TrialOutcome> {
        self.outcomes.get(&trial)
    }

    pub fn contains(&self, trial: usize) -> bool {
        self.outcomes.contains_key(&trial)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes in trial order.
    pub fn iter(&self) -> impl Iterator<Item = &TrialOutcome> {
        self.outcomes.values()
    }

    pub fn last(&self) -> Option<&TrialOutcome> {
        self.outcomes.values().next_back()
    }
}
