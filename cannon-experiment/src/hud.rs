//! What the participant currently sees, minus the sprites.
//!
//! The state machine keeps a [`Hud`] up to date as it runs and queues
//! one-shot [`Cue`]s for anything that plays once and goes away.

use cannon_core::{BallColour, Side};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplodeBars {
    pub pink: f64,
    pub purple: f64,
}

impl ExplodeBars {
    pub const EMPTY: ExplodeBars = ExplodeBars {
        pink: 0.0,
        purple: 0.0,
    };
}

/// Signed bet result floated over the play area, tinted with the target's colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusText {
    pub text: String,
    pub colour: &'static str,
}

impl BonusText {
    pub fn new(delta: i64, target: BallColour) -> Self {
        let text = if delta >= 0 {
            format!("+{delta}")
        } else {
            delta.to_string()
        };
        Self {
            text,
            colour: target.cue_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: i64,
    pub n_hits: u32,
    pub trial: i64,
    pub total_trials: usize,
    /// `None` when the task variant never shows the bars.
    pub explode_bars: Option<ExplodeBars>,
    /// Top-bar marker for a broken colour generator.
    pub broken_indicator: bool,
    pub broken_overlay: bool,
    pub blocked_container: Option<Side>,
    /// Aiming pointer shown on bonus rounds.
    pub pointer_visible: bool,
    /// Left and right chance of a pink ball, when the task shows them.
    pub ball_colour_probabilities: Option<(f64, f64)>,
    pub bonus_text: Option<BonusText>,
}

impl Hud {
    pub fn new(total_trials: usize, show_explode_bars: bool) -> Self {
        Self {
            score: 0,
            n_hits: 0,
            trial: -1,
            total_trials,
            explode_bars: show_explode_bars.then_some(ExplodeBars::EMPTY),
            broken_indicator: false,
            broken_overlay: false,
            blocked_container: None,
            pointer_visible: false,
            ball_colour_probabilities: None,
            bonus_text: None,
        }
    }

    /// Sets the bars if this task shows them at all.
    pub fn set_explode_bars(&mut self, bars: ExplodeBars) {
        if let Some(current) = self.explode_bars.as_mut() {
            *current = bars;
        }
    }

    /// Balls left in the session, as the top bar counts them.
    pub fn trials_left(&self) -> i64 {
        self.total_trials as i64 - self.trial.max(0)
    }
}

/// Something that plays once.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    ContainerFlash(Side),
    BonusRoundFlash,
    ScoreAnnouncement(i64),
    BrokenInstructions,
    BonusText(BonusText),
}
