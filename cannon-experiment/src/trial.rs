//! State of the trial in progress.

use crate::entity::{Asteroid, BallId};
use crate::table::TrialRecord;
use cannon_core::{BallColour, Side, TrialOutcome, TrialType, UNSET};

#[derive(Debug, Clone)]
pub struct ActiveTrial {
    pub index: usize,
    pub record: TrialRecord,
    pub trial_type: TrialType,
    pub broken: bool,
    /// Both balls forced safe (bonus rounds, training).
    pub safe: bool,
    pub start_ms: u64,
    pub response: i32,
    pub rt: f64,
    pub ball_colour: Option<BallColour>,
    pub exploded: bool,
    pub confidence: i64,
    pub pink_bet: i64,
    pub purple_bet: i64,
    pub bet_scaling: f64,
    /// Score change waiting for the bonus cue to finish.
    pub pending_delta: i64,
}

impl ActiveTrial {
    pub fn begin(index: usize, record: TrialRecord, start_ms: u64) -> Self {
        let trial_type = if record.is_forced_choice() {
            TrialType::ForcedChoice
        } else {
            TrialType::Trial
        };
        Self {
            index,
            record,
            trial_type,
            broken: record.is_broken(),
            safe: false,
            start_ms,
            response: UNSET as i32,
            rt: UNSET as f64,
            ball_colour: None,
            exploded: false,
            confidence: UNSET,
            pink_bet: UNSET,
            purple_bet: UNSET,
            bet_scaling: UNSET as f64,
            pending_delta: 0,
        }
    }

    pub fn blocked(&self) -> Option<Side> {
        self.record.blocked()
    }

    /// Whether firing `ball` now ends in an explosion.
    pub fn explodes(&self, ball: BallId) -> bool {
        !self.safe && self.record.explodes(ball)
    }

    pub fn record_response(&mut self, side: Side, now_ms: u64, colour: BallColour) {
        self.response = side.response_code();
        self.rt = now_ms.saturating_sub(self.start_ms) as f64;
        self.ball_colour = Some(colour);
    }

    /// Books a bet on `target` made with a ball of `ball_colour` and returns
    /// the score change it is worth.
    pub fn place_bet(&mut self, target: &Asteroid, ball_colour: BallColour) -> i64 {
        self.confidence = target.base_value * target.colour.confidence_sign();
        if ball_colour == BallColour::Pink {
            self.pink_bet = target.bet_amount;
        } else {
            self.purple_bet = target.bet_amount;
        }
        self.pending_delta = score_delta(self.bet_colour(), target.bet_amount, target.colour);
        self.pending_delta
    }

    /// Colour the participant bet on, if a bet was placed.
    pub fn bet_colour(&self) -> Option<BallColour> {
        if self.pink_bet != UNSET {
            Some(BallColour::Pink)
        } else if self.purple_bet != UNSET {
            Some(BallColour::Purple)
        } else {
            None
        }
    }

    /// A bonus round that ended without a bet counts as a neutral one.
    pub fn record_missed_bet(&mut self) {
        self.confidence = 0;
        self.pink_bet = 0;
        self.purple_bet = 0;
    }

    pub fn outcome(&self, score: i64, n_hits: u32) -> TrialOutcome {
        TrialOutcome {
            trial: self.index,
            trial_type: self.trial_type,
            score,
            n_hits,
            response: self.response,
            ball_colour: self.ball_colour,
            exploded: self.exploded,
            rt: self.rt,
            confidence: self.confidence,
            pink_bet: self.pink_bet,
            purple_bet: self.purple_bet,
            bet_scaling: self.bet_scaling,
        }
    }
}

/// Points won or lost by betting `amount` on `bet` when the target was `target`.
pub fn score_delta(bet: Option<BallColour>, amount: i64, target: BallColour) -> i64 {
    match bet {
        _ if amount == UNSET => 0,
        Some(colour) if colour == target => amount,
        Some(_) => -amount,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TrialRecord {
        TrialRecord {
            pink_explode_chance: 0.2,
            purple_explode_chance: 0.8,
            pink_explode: 0,
            purple_explode: 1,
            purple_option1: 1,
            purple_option2: 0,
            blocked_side: -1,
            confidence: 1,
            confidence_scaling: Some(10.0),
        }
    }

    fn asteroid(colour: BallColour, base_value: i64, bet_amount: i64) -> Asteroid {
        Asteroid {
            colour,
            base_value,
            x: 0.0,
            y: 0.0,
            bet_amount,
            label: bet_amount.to_string(),
        }
    }

    #[test]
    fn score_delta_rules() {
        use BallColour::*;
        assert_eq!(score_delta(Some(Purple), 40, Purple), 40);
        assert_eq!(score_delta(Some(Pink), 40, Purple), -40);
        assert_eq!(score_delta(Some(Pink), UNSET, Pink), 0);
        assert_eq!(score_delta(None, 30, Pink), 0);
    }

    #[test]
    fn purple_bet_on_purple_asteroid_wins() {
        let mut t = ActiveTrial::begin(3, record(), 0);
        let delta = t.place_bet(&asteroid(BallColour::Purple, 3, 40), BallColour::Purple);
        assert_eq!(delta, 40);
        assert_eq!(t.purple_bet, 40);
        assert_eq!(t.pink_bet, UNSET);
        assert_eq!(t.confidence, 3);
    }

    #[test]
    fn pink_target_flips_confidence_sign() {
        let mut t = ActiveTrial::begin(0, record(), 0);
        let delta = t.place_bet(&asteroid(BallColour::Pink, 2, 30), BallColour::Purple);
        assert_eq!(t.confidence, -2);
        assert_eq!(delta, -30);
    }

    #[test]
    fn grey_ball_books_a_purple_bet() {
        let mut t = ActiveTrial::begin(0, record(), 0);
        t.place_bet(&asteroid(BallColour::Purple, 0, 10), BallColour::Grey);
        assert_eq!(t.purple_bet, 10);
        assert_eq!(t.bet_colour(), Some(BallColour::Purple));
    }

    #[test]
    fn safe_trial_never_explodes() {
        let mut t = ActiveTrial::begin(0, record(), 0);
        assert!(t.explodes(BallId::Pink));
        assert!(!t.explodes(BallId::Purple));
        t.safe = true;
        assert!(!t.explodes(BallId::Pink));
    }

    #[test]
    fn response_and_reaction_time() {
        let mut t = ActiveTrial::begin(0, record(), 1_000);
        t.record_response(Side::Right, 1_750, BallColour::Pink);
        let o = t.outcome(100, 1);
        assert_eq!(o.response, 2);
        assert_eq!(o.rt, 750.0);
        assert_eq!(o.ball_colour, Some(BallColour::Pink));
        assert_eq!(o.trial_type, TrialType::Trial);
    }
}
