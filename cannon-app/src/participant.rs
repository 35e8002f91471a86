//! Scripted participant that plays a session when no one is at the keyboard.

use cannon_core::Side;
use cannon_experiment::state::CONFIDENCE_PRESTAGE_MS;
use cannon_experiment::training::{FIRE_STEP, MIN_DWELL_MS};
use cannon_experiment::{TrainingController, TrialHooks, TrialStateMachine};
use cannon_timing::Timer;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::ops::RangeInclusive;

const REACTION_MS: RangeInclusive<u64> = 300..=900;
/// Wait before pressing again after a refused press.
const RETRY_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Aim {
    /// Follow the alien while it is on screen.
    Alien,
    Point(f64, f64),
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    trial: i64,
    bonus: bool,
    press_at: u64,
    side: Side,
    aim: Aim,
    fired: bool,
}

pub struct Participant {
    rng: Pcg32,
    plan: Option<Plan>,
    training_step: u8,
    click_at: u64,
}

impl Participant {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            plan: None,
            training_step: 0,
            click_at: 0,
        }
    }

    fn reaction(&mut self) -> u64 {
        self.rng.random_range(REACTION_MS)
    }

    fn pick_side(&mut self) -> Side {
        if self.rng.random_bool(0.5) { Side::Left } else { Side::Right }
    }

    fn plan(&mut self, trial: i64, bonus: bool, now: u64, aim: Aim) -> Plan {
        let plan = Plan {
            trial,
            bonus,
            press_at: now + self.reaction(),
            side: self.pick_side(),
            aim,
            fired: false,
        };
        self.plan = Some(plan);
        plan
    }

    /// One frame of the walkthrough: read each card, then click; fire once on
    /// the firing step.
    pub fn train<T: Timer, R: Rng>(&mut self, training: &mut TrainingController<T, R>) {
        let now = training.machine().timer.now();
        let step = training.step();
        if step != self.training_step {
            self.training_step = step;
            self.click_at = now + MIN_DWELL_MS + self.reaction();
            self.plan = None;
        }

        if step != FIRE_STEP {
            if now >= self.click_at && !training.click() {
                self.click_at = now + RETRY_MS;
            }
            return;
        }

        let mut plan = match self.plan {
            Some(plan) => plan,
            None => {
                let x = self.rng.random_range(60.0..440.0);
                self.plan(0, false, now, Aim::Point(x, 80.0))
            }
        };
        if let Aim::Point(x, y) = plan.aim {
            training.aim_at(x, y);
        }
        if plan.fired || now < plan.press_at {
            return;
        }
        if training.press(plan.side) {
            debug!("Practice shot from {:?}", plan.side);
            plan.fired = true;
        } else {
            let blocked = training.machine().current_record().and_then(|r| r.blocked());
            Self::retry(&mut plan, blocked, now);
        }
        self.plan = Some(plan);
    }

    /// One frame of the main session. Returns the side fired from, if any.
    pub fn play<H, T, R>(&mut self, machine: &mut TrialStateMachine<H, T, R>) -> Option<Side>
    where
        H: TrialHooks,
        T: Timer,
        R: Rng,
    {
        if !machine.cannon_active() {
            return None;
        }
        let now = machine.timer.now();
        let trial = machine.current_trial()?;
        if trial.record.is_confidence() && now <= trial.start_ms + CONFIDENCE_PRESTAGE_MS {
            return None;
        }
        let blocked = trial.blocked();
        let number = machine.trial_number();
        let bonus = machine.is_confidence_shown();

        let mut plan = match self.plan {
            Some(plan) if plan.trial == number && plan.bonus == bonus => plan,
            _ => {
                let aim = if bonus {
                    let targets = machine.ring().asteroids();
                    let target = &targets[self.rng.random_range(0..targets.len())];
                    Aim::Point(target.x, target.y)
                } else {
                    Aim::Alien
                };
                self.plan(number, bonus, now, aim)
            }
        };

        match plan.aim {
            Aim::Alien => {
                let alien = machine.alien();
                let (x, y, visible) = (alien.x, alien.y, alien.visible);
                if visible {
                    machine.aim_at(x, y);
                }
            }
            Aim::Point(x, y) => machine.aim_at(x, y),
        }
        if plan.fired || now < plan.press_at {
            return None;
        }

        let fired = machine.press(plan.side);
        if fired {
            debug!("Trial {number}: fired from {:?}", plan.side);
            plan.fired = true;
        } else {
            Self::retry(&mut plan, blocked, now);
        }
        self.plan = Some(plan);
        fired.then_some(plan.side)
    }

    fn retry(plan: &mut Plan, blocked: Option<Side>, now: u64) {
        if blocked == Some(plan.side) {
            plan.side = plan.side.other();
        }
        plan.press_at = now + RETRY_MS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cannon_core::SessionLog;
    use cannon_experiment::{AssetManifest, GameSettings, SessionConfig, TrialRecord, TrialTable};
    use cannon_timing::ManualTimer;

    struct NoSave;

    impl TrialHooks for NoSave {
        fn save(&mut self, _log: &SessionLog) {}
    }

    fn record(blocked_side: i64, confidence: i64) -> TrialRecord {
        TrialRecord {
            pink_explode_chance: 0.3,
            purple_explode_chance: 0.6,
            pink_explode: 1,
            purple_explode: 0,
            purple_option1: 1,
            purple_option2: 0,
            blocked_side,
            confidence,
            confidence_scaling: Some(10.0),
        }
    }

    fn table() -> TrialTable {
        TrialTable::from_records(
            vec![record(-1, 0), record(0, 0), record(-1, 1), record(1, 0), record(-1, 0)],
            None,
        )
        .unwrap()
    }

    #[test]
    fn plays_a_session_to_the_end() {
        let config = SessionConfig::apply(&GameSettings::default(), "MB", false).unwrap();
        let timer = ManualTimer::new();
        let mut machine = TrialStateMachine::new(
            &config,
            table(),
            &AssetManifest::standard(),
            NoSave,
            timer.clone(),
            Pcg32::seed_from_u64(1),
        )
        .unwrap();
        let mut participant = Participant::new(5);

        machine.start();
        let mut shots = Vec::new();
        for _ in 0..60 * 120 {
            if machine.is_ended() {
                break;
            }
            timer.advance(16);
            if let Some(side) = participant.play(&mut machine) {
                shots.push((machine.trial_number(), side));
            }
            machine.tick();
        }

        assert!(machine.is_ended());
        assert_eq!(machine.log().len(), 5);
        assert_eq!(shots.len(), 5);
        assert!(!shots.contains(&(1, Side::Left)), "fired from a blocked side");
        assert!(!shots.contains(&(3, Side::Right)), "fired from a blocked side");
    }

    #[test]
    fn finishes_the_walkthrough() {
        let config = SessionConfig::apply(&GameSettings::default(), "MB", false).unwrap();
        let timer = ManualTimer::new();
        let mut training = TrainingController::new(
            &config,
            table(),
            &AssetManifest::standard(),
            timer.clone(),
            Pcg32::seed_from_u64(2),
        )
        .unwrap();
        let mut participant = Participant::new(9);

        training.start();
        for _ in 0..60 * 60 {
            if training.is_finished() {
                break;
            }
            timer.advance(16);
            participant.train(&mut training);
            training.tick();
        }
        assert!(training.is_finished());
    }
}
