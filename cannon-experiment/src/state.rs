use crate::config::SessionConfig;
use crate::entity::alien::RESPAWN_DELAY_MS;
use crate::entity::{
    Alien, AlienSignal, AssetManifest, AsteroidRing, Ball, BallId, BallSignal, Cannon, Contact,
    detect_contacts,
};
use crate::error::ExperimentError;
use crate::hud::{BonusText, Cue, ExplodeBars, Hud};
use crate::input::KeyRepeatGate;
use crate::table::{TrialRecord, TrialTable};
use crate::trial::ActiveTrial;
use cannon_core::{BallColour, Scene, SessionLog, Side, TrialType};
use cannon_timing::{Scheduler, Timer, TimerToken};
use log::{debug, info};
use rand::Rng;

/// Points for hitting the alien.
pub const HIT_POINTS: i64 = 100;
/// Points lost when a ball explodes.
pub const EXPLOSION_PENALTY: i64 = 50;
/// How long both balls sit transparent before a bonus round is revealed.
pub const CONFIDENCE_PRESTAGE_MS: u64 = 500;
/// The broken overlay hides this long after any key response.
pub const BROKEN_OVERLAY_HIDE_MS: u64 = 1000;
/// Bonus text appears after 400 ms and grows for 1000 ms before the score moves.
pub const BONUS_CUE_MS: u64 = 400 + 1000;
/// Longest physics step; keeps a fast ball from skipping over a target.
pub const MAX_STEP_MS: f64 = 10.0;

/// Hooks that let a caller change what happens at trial boundaries.
pub trait TrialHooks {
    /// Called with the whole log at every save point and at the end.
    fn save(&mut self, log: &SessionLog);

    /// Keep re-running the current trial instead of moving to the next.
    fn holds_trial(&self) -> bool {
        false
    }

    fn explosions_enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Bonus round being set up or waiting for the bet.
    BettingPending,
    AwaitingFire,
    InFlight,
    /// Bet placed, waiting for the bonus cue to finish.
    TrialResolved,
    SessionEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BallLaunched(BallId),
    BallExploded(BallId),
    BallOffScreen(BallId),
    BallReachedTop(BallId),
    AlienHit(BallId),
    AsteroidHit { asteroid: usize, ball: BallId },
}

impl GameEvent {
    pub fn ball(&self) -> BallId {
        match *self {
            GameEvent::BallLaunched(b)
            | GameEvent::BallExploded(b)
            | GameEvent::BallOffScreen(b)
            | GameEvent::BallReachedTop(b)
            | GameEvent::AlienHit(b) => b,
            GameEvent::AsteroidHit { ball, .. } => ball,
        }
    }

    /// After one of these the ball is out of play for the rest of the frame.
    fn settles_ball(&self) -> bool {
        matches!(
            self,
            GameEvent::BallExploded(_)
                | GameEvent::BallOffScreen(_)
                | GameEvent::AlienHit(_)
                | GameEvent::AsteroidHit { .. }
        )
    }
}

/// Delayed callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    ConfidenceReveal,
    HideBrokenOverlay,
    BonusCueShown,
    AlienRespawn,
}

impl Job {
    /// Trial-bound jobs are dropped once their trial is over.
    pub fn is_trial_bound(&self) -> bool {
        !matches!(self, Job::AlienRespawn)
    }
}

pub struct TrialStateMachine<H, T, R>
where
    H: TrialHooks,
    T: Timer,
    R: Rng,
{
    pub phase: SessionPhase,
    pub timer: T,
    pub rng: R,
    pub hooks: H,
    config: SessionConfig,
    table: TrialTable,
    trial_number: i64,
    score: i64,
    n_hits: u32,
    current: Option<ActiveTrial>,
    log: SessionLog,
    cannon: Cannon,
    balls: [Ball; 2],
    alien: Alien,
    ring: AsteroidRing,
    scheduler: Scheduler<Job>,
    gate: KeyRepeatGate,
    hud: Hud,
    cues: Vec<Cue>,
    cannon_active: bool,
    confidence_shown: bool,
    target_hit: bool,
    broken_instructions_shown: bool,
    scene_request: Option<Scene>,
    last_update_ms: u64,
}

impl<H, T, R> TrialStateMachine<H, T, R>
where
    H: TrialHooks,
    T: Timer,
    R: Rng,
{
    pub fn new(
        config: &SessionConfig,
        table: TrialTable,
        assets: &AssetManifest,
        hooks: H,
        timer: T,
        rng: R,
    ) -> Result<Self, ExperimentError> {
        let colour = |id: BallId| {
            if config.balls_are_grey {
                BallColour::Grey
            } else {
                id.natural_colour()
            }
        };
        let balls = [
            Ball::new(BallId::Pink, colour(BallId::Pink), assets)?,
            Ball::new(BallId::Purple, colour(BallId::Purple), assets)?,
        ];
        for key in ["cannon", "cannon_stuff"] {
            assets.require("cannon", key)?;
        }
        let hud = Hud::new(table.total_trials(), config.show_explode_chance_bars);
        Ok(Self {
            phase: SessionPhase::Idle,
            timer,
            rng,
            hooks,
            config: config.clone(),
            table,
            trial_number: -1,
            score: 0,
            n_hits: 0,
            current: None,
            log: SessionLog::new(),
            cannon: Cannon::default(),
            balls,
            alien: Alien::new(250.0, 200.0, config.alien_speed, assets)?,
            ring: AsteroidRing::new(assets)?,
            scheduler: Scheduler::new(),
            gate: KeyRepeatGate::default(),
            hud,
            cues: Vec::new(),
            cannon_active: false,
            confidence_shown: false,
            target_hit: false,
            broken_instructions_shown: false,
            scene_request: None,
            last_update_ms: 0,
        })
    }

    /// Starts the first trial. Does nothing once started.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::Idle {
            return;
        }
        self.last_update_ms = self.timer.now();
        self.start_new_trial();
    }

    /// Closes the trial in progress and opens the next one, or ends the
    /// session when every trial has been run.
    pub fn start_new_trial(&mut self) {
        if self.phase == SessionPhase::SessionEnded {
            return;
        }
        let held = self.trial_number >= 0 && self.hooks.holds_trial();
        if !held {
            self.trial_number += 1;
            if self.trial_number != 0 {
                if let Some(finished) = self.current.take() {
                    self.log.record(finished.outcome(self.score, self.n_hits));
                }
            }
            if self.trial_number as usize == self.table.total_trials() {
                self.end_session();
                return;
            }
        }

        info!("Starting new trial {}", self.trial_number);
        self.scheduler.cancel(|t| t.purpose.is_trial_bound());
        let index = self.trial_number as usize;
        self.hud.trial = self.trial_number;
        if !held && self.config.is_save_point(index) {
            self.hooks.save(&self.log);
        }

        let record = *self.table.get(index);
        let mut trial = ActiveTrial::begin(index, record, self.timer.now());
        trial.safe = !self.hooks.explosions_enabled();
        self.current = Some(trial);

        self.hud.set_explode_bars(ExplodeBars {
            pink: record.pink_explode_chance,
            purple: record.purple_explode_chance,
        });
        if self.config.show_ball_colour_probabilities {
            self.hud.ball_colour_probabilities =
                Some((self.config.left_pink_chance, self.config.right_pink_chance));
        }
        self.apply_broken(&record);
        self.hud.blocked_container = record.blocked();
        self.apply_confidence(&record);

        let interval = self.config.score_announcement_interval;
        if interval > 0 && self.score > 0 && self.score % interval == 0 {
            self.cues.push(Cue::ScoreAnnouncement(self.score));
        }
        self.cannon_active = true;
    }

    fn apply_broken(&mut self, record: &TrialRecord) {
        let broken = record.is_broken();
        self.hud.broken_indicator = broken;
        if broken {
            for ball in &mut self.balls {
                ball.set_grey();
            }
            self.hud.set_explode_bars(ExplodeBars::EMPTY);
            if !self.broken_instructions_shown && self.config.show_broken_instructions {
                self.hud.broken_overlay = true;
                self.cues.push(Cue::BrokenInstructions);
                self.broken_instructions_shown = true;
            }
        } else {
            for ball in &mut self.balls {
                ball.set_coloured();
            }
            self.hud.broken_overlay = false;
            self.broken_instructions_shown = false;
        }
    }

    fn apply_confidence(&mut self, record: &TrialRecord) {
        if record.is_confidence() {
            if let Some(trial) = self.current.as_mut() {
                trial.safe = true;
            }
            for ball in &mut self.balls {
                ball.prestage();
            }
            self.schedule(CONFIDENCE_PRESTAGE_MS, Job::ConfidenceReveal);
            self.phase = SessionPhase::BettingPending;
        } else {
            self.hide_confidence();
            self.phase = SessionPhase::AwaitingFire;
        }
    }

    /// Reveals the betting ring for the current trial. A broken trial is
    /// marked forced-choice instead.
    pub fn show_confidence(&mut self) {
        let Some(trial) = self.current.as_mut() else {
            return;
        };
        if trial.broken {
            trial.trial_type = TrialType::ForcedChoice;
            return;
        }
        trial.trial_type = TrialType::Confidence;
        trial.bet_scaling = trial.record.bet_scaling();
        let scaling = trial.bet_scaling;

        for ball in &mut self.balls {
            ball.move_to_bottom();
        }
        self.alien.set_moving(false);
        self.ring.show(scaling);
        self.hud.pointer_visible = true;
        self.hud.set_explode_bars(ExplodeBars::EMPTY);
        self.cues.push(Cue::BonusRoundFlash);
        self.confidence_shown = true;
        self.target_hit = false;
        self.phase = SessionPhase::BettingPending;
    }

    /// Puts the play area back to a regular trial.
    pub fn hide_confidence(&mut self) {
        self.hud.score = self.score;
        self.hud.bonus_text = None;
        self.alien.set_moving(true);
        self.hud.pointer_visible = false;
        self.ring.hide();
        self.confidence_shown = false;
        for ball in &mut self.balls {
            ball.reset_position();
        }
    }

    /// Parks the alien in view without letting it be hit.
    pub fn hold_alien(&mut self) {
        self.alien.set_moving(false);
        self.alien.visible = true;
    }

    pub fn aim_at(&mut self, x: f64, y: f64) {
        self.cannon.aim_at(x, y);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.cannon.set_rotation(rotation);
    }

    /// A key press for `side`. Returns whether a ball was fired.
    pub fn press(&mut self, side: Side) -> bool {
        if matches!(self.phase, SessionPhase::Idle | SessionPhase::SessionEnded) {
            return false;
        }
        let now = self.timer.now();
        if !self.gate.accept(side, now) || self.balls.iter().any(|b| b.visible) {
            return false;
        }
        self.schedule(BROKEN_OVERLAY_HIDE_MS, Job::HideBrokenOverlay);
        self.cues.push(Cue::ContainerFlash(side));

        let Some(trial) = self.current.as_mut() else {
            return false;
        };
        if trial.blocked() == Some(side) || !self.cannon_active {
            return false;
        }
        let id = trial.record.ball_for(side);
        let explode = trial.explodes(id);
        let ball = &mut self.balls[id.index()];
        trial.record_response(side, now, ball.colour());
        ball.fire(side, explode);
        self.cannon_active = false;
        self.phase = SessionPhase::InFlight;
        debug!("Fired {:?} from {:?} (explode: {explode})", id, side);
        true
    }

    /// Advances timers and entities to the timer's current time and returns
    /// what happened, in order. Delayed callbacks run here; entity events are
    /// left for [`handle_event`](Self::handle_event).
    pub fn update(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if matches!(self.phase, SessionPhase::Idle | SessionPhase::SessionEnded) {
            return events;
        }
        let now = self.timer.now();
        let dt = now.saturating_sub(self.last_update_ms);
        self.last_update_ms = now;

        self.run_due_jobs(now);
        if self.phase == SessionPhase::SessionEnded {
            return events;
        }

        let mut settled = [false; 2];
        let mut remaining = dt as f64;
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_MS);
            remaining -= step;

            for ball in &mut self.balls {
                let id = ball.id;
                // a settled ball waits for handle_event to place it
                if settled[id.index()] {
                    continue;
                }
                for signal in ball.update(step, &self.cannon) {
                    let event = match signal {
                        BallSignal::Launched { .. } => GameEvent::BallLaunched(id),
                        BallSignal::Exploded => GameEvent::BallExploded(id),
                        BallSignal::OffScreen => GameEvent::BallOffScreen(id),
                        BallSignal::ReachedTop => GameEvent::BallReachedTop(id),
                    };
                    push_event(&mut events, &mut settled, event);
                }
            }
            if let Some(AlienSignal::HitTweenDone) = self.alien.update(step) {
                self.schedule(RESPAWN_DELAY_MS, Job::AlienRespawn);
            }
            self.ring.update(step);

            for contact in detect_contacts(&self.balls, &self.alien, &self.ring) {
                let event = match contact {
                    Contact::Alien(ball) => GameEvent::AlienHit(ball),
                    Contact::Asteroid { index, ball } => GameEvent::AsteroidHit {
                        asteroid: index,
                        ball,
                    },
                };
                push_event(&mut events, &mut settled, event);
            }
        }
        events
    }

    pub fn handle_event(&mut self, event: GameEvent) -> bool {
        match (self.phase, event) {
            (SessionPhase::Idle | SessionPhase::SessionEnded, _) => false,

            (_, GameEvent::BallLaunched(id)) => {
                debug!("{:?} ball launched", id);
                true
            }

            (SessionPhase::InFlight, GameEvent::BallExploded(id)) => {
                self.balls[id.index()].move_to_bottom();
                self.score -= EXPLOSION_PENALTY;
                self.hud.score = self.score;
                if let Some(trial) = self.current.as_mut() {
                    trial.exploded = true;
                }
                self.start_new_trial();
                true
            }

            (SessionPhase::InFlight, GameEvent::BallOffScreen(_)) => {
                self.start_new_trial();
                true
            }

            (SessionPhase::InFlight, GameEvent::AlienHit(id)) => {
                let ball = &mut self.balls[id.index()];
                ball.reset_position();
                ball.move_to_bottom();
                self.score += HIT_POINTS;
                self.n_hits += 1;
                self.hud.score = self.score;
                self.hud.n_hits = self.n_hits;
                self.start_new_trial();
                self.alien.reset();
                true
            }

            (SessionPhase::InFlight, GameEvent::AsteroidHit { asteroid, ball })
                if self.confidence_shown && !self.target_hit =>
            {
                let Some(target) = self.ring.get(asteroid).cloned() else {
                    return false;
                };
                let colour = self.balls[ball.index()].colour();
                let Some(trial) = self.current.as_mut() else {
                    return false;
                };
                self.target_hit = true;
                self.hud.pointer_visible = false;
                let delta = trial.place_bet(&target, colour);
                info!(
                    "Bet {} on {} asteroid {} with a {} ball: {delta:+}",
                    target.bet_amount, target.colour, target.base_value, colour
                );
                let text = BonusText::new(delta, target.colour);
                self.hud.bonus_text = Some(text.clone());
                self.cues.push(Cue::BonusText(text));
                self.schedule(BONUS_CUE_MS, Job::BonusCueShown);
                self.balls[ball.index()].reset_position();
                self.ring.explode();
                self.phase = SessionPhase::TrialResolved;
                true
            }

            (SessionPhase::InFlight, GameEvent::BallReachedTop(id))
                if self.confidence_shown && !self.target_hit =>
            {
                info!("Bonus round {} ended without a bet", self.trial_number);
                if let Some(trial) = self.current.as_mut() {
                    trial.record_missed_bet();
                }
                self.target_hit = true;
                self.balls[id.index()].reset_position();
                self.hide_confidence();
                self.start_new_trial();
                true
            }

            _ => false,
        }
    }

    /// One frame: [`update`](Self::update), then every event through
    /// [`handle_event`](Self::handle_event).
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events = self.update();
        for event in &events {
            self.handle_event(*event);
        }
        events
    }

    fn schedule(&mut self, delay_ms: u64, job: Job) {
        let now = self.timer.now();
        self.scheduler
            .schedule(now, delay_ms, TimerToken::new(self.trial_number, job));
    }

    fn run_due_jobs(&mut self, now: u64) {
        for token in self.scheduler.take_due(now) {
            if self.phase == SessionPhase::SessionEnded {
                break;
            }
            if token.purpose.is_trial_bound() && !token.is_current(self.trial_number) {
                debug!("Dropping {:?} armed in trial {}", token.purpose, token.trial);
                continue;
            }
            match token.purpose {
                Job::ConfidenceReveal => {
                    for ball in &mut self.balls {
                        ball.end_prestage();
                    }
                    self.show_confidence();
                }
                Job::HideBrokenOverlay => self.hud.broken_overlay = false,
                Job::BonusCueShown => {
                    let delta = self.current.as_ref().map_or(0, |t| t.pending_delta);
                    self.score += delta;
                    self.hide_confidence();
                    self.start_new_trial();
                }
                Job::AlienRespawn => {
                    let x = self.rng.random_range(100.0..400.0);
                    let y = self.rng.random_range(150.0..250.0);
                    let visible = self
                        .current
                        .as_ref()
                        .is_none_or(|t| t.trial_type != TrialType::Confidence);
                    self.alien.respawn(x, y, visible);
                }
            }
        }
    }

    fn end_session(&mut self) {
        info!(
            "Ending game after {} trials, score {}",
            self.table.total_trials(),
            self.score
        );
        self.hooks.save(&self.log);
        self.scheduler.cancel(|_| true);
        self.cannon_active = false;
        self.cannon.set_frozen(true);
        self.phase = SessionPhase::SessionEnded;
        self.scene_request = Some(Scene::End);
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn n_hits(&self) -> u32 {
        self.n_hits
    }

    /// Index of the trial in progress; -1 before the first one.
    pub fn trial_number(&self) -> i64 {
        self.trial_number
    }

    pub fn total_trials(&self) -> usize {
        self.table.total_trials()
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// One-shot cues queued since the last call.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn take_scene_request(&mut self) -> Option<Scene> {
        self.scene_request.take()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == SessionPhase::SessionEnded
    }

    pub fn current_trial(&self) -> Option<&ActiveTrial> {
        self.current.as_ref()
    }

    pub fn current_record(&self) -> Option<&TrialRecord> {
        self.current.as_ref().map(|t| &t.record)
    }

    pub fn cannon_active(&self) -> bool {
        self.cannon_active
    }

    pub fn is_confidence_shown(&self) -> bool {
        self.confidence_shown
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cannon(&self) -> &Cannon {
        &self.cannon
    }

    pub fn ball(&self, id: BallId) -> &Ball {
        &self.balls[id.index()]
    }

    pub fn balls(&self) -> &[Ball; 2] {
        &self.balls
    }

    pub fn alien(&self) -> &Alien {
        &self.alien
    }

    pub fn ring(&self) -> &AsteroidRing {
        &self.ring
    }

    pub fn pending_jobs(&self) -> usize {
        self.scheduler.len()
    }
}

fn push_event(events: &mut Vec<GameEvent>, settled: &mut [bool; 2], event: GameEvent) {
    let slot = &mut settled[event.ball().index()];
    if *slot || events.contains(&event) {
        return;
    }
    if event.settles_ball() {
        *slot = true;
    }
    events.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cannon_timing::ManualTimer;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[derive(Default)]
    struct CountingHooks {
        saves: Vec<usize>,
    }

    impl TrialHooks for CountingHooks {
        fn save(&mut self, log: &SessionLog) {
            self.saves.push(log.len());
        }
    }

    fn record(blocked_side: i64) -> TrialRecord {
        TrialRecord {
            pink_explode_chance: 0.5,
            purple_explode_chance: 0.5,
            pink_explode: 1,
            purple_explode: 1,
            purple_option1: 1,
            purple_option2: 0,
            blocked_side,
            confidence: 0,
            confidence_scaling: None,
        }
    }

    fn machine(
        records: Vec<TrialRecord>,
    ) -> (TrialStateMachine<CountingHooks, ManualTimer, Pcg32>, ManualTimer) {
        let timer = ManualTimer::new();
        let table = TrialTable::from_records(records, None).unwrap();
        let m = TrialStateMachine::new(
            &SessionConfig::default(),
            table,
            &AssetManifest::standard(),
            CountingHooks::default(),
            timer.clone(),
            Pcg32::seed_from_u64(3),
        )
        .unwrap();
        (m, timer)
    }

    #[test]
    fn first_start_opens_trial_zero() {
        let (mut m, _) = machine(vec![record(-1)]);
        assert_eq!(m.trial_number(), -1);
        m.start();
        assert_eq!(m.trial_number(), 0);
        assert_eq!(m.phase, SessionPhase::AwaitingFire);
        assert!(m.cannon_active());
        assert!(m.log().is_empty());
    }

    #[test]
    fn blocked_side_press_only_flashes() {
        let (mut m, timer) = machine(vec![record(0)]);
        m.start();
        timer.advance(300);
        assert!(!m.press(Side::Left));
        assert_eq!(m.drain_cues(), vec![Cue::ContainerFlash(Side::Left)]);
        let trial = m.current_trial().unwrap();
        assert_eq!(trial.response, cannon_core::UNSET as i32);
        assert!(m.cannon_active());
        assert!(!m.ball(BallId::Pink).visible && !m.ball(BallId::Purple).visible);

        timer.advance(600);
        assert!(m.press(Side::Right));
        let trial = m.current_trial().unwrap();
        assert_eq!(trial.response, 2);
        assert_eq!(trial.rt, 900.0);
        // right container fires pink in this record
        assert!(m.ball(BallId::Pink).visible);
        assert!(!m.cannon_active());
    }

    #[test]
    fn second_press_while_ball_in_flight_is_ignored() {
        let (mut m, timer) = machine(vec![record(-1)]);
        m.start();
        assert!(m.press(Side::Left));
        m.drain_cues();
        timer.advance(600);
        assert!(!m.press(Side::Right));
        assert!(m.drain_cues().is_empty());
    }

    #[test]
    fn missing_cannon_sprite_is_fatal() {
        let mut assets = AssetManifest::standard();
        assets.remove("cannon_stuff");
        let table = TrialTable::from_records(vec![record(-1)], None).unwrap();
        let result = TrialStateMachine::new(
            &SessionConfig::default(),
            table,
            &assets,
            CountingHooks::default(),
            ManualTimer::new(),
            Pcg32::seed_from_u64(0),
        );
        assert!(matches!(result, Err(ExperimentError::MissingAsset { .. })));
    }

    #[test]
    fn stale_trial_jobs_are_dropped() {
        let (mut m, timer) = machine(vec![record(-1), record(-1)]);
        m.start();
        m.schedule(1000, Job::HideBrokenOverlay);
        m.start_new_trial();
        m.hud.broken_overlay = true;
        timer.advance(1500);
        m.update();
        assert!(m.hud().broken_overlay);
    }

    #[test]
    fn push_event_keeps_first_settling_event_per_ball() {
        let mut events = Vec::new();
        let mut settled = [false; 2];
        push_event(&mut events, &mut settled, GameEvent::BallReachedTop(BallId::Pink));
        push_event(&mut events, &mut settled, GameEvent::BallReachedTop(BallId::Pink));
        push_event(&mut events, &mut settled, GameEvent::AlienHit(BallId::Pink));
        push_event(&mut events, &mut settled, GameEvent::BallOffScreen(BallId::Pink));
        push_event(&mut events, &mut settled, GameEvent::BallOffScreen(BallId::Purple));
        assert_eq!(
            events,
            vec![
                GameEvent::BallReachedTop(BallId::Pink),
                GameEvent::AlienHit(BallId::Pink),
                GameEvent::BallOffScreen(BallId::Purple),
            ]
        );
    }
}
