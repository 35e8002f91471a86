//! Training walkthrough.
//!
//! A linear run of numbered steps over a single held trial. Each step swaps
//! the explanatory overlays on screen. Most steps advance on a click once the
//! step has been up for [`MIN_DWELL_MS`]; the firing step advances when the
//! practice ball leaves the play area. Some steps only exist for some task
//! variants.

use crate::config::SessionConfig;
use crate::entity::AssetManifest;
use crate::error::ExperimentError;
use crate::persistence::TrainingHooks;
use crate::state::{GameEvent, TrialStateMachine};
use crate::table::TrialTable;
use cannon_core::{Scene, Side, TaskVariant};
use cannon_timing::Timer;
use log::info;
use rand::Rng;

/// A click is ignored until the current step has been shown this long.
pub const MIN_DWELL_MS: u64 = 1000;
/// The only step in which the cannon can be fired.
pub const FIRE_STEP: u8 = 2;
pub const FINAL_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Aim,
    ContainerLeft,
    ContainerRight,
    Balls,
    /// How the two containers' colour chances relate (MB only).
    BallsLinked,
    Explosions,
    Goal,
    BallsLeft,
    BonusRound,
    BonusMatching,
}

impl Overlay {
    pub fn text(&self, task: TaskVariant) -> &'static str {
        use TaskVariant::*;
        match (self, task) {
            (Overlay::Aim, _) => "Use the mouse to aim the cannon",
            (Overlay::ContainerLeft, _) => "Press 1 to fire from the left",
            (Overlay::ContainerRight, _) => "Press 2 to fire from the right",
            (Overlay::Balls, ModelBased) => {
                "The two containers have a different chance to fire pink or purple balls, which changes from time to time"
            }
            (Overlay::Balls, Hybrid) => {
                "The two containers have a different chance to fire pink or purple balls, depending on how many of each colour there are"
            }
            (Overlay::Balls, ModelFree) => "Both containers fire grey coloured balls",
            (Overlay::BallsLinked, _) => {
                "If one container is shooting one colour, this means the other one is more likely to shoot the other colour"
            }
            (Overlay::Explosions, ModelBased) => {
                "Some balls will explode and you will lose points!\n\nThe fuller the bar, the MORE likely the ball will be safe"
            }
            (Overlay::Explosions, Hybrid) => {
                "Some balls will explode and you will lose points!\n\nPink and purple balls have different chances of exploding, which changes from time to time"
            }
            (Overlay::Explosions, ModelFree) => {
                "Some balls will explode and you will lose points!\n\nThe left and right options have different chances to fire exploding balls, which changes from time to time"
            }
            (Overlay::Goal, _) => "Your goal is to hit the spaceships with the balls!",
            (Overlay::BallsLeft, _) => "The number at the top shows how many balls you have left",
            (Overlay::BonusRound, _) => {
                "On bonus rounds, earn extra points by matching the colours of the ball and asteroids"
            }
            (Overlay::BonusMatching, _) => {
                "If the ball colour matches, you win the bonus amount. If not, you lose the amount!"
            }
        }
    }

    /// Small print under the overlay text.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Overlay::Aim | Overlay::Balls | Overlay::BallsLinked => Some("Click to continue"),
            Overlay::ContainerLeft | Overlay::ContainerRight => Some("Choose one!"),
            _ => None,
        }
    }
}

pub struct TrainingController<T: Timer, R: Rng> {
    machine: TrialStateMachine<TrainingHooks, T, R>,
    task: TaskVariant,
    step: u8,
    time_since_step_shown: u64,
    overlays: Vec<Overlay>,
    scene_request: Option<Scene>,
    last_tick_ms: u64,
}

impl<T: Timer, R: Rng> TrainingController<T, R> {
    pub fn new(
        config: &SessionConfig,
        table: TrialTable,
        assets: &AssetManifest,
        timer: T,
        rng: R,
    ) -> Result<Self, ExperimentError> {
        let machine = TrialStateMachine::new(config, table, assets, TrainingHooks, timer, rng)?;
        Ok(Self {
            machine,
            task: config.task,
            step: 0,
            time_since_step_shown: 0,
            overlays: Vec::new(),
            scene_request: None,
            last_tick_ms: 0,
        })
    }

    pub fn start(&mut self) {
        if self.step != 0 {
            return;
        }
        self.machine.start();
        self.last_tick_ms = self.machine.timer.now();
        self.step_training();
    }

    /// Pointer click. Returns whether it advanced the walkthrough.
    pub fn click(&mut self) -> bool {
        if self.time_since_step_shown > MIN_DWELL_MS && self.step != FIRE_STEP && self.step < FINAL_STEP {
            self.step_training();
            true
        } else {
            false
        }
    }

    /// Key presses only reach the cannon on the firing step.
    pub fn press(&mut self, side: Side) -> bool {
        self.step == FIRE_STEP && self.machine.press(side)
    }

    pub fn aim_at(&mut self, x: f64, y: f64) {
        self.machine.aim_at(x, y);
    }

    pub fn tick(&mut self) -> Vec<GameEvent> {
        let now = self.machine.timer.now();
        self.time_since_step_shown += now.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now;

        let events = self.machine.tick();
        if events.iter().any(|e| matches!(e, GameEvent::BallOffScreen(_))) {
            self.step_training();
        }
        events
    }

    fn show(&mut self, overlay: Overlay) {
        if !self.overlays.contains(&overlay) {
            self.overlays.push(overlay);
        }
    }

    fn hide(&mut self, overlay: Overlay) {
        self.overlays.retain(|o| *o != overlay);
    }

    fn step_training(&mut self) {
        self.time_since_step_shown = 0;
        self.step += 1;
        info!("Training step {}", self.step);

        let model_based = self.task == TaskVariant::ModelBased;
        match self.step {
            1 => {
                self.show(Overlay::Aim);
                self.machine.hold_alien();
            }
            2 => {
                self.hide(Overlay::Aim);
                self.show(Overlay::ContainerLeft);
                self.show(Overlay::ContainerRight);
            }
            3 => {
                self.machine.hide_confidence();
                self.hide(Overlay::ContainerLeft);
                self.hide(Overlay::ContainerRight);
                self.show(Overlay::Balls);
                self.machine.hold_alien();
            }
            4 => {
                self.hide(Overlay::Balls);
                if model_based {
                    self.show(Overlay::BallsLinked);
                } else {
                    self.step_training();
                }
            }
            5 => {
                self.hide(Overlay::BallsLinked);
                self.show(Overlay::Explosions);
            }
            6 => {
                self.hide(Overlay::Explosions);
                self.show(Overlay::Goal);
            }
            7 => {
                self.hide(Overlay::Goal);
                self.show(Overlay::BallsLeft);
            }
            8 => {
                self.hide(Overlay::BallsLeft);
                if model_based {
                    self.machine.show_confidence();
                    self.show(Overlay::BonusRound);
                } else {
                    self.step = 9;
                    self.step_training();
                }
            }
            9 => {
                self.hide(Overlay::BonusRound);
                self.show(Overlay::BonusMatching);
            }
            FINAL_STEP => {
                self.overlays.clear();
                self.scene_request = Some(Scene::Ready);
            }
            _ => {}
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    pub fn is_showing(&self, overlay: Overlay) -> bool {
        self.overlays.contains(&overlay)
    }

    pub fn task(&self) -> TaskVariant {
        self.task
    }

    pub fn machine(&self) -> &TrialStateMachine<TrainingHooks, T, R> {
        &self.machine
    }

    pub fn is_finished(&self) -> bool {
        self.step >= FINAL_STEP
    }

    pub fn take_scene_request(&mut self) -> Option<Scene> {
        self.scene_request.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::BallId;
    use crate::state::SessionPhase;
    use crate::table::TrialRecord;
    use cannon_timing::ManualTimer;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn controller(task: &str) -> (TrainingController<ManualTimer, Pcg32>, ManualTimer) {
        let record = TrialRecord {
            pink_explode_chance: 0.3,
            purple_explode_chance: 0.6,
            pink_explode: 0,
            purple_explode: 0,
            purple_option1: 1,
            purple_option2: 0,
            blocked_side: -1,
            confidence: 0,
            confidence_scaling: None,
        };
        let config =
            SessionConfig::apply(&crate::config::GameSettings::default(), task, false).unwrap();
        let table = TrialTable::from_records(vec![record, record], None).unwrap();
        let timer = ManualTimer::new();
        let c = TrainingController::new(
            &config,
            table,
            &AssetManifest::standard(),
            timer.clone(),
            Pcg32::seed_from_u64(11),
        )
        .unwrap();
        (c, timer)
    }

    fn wait(c: &mut TrainingController<ManualTimer, Pcg32>, timer: &ManualTimer, ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ms / 16 {
            timer.advance(16);
            events.extend(c.tick());
        }
        events
    }

    fn click_after_dwell(c: &mut TrainingController<ManualTimer, Pcg32>, timer: &ManualTimer) {
        wait(c, timer, 1100);
        assert!(c.click(), "click refused at step {}", c.step());
    }

    /// Fires from the left and waits for the ball to leave the play area.
    fn fire_practice_ball(c: &mut TrainingController<ManualTimer, Pcg32>, timer: &ManualTimer) -> Vec<GameEvent> {
        assert!(c.press(Side::Left));
        wait(c, timer, 3000)
    }

    #[test]
    fn early_clicks_and_fire_step_clicks_are_ignored() {
        let (mut c, timer) = controller("MB");
        c.start();
        assert_eq!(c.step(), 1);
        assert!(c.is_showing(Overlay::Aim));
        assert!(!c.press(Side::Left));
        wait(&mut c, &timer, 500);
        assert!(!c.click());
        click_after_dwell(&mut c, &timer);
        assert_eq!(c.step(), FIRE_STEP);
        wait(&mut c, &timer, 2000);
        assert!(!c.click());
        assert_eq!(c.step(), FIRE_STEP);
    }

    #[test]
    fn model_based_walkthrough_visits_every_step() {
        let (mut c, timer) = controller("MB");
        c.start();
        click_after_dwell(&mut c, &timer);
        let events = fire_practice_ball(&mut c, &timer);
        assert!(events.contains(&GameEvent::BallOffScreen(BallId::Purple)));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::BallExploded(_))));
        assert_eq!(c.step(), 3);
        assert!(c.is_showing(Overlay::Balls));

        let mut seen = vec![c.step()];
        while !c.is_finished() {
            click_after_dwell(&mut c, &timer);
            seen.push(c.step());
            if c.step() == 8 {
                wait(&mut c, &timer, 100);
                assert!(c.machine().ring().is_visible());
                assert!(c.machine().is_confidence_shown());
            }
        }
        assert_eq!(seen, vec![3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(c.take_scene_request(), Some(Scene::Ready));
        assert!(c.overlays().is_empty());
    }

    #[test]
    fn model_free_skips_model_based_steps() {
        let (mut c, timer) = controller("MF");
        c.start();
        click_after_dwell(&mut c, &timer);
        fire_practice_ball(&mut c, &timer);
        assert_eq!(c.step(), 3);
        assert_eq!(Overlay::Balls.text(c.task()), "Both containers fire grey coloured balls");

        click_after_dwell(&mut c, &timer);
        assert_eq!(c.step(), 5);
        assert!(c.is_showing(Overlay::Explosions));
        assert!(!c.is_showing(Overlay::Balls));
        click_after_dwell(&mut c, &timer);
        click_after_dwell(&mut c, &timer);
        assert_eq!(c.step(), 7);
        click_after_dwell(&mut c, &timer);
        assert_eq!(c.step(), FINAL_STEP);
        assert_eq!(c.take_scene_request(), Some(Scene::Ready));
    }

    #[test]
    fn practice_trial_is_held_and_never_saved() {
        let (mut c, timer) = controller("MBMF");
        c.start();
        click_after_dwell(&mut c, &timer);
        fire_practice_ball(&mut c, &timer);
        let m = c.machine();
        assert_eq!(m.trial_number(), 0);
        assert!(m.log().is_empty());
        assert_eq!(m.score(), 0);
        assert_eq!(m.phase, SessionPhase::AwaitingFire);
        assert!(m.alien().visible);
        assert!(!m.alien().is_hittable());
    }
}
