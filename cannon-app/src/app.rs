use crate::participant::Participant;
use anyhow::{Context, Result, bail};
use cannon_core::{Scene, TrialType};
use cannon_experiment::{
    AssetManifest, Cue, DataSaver, GameSettings, JsonFilePersistence, LaunchParams, SessionConfig,
    TrainingController, TrialStateMachine, TrialTable,
};
use cannon_timing::{FrameStats, HighPrecisionTimer, ManualTimer, Timer};
use log::{info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// Frame period of the simulated display, about 60 Hz.
const FRAME_MS: u64 = 16;
/// How long the intro and ready screens stay up.
const SCREEN_DWELL_MS: u64 = 1500;
/// A scene still running after this long is treated as stuck.
const SCENE_LIMIT_MS: u64 = 60 * 60 * 1000;

fn usage() -> ! {
    eprintln!("cannon-app: runs one cannon task session with a scripted participant\n");
    eprintln!("Usage: cannon-app [options] [QUERY]\n");
    eprintln!("  QUERY                 launch query, e.g. 'PROLIFIC_PID=abc&TASK=MBMF&SHORT'");
    eprintln!("  --settings <file>     game settings (TOML); built-in defaults otherwise");
    eprintln!("  --trials <file>       trial info (JSON); overrides the task's trial file");
    eprintln!("  --out <dir>           where subject data is written (default: data)");
    eprintln!("  --seed <n>            seed for the participant and the alien");
    eprintln!("  --realtime            run against the wall clock instead of simulated time");
    process::exit(0);
}

#[derive(Debug, Clone)]
pub struct Options {
    pub query: String,
    pub settings: Option<PathBuf>,
    pub trials: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub seed: Option<u64>,
    pub realtime: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            query: String::new(),
            settings: None,
            trials: None,
            out_dir: PathBuf::from("data"),
            seed: None,
            realtime: false,
        }
    }
}

impl Options {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
            args.next().with_context(|| format!("{flag} needs a value"))
        }

        let mut options = Options::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settings" => options.settings = Some(value(&mut args, &arg)?.into()),
                "--trials" => options.trials = Some(value(&mut args, &arg)?.into()),
                "--out" => options.out_dir = value(&mut args, &arg)?.into(),
                "--seed" => {
                    let seed = value(&mut args, &arg)?;
                    options.seed = Some(seed.parse().with_context(|| format!("bad seed {seed:?}"))?);
                }
                "--realtime" => options.realtime = true,
                "-h" | "--help" => usage(),
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                query => options.query = query.to_string(),
            }
        }
        Ok(options)
    }
}

/// Shared clock handle plus frame pacing.
struct Clock<T: Timer> {
    timer: T,
    last_frame_ms: u64,
}

impl<T: Timer> Clock<T> {
    fn new(timer: T) -> Self {
        let last_frame_ms = timer.now();
        Self { timer, last_frame_ms }
    }

    fn now(&self) -> u64 {
        self.timer.now()
    }

    fn frame(&mut self) {
        self.timer.sleep(Duration::from_millis(FRAME_MS));
        let now = self.timer.now();
        self.timer
            .record_frame(Duration::from_millis(now.saturating_sub(self.last_frame_ms)));
        self.last_frame_ms = now;
    }

    fn hold(&mut self, ms: u64) {
        let until = self.now() + ms;
        while self.now() < until {
            self.frame();
        }
    }
}

struct Summary {
    score: i64,
    n_hits: u32,
    trials_logged: usize,
    bonus_rounds: usize,
    data_path: Option<PathBuf>,
    frames: FrameStats,
}

pub struct App {
    options: Options,
    params: LaunchParams,
    config: SessionConfig,
    table: TrialTable,
    assets: AssetManifest,
    seed: u64,
}

impl App {
    pub fn new(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let options = Options::parse(args)?;
        let seed = options.seed.unwrap_or_else(rand::random);
        let params = LaunchParams::from_query(&options.query, &mut Pcg32::seed_from_u64(seed));

        let settings = match &options.settings {
            Some(path) => GameSettings::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => GameSettings::default(),
        };
        let config = SessionConfig::apply(&settings, &params.task, params.short)
            .context("cannot start the session")?;
        let path = options
            .trials
            .clone()
            .unwrap_or_else(|| config.trial_info_path.clone());
        let table = TrialTable::load(&path, config.trial_cap())
            .with_context(|| format!("failed to load trial info from {}", path.display()))?;
        info!(
            "Loaded {} trials from {} ({} will run)",
            table.record_count(),
            path.display(),
            table.total_trials()
        );

        Ok(Self {
            options,
            params,
            config,
            table,
            assets: AssetManifest::standard(),
            seed,
        })
    }

    pub fn run(self) -> Result<()> {
        println!("=== CANNON TASK ===");
        println!("Subject: {}", self.params.subject_id);
        println!("Study: {}", self.params.study_key());
        println!("Task: {}", self.config.task);
        println!(
            "Trials: {}{}",
            self.table.total_trials(),
            if self.config.short { " (short)" } else { "" }
        );
        println!("Seed: {}", self.seed);
        if self.params.testing {
            println!("Testing mode");
        }
        println!();

        let summary = if self.options.realtime {
            self.run_scenes(HighPrecisionTimer::new())?
        } else {
            self.run_scenes(ManualTimer::new())?
        };

        println!("\nGame over. Thanks for playing!");
        println!("  Score: {}", summary.score);
        println!("  Aliens hit: {}", summary.n_hits);
        println!(
            "  Trials logged: {} ({} bonus rounds)",
            summary.trials_logged, summary.bonus_rounds
        );
        println!(
            "  Frames: {} at {:.1} fps (jitter {:.3} ms)",
            summary.frames.frames, summary.frames.effective_fps, summary.frames.jitter_ms
        );
        match &summary.data_path {
            Some(path) => println!("  Data: {}", path.display()),
            None => println!("  Data: not saved"),
        }
        println!("  Continue at: {}", self.config.redirect_url);
        Ok(())
    }

    fn run_scenes<T: Timer>(&self, timer: T) -> Result<Summary> {
        let mut clock = Clock::new(timer);
        let mut participant = Participant::new(self.seed);
        let mut scene = Scene::default();
        let mut summary = None;

        while !scene.is_terminal() {
            info!("Entering {scene:?}");
            let next = match scene {
                Scene::Intro => {
                    println!("Cannon Ball");
                    clock.hold(SCREEN_DWELL_MS);
                    scene.next()
                }
                Scene::Training => Some(self.run_training(&mut clock, &mut participant)?),
                Scene::Ready => {
                    println!("Ready?");
                    clock.hold(SCREEN_DWELL_MS);
                    scene.next()
                }
                Scene::Game => {
                    let (next, played) = self.run_game(&mut clock, &mut participant)?;
                    summary = Some(played);
                    Some(next)
                }
                Scene::End => None,
            };
            scene = next.context("scene sequence ended early")?;
        }

        let mut summary = summary.context("session ended without a main block")?;
        summary.frames = clock.timer.frame_stats();
        Ok(summary)
    }

    fn run_training<T: Timer>(&self, clock: &mut Clock<T>, participant: &mut Participant) -> Result<Scene> {
        let mut training = TrainingController::new(
            &self.config,
            self.table.clone(),
            &self.assets,
            clock.timer.clone(),
            Pcg32::seed_from_u64(self.seed.wrapping_add(1)),
        )?;
        training.start();

        let deadline = clock.now() + SCENE_LIMIT_MS;
        let mut shown_step = 0;
        loop {
            if let Some(next) = training.take_scene_request() {
                return Ok(next);
            }
            if training.step() != shown_step {
                shown_step = training.step();
                for overlay in training.overlays() {
                    println!("[training {shown_step}] {}", overlay.text(training.task()));
                }
            }
            if clock.now() > deadline {
                bail!("training stuck at step {}", training.step());
            }
            clock.frame();
            participant.train(&mut training);
            training.tick();
        }
    }

    fn run_game<T: Timer>(&self, clock: &mut Clock<T>, participant: &mut Participant) -> Result<(Scene, Summary)> {
        let saver = DataSaver::init(
            JsonFilePersistence::new(self.options.out_dir.clone()),
            &self.params,
            self.config.task,
        );
        if saver.init_failed() {
            warn!("Continuing without saving data");
        }
        let mut machine = TrialStateMachine::new(
            &self.config,
            self.table.clone(),
            &self.assets,
            saver,
            clock.timer.clone(),
            Pcg32::seed_from_u64(self.seed.wrapping_add(2)),
        )?;
        machine.start();

        let deadline = clock.now() + SCENE_LIMIT_MS;
        let mut reported = 0;
        let next = loop {
            for cue in machine.drain_cues() {
                match cue {
                    Cue::ScoreAnnouncement(score) => println!("** {score} points! **"),
                    Cue::BrokenInstructions => println!("The cannon is broken: balls are grey this round"),
                    Cue::BonusRoundFlash => println!("Bonus round!"),
                    Cue::BonusText(bonus) => println!("Bonus {}", bonus.text),
                    Cue::ContainerFlash(_) => {}
                }
            }
            for outcome in machine.log().iter().skip(reported) {
                println!(
                    "trial {:>3} {:<13} response {:>4} rt {:>7.0} score {:>6} hits {:>3}",
                    outcome.trial,
                    outcome.trial_type.as_str(),
                    outcome.response,
                    outcome.rt,
                    outcome.score,
                    outcome.n_hits
                );
            }
            reported = machine.log().len();

            if let Some(next) = machine.take_scene_request() {
                break next;
            }
            if clock.now() > deadline {
                bail!("main block stuck in trial {}", machine.trial_number());
            }
            clock.frame();
            participant.play(&mut machine);
            machine.tick();
        };

        let summary = Summary {
            score: machine.score(),
            n_hits: machine.n_hits(),
            trials_logged: machine.log().len(),
            bonus_rounds: machine
                .log()
                .iter()
                .filter(|o| o.trial_type == TrialType::Confidence)
                .count(),
            data_path: machine.hooks.backend().path(),
            frames: FrameStats::default(),
        };
        Ok((next, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_query() {
        let options = Options::parse(args(&[
            "--seed",
            "42",
            "TASK=MF&SHORT",
            "--out",
            "/tmp/out",
            "--realtime",
        ]))
        .unwrap();
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.query, "TASK=MF&SHORT");
        assert_eq!(options.out_dir, PathBuf::from("/tmp/out"));
        assert!(options.realtime);
        assert!(options.settings.is_none());
    }

    #[test]
    fn rejects_unknown_and_incomplete_flags() {
        assert!(Options::parse(args(&["--fast"])).is_err());
        assert!(Options::parse(args(&["--seed"])).is_err());
        assert!(Options::parse(args(&["--seed", "soon"])).is_err());
    }

    #[test]
    fn shipped_settings_and_trial_files_load() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
        let settings = GameSettings::load(&root.join("settings.toml")).unwrap();
        assert_eq!(settings, GameSettings::default());
        for task in ["MB", "MBMF", "MF"] {
            let config = SessionConfig::apply(&settings, task, false).unwrap();
            let table = TrialTable::load(&root.join(&config.trial_info_path), None).unwrap();
            assert_eq!(table.total_trials(), 40, "{task}");
        }
    }

    #[test]
    fn short_simulated_session_writes_subject_data() {
        let out = std::env::temp_dir().join(format!("cannon-app-{}", process::id()));
        let trials = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../trial_info/trial_info_two-step.json");
        let app = App::new(args(&[
            "PROLIFIC_PID=sim01&TASK=MBMF&SHORT",
            "--trials",
            trials.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--seed",
            "3",
        ]))
        .unwrap();
        assert_eq!(app.table.total_trials(), 5);

        let summary = app.run_scenes(ManualTimer::new()).unwrap();
        assert_eq!(summary.trials_logged, 5);
        assert_eq!(summary.data_path, Some(out.join("sim01.json")));
        assert!(summary.frames.frames > 0);
        let saved = std::fs::read_to_string(out.join("sim01.json")).unwrap();
        assert!(saved.contains("\"trialData\""));
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn unknown_task_stops_startup() {
        let err = App::new(args(&["TASK=XYZ", "--trials", "/nonexistent.json"]))
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("XYZ"));
    }
}
