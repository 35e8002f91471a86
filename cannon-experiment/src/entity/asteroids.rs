use super::AssetManifest;
use cannon_core::BallColour;
use crate::error::ExperimentError;
use std::f64::consts::PI;

pub const ASTEROIDS_PER_COLOUR: usize = 5;
pub const ASTEROID_RADIUS: f64 = 18.0;
pub const EXPLODE_TWEEN_MS: f64 = 200.0;

const RING_CENTRE: (f64, f64) = (250.0, 590.0);
const RING_RADIUS: f64 = 300.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub colour: BallColour,
    pub base_value: i64,
    pub x: f64,
    pub y: f64,
    /// Points staked by hitting this asteroid, set on every [`AsteroidRing::show`].
    pub bet_amount: i64,
    pub label: String,
}

/// The betting targets shown on bonus rounds: a pink arc on the left and a
/// purple arc on the right, with values rising toward the outside.
#[derive(Debug, Clone)]
pub struct AsteroidRing {
    asteroids: Vec<Asteroid>,
    visible: bool,
    exploding_ms: Option<f64>,
}

impl AsteroidRing {
    pub fn new(assets: &AssetManifest) -> Result<Self, ExperimentError> {
        let n = ASTEROIDS_PER_COLOUR;
        let step = |start: f64, end: f64| (end - start) / (n - 1) as f64;
        let (pink_start, pink_step) = (PI / 1.8, step(PI / 1.8, PI / 1.3));
        let (purple_start, purple_step) = (PI / 4.4, step(PI / 4.4, PI / 2.2));

        let mut asteroids = Vec::with_capacity(2 * n);
        for i in 0..n {
            assets.require("asteroids", &format!("asteroid_pink_{}", i + 1))?;
            assets.require("asteroids", &format!("asteroid_purple_{}", n - i))?;
            asteroids.push(Self::place(BallColour::Pink, i as i64, pink_start + i as f64 * pink_step));
            asteroids.push(Self::place(
                BallColour::Purple,
                (n - 1 - i) as i64,
                purple_start + i as f64 * purple_step,
            ));
        }
        Ok(Self {
            asteroids,
            visible: false,
            exploding_ms: None,
        })
    }

    fn place(colour: BallColour, base_value: i64, angle: f64) -> Asteroid {
        let bet_amount = base_value + 1;
        Asteroid {
            colour,
            base_value,
            x: RING_CENTRE.0 + RING_RADIUS * angle.cos(),
            y: RING_CENTRE.1 - RING_RADIUS * angle.sin(),
            bet_amount,
            label: bet_amount.to_string(),
        }
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn get(&self, index: usize) -> Option<&Asteroid> {
        self.asteroids.get(index)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether balls can collide with the ring.
    pub fn is_hittable(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self, bet_scaling: f64) {
        for a in &mut self.asteroids {
            a.bet_amount = ((a.base_value + 1) as f64 * bet_scaling).round() as i64;
            a.label = a.bet_amount.to_string();
        }
        self.visible = true;
        self.exploding_ms = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.exploding_ms = None;
    }

    /// Starts the hit tween; the whole ring hides when it ends.
    pub fn explode(&mut self) {
        if self.visible && self.exploding_ms.is_none() {
            self.exploding_ms = Some(EXPLODE_TWEEN_MS);
        }
    }

    pub fn update(&mut self, dt_ms: f64) {
        if let Some(left) = self.exploding_ms {
            let left = left - dt_ms;
            if left <= 0.0 {
                self.hide();
            } else {
                self.exploding_ms = Some(left);
            }
        }
    }
}
