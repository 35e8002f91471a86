use super::{AssetManifest, WORLD_WIDTH};
use crate::error::ExperimentError;

pub const ALIEN_RADIUS: f64 = 30.0;
/// Vertical band the alien patrols.
pub const ALIEN_TOP: f64 = 90.0;
pub const ALIEN_BOTTOM: f64 = 300.0;
/// Squash-and-stretch played when the alien is hit.
pub const HIT_TWEEN_MS: f64 = 200.0;
/// Pause between the end of the hit tween and the respawn.
pub const RESPAWN_DELAY_MS: u64 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlienSignal {
    /// Hit tween finished and the alien is hidden; a respawn is due after
    /// [`RESPAWN_DELAY_MS`].
    HitTweenDone,
}

#[derive(Debug, Clone)]
pub struct Alien {
    pub x: f64,
    pub y: f64,
    vx: f64,
    vy: f64,
    speed: f64,
    pub visible: bool,
    moving: bool,
    body_enabled: bool,
    hit_tween_ms: Option<f64>,
}

impl Alien {
    pub fn new(x: f64, y: f64, speed: f64, assets: &AssetManifest) -> Result<Self, ExperimentError> {
        assets.require("alien", "alien")?;
        Ok(Self {
            x,
            y,
            vx: speed,
            vy: speed,
            speed,
            visible: true,
            moving: true,
            body_enabled: true,
            hit_tween_ms: None,
        })
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Whether balls can currently collide with it.
    pub fn is_hittable(&self) -> bool {
        self.body_enabled && self.visible && self.hit_tween_ms.is_none()
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
        self.visible = moving;
        self.body_enabled = moving;
        if moving {
            self.vx = self.speed;
            self.vy = self.speed;
        } else {
            self.vx = 0.0;
            self.vy = 0.0;
        }
    }

    /// Plays the hit tween. The alien stays put and untouchable until it is
    /// respawned.
    pub fn reset(&mut self) {
        self.hit_tween_ms = Some(HIT_TWEEN_MS);
    }

    pub fn is_resetting(&self) -> bool {
        self.hit_tween_ms.is_some()
    }

    /// Moves to `(x, y)` after a hit. Stays hidden when `visible` is false.
    pub fn respawn(&mut self, x: f64, y: f64, visible: bool) {
        self.x = x;
        self.y = y;
        self.visible = visible;
    }

    pub fn update(&mut self, dt_ms: f64) -> Option<AlienSignal> {
        if let Some(left) = self.hit_tween_ms {
            let left = left - dt_ms;
            if left <= 0.0 {
                self.hit_tween_ms = None;
                self.visible = false;
                return Some(AlienSignal::HitTweenDone);
            }
            self.hit_tween_ms = Some(left);
        }
        if !self.body_enabled {
            return None;
        }

        let dt = dt_ms / 1000.0;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        if self.x < ALIEN_RADIUS {
            self.x = ALIEN_RADIUS;
            self.vx = self.vx.abs();
        } else if self.x > WORLD_WIDTH - ALIEN_RADIUS {
            self.x = WORLD_WIDTH - ALIEN_RADIUS;
            self.vx = -self.vx.abs();
        }
        if self.y < ALIEN_TOP + ALIEN_RADIUS {
            self.y = ALIEN_TOP + ALIEN_RADIUS;
            self.vy = self.vy.abs();
        } else if self.y > ALIEN_BOTTOM - ALIEN_RADIUS {
            self.y = ALIEN_BOTTOM - ALIEN_RADIUS;
            self.vy = -self.vy.abs();
        }
        None
    }
}
