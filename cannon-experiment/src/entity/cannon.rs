use std::f64::consts::{FRAC_PI_2, PI};

/// Largest rotation either side of vertical (70 degrees).
pub const MAX_ROTATION: f64 = 1.22173;

#[derive(Debug, Clone)]
pub struct Cannon {
    pub x: f64,
    pub y: f64,
    rotation: f64,
    frozen: bool,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            x: 250.0,
            y: 545.0,
            rotation: 0.0,
            frozen: false,
        }
    }
}

impl Cannon {
    /// Turns the barrel toward a pointer position. Ignored while frozen.
    pub fn aim_at(&mut self, px: f64, py: f64) {
        let angle = (py - self.y).atan2(px - self.x) + FRAC_PI_2;
        // bring into (-pi, pi] so pointers far to the left clamp left
        let angle = if angle > PI { angle - 2.0 * PI } else { angle };
        self.set_rotation(angle);
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        if !self.frozen {
            self.rotation = rotation.clamp(-MAX_ROTATION, MAX_ROTATION);
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Velocity of a ball leaving the barrel at `speed` px/s.
    pub fn launch_velocity(&self, speed: f64) -> (f64, f64) {
        let a = self.rotation - FRAC_PI_2;
        (a.cos() * speed, a.sin() * speed)
    }
}
