use super::{AssetManifest, Cannon, WORLD_WIDTH};
use crate::error::ExperimentError;
use cannon_core::{BallColour, Side};

/// Duration of the move from a container to the barrel.
pub const CHARGE_MS: f64 = 1000.0;
/// Delay between launch and the start of an explosion.
pub const EXPLODE_DELAY_MS: f64 = 150.0;
/// Explosion animation: 7 frames at 50 fps.
pub const EXPLOSION_ANIM_MS: f64 = 140.0;
pub const LAUNCH_SPEED: f64 = 1000.0;
pub const BALL_RADIUS: f64 = 10.0;
/// Below this line a ball moving down has left the play area.
pub const OFF_SCREEN_Y: f64 = 620.0;
/// Above this line a ball has reached the top of the play area.
pub const TOP_Y: f64 = 50.0;
const CONTAINER_Y: f64 = 560.0;

/// The two ball entities, named after the colour they are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallId {
    Pink,
    Purple,
}

impl BallId {
    pub const BOTH: [BallId; 2] = [BallId::Pink, BallId::Purple];

    pub fn index(&self) -> usize {
        match self {
            BallId::Pink => 0,
            BallId::Purple => 1,
        }
    }

    pub fn natural_colour(&self) -> BallColour {
        match self {
            BallId::Pink => BallColour::Pink,
            BallId::Purple => BallColour::Purple,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    Idle,
    /// Travelling from a container to the barrel.
    Charging {
        side: Side,
        remaining_ms: f64,
        explode: bool,
    },
    Flying {
        explode_in_ms: Option<f64>,
    },
    Exploding {
        remaining_ms: f64,
    },
}

/// What a ball reports back after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallSignal {
    Launched { explode: bool },
    Exploded,
    OffScreen,
    ReachedTop,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    original_colour: BallColour,
    colour: BallColour,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub visible: bool,
    pub alpha: f64,
    flight: Flight,
}

impl Ball {
    pub fn new(id: BallId, colour: BallColour, assets: &AssetManifest) -> Result<Self, ExperimentError> {
        assets.require("ball", &format!("ball_{colour}"))?;
        assets.require("ball", &format!("ball_{colour}_explode"))?;
        assets.require("ball", "ball_grey")?;
        assets.require("ball", "ball_grey_explode")?;
        Ok(Self {
            id,
            original_colour: colour,
            colour,
            x: 300.0,
            y: 800.0,
            vx: 0.0,
            vy: 0.0,
            visible: false,
            alpha: 1.0,
            flight: Flight::Idle,
        })
    }

    pub fn colour(&self) -> BallColour {
        self.colour
    }

    pub fn original_colour(&self) -> BallColour {
        self.original_colour
    }

    pub fn flight(&self) -> Flight {
        self.flight
    }

    /// Launched and travelling freely; the only state in which it can hit things.
    pub fn is_flying(&self) -> bool {
        matches!(self.flight, Flight::Flying { .. })
    }

    pub fn set_grey(&mut self) {
        self.colour = BallColour::Grey;
    }

    pub fn set_coloured(&mut self) {
        self.colour = self.original_colour;
    }

    /// Starts the charge from the container on `side`.
    pub fn fire(&mut self, side: Side, explode: bool) {
        self.x = match side {
            Side::Left => 150.0,
            Side::Right => 350.0,
        };
        self.y = CONTAINER_Y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.visible = true;
        self.flight = Flight::Charging {
            side,
            remaining_ms: CHARGE_MS,
            explode,
        };
    }

    /// Parks the ball out of play. Any pending explosion is dropped.
    pub fn reset_position(&mut self) {
        self.x = 20.0;
        self.y = 20.0;
        self.vx = 0.0;
        self.vy = 0.0;
        self.visible = false;
        self.alpha = 1.0;
        self.flight = Flight::Idle;
    }

    pub fn move_to_bottom(&mut self) {
        self.y = OFF_SCREEN_Y;
    }

    /// Present but transparent; holds input off while the bonus round sets up.
    pub fn prestage(&mut self) {
        self.visible = true;
        self.alpha = 0.0;
    }

    pub fn end_prestage(&mut self) {
        self.visible = false;
        self.alpha = 1.0;
    }

    fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn update(&mut self, dt_ms: f64, cannon: &Cannon) -> Vec<BallSignal> {
        let mut signals = Vec::new();
        match self.flight {
            Flight::Idle => {}
            Flight::Charging {
                side,
                remaining_ms,
                explode,
            } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms > 0.0 {
                    let start_x = match side {
                        Side::Left => 150.0,
                        Side::Right => 350.0,
                    };
                    let t = 1.0 - remaining_ms / CHARGE_MS;
                    self.x = start_x + (cannon.x - start_x) * t;
                    self.flight = Flight::Charging {
                        side,
                        remaining_ms,
                        explode,
                    };
                } else {
                    self.x = cannon.x;
                    self.y = cannon.y;
                    (self.vx, self.vy) = cannon.launch_velocity(LAUNCH_SPEED);
                    self.flight = Flight::Flying {
                        explode_in_ms: explode.then_some(EXPLODE_DELAY_MS),
                    };
                    signals.push(BallSignal::Launched { explode });
                }
            }
            Flight::Flying { explode_in_ms } => {
                let dt = dt_ms / 1000.0;
                self.x += self.vx * dt;
                self.y += self.vy * dt;
                self.bounce();

                if let Some(left) = explode_in_ms {
                    let left = left - dt_ms;
                    if left <= 0.0 {
                        self.vx = 0.0;
                        self.vy = 0.0;
                        self.visible = false;
                        self.flight = Flight::Exploding {
                            remaining_ms: EXPLOSION_ANIM_MS,
                        };
                        return signals;
                    }
                    self.flight = Flight::Flying {
                        explode_in_ms: Some(left),
                    };
                }

                if self.y > OFF_SCREEN_Y && self.vy > 0.0 && self.visible && self.speed() > 0.0 && self.alpha != 0.0 {
                    self.vx = 0.0;
                    self.vy = 0.0;
                    self.visible = false;
                    self.flight = Flight::Idle;
                    signals.push(BallSignal::OffScreen);
                } else if self.y < TOP_Y {
                    signals.push(BallSignal::ReachedTop);
                }
            }
            Flight::Exploding { remaining_ms } => {
                let remaining_ms = remaining_ms - dt_ms;
                if remaining_ms <= 0.0 {
                    self.flight = Flight::Idle;
                    signals.push(BallSignal::Exploded);
                } else {
                    self.flight = Flight::Exploding { remaining_ms };
                }
            }
        }
        signals
    }

    fn bounce(&mut self) {
        if self.x < BALL_RADIUS {
            self.x = BALL_RADIUS;
            self.vx = self.vx.abs();
        } else if self.x > WORLD_WIDTH - BALL_RADIUS {
            self.x = WORLD_WIDTH - BALL_RADIUS;
            self.vx = -self.vx.abs();
        }
        if self.y < BALL_RADIUS {
            self.y = BALL_RADIUS;
            self.vy = self.vy.abs();
        }
    }
}
