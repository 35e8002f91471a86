//! Logic-only stand-ins for the on-screen objects the trial logic reacts to.
//!
//! Nothing here draws. Each controller keeps just enough geometry and timing
//! to produce the signals the state machine consumes: a ball launching,
//! exploding, leaving the play area or reaching the top, and contacts between
//! balls and targets.

pub mod alien;
pub mod arena;
pub mod assets;
pub mod asteroids;
pub mod ball;
pub mod cannon;

pub use alien::{Alien, AlienSignal};
pub use arena::{Contact, detect_contacts};
pub use assets::AssetManifest;
pub use asteroids::{Asteroid, AsteroidRing};
pub use ball::{Ball, BallId, BallSignal, Flight};
pub use cannon::Cannon;

/// Play area size in pixels.
pub const WORLD_WIDTH: f64 = 500.0;
pub const WORLD_HEIGHT: f64 = 640.0;
