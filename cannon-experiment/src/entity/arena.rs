//! Circle-overlap tests between balls in flight and the targets.

use super::alien::ALIEN_RADIUS;
use super::asteroids::ASTEROID_RADIUS;
use super::ball::BALL_RADIUS;
use super::{Alien, AsteroidRing, Ball, BallId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Alien(BallId),
    Asteroid { index: usize, ball: BallId },
}

fn overlaps(ax: f64, ay: f64, ar: f64, bx: f64, by: f64, br: f64) -> bool {
    let (dx, dy) = (ax - bx, ay - by);
    dx * dx + dy * dy <= (ar + br) * (ar + br)
}

/// Every current overlap, balls in the order given. A ball touching several
/// asteroids reports each of them.
pub fn detect_contacts(balls: &[Ball], alien: &Alien, ring: &AsteroidRing) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for ball in balls.iter().filter(|b| b.is_flying() && b.visible) {
        if alien.is_hittable() && overlaps(ball.x, ball.y, BALL_RADIUS, alien.x, alien.y, ALIEN_RADIUS) {
            contacts.push(Contact::Alien(ball.id));
        }
        if ring.is_hittable() {
            for (index, a) in ring.asteroids().iter().enumerate() {
                if overlaps(ball.x, ball.y, BALL_RADIUS, a.x, a.y, ASTEROID_RADIUS) {
                    contacts.push(Contact::Asteroid { index, ball: ball.id });
                }
            }
        }
    }
    contacts
}
