use serde::{Deserialize, Serialize};
use std::fmt;

/// Colour identity of a cannonball.
///
/// `Grey` is the neutral identity used on broken trials and in the
/// model-free variant; it carries no colour-dependent payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColour {
    Pink,
    Purple,
    Grey,
}

impl BallColour {
    pub fn as_str(&self) -> &'static str {
        match self {
            BallColour::Pink => "pink",
            BallColour::Purple => "purple",
            BallColour::Grey => "grey",
        }
    }

    /// Sign applied to a betting target's base value when deriving the
    /// recorded confidence: pink targets count negative, purple positive.
    pub fn confidence_sign(&self) -> i64 {
        match self {
            BallColour::Pink => -1,
            _ => 1,
        }
    }

    /// Text colour used for the bonus cue over a target of this colour.
    pub fn cue_hex(&self) -> &'static str {
        match self {
            BallColour::Pink => "#FF0180",
            BallColour::Purple => "#6A00FF",
            BallColour::Grey => "#616161",
        }
    }
}

impl fmt::Display for BallColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two firing containers under the cannon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Zero-based input channel (0 = left, 1 = right).
    pub fn index(&self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }

    /// Value written to the `response` field of a trial outcome.
    pub fn response_code(&self) -> i32 {
        self.index() as i32 + 1
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
