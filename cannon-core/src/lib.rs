pub mod colour;
pub mod phase;
pub mod task;
pub mod trial;

pub use colour::{BallColour, Side};
pub use phase::Scene;
pub use task::{ParseTaskError, TaskVariant};
pub use trial::{SessionLog, TrialOutcome, TrialType, UNSET};
