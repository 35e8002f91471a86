pub mod scheduler;
pub mod timer;

pub use scheduler::{Scheduler, TimerToken};
pub use timer::{FrameStats, HighPrecisionTimer, ManualTimer, Timer};
