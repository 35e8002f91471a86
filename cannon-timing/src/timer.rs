use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic millisecond clock driving a session.
pub trait Timer: Clone + Send + Sync {
    /// Milliseconds since the timer was created.
    fn now(&self) -> u64;
    fn elapsed(&self, since: u64) -> Duration {
        Duration::from_millis(self.now().saturating_sub(since))
    }
    fn sleep(&self, d: Duration);
    fn record_frame(&mut self, d: Duration);
    fn frame_stats(&self) -> FrameStats;
}

#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames: usize,
    pub average_frame_time_ms: f64,
    pub jitter_ms: f64,
    pub min_frame_time_ms: f64,
    pub max_frame_time_ms: f64,
    pub effective_fps: f64,
}

impl FrameStats {
    fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let times: Vec<f64> = samples.iter().map(|d| d.as_secs_f64() * 1e3).collect();
        let avg = times.iter().sum::<f64>() / times.len() as f64;
        let var = times.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / times.len() as f64;
        let min = times.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = times.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        FrameStats {
            frames: times.len(),
            average_frame_time_ms: avg,
            jitter_ms: var.sqrt(),
            min_frame_time_ms: min,
            max_frame_time_ms: max,
            effective_fps: if avg > 0.0 { 1e3 / avg } else { 0.0 },
        }
    }
}

fn push_sample(samples: &mut Vec<Duration>, max_samples: usize, d: Duration) {
    if samples.len() >= max_samples {
        samples.remove(0);
    }
    samples.push(d);
}

/// Wall-clock timer backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
    pub frame_times: Vec<Duration>,
    pub max_samples: usize,
}

impl Timer for HighPrecisionTimer {
    fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
    fn sleep(&self, d: Duration) {
        self.high_precision_sleep(d)
    }
    fn record_frame(&mut self, d: Duration) {
        push_sample(&mut self.frame_times, self.max_samples, d);
    }
    fn frame_stats(&self) -> FrameStats {
        FrameStats::from_samples(&self.frame_times)
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            frame_times: Vec::with_capacity(1000),
            max_samples: 1000,
        }
    }

    pub fn high_precision_sleep(&self, duration: Duration) {
        #[cfg(target_os = "linux")]
        self.linux_sleep(duration);
        #[cfg(not(target_os = "linux"))]
        std::thread::sleep(duration);
    }

    #[cfg(target_os = "linux")]
    fn linux_sleep(&self, duration: Duration) {
        use libc::{CLOCK_MONOTONIC, clock_nanosleep, timespec};

        let req = timespec {
            tv_sec: duration.as_secs() as libc::time_t,
            tv_nsec: duration.subsec_nanos() as libc::c_long,
        };

        unsafe {
            clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated clock that only moves when told to.
///
/// Clones share the same clock, so a driver can keep one handle to advance
/// time while the state machine reads through another. `sleep` advances the
/// shared clock instead of blocking.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ms: Arc<AtomicU64>,
    frame_times: Vec<Duration>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u64) -> Self {
        let timer = Self::default();
        timer.set(ms);
        timer
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }
}

impl Timer for ManualTimer {
    fn now(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
    fn sleep(&self, d: Duration) {
        self.advance(d.as_millis() as u64);
    }
    fn record_frame(&mut self, d: Duration) {
        push_sample(&mut self.frame_times, 1000, d);
    }
    fn frame_stats(&self) -> FrameStats {
        FrameStats::from_samples(&self.frame_times)
    }
}
