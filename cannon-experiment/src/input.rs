use cannon_core::Side;

/// Minimum gap between two accepted presses of the same held key.
pub const KEY_REPEAT_MS: u64 = 500;

/// Turns a held key into at most one press per interval, per key.
#[derive(Debug, Clone)]
pub struct KeyRepeatGate {
    interval_ms: u64,
    last: [Option<u64>; 2],
}

impl Default for KeyRepeatGate {
    fn default() -> Self {
        Self::new(KEY_REPEAT_MS)
    }
}

impl KeyRepeatGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: [None; 2],
        }
    }

    pub fn accept(&mut self, side: Side, now_ms: u64) -> bool {
        let slot = &mut self.last[side.index()];
        match *slot {
            Some(t) if now_ms.saturating_sub(t) < self.interval_ms => false,
            _ => {
                *slot = Some(now_ms);
                true
            }
        }
    }
}
