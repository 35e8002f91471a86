//! Delayed callbacks as data.
//!
//! A scheduled callback is a [`TimerToken`] naming the trial it was armed in
//! and what it is for. When it comes due the owner decides what to do with it,
//! and a token whose trial is no longer current is simply dropped. This keeps
//! a late callback from acting on the next trial's state.

/// Identifies a delayed callback: the trial it belongs to and its purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken<P> {
    pub trial: i64,
    pub purpose: P,
}

impl<P> TimerToken<P> {
    pub fn new(trial: i64, purpose: P) -> Self {
        Self { trial, purpose }
    }

    pub fn is_current(&self, trial: i64) -> bool {
        self.trial == trial
    }
}

#[derive(Debug, Clone)]
struct Pending<P> {
    due_ms: u64,
    seq: u64,
    token: TimerToken<P>,
}

/// Pending delayed callbacks, released in due-time order.
#[derive(Debug, Clone)]
pub struct Scheduler<P> {
    pending: Vec<Pending<P>>,
    next_seq: u64,
}

impl<P> Default for Scheduler<P> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<P: Copy + PartialEq> Scheduler<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `token` to come due `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, token: TimerToken<P>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: now_ms + delay_ms,
            seq,
            token,
        });
    }

    /// Removes and returns every token due at `now_ms`, earliest first.
    /// Tokens due at the same instant come out in scheduling order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TimerToken<P>> {
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| (p.due_ms, p.seq));
        due.into_iter().map(|p| p.token).collect()
    }

    /// Drops pending tokens matching `pred`, returning how many were dropped.
    pub fn cancel<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&TimerToken<P>) -> bool,
    {
        let before = self.pending.len();
        self.pending.retain(|p| !pred(&p.token));
        before - self.pending.len()
    }

    pub fn is_pending(&self, purpose: P) -> bool {
        self.pending.iter().any(|p| p.token.purpose == purpose)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
