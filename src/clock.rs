//! Elapsed-time bookkeeping shared by every subsystem.
//!
//! Time is a plain millisecond counter since boot ([`Millis`]).  Nothing in
//! here reads a clock: callers pass `now` in, which keeps every primitive
//! deterministic under test.
//!
//! | Primitive          | Used for                                   |
//! |--------------------|--------------------------------------------|
//! | [`Interval`]       | "due now?" cadence of periodic work        |
//! | [`StabilityTimer`] | dry / wet moisture persistence             |
//! | [`Debounce`]       | post-action button lockout                 |

/// Milliseconds since boot.
pub type Millis = u64;

/// Time elapsed from `since` to `now`, clamped at zero if `since` is ahead.
pub fn elapsed(now: Millis, since: Millis) -> Millis {
    now.saturating_sub(since)
}

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// Fixed-period cadence.  The first firing happens one full period after
/// boot because the reference point starts at 0 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: Millis,
    last_ms: Millis,
}

impl Interval {
    pub const fn new(period_ms: Millis) -> Self {
        Self {
            period_ms,
            last_ms: 0,
        }
    }

    /// True once at least one period has passed since the last firing.
    /// A firing moves the reference point to `now`.
    pub fn poll(&mut self, now: Millis) -> bool {
        if elapsed(now, self.last_ms) < self.period_ms {
            return false;
        }
        self.last_ms = now;
        true
    }

    pub fn period_ms(&self) -> Millis {
        self.period_ms
    }
}

// ---------------------------------------------------------------------------
// StabilityTimer
// ---------------------------------------------------------------------------

/// Records when a condition started holding continuously.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StabilityTimer {
    since: Option<Millis>,
}

impl StabilityTimer {
    /// The condition holds at `now`; starts the timer if it was idle.
    pub fn hold(&mut self, now: Millis) {
        self.since.get_or_insert(now);
    }

    /// The condition stopped holding.
    pub fn clear(&mut self) {
        self.since = None;
    }

    /// How long the condition has held, or `None` if it does not hold.
    pub fn held_for(&self, now: Millis) -> Option<Millis> {
        self.since.map(|since| elapsed(now, since))
    }

    /// Running and held for at least `min_ms`.
    pub fn is_stable(&self, now: Millis, min_ms: Millis) -> bool {
        self.held_for(now).is_some_and(|held| held >= min_ms)
    }
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

/// Fixed post-action lockout.
///
/// After an input has been acted upon, further reads are ignored for
/// `hold_ms`.  A press shorter than one polling slice can be missed and a
/// held button registers at most once per lockout window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    hold_ms: Millis,
    blocked_until: Option<Millis>,
}

impl Debounce {
    pub const fn new(hold_ms: Millis) -> Self {
        Self {
            hold_ms,
            blocked_until: None,
        }
    }

    pub fn is_blocked(&self, now: Millis) -> bool {
        self.blocked_until.is_some_and(|until| now < until)
    }

    /// Start the lockout window at `now`.
    pub fn arm(&mut self, now: Millis) {
        self.blocked_until = Some(now.saturating_add(self.hold_ms));
    }
}
