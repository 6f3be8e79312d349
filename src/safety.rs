//! Stop latch.
//!
//! One-way flag set by the stop button.  Nothing at run time clears it;
//! only a power cycle (a fresh `SafetyLatch`) does.  No task watchdog is
//! armed: its reset would be a restart path out of the latch.
//!
//! Once tripped, the service short-circuits every tick.  The first latched
//! tick reports a halt notice; later ticks are silent.

#[derive(Debug, Default)]
pub struct SafetyLatch {
    stopped: bool,
    halt_reported: bool,
}

impl SafetyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latch.  Returns `true` only on the first call.
    pub fn trip(&mut self) -> bool {
        let first = !self.stopped;
        self.stopped = true;
        first
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// `true` exactly once after the latch is set.
    pub fn take_halt_notice(&mut self) -> bool {
        if self.stopped && !self.halt_reported {
            self.halt_reported = true;
            true
        } else {
            false
        }
    }
}
