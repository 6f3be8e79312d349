//! Shared mutable context threaded through every motion handler.
//!
//! The service writes the per-tick inputs (`now_ms`, `current_step`,
//! `mark_pressed`) before each FSM tick and reads the outputs (`command`,
//! `mark_consumed`, `notices`) afterwards.  Marks, the sweep direction and
//! the dwell deadline persist across ticks.

use crate::clock::Millis;
use crate::config::SystemConfig;
use crate::drivers::stepper::Direction;

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    First,
    Second,
}

impl Mark {
    /// 1-based label used in log lines.
    pub fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

/// The two sweep end points, `None` while unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionMarks {
    pub position1: Option<i64>,
    pub position2: Option<i64>,
}

impl PositionMarks {
    pub fn get(&self, mark: Mark) -> Option<i64> {
        match mark {
            Mark::First => self.position1,
            Mark::Second => self.position2,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Handler outputs
// ---------------------------------------------------------------------------

/// What the stepper should do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    Hold,
    Step(Direction),
}

/// Log-worthy motion occurrences, drained by the service after each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionNotice {
    MarkSet { mark: Mark, step: i64 },
    WaitingForSecondMark { secs_left: u64 },
    OscillationStarted { from: i64, to: i64 },
    TargetReached { mark: Mark, step: i64 },
}

/// Enough for the busiest tick (second mark + oscillation start).
pub const NOTICE_CAPACITY: usize = 4;

// ---------------------------------------------------------------------------
// MotionContext
// ---------------------------------------------------------------------------

pub struct MotionContext {
    // -- Per-tick inputs --
    pub now_ms: Millis,
    pub current_step: i64,
    /// Mark button asserted and not inside its lockout window.
    pub mark_pressed: bool,

    // -- Per-tick outputs --
    /// A handler acted on `mark_pressed`; the service arms the lockout.
    pub mark_consumed: bool,
    pub command: MotionCommand,
    pub notices: heapless::Vec<MotionNotice, NOTICE_CAPACITY>,

    // -- Persistent --
    pub marks: PositionMarks,
    pub first_mark_at: Option<Millis>,
    /// Forward targets position 2, backward targets position 1.
    pub sweep: Direction,
    /// Turnaround pause end.
    pub dwell_until: Option<Millis>,
    /// Last whole-second countdown value announced.
    pub countdown_secs: Option<u64>,

    // -- Configuration --
    pub second_mark_gap_ms: Millis,
    pub turnaround_dwell_ms: Millis,
}

impl MotionContext {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            now_ms: 0,
            current_step: 0,
            mark_pressed: false,
            mark_consumed: false,
            command: MotionCommand::Hold,
            notices: heapless::Vec::new(),
            marks: PositionMarks::default(),
            first_mark_at: None,
            sweep: Direction::Forward,
            dwell_until: None,
            countdown_secs: None,
            second_mark_gap_ms: config.second_mark_gap_ms,
            turnaround_dwell_ms: config.turnaround_dwell_ms,
        }
    }

    /// Load the inputs for one tick and reset the outputs.
    pub fn begin_tick(&mut self, now_ms: Millis, current_step: i64, mark_pressed: bool) {
        self.now_ms = now_ms;
        self.current_step = current_step;
        self.mark_pressed = mark_pressed;
        self.mark_consumed = false;
        self.command = MotionCommand::Hold;
    }

    /// Take the mark press for this tick.
    pub fn consume_mark(&mut self) {
        self.mark_consumed = true;
    }

    pub fn notify(&mut self, notice: MotionNotice) {
        if self.notices.push(notice).is_err() {
            log::warn!("motion notice dropped: {:?}", notice);
        }
    }

    /// Forget both marks and every timer tied to them.
    pub fn clear_marks(&mut self) {
        self.marks.clear();
        self.first_mark_at = None;
        self.countdown_secs = None;
        self.dwell_until = None;
        self.sweep = Direction::Forward;
    }
}
