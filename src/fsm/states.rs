//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  IDLE ──[mark press]──▶ WAITING_FOR_SECOND_MARK
//!   ▲                          │
//!   │               [press, >= gap after the first]
//!   │                          ▼
//!   └────[stop, forced]─── OSCILLATING ⟲ (flip + dwell at each end)
//! ```
//!
//! The table turns forward continuously in `Idle` and while waiting for the
//! second mark.

use super::context::{Mark, MotionCommand, MotionContext, MotionNotice};
use super::{StateDescriptor, StateId};
use crate::clock::elapsed;
use crate::drivers::stepper::Direction;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: WaitingForSecondMark
        StateDescriptor {
            id: StateId::WaitingForSecondMark,
            name: "WaitingForSecondMark",
            on_enter: Some(waiting_enter),
            on_exit: None,
            on_update: waiting_update,
        },
        // Index 2: Oscillating
        StateDescriptor {
            id: StateId::Oscillating,
            name: "Oscillating",
            on_enter: Some(oscillating_enter),
            on_exit: Some(oscillating_exit),
            on_update: oscillating_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut MotionContext) {
    ctx.clear_marks();
}

fn idle_update(ctx: &mut MotionContext) -> Option<StateId> {
    ctx.command = MotionCommand::Step(Direction::Forward);

    if !ctx.mark_pressed {
        return None;
    }
    ctx.consume_mark();
    ctx.marks.position1 = Some(ctx.current_step);
    ctx.first_mark_at = Some(ctx.now_ms);
    ctx.notify(MotionNotice::MarkSet {
        mark: Mark::First,
        step: ctx.current_step,
    });
    Some(StateId::WaitingForSecondMark)
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING_FOR_SECOND_MARK state
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_enter(ctx: &mut MotionContext) {
    ctx.countdown_secs = None;
}

fn waiting_update(ctx: &mut MotionContext) -> Option<StateId> {
    ctx.command = MotionCommand::Step(Direction::Forward);

    let (Some(position1), Some(first_at)) = (ctx.marks.position1, ctx.first_mark_at) else {
        return Some(StateId::Idle);
    };

    let waited = elapsed(ctx.now_ms, first_at);
    if waited < ctx.second_mark_gap_ms {
        // Too early: presses are dropped without arming the lockout.
        let secs_left = (ctx.second_mark_gap_ms - waited) / 1000;
        if ctx.countdown_secs != Some(secs_left) {
            ctx.countdown_secs = Some(secs_left);
            ctx.notify(MotionNotice::WaitingForSecondMark { secs_left });
        }
        return None;
    }

    if !ctx.mark_pressed {
        return None;
    }
    ctx.consume_mark();
    ctx.command = MotionCommand::Hold;
    ctx.marks.position2 = Some(ctx.current_step);
    ctx.notify(MotionNotice::MarkSet {
        mark: Mark::Second,
        step: ctx.current_step,
    });
    ctx.notify(MotionNotice::OscillationStarted {
        from: position1,
        to: ctx.current_step,
    });
    Some(StateId::Oscillating)
}

// ═══════════════════════════════════════════════════════════════════════════
//  OSCILLATING state
// ═══════════════════════════════════════════════════════════════════════════

fn oscillating_enter(ctx: &mut MotionContext) {
    ctx.sweep = Direction::Forward;
    ctx.dwell_until = None;
}

fn oscillating_exit(ctx: &mut MotionContext) {
    ctx.dwell_until = None;
}

fn oscillating_update(ctx: &mut MotionContext) -> Option<StateId> {
    let (Some(position1), Some(position2)) = (ctx.marks.position1, ctx.marks.position2) else {
        return Some(StateId::Idle);
    };

    if let Some(until) = ctx.dwell_until {
        if ctx.now_ms < until {
            return None;
        }
        ctx.dwell_until = None;
    }

    // Coincident marks leave nothing to sweep.
    if position1 == position2 {
        return None;
    }

    let (mark, target) = match ctx.sweep {
        Direction::Forward => (Mark::Second, position2),
        Direction::Backward => (Mark::First, position1),
    };

    match Direction::toward(ctx.current_step, target) {
        Some(dir) => ctx.command = MotionCommand::Step(dir),
        None => {
            ctx.sweep = ctx.sweep.reversed();
            ctx.dwell_until = Some(ctx.now_ms + ctx.turnaround_dwell_ms);
            ctx.notify(MotionNotice::TargetReached { mark, step: target });
        }
    }
    None
}
