//! 28BYJ-48 stepper driver (ULN2003, four coil lines, half-step).
//!
//! Open-loop: the position is a step counter, never a measured angle.
//!
//! ## Phase mapping
//!
//! The eight-entry half-step table is traversed with the accumulator taken
//! mod 8.  Backward motion maps the phase through `(7 - phase) mod 8`
//! instead of keeping a second table.
//!
//! ## Split
//!
//! [`Stepper`] owns the accumulator and emits patterns through the
//! [`ActuatorPort`]; [`CoilBank`] is the `embedded-hal` side that turns a
//! pattern into four pin levels.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::ActuatorPort;

/// Half-steps per output-shaft revolution.
pub const STEPS_PER_REVOLUTION: i64 = 4096;

/// Coil excitation for one micro-step (IN1..IN4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilPattern(pub [bool; 4]);

impl CoilPattern {
    /// All coils de-energised.
    pub const RELEASED: Self = Self([false; 4]);
}

/// 28BYJ-48 half-step excitation sequence.
pub const HALF_STEP_SEQUENCE: [CoilPattern; 8] = [
    CoilPattern([true, false, false, false]),
    CoilPattern([true, true, false, false]),
    CoilPattern([false, true, false, false]),
    CoilPattern([false, true, true, false]),
    CoilPattern([false, false, true, false]),
    CoilPattern([false, false, true, true]),
    CoilPattern([false, false, false, true]),
    CoilPattern([true, false, false, true]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Signed change applied to the accumulator.
    pub const fn delta(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Direction that moves `from` closer to `to`, `None` if equal.
    pub fn toward(from: i64, to: i64) -> Option<Self> {
        match to.cmp(&from) {
            core::cmp::Ordering::Greater => Some(Self::Forward),
            core::cmp::Ordering::Less => Some(Self::Backward),
            core::cmp::Ordering::Equal => None,
        }
    }
}

/// Index into [`HALF_STEP_SEQUENCE`] for accumulator `step` moving in `dir`.
pub fn phase_index(step: i64, dir: Direction) -> usize {
    let phase = step.rem_euclid(8) as usize;
    match dir {
        Direction::Forward => phase,
        Direction::Backward => (7 - phase) % 8,
    }
}

/// Output-shaft angle for an accumulator value, always in `[0, 360)`.
pub fn angle_degrees(steps: i64) -> f32 {
    steps.rem_euclid(STEPS_PER_REVOLUTION) as f32 * 360.0 / STEPS_PER_REVOLUTION as f32
}

// ---------------------------------------------------------------------------
// Stepper (accumulator + pattern emission)
// ---------------------------------------------------------------------------

pub struct Stepper {
    position: i64,
}

impl Stepper {
    pub fn new() -> Self {
        Self::at(0)
    }

    /// Start from an arbitrary accumulator value.
    pub fn at(position: i64) -> Self {
        Self { position }
    }

    /// Emit the pattern for the current phase, then move the accumulator by
    /// exactly one in `dir`.  `on_step` observes the new position.
    ///
    /// The settle pause between calls is the caller's cadence, not a sleep.
    pub fn advance(
        &mut self,
        dir: Direction,
        coils: &mut impl ActuatorPort,
        mut on_step: impl FnMut(i64),
    ) -> i64 {
        coils.set_coils(HALF_STEP_SEQUENCE[phase_index(self.position, dir)]);
        self.position += dir.delta();
        on_step(self.position);
        self.position
    }

    /// De-energise all four coils.  The accumulator is unchanged.
    pub fn release(&self, coils: &mut impl ActuatorPort) {
        coils.release_coils();
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn angle(&self) -> f32 {
        angle_degrees(self.position)
    }
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// CoilBank (embedded-hal pins)
// ---------------------------------------------------------------------------

/// Four ULN2003 input lines.
pub struct CoilBank<P> {
    pins: [P; 4],
}

impl<P: OutputPin> CoilBank<P> {
    pub fn new(pins: [P; 4]) -> Self {
        Self { pins }
    }

    pub fn apply(&mut self, pattern: CoilPattern) -> Result<(), P::Error> {
        for (pin, &on) in self.pins.iter_mut().zip(pattern.0.iter()) {
            pin.set_state(PinState::from(on))?;
        }
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), P::Error> {
        self.apply(CoilPattern::RELEASED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Coils {
        written: Vec<CoilPattern>,
        pump_level: u8,
    }

    impl ActuatorPort for Coils {
        fn set_coils(&mut self, pattern: CoilPattern) {
            self.written.push(pattern);
        }
        fn set_pump_forward(&mut self) {}
        fn set_pump_level(&mut self, level: u8) {
            self.pump_level = level;
        }
    }

    #[test]
    fn forward_walks_table_in_order() {
        let mut coils = Coils::default();
        let mut stepper = Stepper::new();
        for _ in 0..8 {
            stepper.advance(Direction::Forward, &mut coils, |_| {});
        }
        assert_eq!(coils.written.as_slice(), &HALF_STEP_SEQUENCE);
        assert_eq!(stepper.position(), 8);
    }

    #[test]
    fn backward_maps_phase_through_mirror() {
        assert_eq!(phase_index(0, Direction::Backward), 7);
        assert_eq!(phase_index(3, Direction::Backward), 4);
        assert_eq!(phase_index(7, Direction::Backward), 0);
        // Negative accumulators use a true modulo.
        assert_eq!(phase_index(-1, Direction::Forward), 7);
        assert_eq!(phase_index(-1, Direction::Backward), 0);
    }

    #[test]
    fn advance_changes_position_by_exactly_one() {
        let mut coils = Coils::default();
        let mut stepper = Stepper::at(-3);
        assert_eq!(stepper.advance(Direction::Backward, &mut coils, |_| {}), -4);
        assert_eq!(stepper.advance(Direction::Forward, &mut coils, |_| {}), -3);
    }

    #[test]
    fn observer_sees_new_position() {
        let mut coils = Coils::default();
        let mut stepper = Stepper::at(41);
        let mut seen = None;
        stepper.advance(Direction::Forward, &mut coils, |p| seen = Some(p));
        assert_eq!(seen, Some(42));
    }

    #[test]
    fn angle_is_normalised() {
        assert!((angle_degrees(0) - 0.0).abs() < f32::EPSILON);
        assert!((angle_degrees(1024) - 90.0).abs() < 1e-4);
        assert!((angle_degrees(-1024) - 270.0).abs() < 1e-4);
        assert!((angle_degrees(4096 * 3 + 2048) - 180.0).abs() < 1e-4);
        assert!(angle_degrees(-1) < 360.0);
    }

    #[test]
    fn release_zeroes_coils() {
        let mut coils = Coils::default();
        let mut stepper = Stepper::new();
        stepper.advance(Direction::Forward, &mut coils, |_| {});
        stepper.release(&mut coils);
        assert!(coils.written.last() == Some(&CoilPattern::RELEASED));
        assert_eq!(stepper.position(), 1);
    }

    #[test]
    fn direction_toward() {
        assert_eq!(Direction::toward(0, 5), Some(Direction::Forward));
        assert_eq!(Direction::toward(5, 0), Some(Direction::Backward));
        assert_eq!(Direction::toward(5, 5), None);
    }

    mod coil_bank {
        use super::*;
        use core::convert::Infallible;

        #[derive(Default)]
        struct Pin {
            high: bool,
        }

        impl embedded_hal::digital::ErrorType for Pin {
            type Error = Infallible;
        }

        impl OutputPin for Pin {
            fn set_low(&mut self) -> Result<(), Infallible> {
                self.high = false;
                Ok(())
            }
            fn set_high(&mut self) -> Result<(), Infallible> {
                self.high = true;
                Ok(())
            }
        }

        fn levels(bank: &CoilBank<Pin>) -> [bool; 4] {
            [
                bank.pins[0].high,
                bank.pins[1].high,
                bank.pins[2].high,
                bank.pins[3].high,
            ]
        }

        #[test]
        fn apply_drives_each_line() {
            let mut bank = CoilBank::new(Default::default());
            bank.apply(HALF_STEP_SEQUENCE[5]).unwrap();
            assert_eq!(levels(&bank), [false, false, true, true]);
            bank.release().unwrap();
            assert_eq!(levels(&bank), [false; 4]);
        }
    }
}
