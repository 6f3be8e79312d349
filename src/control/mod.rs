//! Closed-loop decisions that sit between sensing and actuation.

pub mod pump;
