//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host (x86_64) with no
//! real hardware required.

mod irrigation_tests;
mod mock_hw;
mod positioning_tests;
mod status_tests;
mod stop_latch_tests;
mod trace_tests;
