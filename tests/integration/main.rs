//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the panel network
//! against mock or replay adapters.  No hardware required.

mod mock_hw;
mod panel_tests;
mod replay_tests;
