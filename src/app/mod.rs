//! Application core: the panel network and its boundary, zero I/O.
//!
//! The coordinator in [`service`] drives the fixed model network.  All
//! interaction with sensors, the panel and the log happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
