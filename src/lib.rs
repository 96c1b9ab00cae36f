//! Sensor panel library.
//!
//! A small monitoring appliance expressed as a network of discrete-event
//! models: three periodic sources, a bank selector, a formatter and a
//! display.  Everything is pure logic behind port traits; the `panel-sim`
//! binary and the integration tests plug in replay logs and mocks.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod readings;
pub mod scheduler;
pub mod sensors;
pub mod switch;
pub mod time;

pub use error::{Error, Result};
