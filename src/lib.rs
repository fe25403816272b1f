//! stickpad firmware library.
//!
//! Turns an analog two-axis joystick and a push-button into directional
//! command flags plus timed jump and duck gestures.  Everything here
//! builds and tests on the host; ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod command;
pub mod config;
pub mod events;
pub mod fsm;
pub mod translate;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
