//! Application core — pure domain logic, zero I/O.
//!
//! Stick classification, gesture FSM orchestration and config lifecycle.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
