//! HookSim Library
//!
//! Offline simulator of per-swap hook fees against a fixed-fee AMM baseline

pub mod config;
pub mod cost;
pub mod error;
pub mod hooks;
pub mod persistence;
pub mod population;
pub mod report;
pub mod scenarios;
pub mod simulation;
pub mod types;

pub use error::{ValidationError, ValidationResult};
