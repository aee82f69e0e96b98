//! ssp-puller library interface
//!
//! Exposes the pipelines, services and models for the `sspuller` binary and
//! for integration testing.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{PullerError, PullerResult};
pub use crate::workflow::{EventDataJob, Puller, ScheduledEventsJob};
