//! # sspuller Common Library
//!
//! Shared code for the sspuller crates:
//! - Error types
//! - Bootstrap configuration loading and data root resolution
//! - Sport identifiers
//! - Calendar lookup table used by the date enumerator

pub mod calendar;
pub mod config;
pub mod error;
pub mod sport;

pub use calendar::DaysInMonth;
pub use error::{Error, Result};
pub use sport::Sport;
