//! Common utilities shared across service crates.
//!
//! This crate provides:
//! - Unified error classification
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
