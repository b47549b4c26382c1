//! Core value types shared across the workspace.
//!
//! This module provides:
//! - Error types for solvers, interpolation and dates (`error`)
//! - Date handling and expiry-session conventions (`time`)

pub mod error;
pub mod time;

pub use error::{DateError, InterpolationError, SolverError};
pub use time::{Date, ExpirySession};
