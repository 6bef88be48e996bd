//! # DAODash Core
//!
//! Core types, error definitions and domain records for DAODash.
//! This crate provides the foundational abstractions shared by the
//! storage backends, the favorites cache layer and the application shell.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use telemetry::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
