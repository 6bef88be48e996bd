//! # DAODash Application
//!
//! Dependency injection wiring, startup helpers and the command layer
//! behind the `daodash` binary.

pub mod app;
pub mod di;
pub mod startup;
