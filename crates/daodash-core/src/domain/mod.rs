//! Domain records for the favorites dashboard.

pub mod dao;
pub mod network;

pub use dao::*;
pub use network::*;
