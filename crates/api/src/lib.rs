//! Reelbook API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so
//! integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod datasets;
pub mod error;
pub mod handlers;
pub mod overlays;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod uploads;
