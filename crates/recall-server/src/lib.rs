//! # Recall Server Library
//!
//! Dependency injection wiring and startup utilities for the Recall server.

pub mod di;
pub mod startup;
