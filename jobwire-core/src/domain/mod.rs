//! Core domain types
//!
//! The domain layer is deliberately small: one listing type shared between
//! the fetch path and the announcement path, with its chat rendering.

pub mod job;
