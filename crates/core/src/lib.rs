//! Domain rules shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds the id/timestamp aliases,
//! the error taxonomy, the status labels with the derived-status rule, and
//! small validation helpers.

pub mod error;
pub mod status;
pub mod types;
pub mod validation;
