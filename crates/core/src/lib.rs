//! Domain rules for the school-records service.
//!
//! This crate is pure: no I/O, no database access. It holds the error
//! taxonomy, the closed role and score-type sets, and the validation rules
//! that the storage layer cannot express declaratively.

pub mod error;
pub mod pagination;
pub mod reference;
pub mod roles;
pub mod scoring;
pub mod types;
