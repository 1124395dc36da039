//! Vacation request validation and quota accounting.
//!
//! The quota engine lives in [`services::vacation_validator`] and
//! [`services::vacation_stats`]; the remaining modules supply the data model,
//! the store port and the submission workflow around it.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;
pub mod validation;
