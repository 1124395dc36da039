//! Data models shared across the store port and services.

pub mod calendar_date;
pub mod presentation;
pub mod request_status;
pub mod vacation_policy;
pub mod vacation_request;
