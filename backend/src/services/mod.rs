pub mod selection;
pub mod vacation_policy;
pub mod vacation_request;
pub mod vacation_stats;
pub mod vacation_validator;
pub mod week_bucket;
