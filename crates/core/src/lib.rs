#![forbid(unsafe_code)]

pub mod model;
pub mod progress;
pub mod query;
