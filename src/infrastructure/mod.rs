//! Infrastructure layer - Storage, hashing and observability implementations

pub mod interest;
pub mod logging;
pub mod metrics;
pub mod storage;
pub mod user;
