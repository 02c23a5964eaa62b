//! API middleware components

pub mod logging;
pub mod metrics;
pub mod security;
pub mod signup;

pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
pub use security::security_headers_middleware;
pub use signup::signup_shape_middleware;
