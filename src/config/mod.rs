//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, InterestsConfig, LogFormat, LoggingConfig, MetricsConfig,
    PasswordHashConfig, SecurityConfig, SeedInterest, ServerConfig, StorageBackend,
};
