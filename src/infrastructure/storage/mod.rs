//! Storage infrastructure - PostgreSQL pool and error mapping

mod postgres;

pub use postgres::{connect_pool, map_sqlx_error, PostgresConfig};
