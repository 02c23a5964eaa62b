//! CLI module for the User Interests API
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API server
//! - `hash-password`: print an Argon2 hash for a password

pub mod hash_password;
pub mod serve;

use clap::{Parser, Subcommand};

/// User Interests API - users, logins and user interests over HTTP
#[derive(Parser)]
#[command(name = "user-interests-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Print an Argon2 hash of a password using the configured work factor
    HashPassword(hash_password::HashPasswordArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["user-interests-api", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_hash_password() {
        let cli = Cli::try_parse_from(["user-interests-api", "hash-password", "pw123"]).unwrap();

        match cli.command {
            Command::HashPassword(args) => assert_eq!(args.password, "pw123"),
            _ => panic!("expected hash-password"),
        }
    }
}
