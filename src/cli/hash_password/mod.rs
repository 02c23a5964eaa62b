//! Hash-password command - prints an Argon2 hash for a plaintext password

use clap::Args;

use crate::config::{AppConfig, PasswordHashConfig};
use crate::domain::user::validate_password;
use crate::infrastructure::user::{Argon2Hasher, PasswordHasher};

#[derive(Args)]
pub struct HashPasswordArgs {
    /// Plaintext password to hash
    pub password: String,
}

/// Print the hash using the configured work factor
pub async fn run(args: HashPasswordArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    let hash = hash_password(&config.security.password_hash, &args.password)?;

    println!("{}", hash);

    Ok(())
}

fn hash_password(config: &PasswordHashConfig, password: &str) -> anyhow::Result<String> {
    validate_password(password)?;

    let hasher = Argon2Hasher::from_config(config)?;

    Ok(hasher.hash(password)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHashConfig {
        PasswordHashConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_password_verifies() {
        let hash = hash_password(&cheap(), "pw123").unwrap();

        let hasher = Argon2Hasher::from_config(&cheap()).unwrap();
        assert!(hasher.verify("pw123", &hash));
    }

    #[test]
    fn test_hash_password_rejects_blank() {
        assert!(hash_password(&cheap(), "   ").is_err());
    }
}
