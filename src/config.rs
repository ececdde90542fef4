//! Configuration for Strongroom
//!
//! CLI arguments and environment variable handling using clap. The
//! embedding transport binary parses [`Args`] and hands them to
//! [`crate::AppState::init`].

use clap::Parser;
use std::path::PathBuf;

/// Strongroom - identity-document custody core
#[derive(Parser, Debug, Clone)]
#[command(name = "strongroom")]
#[command(about = "Encrypted identity-document custody with role-gated access")]
pub struct Args {
    /// Process-wide secret used for token signing and at-rest key
    /// derivation (required in production)
    #[arg(long, env = "SECRET_KEY")]
    pub secret_key: Option<String>,

    /// Directory for encrypted document artifacts
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Session token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value = "3600")]
    pub token_ttl_seconds: u64,

    /// Enable development mode (insecure fallback secret)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Load `.env` if present, then parse CLI arguments and environment
    /// variables.
    pub fn parse_from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    /// Get the effective process secret (uses a fixed insecure value in
    /// dev mode).
    pub fn secret_key(&self) -> Option<String> {
        if self.dev_mode {
            Some(
                self.secret_key
                    .clone()
                    .unwrap_or_else(|| "dev-only-insecure-secret".to_string()),
            )
        } else {
            self.secret_key.clone()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode && self.secret_key.is_none() {
            return Err("SECRET_KEY is required in production mode".to_string());
        }

        if self.token_ttl_seconds == 0 {
            return Err("TOKEN_TTL_SECONDS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            secret_key: None,
            upload_dir: PathBuf::from("uploads"),
            token_ttl_seconds: 3600,
            dev_mode: false,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_secret_required_in_production() {
        let args = base_args();
        assert!(args.validate().is_err());

        let mut with_secret = base_args();
        with_secret.secret_key = Some("s3cret".into());
        assert!(with_secret.validate().is_ok());
    }

    #[test]
    fn test_dev_mode_fallback_secret() {
        let mut args = base_args();
        args.dev_mode = true;
        assert!(args.validate().is_ok());
        assert_eq!(args.secret_key().as_deref(), Some("dev-only-insecure-secret"));
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut args = base_args();
        args.secret_key = Some("s3cret".into());
        args.token_ttl_seconds = 0;
        assert!(args.validate().is_err());
    }
}
