use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use duet_types::config::CoupleConfig;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
    pub jwt_secret: String,
    pub couple: CoupleConfig,
}

impl ServerConfig {
    /// Read everything the server needs from the environment. Any invalid
    /// date-bearing value or a missing/placeholder secret aborts startup.
    pub fn from_env() -> Result<Self> {
        let couple = CoupleConfig::from_env().context("couple configuration")?;

        let jwt_secret = std::env::var("DUET_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!(
                "DUET_JWT_SECRET is unset or still a placeholder; \
                 set it to a random string in your .env and restart"
            );
        }

        let host = std::env::var("DUET_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("DUET_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .context("DUET_PORT")?;
        let db_path: PathBuf = std::env::var("DUET_DB_PATH")
            .unwrap_or_else(|_| "duet.db".into())
            .into();
        let upload_dir: PathBuf = std::env::var("DUET_UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".into())
            .into();

        Ok(ServerConfig {
            host,
            port,
            db_path,
            upload_dir,
            jwt_secret,
            couple,
        })
    }
}
