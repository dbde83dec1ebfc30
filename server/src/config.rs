use std::{env, fmt::Display, str::FromStr};

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub static_dir: String,
    /// Key for session and CSRF token signing.
    pub signing_key: Vec<u8>,
    pub session_ttl_days: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("MINDCHECK_PORT", "8000"),
            database_url: try_load("MINDCHECK_DATABASE_URL", "sqlite://mindcheck.db?mode=rwc"),
            static_dir: try_load("MINDCHECK_STATIC_DIR", "server/static"),
            signing_key: load_signing_key("MINDCHECK_SECRET"),
            session_ttl_days: try_load("MINDCHECK_SESSION_TTL_DAYS", "14"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Sessions and CSRF tokens are HMAC-signed with this key. Without the env
/// var a random per-process key is generated, which invalidates all
/// sessions on restart.
fn load_signing_key(key: &str) -> Vec<u8> {
    match var(key) {
        Ok(value) => value.into_bytes(),
        Err(()) => {
            warn!("{key} not set, generating a volatile signing key");
            let mut bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            STANDARD.encode(bytes).into_bytes()
        }
    }
}
