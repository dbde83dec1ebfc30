//! # Accounts & request auth
//!
//! Cookie-based auth, two cookies per logged-in browser:
//!
//! - `sessionid`: opaque random bearer token, HttpOnly, backed by a
//!   `sessions` row with an expiry
//! - `csrftoken`: HMAC-signed value readable by page scripts; mutating
//!   requests must echo it back in the `X-CSRFToken` header and the pair
//!   must match (double submit)
//!
//! Passwords are stored as PBKDF2-HMAC-SHA256 with a per-user random salt,
//! encoded as `pbkdf2_sha256$iterations$salt$hash`.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::{
    database::{self, UserRow},
    error::AppError,
    state::AppState,
};

pub const SESSION_COOKIE: &str = "sessionid";
pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

const PBKDF2_ITERATIONS: u32 = 120_000;

type HmacSha256 = Hmac<Sha256>;

// ---- passwords ----

pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt);

    let mut hash = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    format!(
        "pbkdf2_sha256${}${}${}",
        PBKDF2_ITERATIONS,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(hash)
    )
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some("pbkdf2_sha256"), Some(iterations), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (
        URL_SAFE_NO_PAD.decode(salt),
        URL_SAFE_NO_PAD.decode(expected),
    ) else {
        return false;
    };

    let mut hash = vec![0u8; expected.len()];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut hash);
    constant_time_eq(&hash, &expected)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// ---- tokens ----

pub fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Mint a CSRF token: random nonce plus its MAC under the signing key.
pub fn sign_csrf(key: &[u8]) -> String {
    let mut nonce = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&nonce);
    let tag = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(nonce),
        URL_SAFE_NO_PAD.encode(tag)
    )
}

pub fn verify_csrf(key: &[u8], token: &str) -> bool {
    let Some((nonce, tag)) = token.split_once('.') else {
        return false;
    };
    let (Ok(nonce), Ok(tag)) = (URL_SAFE_NO_PAD.decode(nonce), URL_SAFE_NO_PAD.decode(tag)) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&nonce);
    mac.verify_slice(&tag).is_ok()
}

// ---- cookies ----

pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split("; ") {
            if let Some(value) = pair.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
                return Some(value.to_string());
            }
        }
    }
    None
}

pub fn session_cookie(token: &str, ttl_days: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl_days * 24 * 60 * 60
    )
}

pub fn csrf_cookie(token: &str, ttl_days: i64) -> String {
    // Page scripts read this one, so no HttpOnly.
    format!(
        "{CSRF_COOKIE}={token}; Path=/; SameSite=Lax; Max-Age={}",
        ttl_days * 24 * 60 * 60
    )
}

pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0")
}

/// Open a session for a freshly authenticated user and hand back the two
/// Set-Cookie values.
pub async fn start_session(
    state: &AppState,
    user_id: i64,
) -> Result<(String, String), AppError> {
    let token = random_token();
    let expires_at = Utc::now() + Duration::days(state.config.session_ttl_days);
    database::create_session(&state.pool, &token, user_id, expires_at).await?;

    let csrf = sign_csrf(&state.config.signing_key);
    Ok((
        session_cookie(&token, state.config.session_ttl_days),
        csrf_cookie(&csrf, state.config.session_ttl_days),
    ))
}

// ---- extractors ----

/// The logged-in user, resolved from the session cookie. Rejects with 401
/// when the cookie is missing, unknown, or expired.
pub struct AuthUser(pub UserRow);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token =
            cookie_value(&parts.headers, SESSION_COOKIE).ok_or(AppError::Unauthorized)?;
        let user = database::session_user(&state.pool, &token)
            .await?
            .ok_or(AppError::Unauthorized)?;
        Ok(AuthUser(user))
    }
}

/// Double-submit CSRF check for mutating handlers: header and cookie must
/// both be present, equal, and carry a valid signature.
pub struct CsrfGuard;

impl FromRequestParts<Arc<AppState>> for CsrfGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let cookie = cookie_value(&parts.headers, CSRF_COOKIE).ok_or(AppError::CsrfRejected)?;
        let header = parts
            .headers
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::CsrfRejected)?;

        if header != cookie || !verify_csrf(&state.config.signing_key, header) {
            return Err(AppError::CsrfRejected);
        }
        Ok(CsrfGuard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_password_round_trip() {
        let stored = hash_password("StrongPass123!");
        assert!(stored.starts_with("pbkdf2_sha256$120000$"));
        assert!(verify_password("StrongPass123!", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn test_password_salts_differ() {
        assert_ne!(hash_password("same"), hash_password("same"));
    }

    #[test]
    fn test_verify_rejects_mangled_hash() {
        assert!(!verify_password("x", "not-a-hash"));
        assert!(!verify_password("x", "pbkdf2_sha256$abc$zz$zz"));

        let mut stored = hash_password("x");
        stored.push('A');
        assert!(!verify_password("x", &stored));
    }

    #[test]
    fn test_csrf_sign_and_verify() {
        let key = b"test-signing-key";
        let token = sign_csrf(key);
        assert!(verify_csrf(key, &token));
        assert!(!verify_csrf(b"other-key", &token));
        assert!(!verify_csrf(key, "garbage"));
        assert!(!verify_csrf(key, &format!("{token}x")));
    }

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("sessionid=abc; csrftoken=def; theme=dark"),
        );

        assert_eq!(cookie_value(&headers, "sessionid").as_deref(), Some("abc"));
        assert_eq!(cookie_value(&headers, "csrftoken").as_deref(), Some("def"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_name_is_not_prefix_matched() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("sessionid2=abc"));
        assert_eq!(cookie_value(&headers, "sessionid"), None);
    }

    #[test]
    fn test_expired_cookie_clears() {
        assert_eq!(expired_cookie("sessionid"), "sessionid=; Path=/; Max-Age=0");
    }
}
