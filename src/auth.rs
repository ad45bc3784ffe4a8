//! Admin login: a password check issuing a signed, time-limited token.
//!
//! This is deliberately a stub in the same spirit as the dashboard it
//! guards — a single shared password and a self-contained token, not an
//! account system. The token is `admin.<expiry>.<signature>` where the
//! signature is a SHA-256 digest over the payload and the signing secret,
//! and the expiry is a plain unix-seconds timestamp two hours out.
//!
//! The current time is injected into [`AdminAuth::login`] and
//! [`AdminAuth::verify`] so callers own the clock and tests stay
//! deterministic.

use sha2::{Digest, Sha256};

/// Token lifetime: two hours, in seconds.
pub const TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

/// Login or token verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The supplied password does not match the admin password.
    #[error("invalid password")]
    InvalidPassword,

    /// The token does not have the `admin.<expiry>.<signature>` shape.
    #[error("malformed token")]
    Malformed,

    /// The token's signature does not verify under the signing secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's expiry timestamp is in the past.
    #[error("token expired")]
    Expired,
}

/// Issues and verifies admin tokens for one (password, secret) pair.
pub struct AdminAuth {
    password: String,
    secret: Vec<u8>,
}

impl AdminAuth {
    /// Configure the admin password and the token signing secret.
    pub fn new(password: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self { password: password.into(), secret: secret.into() }
    }

    /// Check `password` and, on success, issue a token valid for
    /// [`TOKEN_TTL_SECS`] from `now_unix`.
    pub fn login(&self, password: &str, now_unix: i64) -> Result<String, AuthError> {
        if password != self.password {
            log::warn!("admin login rejected: wrong password");
            return Err(AuthError::InvalidPassword);
        }
        let expiry = now_unix + TOKEN_TTL_SECS;
        let payload = format!("admin.{}", expiry);
        let token = format!("{}.{}", payload, self.signature(&payload));
        log::debug!("admin token issued, expires at {}", expiry);
        Ok(token)
    }

    /// Verify a token's shape, signature and expiry against `now_unix`.
    pub fn verify(&self, token: &str, now_unix: i64) -> Result<(), AuthError> {
        let (payload, signature) = token.rsplit_once('.').ok_or(AuthError::Malformed)?;
        let (role, expiry) = payload.split_once('.').ok_or(AuthError::Malformed)?;
        if role != "admin" {
            return Err(AuthError::Malformed);
        }
        let expiry: i64 = expiry.parse().map_err(|_| AuthError::Malformed)?;

        if !constant_time_eq(signature.as_bytes(), self.signature(payload).as_bytes()) {
            return Err(AuthError::InvalidSignature);
        }
        if expiry <= now_unix {
            return Err(AuthError::Expired);
        }
        Ok(())
    }

    /// Hex SHA-256 over secret and payload.
    fn signature(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(b".");
        hasher.update(payload.as_bytes());
        use std::fmt::Write;
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            // Writing to a String cannot fail.
            let _ = write!(hex, "{:02x}", byte);
        }
        hex
    }
}

/// Byte comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

// ─── Tests ──────────────────────────────────────────────────────────────────
