//! Shared-passphrase access gate

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

/// Cookie that carries the access token
pub const ACCESS_COOKIE: &str = "taller_acceso";

/// Access gate in front of every page but the login one
///
/// With no passphrase configured the gate is open. Otherwise a request passes
/// when it carries the cookie handed out after a correct passphrase. The
/// token is the SHA-256 digest of the passphrase, so the passphrase itself
/// never travels back to the browser.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    passphrase: Option<String>,
    token: Option<String>,
}

impl AccessGate {
    pub fn new(passphrase: Option<String>) -> Self {
        let passphrase = passphrase.filter(|p| !p.is_empty());
        let token = passphrase.as_deref().map(token_for);
        Self { passphrase, token }
    }

    /// Gate without a passphrase
    pub fn open() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Compare a typed passphrase with the configured one
    pub fn check(&self, input: &str) -> bool {
        match &self.passphrase {
            Some(expected) => expected == input,
            None => true,
        }
    }

    /// Whether the request carries a valid access cookie
    pub fn admits(&self, headers: &HeaderMap) -> bool {
        let Some(token) = &self.token else {
            return true;
        };

        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .any(|(name, value)| name == ACCESS_COOKIE && value == token)
    }

    /// `Set-Cookie` value granting access, when the gate is enabled
    pub fn grant_cookie(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|t| format!("{ACCESS_COOKIE}={t}; Path=/; HttpOnly; SameSite=Strict"))
    }
}

fn token_for(passphrase: &str) -> String {
    hex::encode(Sha256::digest(passphrase.as_bytes()))
}
