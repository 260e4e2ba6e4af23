//! Stateless token issuance and verification.
//!
//! Tokens are `HS256` JWTs carrying the user id as the subject claim. The
//! codec is built once at startup from the signing secret and shared through
//! request extensions, handlers never read the secret themselves.

use crate::api::error::Error;
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tokens expire 24 hours after issuance.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;

#[derive(Debug, Deserialize, Serialize)]
struct Claims {
    sub: u64,
    iat: i64,
    exp: i64,
}

pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec from the signing secret.
    ///
    /// # Errors
    /// Returns an error if the secret is empty.
    pub fn new(secret: &SecretString) -> Result<Self> {
        let secret = secret.expose_secret();

        if secret.is_empty() {
            bail!("signing secret must not be empty");
        }

        // The library's expiry check allows leeway and accepts exp == now.
        // Expiry here is strict, so it is enforced in verify_at instead.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token for the given user id.
    ///
    /// # Errors
    /// Returns an error if the id cannot be carried in a claim or signing fails.
    pub fn issue(&self, subject_id: i64) -> Result<String, Error> {
        self.issue_at(subject_id, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, subject_id: i64, now: i64) -> Result<String, Error> {
        let sub = u64::try_from(subject_id)
            .map_err(|_| Error::Unknown(anyhow!("cannot issue a token for id {subject_id}")))?;

        let claims = Claims {
            sub,
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign token")?)
    }

    /// Verify a token and return the user id it was issued for.
    ///
    /// # Errors
    /// Returns `Error::InvalidToken` for every untrusted token, without
    /// distinguishing bad signatures from expired or malformed claims.
    pub fn verify(&self, token: &str) -> Result<i64, Error> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub(crate) fn verify_at(&self, token: &str, now: i64) -> Result<i64, Error> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                debug!("Token rejected: {err}");
                Error::InvalidToken
            })?
            .claims;

        if claims.exp <= now {
            debug!("Token rejected: expired");
            return Err(Error::InvalidToken);
        }

        i64::try_from(claims.sub).map_err(|_| {
            debug!("Token rejected: subject out of range");
            Error::InvalidToken
        })
    }
}
