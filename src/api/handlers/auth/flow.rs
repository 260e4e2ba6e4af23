//! Signup and login orchestration.
//!
//! Handlers validate the request shape, the flow owns everything after that:
//! hashing, the store round-trip, and token issuance. The store seam keeps
//! the decision logic testable without a database.

use crate::api::{
    error::Error,
    handlers::auth::{
        password,
        storage::{self, CredentialRecord, SignupOutcome},
        token::TokenCodec,
        types::{LoginRequest, SignupRequest},
    },
};
use sqlx::PgPool;
use std::{future::Future, pin::Pin};

pub(crate) trait UserStore {
    fn find_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<CredentialRecord>>> + Send + 'a>>;

    fn create<'a>(
        &'a self,
        display_name: &'a str,
        email: &'a str,
        password_hash: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<SignupOutcome>> + Send + 'a>>;
}

impl UserStore for PgPool {
    fn find_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Option<CredentialRecord>>> + Send + 'a>> {
        Box::pin(storage::find_by_email(self, email))
    }

    fn create<'a>(
        &'a self,
        display_name: &'a str,
        email: &'a str,
        password_hash: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<SignupOutcome>> + Send + 'a>> {
        Box::pin(storage::create_user(self, display_name, email, password_hash))
    }
}

/// Create the account and hand back a token for it.
///
/// # Errors
/// Returns [`Error::UserAlreadyExists`] when the email is taken.
pub(crate) async fn signup<S: UserStore>(
    store: &S,
    codec: &TokenCodec,
    request: &SignupRequest,
) -> Result<String, Error> {
    let password_hash = password::hash(&request.password)?;

    match store
        .create(&request.display_name, &request.email, &password_hash)
        .await?
    {
        SignupOutcome::Created(id) => codec.issue(id),
        SignupOutcome::Conflict => Err(Error::UserAlreadyExists),
    }
}

/// Exchange credentials for a token.
///
/// # Errors
/// Returns [`Error::UserNotFound`] for an unknown email and
/// [`Error::InvalidPassword`] for a failed credential check, the two cases
/// stay distinguishable.
pub(crate) async fn login<S: UserStore>(
    store: &S,
    codec: &TokenCodec,
    request: &LoginRequest,
) -> Result<String, Error> {
    let record = store
        .find_by_email(&request.email)
        .await?
        .ok_or(Error::UserNotFound)?;

    if !password::verify(&request.password, &record.password_hash) {
        return Err(Error::InvalidPassword);
    }

    codec.issue(record.id)
}
