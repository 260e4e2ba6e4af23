//! Database access for signup and login.

use crate::api::handlers::DB_TIMEOUT;
use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tokio::time::timeout;
use tracing::{info_span, Instrument};

/// Outcome of inserting a new user row.
#[derive(Debug)]
pub(crate) enum SignupOutcome {
    Created(i64),
    Conflict,
}

/// Credential view of a user row, only what login needs.
#[derive(Debug)]
pub(crate) struct CredentialRecord {
    pub(crate) id: i64,
    pub(crate) password_hash: String,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

pub(crate) async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<CredentialRecord>> {
    let query = "SELECT id, password FROM users WHERE email = $1";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let row = timeout(
        DB_TIMEOUT,
        sqlx::query(query).bind(email).fetch_optional(pool),
    )
    .instrument(span)
    .await
    .context("user lookup timed out")?
    .context("failed to look up user by email")?;

    Ok(row.map(|row| CredentialRecord {
        id: row.get("id"),
        password_hash: row.get("password"),
    }))
}

/// Insert a new user, reporting an email collision as [`SignupOutcome::Conflict`].
///
/// Uniqueness is left to the database constraint, a prior existence check
/// would race with concurrent signups.
pub(crate) async fn create_user(
    pool: &PgPool,
    display_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<SignupOutcome> {
    let query = "INSERT INTO users (display_name, email, password) VALUES ($1, $2, $3) RETURNING id";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );

    let result = timeout(
        DB_TIMEOUT,
        sqlx::query(query)
            .bind(display_name)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool),
    )
    .instrument(span)
    .await
    .context("user insert timed out")?;

    match result {
        Ok(row) => Ok(SignupOutcome::Created(row.get("id"))),
        Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}
