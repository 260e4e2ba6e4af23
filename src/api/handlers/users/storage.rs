//! Database access for users.

use crate::api::handlers::{
    posts::{storage::post_from_row, types::Post},
    users::types::UserProfile,
    DB_TIMEOUT,
};
use anyhow::{Context, Result};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use tokio::time::timeout;
use tracing::{info_span, Instrument};

fn profile_from_row(row: &PgRow) -> UserProfile {
    UserProfile {
        id: row.get("id"),
        display_name: row.get("display_name"),
        email: row.get("email"),
        posts: None,
    }
}

pub(crate) async fn list_users(pool: &PgPool, include_posts: bool) -> Result<Vec<UserProfile>> {
    let query = "SELECT id, display_name, email FROM users ORDER BY id";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let rows = timeout(DB_TIMEOUT, sqlx::query(query).fetch_all(pool))
        .instrument(span)
        .await
        .context("user list timed out")?
        .context("failed to list users")?;

    let mut users: Vec<UserProfile> = rows.iter().map(profile_from_row).collect();

    if include_posts {
        let mut by_user = posts_by_user(pool).await?;
        for user in &mut users {
            user.posts = Some(by_user.remove(&user.id).unwrap_or_default());
        }
    }

    Ok(users)
}

pub(crate) async fn get_user(
    pool: &PgPool,
    user_id: i64,
    include_posts: bool,
) -> Result<Option<UserProfile>> {
    let query = "SELECT id, display_name, email FROM users WHERE id = $1";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let row = timeout(
        DB_TIMEOUT,
        sqlx::query(query).bind(user_id).fetch_optional(pool),
    )
    .instrument(span)
    .await
    .context("user fetch timed out")?
    .context("failed to fetch user")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut user = profile_from_row(&row);

    if include_posts {
        user.posts = Some(posts_for_user(pool, user_id).await?);
    }

    Ok(Some(user))
}

/// Removes the account, posts go with it through the schema's cascade.
pub(crate) async fn delete_user(pool: &PgPool, user_id: i64) -> Result<()> {
    let query = "DELETE FROM users WHERE id = $1";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );

    timeout(DB_TIMEOUT, sqlx::query(query).bind(user_id).execute(pool))
        .instrument(span)
        .await
        .context("user delete timed out")?
        .context("failed to delete user")?;

    Ok(())
}

async fn posts_by_user(pool: &PgPool) -> Result<HashMap<i64, Vec<Post>>> {
    let query = "SELECT id, title, content, user_id, published, updated FROM posts ORDER BY id";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let rows = timeout(DB_TIMEOUT, sqlx::query(query).fetch_all(pool))
        .instrument(span)
        .await
        .context("post list timed out")?
        .context("failed to list posts")?;

    let mut by_user: HashMap<i64, Vec<Post>> = HashMap::new();

    for row in &rows {
        let post = post_from_row(row, false);
        by_user.entry(post.user_id).or_default().push(post);
    }

    Ok(by_user)
}

async fn posts_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Post>> {
    let query = "SELECT id, title, content, user_id, published, updated FROM posts \
                 WHERE user_id = $1 ORDER BY id";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let rows = timeout(
        DB_TIMEOUT,
        sqlx::query(query).bind(user_id).fetch_all(pool),
    )
    .instrument(span)
    .await
    .context("post list timed out")?
    .context("failed to list posts")?;

    Ok(rows.iter().map(|row| post_from_row(row, false)).collect())
}
