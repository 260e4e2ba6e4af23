//! Database access for posts.

use crate::api::handlers::{
    posts::types::{Author, Post},
    DB_TIMEOUT,
};
use anyhow::{Context, Result};
use sqlx::{postgres::PgRow, PgPool, Row};
use tokio::time::timeout;
use tracing::{info_span, Instrument};

pub(crate) fn post_from_row(row: &PgRow, with_author: bool) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        user_id: row.get("user_id"),
        published: row.get("published"),
        updated: row.get("updated"),
        user: with_author.then(|| Author {
            id: row.get("user_id"),
            display_name: row.get("display_name"),
            email: row.get("email"),
        }),
    }
}

pub(crate) async fn insert_post(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    content: &str,
) -> Result<Post> {
    let query = "INSERT INTO posts (title, content, user_id) VALUES ($1, $2, $3) \
                 RETURNING id, title, content, user_id, published, updated";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );

    let row = timeout(
        DB_TIMEOUT,
        sqlx::query(query)
            .bind(title)
            .bind(content)
            .bind(user_id)
            .fetch_one(pool),
    )
    .instrument(span)
    .await
    .context("post insert timed out")?
    .context("failed to insert post")?;

    Ok(post_from_row(&row, false))
}

pub(crate) async fn list_posts(pool: &PgPool, include_author: bool) -> Result<Vec<Post>> {
    let query = if include_author {
        "SELECT posts.id, posts.title, posts.content, posts.user_id, posts.published, \
         posts.updated, users.display_name, users.email \
         FROM posts JOIN users ON users.id = posts.user_id ORDER BY posts.id"
    } else {
        "SELECT id, title, content, user_id, published, updated FROM posts ORDER BY id"
    };

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

    Ok(rows
        .iter()
        .map(|row| post_from_row(row, include_author))
        .collect())
}

/// Case-insensitive substring search over titles and contents.
///
/// An empty term matches everything, the pattern wildcards stay active just
/// like a raw `ILIKE` would.
pub(crate) async fn search_posts(
    pool: &PgPool,
    term: &str,
    include_author: bool,
) -> Result<Vec<Post>> {
    let query = if include_author {
        "SELECT posts.id, posts.title, posts.content, posts.user_id, posts.published, \
         posts.updated, users.display_name, users.email \
         FROM posts JOIN users ON users.id = posts.user_id \
         WHERE posts.title ILIKE $1 OR posts.content ILIKE $1 ORDER BY posts.id"
    } else {
        "SELECT id, title, content, user_id, published, updated FROM posts \
         WHERE title ILIKE $1 OR content ILIKE $1 ORDER BY id"
    };

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let pattern = format!("%{term}%");

    let rows = timeout(DB_TIMEOUT, sqlx::query(query).bind(pattern).fetch_all(pool))
        .instrument(span)
        .await
        .context("post search timed out")?
        .context("failed to search posts")?;

    Ok(rows
        .iter()
        .map(|row| post_from_row(row, include_author))
        .collect())
}

pub(crate) async fn get_post(
    pool: &PgPool,
    post_id: i64,
    include_author: bool,
) -> Result<Option<Post>> {
    let query = if include_author {
        "SELECT posts.id, posts.title, posts.content, posts.user_id, posts.published, \
         posts.updated, users.display_name, users.email \
         FROM posts JOIN users ON users.id = posts.user_id WHERE posts.id = $1"
    } else {
        "SELECT id, title, content, user_id, published, updated FROM posts WHERE id = $1"
    };

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let row = timeout(
        DB_TIMEOUT,
        sqlx::query(query).bind(post_id).fetch_optional(pool),
    )
    .instrument(span)
    .await
    .context("post fetch timed out")?
    .context("failed to fetch post")?;

    Ok(row.map(|row| post_from_row(&row, include_author)))
}

pub(crate) async fn find_post_owner(pool: &PgPool, post_id: i64) -> Result<Option<i64>> {
    let query = "SELECT user_id FROM posts WHERE id = $1";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );

    let row = timeout(
        DB_TIMEOUT,
        sqlx::query(query).bind(post_id).fetch_optional(pool),
    )
    .instrument(span)
    .await
    .context("post owner lookup timed out")?
    .context("failed to look up post owner")?;

    Ok(row.map(|row| row.get("user_id")))
}

pub(crate) async fn update_post(
    pool: &PgPool,
    post_id: i64,
    title: &str,
    content: &str,
) -> Result<()> {
    let query = "UPDATE posts SET title = $2, content = $3, updated = NOW() WHERE id = $1";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );

    timeout(
        DB_TIMEOUT,
        sqlx::query(query)
            .bind(post_id)
            .bind(title)
            .bind(content)
            .execute(pool),
    )
    .instrument(span)
    .await
    .context("post update timed out")?
    .context("failed to update post")?;

    Ok(())
}

pub(crate) async fn delete_post(pool: &PgPool, post_id: i64) -> Result<()> {
    let query = "DELETE FROM posts WHERE id = $1";

    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );

    timeout(DB_TIMEOUT, sqlx::query(query).bind(post_id).execute(pool))
        .instrument(span)
        .await
        .context("post delete timed out")?
        .context("failed to delete post")?;

    Ok(())
}
