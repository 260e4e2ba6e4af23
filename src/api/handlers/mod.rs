//! HTTP handlers, grouped by resource.

use std::time::Duration;

pub mod auth;
pub mod health;
pub mod posts;
pub mod users;

/// Per-call deadline for repository queries. Calls that exceed it fail, there
/// are no retries.
pub(crate) const DB_TIMEOUT: Duration = Duration::from_secs(5);

// Expansion flags like `?posts=true` only count when spelled exactly "true".
pub(crate) fn flag_enabled(value: Option<&str>) -> bool {
    value == Some("true")
}
