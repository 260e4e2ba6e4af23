//! # Verki (Multi-User Blog API)
//!
//! `verki` is a multi-user blog service. Users sign up, log in, and manage
//! posts they own; everything else is read-only for authenticated users.
//!
//! ## Authentication (stateless tokens)
//!
//! Signup and login return a signed `HS256` token carrying the user id and a
//! 24-hour expiry. The server keeps no session state: every protected request
//! presents the token in an `Authorization: Bearer` header and is verified
//! against the signing secret alone.
//!
//! - **Uniform rejection:** All token failures (bad signature, expired, wrong
//!   algorithm, malformed claims) collapse into a single `401 invalid token`
//!   so callers cannot probe for which check failed.
//! - **Secret handling:** The signing secret comes from the environment at
//!   startup and is injected into the codec at construction. An absent or
//!   empty secret is a fatal configuration error.
//!
//! ## Ownership
//!
//! Posts belong to the user who created them. Mutations resolve existence
//! before ownership: a missing post is `404 Not Found`, a post owned by
//! someone else is `403 Forbidden`.
//!
//! ## Error Contract
//!
//! Every error response is a JSON object with a single `error` key, either a
//! message string or a list of per-field validation errors. Internal failures
//! are reported as an opaque `500` and never echo their cause.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
