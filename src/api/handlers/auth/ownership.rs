//! Ownership policy for posts.

/// Outcome of an ownership check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OwnershipDecision {
    Allow,
    Deny,
}

/// Decide whether a caller may mutate a post owned by `owner_id`.
///
/// Pure id comparison with no privileged callers. Existence is resolved
/// before this check, so a missing post reads as 404 and never as 403.
#[must_use]
pub const fn authorize(caller_id: i64, owner_id: i64) -> OwnershipDecision {
    if caller_id == owner_id {
        OwnershipDecision::Allow
    } else {
        OwnershipDecision::Deny
    }
}
