//! Token-based authentication and ownership policy.
//!
//! ## Flow
//!
//! - `POST /user/signup` creates an account and returns a signed token.
//! - `POST /user/login` exchanges credentials for a token.
//! - Every other route sits behind [`gate::require_auth`], which verifies the
//!   bearer token and exposes the caller as [`gate::VerifiedUser`].
//!
//! Tokens are stateless: nothing is stored or revoked server side, a token
//! simply expires 24 hours after issuance.

pub(crate) mod flow;
pub mod gate;
pub mod login;
pub mod ownership;
pub mod password;
pub mod signup;
pub(crate) mod storage;
pub mod token;
pub mod types;
