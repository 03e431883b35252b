//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs whose subject is the user id. Handlers take an
//! [`AuthUser`] argument to require an authenticated caller.

mod extractor;
mod jwt;

pub use extractor::AuthUser;
pub use jwt::{Claims, decode_token, issue_token};
