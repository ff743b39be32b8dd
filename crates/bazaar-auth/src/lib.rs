//! Bearer-credential handling for Bazaar.
//!
//! The server owns authentication; the client only carries an opaque bearer
//! token and attaches it to every request. This crate provides the
//! [`TokenProvider`] seam transports read from, an in-memory [`TokenStore`],
//! and the [`AuthSession`] record built from a sign-in response.

mod error;
mod session;
mod token;

pub use error::AuthError;
pub use session::AuthSession;
pub use token::{TokenProvider, TokenStore};
