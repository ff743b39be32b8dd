//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No user is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// A credential field that must carry a value is empty.
    #[error("empty {0}")]
    EmptyField(&'static str),
}
