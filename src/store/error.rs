/*
 * Responsibility
 * - store が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("users are already friends")]
    AlreadyFriends,

    #[error("unit \"{0}\" not supported")]
    UnsupportedUnit(String),
}
