//! Errors produced while building the route table or navigating.

use thiserror::Error;

/// A malformed or conflicting route table.
///
/// These are only produced when the table is built at startup and are fatal for the app.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two definitions share a name.
    #[error("duplicate route name `{0}`")]
    DuplicateName(String),
    /// Two static patterns are identical.
    #[error("routes `{first}` and `{second}` both declare the static path `{pattern}`")]
    DuplicatePattern {
        pattern: String,
        first: String,
        second: String,
    },
    /// A pattern that can't be compiled.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
}

/// Errors from resolving or navigating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No definition matched the path.
    #[error("no route matches `{path}`")]
    NotFound { path: String },
    /// A dynamic segment had no value when building a path.
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },
    /// Navigation by a name that isn't in the table.
    #[error("no route named `{name}`")]
    UnknownRoute { name: String },
}
