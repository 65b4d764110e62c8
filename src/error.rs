//! Error types for route resolution and route table construction.
//!
//! Resolution errors are never fatal: the host application decides what to
//! render when a path does not match. Table errors are raised once, when the
//! table is built at startup.

use std::fmt;

/// Error returned by resolution and navigation operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route in the table matched the path
    NotFound {
        /// The path that failed to match
        path: String,
    },
    /// The location is not an absolute path (e.g. `listen/42` or `https://...`)
    InvalidPath {
        /// The rejected location string
        path: String,
    },
    /// Reverse lookup for a route name that is not declared in the table
    UnknownRoute {
        /// The requested route name
        name: String,
    },
    /// Reverse lookup without a value for one of the route's parameters
    MissingParam {
        /// Name of the route being built
        route: String,
        /// The parameter with no value
        param: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotFound { path } => write!(f, "no route matches '{path}'"),
            RouteError::InvalidPath { path } => {
                write!(f, "'{path}' is not an absolute path (expected a leading '/')")
            }
            RouteError::UnknownRoute { name } => write!(f, "no route is named '{name}'"),
            RouteError::MissingParam { route, param } => {
                write!(f, "route '{route}' requires parameter '{param}'")
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Error returned by [`RouteTable::new`](crate::router::RouteTable::new)
/// when the declared routes cannot form a valid table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The pattern string does not follow the pattern grammar
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
    /// Two routes have the same shape (parameter names are ignored)
    DuplicatePattern {
        /// The rejected pattern
        pattern: String,
        /// The earlier pattern with the same shape
        previous: String,
    },
    /// Two routes declare the same name
    DuplicateName {
        /// The repeated route name
        name: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern '{pattern}': {reason}")
            }
            TableError::DuplicatePattern { pattern, previous } => write!(
                f,
                "route pattern '{pattern}' duplicates earlier pattern '{previous}'"
            ),
            TableError::DuplicateName { name } => {
                write!(f, "route name '{name}' is declared more than once")
            }
        }
    }
}

impl std::error::Error for TableError {}
