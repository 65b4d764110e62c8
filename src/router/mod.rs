//! # Router Module
//!
//! Path matching, route resolution and navigation for the keepsake front end.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route patterns (`/listen/:id`) into matchers
//! - Validating the ordered route table at startup
//! - Resolving a location to the first matching route and its parameters
//! - Recording navigation in a [`History`](crate::history::History) and
//!   keeping the current [`NavigationState`]
//!
//! ## Architecture
//!
//! 1. **Compilation**: at startup every pattern is parsed and compiled to an
//!    anchored regex. Duplicate patterns are rejected; routes hidden behind an
//!    earlier broader route are reported as lint warnings.
//!
//! 2. **Matching**: a path is tested against the patterns in declaration
//!    order. The first match wins; its view and captured parameters are
//!    returned. No match is [`RouteError::NotFound`](crate::RouteError).
//!
//! ## Example
//!
//! ```rust
//! use keepsake_router::router::{MatchOptions, Route, RouteTable};
//!
//! let table = RouteTable::new(
//!     vec![
//!         Route::new("/", "landing"),
//!         Route::new("/listen/:id", "public").named("listen"),
//!     ],
//!     MatchOptions::default(),
//! )?;
//!
//! let resolved = table.match_path("/listen/42").expect("route matches");
//! assert_eq!(resolved.view, "public");
//! assert_eq!(resolved.param("id"), Some("42"));
//! assert_eq!(table.reverse("listen", &[("id", "7")])?, "/listen/7");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Performance
//!
//! Matching is a linear scan, O(n) in the number of routes. Declaration
//! order is the contract, and front-end tables hold a handful of routes.

mod core;
mod pattern;
mod table;
#[cfg(test)]
mod performance_tests;

pub use core::{NavigationEvent, NavigationKind, NavigationState, Router};
pub use pattern::{MatchOptions, Params, RoutePattern, Segment, MAX_INLINE_PARAMS};
pub use table::{LintIssue, LintSeverity, Resolved, Route, RouteTable};
