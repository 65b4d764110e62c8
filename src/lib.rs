//! # keepsake-router
//!
//! Client-side routing core for the keepsake web front end ("record a
//! keepsake, unlock it with a PIN"). It maps locations to views and keeps
//! navigation history, without knowing anything about the views themselves.
//!
//! ## Architecture
//!
//! - **[`router`]** - route patterns, the validated [`RouteTable`] and the [`Router`]
//! - **[`history`]** - the [`History`](history::History) seam and [`MemoryHistory`](history::MemoryHistory)
//! - **[`location`]** - parsing of path, query and fragment
//! - **[`config`]** - route tables declared in TOML, YAML or JSON
//! - **[`keepsake`]** - the app's canonical route table
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`cli`]** - the `keepsake-router` command-line tool
//!
//! ### Navigation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host app
//!     participant Router
//!     participant History
//!     participant Table as RouteTable
//!
//!     Host->>Router: navigate("/listen/42")
//!     Router->>Router: Location::parse
//!     Router->>History: push("/listen/42")
//!     Router->>Table: match_path("/listen/42")
//!     Table-->>Router: Resolved { view: Public, params: {id: 42} }
//!     Router->>Router: update NavigationState
//!     Router->>Host: on_navigate listeners (activate view)
//!     Host->>Router: back()
//!     Router->>History: go(-1)
//!     Router->>Table: match_path(previous entry)
//!     Router->>Host: on_navigate listeners
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use keepsake_router::keepsake::{self, KeepsakeView};
//! use keepsake_router::{MatchOptions, MemoryHistory, RouteError, Router};
//! use std::sync::Arc;
//!
//! let table = Arc::new(keepsake::table(MatchOptions::default())?);
//! let mut router = Router::new(table, MemoryHistory::default())?;
//!
//! router.on_navigate(|event| {
//!     println!("render {:?}", event.to.view());
//! });
//!
//! router.navigate("/listen/42")?;
//! assert_eq!(router.current().view(), Some(&KeepsakeView::Public));
//! assert_eq!(router.param("id"), Some("42"));
//!
//! assert!(matches!(
//!     router.navigate("/unregistered"),
//!     Err(RouteError::NotFound { .. })
//! ));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod keepsake;
pub mod location;
pub mod logging;
pub mod router;
pub mod view;

pub use config::{RouteConfig, RouterConfig};
pub use error::{RouteError, TableError};
pub use history::{History, MemoryHistory};
pub use location::Location;
pub use router::{
    MatchOptions, NavigationEvent, NavigationKind, NavigationState, Resolved, Route, RouteTable,
    Router,
};
pub use view::ViewId;
