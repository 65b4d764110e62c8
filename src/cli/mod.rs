//! # CLI Module
//!
//! Command-line tooling for inspecting and exercising route tables.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the table in match order:
//!
//! ```bash
//! keepsake-router routes --config config/routes.toml
//! ```
//!
//! ### `resolve`
//!
//! Resolve one or more paths without navigating:
//!
//! ```bash
//! keepsake-router resolve /listen/42 /nope --json
//! ```
//!
//! ### `lint`
//!
//! Validate the table and list shadowed routes and other issues:
//!
//! ```bash
//! keepsake-router lint --config config/routes.toml --deny-warnings
//! ```
//!
//! ### `replay`
//!
//! Run a navigation session step by step and print the state after each
//! step. Steps are `push:/path` (or just `/path`), `replace:/path`, `back`,
//! `forward` and `go:N`:
//!
//! ```bash
//! keepsake-router replay /record /listen/42 back back forward
//! ```
//!
//! Without `--config` every command uses the built-in keepsake table.
//! `KEEPSAKE_ROUTER_*` environment overrides apply either way.

mod commands;


pub use commands::{run_cli, Cli, Commands, Step};
