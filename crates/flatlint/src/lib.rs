//! # flatlint
//!
//! Flat-config linter: an ordered sequence of configuration fragments is
//! composed into one evaluation plan, then evaluated per file with
//! last-wins rule merging.
//!
//! This is the main facade crate that re-exports core functionality and
//! the built-in rules.
//!
//! ## Quick Start — `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! flatlint = "0.2"
//! ```
//!
//! ```rust,ignore
//! // tests/lint.rs
//! #[test]
//! fn lint_clean() {
//!     flatlint::check();
//! }
//! ```
//!
//! This runs flatlint as part of `cargo test`, configured via
//! `flatlint.toml` at the workspace root, and panics with a report when
//! violations reach the failing severity.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use flatlint::{compose, Engine};
//! use flatlint::rules::{core_rules, recommended_sources};
//!
//! let plan = compose(recommended_sources()?)?;
//! let result = Engine::builder()
//!     .root("./src")
//!     .plan(plan)
//!     .core_rules(core_rules())
//!     .build()?
//!     .lint()?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use flatlint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use flatlint_rules::*;
}

mod runner;

pub use runner::{check, check_with};
