//! # flatlint-rules
//!
//! Built-in rules and presets for flatlint.
//!
//! ## Core rules (unprefixed)
//!
//! | Name | Description |
//! |------|-------------|
//! | `max-line-length` | Limits line length (`limit` option, default 120) |
//! | `max-file-lines` | Limits file length (`limit` option, default 1000) |
//! | `no-tabs` | Forbids tab characters |
//! | `no-trailing-whitespace` | Forbids trailing whitespace |
//!
//! Core rules are text-level and run under any parser binding.
//!
//! ## The `rust` plugin
//!
//! | Name | Description |
//! |------|-------------|
//! | `rust/no-unwrap` | Forbids `.unwrap()`/`.expect()` in production code |
//! | `rust/no-dbg` | Forbids `dbg!` invocations |
//! | `rust/no-wildcard-use` | Forbids wildcard imports |
//!
//! The plugin ships a `recommended` preset: a pre-built fragment array
//! that binds the `rust` parser for `**/*.rs` and enables all three rules.
//!
//! ## Usage
//!
//! ```ignore
//! use flatlint_core::{compose, Engine};
//! use flatlint_rules::{core_rules, recommended_sources};
//!
//! let plan = compose(recommended_sources()?)?;
//! let result = Engine::builder()
//!     .root("./project")
//!     .plan(plan)
//!     .core_rules(core_rules())
//!     .build()?
//!     .lint()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod max_file_lines;
mod max_line_length;
mod no_tabs;
mod no_trailing_whitespace;
mod presets;

/// The built-in `rust` plugin.
pub mod rust_plugin;

pub use max_file_lines::MaxFileLines;
pub use max_line_length::MaxLineLength;
pub use no_tabs::NoTabs;
pub use no_trailing_whitespace::NoTrailingWhitespace;
pub use presets::{core_rules, default_registry, recommended_sources};
pub use rust_plugin::RustPlugin;

/// Re-export core types for convenience.
pub use flatlint_core::{Rule, RulePlugin, Severity, Violation};
