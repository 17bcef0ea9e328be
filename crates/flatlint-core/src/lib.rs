//! # flatlint-core
//!
//! Core framework for flat-config linting.
//!
//! A configuration is an ordered sequence of fragments. Each fragment may
//! scope itself to file globs, exclude paths, bind a parser, declare
//! plugins, and set rule severities. [`compose`] flattens the sequence
//! into an [`EvaluationPlan`]; the [`Engine`] walks target files and, for
//! each file, merges the applicable fragments in order (last wins per rule
//! name) before evaluating the enabled rules against the parsed source.
//!
//! ## Example
//!
//! ```ignore
//! use flatlint_core::{compose, Engine, Fragment, RuleEntry, Severity};
//!
//! let base = Fragment::new()
//!     .with_rule("no-tabs", RuleEntry::new(Severity::Warn))?;
//! let strict = Fragment::new()
//!     .with_files(["src/**/*.rs"])?
//!     .with_rule("no-tabs", RuleEntry::new(Severity::Error))?;
//!
//! let plan = compose(vec![base.into(), strict.into()])?;
//! let result = Engine::builder()
//!     .root("./project")
//!     .plan(plan)
//!     .core_rules(my_rules)
//!     .build()?
//!     .lint()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod engine;
mod fragment;
mod parser;
mod plan;
mod rule;
mod types;

/// TOML configuration pipeline.
pub mod config;

pub use context::FileContext;
pub use engine::{Engine, EngineBuilder, EngineError};
pub use fragment::{
    Fragment, FragmentError, GlobPattern, LanguageOptions, RuleEntry, RuleName, RuleOptions,
};
pub use parser::{
    ParsedSource, ParseError, ParserRegistry, RustParser, SourceParser, TextParser,
    DEFAULT_PARSER,
};
pub use plan::{compose, ComposeError, EffectiveConfig, EvaluationPlan, FragmentSource};
pub use rule::{PluginRef, PluginRegistry, Rule, RuleBox, RulePlugin};
pub use types::{Location, LintResult, Severity, Violation, ViolationDiagnostic};
