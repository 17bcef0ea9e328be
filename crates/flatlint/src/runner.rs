//! Test-integration runner.
//!
//! Called from a `#[test]` function via [`check`] or [`check_with`].
//! Panics with a formatted report when violations reach the failing
//! severity, which is how `cargo test` surfaces lint regressions.

use flatlint_core::config::{load_from_toml, LoadedConfig};
use flatlint_core::{compose, Engine, Severity};
use flatlint_rules::{core_rules, default_registry, recommended_sources};
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["flatlint.toml", ".flatlint.toml"];

/// Runs flatlint over the project with configuration discovered from the
/// workspace root.
///
/// # Panics
///
/// Panics if violations at or above the configured failing severity are
/// found, or if the configuration is invalid.
pub fn check() {
    check_with(None, None);
}

/// Runs flatlint with an explicit config path and/or failing severity.
///
/// Arguments override the config file; `fail_on` accepts "warn" or
/// "error".
///
/// # Panics
///
/// Panics if violations at or above the failing severity are found, or if
/// the configuration is invalid.
pub fn check_with(config_path: Option<&str>, fail_on: Option<&str>) {
    let root = find_project_root();
    let content = read_config_content(&root, config_path);
    let config = load_config(&content);
    let effective_fail_on = resolve_fail_on(fail_on, &config);

    let plan = compose(config.sources)
        .unwrap_or_else(|e| panic!("flatlint: failed to compose plan: {e}"));

    let engine = Engine::builder()
        .root(&root)
        .plan(plan)
        .core_rules(core_rules())
        .respect_gitignore(config.respect_gitignore)
        .build()
        .unwrap_or_else(|e| panic!("flatlint: failed to build engine: {e}"));

    let result = engine
        .lint()
        .unwrap_or_else(|e| panic!("flatlint: lint run failed: {e}"));

    if result.has_violations_at(effective_fail_on) {
        let report = result.format_test_report(effective_fail_on);
        panic!("{report}");
    }
}

/// Reads the raw TOML content from the config file.
///
/// Returns an empty string if no config file is found.
fn read_config_content(root: &Path, explicit_path: Option<&str>) -> String {
    if let Some(path) = explicit_path {
        let full_path = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            root.join(path)
        };
        return std::fs::read_to_string(&full_path).unwrap_or_else(|e| {
            panic!(
                "flatlint: failed to read config from {}: {e}",
                full_path.display()
            );
        });
    }

    for candidate in CONFIG_CANDIDATES {
        let path = root.join(candidate);
        if path.exists() {
            return std::fs::read_to_string(&path).unwrap_or_else(|e| {
                panic!(
                    "flatlint: failed to read config from {}: {e}",
                    path.display()
                );
            });
        }
    }

    String::new()
}

/// Loads a [`LoadedConfig`] from TOML content, falling back to the
/// recommended defaults when the content is empty.
fn load_config(content: &str) -> LoadedConfig {
    if content.is_empty() {
        let sources = recommended_sources()
            .unwrap_or_else(|e| panic!("flatlint: built-in presets failed to build: {e}"));
        return LoadedConfig {
            fail_on: Severity::Error,
            respect_gitignore: true,
            sources,
        };
    }
    load_from_toml(content, &default_registry())
        .unwrap_or_else(|e| panic!("flatlint: failed to load config: {e}"))
}

/// Resolves the effective failing severity from arg > config > default.
fn resolve_fail_on(arg: Option<&str>, config: &LoadedConfig) -> Severity {
    match arg {
        None => config.fail_on,
        Some("warn") => Severity::Warn,
        Some("error") => Severity::Error,
        Some(other) => {
            panic!("flatlint: unknown severity `{other}`. Valid values: warn, error")
        }
    }
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root by looking for `Cargo.toml` from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    // CARGO_MANIFEST_DIR points to the crate containing the test,
    // which may be a workspace member. Walk up to find workspace root.
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(&manifest_dir);

        let mut candidate = manifest_path.as_path();
        loop {
            let cargo_toml = candidate.join("Cargo.toml");
            if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
                return candidate.to_path_buf();
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }

        // No workspace root found — use manifest dir itself
        return manifest_path;
    }

    // Fallback: current directory
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
