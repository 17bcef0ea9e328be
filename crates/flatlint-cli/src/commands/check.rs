//! Check command implementation.

use anyhow::{Context, Result};
use flatlint_core::config::{load_file, LoadedConfig};
use flatlint_core::{compose, Engine, Fragment, FragmentSource, Severity};
use flatlint_rules::{core_rules, default_registry, recommended_sources};
use std::path::Path;

use super::output;
use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command.
///
/// `target` is either a directory to walk or a glob pattern selecting
/// files. Exit status is non-zero when violations at or above the
/// effective `fail_on` severity are found.
pub fn run(
    target: &str,
    format: OutputFormat,
    fail_on: Option<Severity>,
    exclude: Vec<String>,
    explicit_config: Option<&Path>,
) -> Result<()> {
    let target_path = Path::new(target);
    let is_directory = target_path.is_dir();
    let project_dir = if is_directory {
        target_path.to_path_buf()
    } else {
        std::env::current_dir().context("cannot determine current directory")?
    };

    let registry = default_registry();
    let source = config_resolver::resolve(&project_dir, explicit_config);
    let config = match source.path() {
        Some(path) => {
            if source.is_global() {
                tracing::info!("Using global config: {}", path.display());
            }
            load_file(path, &registry)
                .with_context(|| format!("failed to load config: {}", path.display()))?
        }
        None => {
            let sources = recommended_sources().context("built-in presets failed to build")?;
            LoadedConfig {
                fail_on: Severity::Error,
                respect_gitignore: true,
                sources,
            }
        }
    };

    let mut sources = config.sources;

    // CLI excludes become one trailing ignores-only fragment; plan
    // position does not matter for those.
    if !exclude.is_empty() {
        let fragment = Fragment::new()
            .with_ignores(&exclude)
            .context("invalid --exclude pattern")?;
        sources.push(FragmentSource::Single(fragment));
    }

    let plan = compose(sources).context("failed to compose evaluation plan")?;

    let mut builder = Engine::builder()
        .plan(plan)
        .core_rules(core_rules())
        .respect_gitignore(config.respect_gitignore);
    builder = if is_directory {
        builder.root(target_path)
    } else {
        builder.root(&project_dir).target_pattern(target)
    };

    let engine = builder.build().context("failed to build engine")?;

    tracing::info!("Linting {target}");

    let result = engine.lint().context("lint run failed")?;

    output::print(&result, format)?;

    let fail_on = fail_on.unwrap_or(config.fail_on);
    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
