//! The lint engine: walks target files and evaluates the plan against each.

use crate::context::FileContext;
use crate::parser::{ParserRegistry, DEFAULT_PARSER};
use crate::plan::EvaluationPlan;
use crate::rule::{PluginRef, Rule, RuleBox};
use crate::types::LintResult;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building or running the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the target directory.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Invalid target glob pattern.
    #[error("invalid target pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Error parsing a source file, when configured as fatal.
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// A rule name in the plan has no implementation.
    #[error("fragment[{fragment}]: no implementation for rule `{rule}`")]
    UnknownRule {
        /// Index of the fragment declaring the rule.
        fragment: usize,
        /// The unresolvable rule key.
        rule: String,
    },

    /// A fragment binds a parser that is not registered.
    #[error("fragment[{fragment}]: unknown parser `{parser}`")]
    UnknownParser {
        /// Index of the fragment with the binding.
        fragment: usize,
        /// The unresolvable parser name.
        parser: String,
    },
}

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    root: Option<PathBuf>,
    target_pattern: Option<String>,
    plan: EvaluationPlan,
    core_rules: Vec<RuleBox>,
    parsers: Option<ParserRegistry>,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            respect_gitignore: true,
            ..Self::default()
        }
    }

    /// Sets the root directory to lint.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets an explicit target glob pattern instead of walking the root.
    #[must_use]
    pub fn target_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.target_pattern = Some(pattern.into());
        self
    }

    /// Sets the evaluation plan.
    #[must_use]
    pub fn plan(mut self, plan: EvaluationPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Adds a core rule implementation (resolves unprefixed rule names).
    #[must_use]
    pub fn core_rule(mut self, rule: RuleBox) -> Self {
        self.core_rules.push(rule);
        self
    }

    /// Adds multiple core rule implementations.
    #[must_use]
    pub fn core_rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.core_rules.extend(rules);
        self
    }

    /// Replaces the parser registry (default: the built-in registry).
    #[must_use]
    pub fn parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = Some(parsers);
        self
    }

    /// Sets whether to respect .gitignore files during discovery.
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Sets whether parse failures abort the run (default: warn and skip).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the engine, validating the plan against the registries.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownRule`] or [`EngineError::UnknownParser`]
    /// if the plan references an implementation that does not exist. Both
    /// are surfaced before any file is evaluated.
    pub fn build(self) -> Result<Engine, EngineError> {
        let root = self.root.unwrap_or_else(|| PathBuf::from("."));
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };

        let parsers = self.parsers.unwrap_or_else(ParserRegistry::builtin);
        let plugins = self.plan.plugin_map();

        let core_names: Vec<&str> = self.core_rules.iter().map(|r| r.name()).collect();

        for (index, fragment) in self.plan.fragments().iter().enumerate() {
            if let Some(language) = fragment.language() {
                if !parsers.contains(&language.parser) {
                    return Err(EngineError::UnknownParser {
                        fragment: index,
                        parser: language.parser.clone(),
                    });
                }
            }

            for name in fragment.rules().keys() {
                let resolved = match name.plugin() {
                    // Composition guaranteed the namespace exists; the
                    // plugin must still expose the bare rule.
                    Some(plugin) => plugins
                        .get(plugin)
                        .is_some_and(|p| p.rule(name.bare()).is_some()),
                    None => core_names.contains(&name.bare()),
                };
                if !resolved {
                    return Err(EngineError::UnknownRule {
                        fragment: index,
                        rule: name.as_str().to_string(),
                    });
                }
            }
        }

        Ok(Engine {
            root,
            target_pattern: self.target_pattern,
            plan: self.plan,
            core_rules: self.core_rules,
            plugins,
            parsers,
            respect_gitignore: self.respect_gitignore,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The lint engine. Use [`Engine::builder()`] to construct an instance.
pub struct Engine {
    root: PathBuf,
    target_pattern: Option<String>,
    plan: EvaluationPlan,
    core_rules: Vec<RuleBox>,
    plugins: BTreeMap<String, PluginRef>,
    parsers: ParserRegistry,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("root", &self.root)
            .field("target_pattern", &self.target_pattern)
            .field("plan", &self.plan)
            .field(
                "core_rules",
                &self.core_rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("parsers", &self.parsers)
            .field("respect_gitignore", &self.respect_gitignore)
            .field("fail_on_parse_error", &self.fail_on_parse_error)
            .finish()
    }
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the root directory being linted.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the evaluation plan.
    #[must_use]
    pub fn plan(&self) -> &EvaluationPlan {
        &self.plan
    }

    /// Lints all target files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or on the first parse
    /// failure when `fail_on_parse_error` is set.
    pub fn lint(&self) -> Result<LintResult, EngineError> {
        info!("Starting lint at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} candidate files", files.len());

        self.warn_inert_scopes(&files);

        let mut result = LintResult::new();
        for file in &files {
            let relative = self.relative(file);

            if self.plan.is_ignored(&relative) {
                debug!("Ignoring {}", relative.display());
                continue;
            }

            let Some(effective) = self.plan.effective(&relative) else {
                continue;
            };
            let enabled = effective.enabled_rules();
            if enabled.is_empty() {
                debug!("No rules apply to {}", relative.display());
                continue;
            }

            let content = std::fs::read_to_string(file)?;
            let ctx = FileContext::new(file, &content, &self.root);

            let (parser_name, parser_options) = effective.language.as_ref().map_or_else(
                || (DEFAULT_PARSER, None),
                |l| (l.parser.as_str(), Some(&l.options)),
            );
            // Validated at build time.
            let Some(parser) = self.parsers.get(parser_name) else {
                continue;
            };

            let empty = std::collections::HashMap::new();
            let parsed = match parser.parse(file, &content, parser_options.unwrap_or(&empty)) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Failed to parse {}: {}", e.path.display(), e.message);
                    if self.fail_on_parse_error {
                        return Err(EngineError::Parse {
                            path: e.path,
                            message: e.message,
                        });
                    }
                    continue;
                }
            };

            for (name, entry) in enabled {
                let Some(rule) = self.resolve_rule(name.plugin(), name.bare()) else {
                    continue;
                };
                let mut violations = rule.check(&ctx, &parsed, &entry.options);
                // The merged entry's severity wins over whatever the rule set.
                for v in &mut violations {
                    v.severity = entry.severity;
                    v.rule = name.as_str().to_string();
                }
                result.violations.extend(violations);
            }

            result.files_checked += 1;
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Lint complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Resolves a rule implementation from the core set or a plugin.
    fn resolve_rule(&self, plugin: Option<&str>, bare: &str) -> Option<&dyn Rule> {
        match plugin {
            Some(plugin) => self.plugins.get(plugin)?.rule(bare),
            None => self
                .core_rules
                .iter()
                .find(|r| r.name() == bare)
                .map(AsRef::as_ref),
        }
    }

    /// Logs a non-fatal warning for every fragment whose `files` patterns
    /// match none of the discovered files. Such fragments are legal and
    /// inert.
    fn warn_inert_scopes(&self, files: &[PathBuf]) {
        for (index, fragment) in self.plan.fragments().iter().enumerate() {
            if fragment.files().is_empty() {
                continue;
            }
            let hit = files.iter().any(|file| {
                let relative = self.relative(file);
                fragment.files().iter().any(|p| p.matches(&relative))
            });
            if !hit {
                let patterns: Vec<&str> =
                    fragment.files().iter().map(|p| p.as_str()).collect();
                warn!(
                    "fragment[{index}]: files patterns {patterns:?} match no files"
                );
            }
        }
    }

    /// Returns the path relative to the lint root.
    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }

    /// Discovers candidate files: either by expanding the explicit target
    /// pattern, or by walking the root directory.
    fn discover_files(&self) -> Result<Vec<PathBuf>, EngineError> {
        let mut files = Vec::new();

        if let Some(pattern) = &self.target_pattern {
            for entry in glob::glob(pattern)? {
                let path = entry.map_err(|e| EngineError::Io(e.into_error()))?;
                if path.is_file() {
                    files.push(path);
                }
            }
        } else {
            let walker = ignore::WalkBuilder::new(&self.root)
                .git_ignore(self.respect_gitignore)
                .git_global(self.respect_gitignore)
                .git_exclude(self.respect_gitignore)
                .build();
            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_some_and(|t| t.is_file()) {
                    files.push(entry.into_path());
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{Fragment, LanguageOptions, RuleEntry};
    use crate::plan::compose;
    use crate::types::Severity;

    #[test]
    fn builder_defaults() {
        let engine = Engine::builder().root(".").build().expect("build");
        assert!(engine.root().is_absolute());
        assert!(engine.plan().is_empty());
    }

    #[test]
    fn build_rejects_unknown_parser() {
        let fragment = Fragment::new().with_language(LanguageOptions::new("cobol"));
        let plan = compose(vec![fragment.into()]).expect("compose");
        let err = Engine::builder().root(".").plan(plan).build().unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnknownParser { fragment: 0, .. }
        ));
    }

    #[test]
    fn build_rejects_unknown_core_rule() {
        let fragment = Fragment::new()
            .with_rule("no-such-rule", RuleEntry::new(Severity::Error))
            .expect("rule name");
        let plan = compose(vec![fragment.into()]).expect("compose");
        let err = Engine::builder().root(".").plan(plan).build().unwrap_err();
        assert!(matches!(err, EngineError::UnknownRule { fragment: 0, .. }));
    }
}
