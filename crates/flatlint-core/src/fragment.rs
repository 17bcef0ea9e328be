//! The configuration fragment data model.
//!
//! A [`Fragment`] is one unit of configuration: an optional file scope, an
//! optional ignore set, an optional parser binding, a plugin map, and a rule
//! map. Fragments are immutable after assembly into an
//! [`EvaluationPlan`](crate::plan::EvaluationPlan).
//!
//! All invariants are enforced at construction time via validated newtypes.

use crate::rule::PluginRef;
use crate::types::Severity;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// Fragment-level validation errors.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// A glob pattern was empty.
    #[error("glob pattern must not be empty")]
    EmptyGlobPattern,

    /// A glob pattern failed to compile.
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidGlobPattern {
        /// The offending pattern.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },

    /// A rule name was empty or malformed.
    #[error("invalid rule name `{name}`, expected `rule-name` or `plugin/rule-name`")]
    InvalidRuleName {
        /// The offending name.
        name: String,
    },
}

/// A validated glob pattern for file path matching.
///
/// The glob is compiled once at construction and reused for all match calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobPattern {
    raw: String,
    compiled: glob::Pattern,
}

impl GlobPattern {
    /// Creates a new glob pattern.
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is empty or has invalid glob syntax.
    pub fn new(pattern: &str) -> Result<Self, FragmentError> {
        if pattern.is_empty() {
            return Err(FragmentError::EmptyGlobPattern);
        }
        let compiled =
            glob::Pattern::new(pattern).map_err(|e| FragmentError::InvalidGlobPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
        })
    }

    /// Tests whether a relative file path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        if self.compiled.matches(&path_str) {
            return true;
        }
        // For `dir/**` patterns, also check prefix + boundary to cover
        // edge cases where the glob crate does not match bare `dir` contents.
        if let Some(prefix) = self.raw.strip_suffix("/**") {
            let normalized = prefix.trim_end_matches('/');
            if path_str.starts_with(normalized)
                && path_str
                    .as_bytes()
                    .get(normalized.len())
                    .is_some_and(|&b| b == b'/')
            {
                return true;
            }
        }
        false
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// A validated rule name: `rule-name` for core rules, `plugin/rule-name`
/// for plugin rules.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new rule name.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty, has more than one `/`, or
    /// contains characters outside `[a-z0-9-]` in any segment.
    pub fn new(name: &str) -> Result<Self, FragmentError> {
        let invalid = || FragmentError::InvalidRuleName {
            name: name.to_string(),
        };
        let mut segments = name.split('/');
        let (first, second, rest) = (segments.next(), segments.next(), segments.next());
        if rest.is_some() {
            return Err(invalid());
        }
        for segment in [first, second].into_iter().flatten() {
            if segment.is_empty()
                || !segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            {
                return Err(invalid());
            }
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the plugin namespace, if this is a plugin rule.
    #[must_use]
    pub fn plugin(&self) -> Option<&str> {
        self.0.split_once('/').map(|(plugin, _)| plugin)
    }

    /// Returns the bare rule name without the plugin namespace.
    #[must_use]
    pub fn bare(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(_, rule)| rule)
    }

    /// Returns the full name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rule-specific options as key-value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleOptions(HashMap<String, toml::Value>);

impl RuleOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an option set from raw key-value pairs.
    #[must_use]
    pub fn from_map(map: HashMap<String, toml::Value>) -> Self {
        Self(map)
    }

    /// Returns true if no options are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.0
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A rule's severity and options as declared by one fragment.
///
/// Merging is whole-entry: a later fragment's entry for the same rule name
/// replaces this one entirely, options included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleEntry {
    /// Severity for the rule. `Off` disables it.
    pub severity: Severity,
    /// Rule-specific options.
    pub options: RuleOptions,
}

impl RuleEntry {
    /// Creates an entry with the given severity and no options.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: RuleOptions::new(),
        }
    }

    /// Attaches options to this entry.
    #[must_use]
    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }
}

/// Parser binding for a fragment: parser name plus parser-defined options
/// (edition, module mode, and the like).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageOptions {
    /// Name of the parser in the registry (e.g., "rust", "text").
    pub parser: String,
    /// Parser-defined options, passed through opaquely.
    pub options: HashMap<String, toml::Value>,
}

impl LanguageOptions {
    /// Creates a binding for the named parser with no options.
    #[must_use]
    pub fn new(parser: impl Into<String>) -> Self {
        Self {
            parser: parser.into(),
            options: HashMap::new(),
        }
    }

    /// Sets a parser option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: toml::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// One unit of configuration.
///
/// Constructed with the builder-style `with_*` methods and immutable once
/// assembled into a plan.
#[derive(Clone, Default)]
pub struct Fragment {
    files: Vec<GlobPattern>,
    ignores: Vec<GlobPattern>,
    language: Option<LanguageOptions>,
    plugins: BTreeMap<String, PluginRef>,
    rules: BTreeMap<RuleName, RuleEntry>,
}

impl Fragment {
    /// Creates an empty fragment (applies to all files, declares nothing).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `files` scope patterns.
    ///
    /// # Errors
    ///
    /// Returns error if any pattern is empty or malformed.
    pub fn with_files<I, S>(mut self, patterns: I) -> Result<Self, FragmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.files = patterns
            .into_iter()
            .map(|p| GlobPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Sets the `ignores` patterns.
    ///
    /// # Errors
    ///
    /// Returns error if any pattern is empty or malformed.
    pub fn with_ignores<I, S>(mut self, patterns: I) -> Result<Self, FragmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignores = patterns
            .into_iter()
            .map(|p| GlobPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Sets the parser binding.
    #[must_use]
    pub fn with_language(mut self, language: LanguageOptions) -> Self {
        self.language = Some(language);
        self
    }

    /// Declares a plugin under the given namespace.
    #[must_use]
    pub fn with_plugin(mut self, name: impl Into<String>, plugin: PluginRef) -> Self {
        self.plugins.insert(name.into(), plugin);
        self
    }

    /// Adds a rule entry.
    ///
    /// # Errors
    ///
    /// Returns error if the rule name is malformed.
    pub fn with_rule(mut self, name: &str, entry: RuleEntry) -> Result<Self, FragmentError> {
        self.rules.insert(RuleName::new(name)?, entry);
        Ok(self)
    }

    /// Returns the `files` scope patterns.
    #[must_use]
    pub fn files(&self) -> &[GlobPattern] {
        &self.files
    }

    /// Returns the `ignores` patterns.
    #[must_use]
    pub fn ignores(&self) -> &[GlobPattern] {
        &self.ignores
    }

    /// Returns the parser binding, if any.
    #[must_use]
    pub fn language(&self) -> Option<&LanguageOptions> {
        self.language.as_ref()
    }

    /// Returns the declared plugins.
    #[must_use]
    pub fn plugins(&self) -> &BTreeMap<String, PluginRef> {
        &self.plugins
    }

    /// Returns the rule entries.
    #[must_use]
    pub fn rules(&self) -> &BTreeMap<RuleName, RuleEntry> {
        &self.rules
    }

    /// Returns true if `ignores` is the only key this fragment sets.
    ///
    /// Such fragments contribute global ignores regardless of their
    /// position in the plan.
    #[must_use]
    pub fn is_ignores_only(&self) -> bool {
        !self.ignores.is_empty()
            && self.files.is_empty()
            && self.language.is_none()
            && self.plugins.is_empty()
            && self.rules.is_empty()
    }

    /// Tests whether this fragment's scope includes a relative file path.
    ///
    /// A fragment with no `files` patterns applies to every file; its own
    /// `ignores` only narrow that scope. Ignores-only fragments never apply
    /// directly (their ignores are global, handled by the plan).
    #[must_use]
    pub fn applies_to(&self, path: &Path) -> bool {
        if self.is_ignores_only() {
            return false;
        }
        if self.ignores.iter().any(|p| p.matches(path)) {
            return false;
        }
        self.files.is_empty() || self.files.iter().any(|p| p.matches(path))
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("files", &self.files)
            .field("ignores", &self.ignores)
            .field("language", &self.language)
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .field("rules", &self.rules)
            .finish()
    }
}
