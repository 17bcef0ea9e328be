//! The Rule-Set Composer and the evaluation plan it produces.
//!
//! [`compose`] turns an ordered sequence of [`FragmentSource`]s — single
//! fragments interleaved with pre-built plugin fragment arrays — into one
//! flat, ordered [`EvaluationPlan`]. Flattening is single-level: a source
//! array is spliced in place with its internal order kept, and the type
//! makes deeper nesting unrepresentable.
//!
//! The composer performs no reordering, deduplication, or rule-conflict
//! resolution. Last-wins merging per rule name happens when the engine
//! walks the plan against a specific file.

use crate::fragment::{Fragment, LanguageOptions, RuleEntry, RuleName};
use crate::rule::PluginRef;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Errors from composing a fragment sequence.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// A namespaced rule references a plugin that no fragment at or before
    /// it declares.
    #[error(
        "fragment[{fragment}]: rule `{rule}` references plugin `{plugin}`, \
         which is not declared at or before this fragment"
    )]
    UnknownPlugin {
        /// Index of the offending fragment in the flattened sequence.
        fragment: usize,
        /// The offending rule key.
        rule: String,
        /// The plugin namespace that failed to resolve.
        plugin: String,
    },
}

/// One element of the composer's input: either a locally authored fragment
/// or a pre-built fragment array contributed by a plugin.
#[derive(Debug, Clone)]
pub enum FragmentSource {
    /// A single fragment.
    Single(Fragment),
    /// A pre-built fragment array, spliced in place.
    Array(Vec<Fragment>),
}

impl From<Fragment> for FragmentSource {
    fn from(fragment: Fragment) -> Self {
        Self::Single(fragment)
    }
}

impl From<Vec<Fragment>> for FragmentSource {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self::Array(fragments)
    }
}

/// Composes an ordered fragment sequence into a flat evaluation plan.
///
/// The output order is a stable single-level flattening of the input.
/// Composition is pure: no I/O, no global state, no mutation of inputs.
///
/// # Errors
///
/// Returns [`ComposeError::UnknownPlugin`] if a namespaced rule name
/// references a plugin not declared in any `plugins` map at or before the
/// fragment that uses it. The error carries the flattened fragment index
/// and the offending rule key; the caller is expected to abort before any
/// file is evaluated.
pub fn compose(sources: Vec<FragmentSource>) -> Result<EvaluationPlan, ComposeError> {
    let mut fragments = Vec::new();
    for source in sources {
        match source {
            FragmentSource::Single(fragment) => fragments.push(fragment),
            FragmentSource::Array(array) => fragments.extend(array),
        }
    }

    let mut declared: BTreeSet<String> = BTreeSet::new();
    for (index, fragment) in fragments.iter().enumerate() {
        // Plugins declared by this fragment are visible to its own rules.
        declared.extend(fragment.plugins().keys().cloned());

        for name in fragment.rules().keys() {
            if let Some(plugin) = name.plugin() {
                if !declared.contains(plugin) {
                    return Err(ComposeError::UnknownPlugin {
                        fragment: index,
                        rule: name.as_str().to_string(),
                        plugin: plugin.to_string(),
                    });
                }
            }
        }
    }

    Ok(EvaluationPlan { fragments })
}

/// The effective configuration for one file: the last-wins merge of every
/// applicable fragment.
#[derive(Debug, Clone, Default)]
pub struct EffectiveConfig {
    /// Merged rule entries, keyed by full rule name. Entries with severity
    /// `Off` are retained here; the engine skips them.
    pub rules: BTreeMap<RuleName, RuleEntry>,
    /// The bound parser from the last applicable fragment that sets one.
    pub language: Option<LanguageOptions>,
}

impl EffectiveConfig {
    /// Returns the rule entries with severity above `Off`, in name order.
    #[must_use]
    pub fn enabled_rules(&self) -> Vec<(&RuleName, &RuleEntry)> {
        self.rules
            .iter()
            .filter(|(_, entry)| entry.severity > crate::types::Severity::Off)
            .collect()
    }
}

/// The fully flattened, ordered fragment sequence handed to the engine.
///
/// Immutable after composition.
#[derive(Debug, Clone, Default)]
pub struct EvaluationPlan {
    fragments: Vec<Fragment>,
}

impl EvaluationPlan {
    /// Returns the fragments in plan order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Returns the number of fragments in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if the plan has no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Tests whether a relative path is globally ignored.
    ///
    /// Only ignores-only fragments contribute here; they apply regardless
    /// of their position in the plan.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.fragments
            .iter()
            .filter(|f| f.is_ignores_only())
            .any(|f| f.ignores().iter().any(|p| p.matches(path)))
    }

    /// Merges the applicable fragments for a relative path, in order.
    ///
    /// Returns `None` when the path is globally ignored. Later fragments'
    /// entries replace earlier entries for the same rule name; the last
    /// applicable `language` binding wins.
    #[must_use]
    pub fn effective(&self, path: &Path) -> Option<EffectiveConfig> {
        if self.is_ignored(path) {
            return None;
        }

        let mut effective = EffectiveConfig::default();
        for fragment in self.fragments.iter().filter(|f| f.applies_to(path)) {
            for (name, entry) in fragment.rules() {
                effective.rules.insert(name.clone(), entry.clone());
            }
            if let Some(language) = fragment.language() {
                effective.language = Some(language.clone());
            }
        }
        Some(effective)
    }

    /// Collects every plugin declared anywhere in the plan, keyed by
    /// namespace. Composition already guaranteed that references resolve
    /// in order, so a flat map is sufficient for implementation lookup.
    #[must_use]
    pub fn plugin_map(&self) -> BTreeMap<String, PluginRef> {
        let mut map = BTreeMap::new();
        for fragment in &self.fragments {
            for (name, plugin) in fragment.plugins() {
                map.insert(name.clone(), plugin.clone());
            }
        }
        map
    }
}
