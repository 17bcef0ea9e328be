//! Rule and plugin traits.

use crate::context::FileContext;
use crate::fragment::{Fragment, RuleOptions};
use crate::parser::ParsedSource;
use crate::types::Violation;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named check evaluated against a file's parsed source.
///
/// Implementations receive the parsed source produced by the fragment's
/// bound parser. A rule that only understands one source form returns no
/// violations for the others.
///
/// # Example
///
/// ```ignore
/// use flatlint_core::{FileContext, ParsedSource, Rule, RuleOptions, Violation};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///
///     fn check(
///         &self,
///         ctx: &FileContext,
///         source: &ParsedSource,
///         options: &RuleOptions,
///     ) -> Vec<Violation> {
///         // scan ctx.content line by line
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule without any plugin
    /// namespace (e.g., "no-unwrap").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single file and returns any violations found.
    ///
    /// The severity on returned violations is provisional; the engine
    /// overwrites it with the merged severity from the evaluation plan.
    fn check(
        &self,
        ctx: &FileContext,
        source: &ParsedSource,
        options: &RuleOptions,
    ) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A named capability bundle exposing rule implementations and pre-built
/// fragment arrays.
///
/// Plugins are declared in a fragment's `plugins` map and referenced from
/// `rules` entries via `plugin-name/rule-name` keys. A plugin may also
/// ship presets: ready-made fragment sequences spliced into a plan in
/// place (e.g., "recommended").
pub trait RulePlugin: Send + Sync {
    /// Returns the plugin's canonical namespace (e.g., "rust").
    fn name(&self) -> &'static str;

    /// Returns the names of all rules this plugin exposes.
    fn rule_names(&self) -> Vec<&'static str>;

    /// Looks up a rule implementation by bare name (no namespace).
    fn rule(&self, name: &str) -> Option<&dyn Rule>;

    /// Returns a pre-built fragment array for the named preset, if the
    /// plugin ships one.
    fn preset(&self, name: &str) -> Option<Vec<Fragment>> {
        let _ = name;
        None
    }
}

/// Shared handle to a plugin implementation.
pub type PluginRef = Arc<dyn RulePlugin>;

/// Registry of plugins available to the configuration loader.
///
/// The TOML pipeline resolves `preset = "plugin/name"` splices and
/// namespaced rule references against this registry and attaches the
/// matching [`PluginRef`] to the fragment that references it.
#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, PluginRef>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under its canonical name.
    pub fn register(&mut self, plugin: PluginRef) {
        self.plugins.insert(plugin.name().to_string(), plugin);
    }

    /// Looks up a plugin by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PluginRef> {
        self.plugins.get(name)
    }

    /// Returns the registered plugins in name order.
    #[must_use]
    pub fn plugins(&self) -> &BTreeMap<String, PluginRef> {
        &self.plugins
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};
    use std::path::PathBuf;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(
            &self,
            ctx: &FileContext,
            _source: &ParsedSource,
            _options: &RuleOptions,
        ) -> Vec<Violation> {
            vec![Violation::new(
                self.name(),
                Severity::Error,
                Location::new(ctx.relative_path.clone(), 1, 1),
                "Test violation",
            )]
        }
    }

    struct TestPlugin {
        rule: TestRule,
    }

    impl RulePlugin for TestPlugin {
        fn name(&self) -> &'static str {
            "testing"
        }
        fn rule_names(&self) -> Vec<&'static str> {
            vec!["test-rule"]
        }
        fn rule(&self, name: &str) -> Option<&dyn Rule> {
            (name == "test-rule").then_some(&self.rule as &dyn Rule)
        }
    }

    #[test]
    fn registry_lookup_by_canonical_name() {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(TestPlugin { rule: TestRule }));
        assert!(registry.get("testing").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn plugin_rule_lookup() {
        let plugin = TestPlugin { rule: TestRule };
        assert!(plugin.rule("test-rule").is_some());
        assert!(plugin.rule("other").is_none());
        assert!(plugin.preset("recommended").is_none());
    }

    #[test]
    fn rule_check_produces_violation() {
        let rule = TestRule;
        let content = "fn main() {}\n";
        let ctx = FileContext::new(
            std::path::Path::new("src/lib.rs"),
            content,
            std::path::Path::new("."),
        );
        let violations = rule.check(&ctx, &ParsedSource::Text(vec![]), &RuleOptions::new());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.file, PathBuf::from("src/lib.rs"));
    }
}
