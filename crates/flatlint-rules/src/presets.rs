//! Ready-made registries, core rule sets, and fragment sequences.

use crate::rust_plugin::RustPlugin;
use crate::{MaxFileLines, MaxLineLength, NoTabs, NoTrailingWhitespace};
use flatlint_core::{
    Fragment, FragmentError, FragmentSource, PluginRegistry, RuleBox, RuleEntry, Severity,
};

/// Returns every built-in core (unprefixed) rule implementation.
#[must_use]
pub fn core_rules() -> Vec<RuleBox> {
    vec![
        Box::new(MaxLineLength),
        Box::new(MaxFileLines),
        Box::new(NoTabs),
        Box::new(NoTrailingWhitespace),
    ]
}

/// Returns the registry of built-in plugins.
#[must_use]
pub fn default_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry.register(RustPlugin::shared());
    registry
}

/// Returns the default fragment sequence used when no configuration file
/// is present: the `rust/recommended` preset followed by a base fragment
/// of text-level hygiene rules.
///
/// # Errors
///
/// Returns an error if a static pattern fails to build; this indicates a
/// bug in the preset itself.
pub fn recommended_sources() -> Result<Vec<FragmentSource>, FragmentError> {
    let rust = RustPlugin::shared()
        .preset("recommended")
        .unwrap_or_default();

    let base = Fragment::new()
        .with_rule("no-trailing-whitespace", RuleEntry::new(Severity::Warn))?
        .with_rule("max-file-lines", RuleEntry::new(Severity::Warn))?;

    Ok(vec![
        FragmentSource::Array(rust),
        FragmentSource::Single(base),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlint_core::compose;

    #[test]
    fn core_rules_have_unique_names() {
        let rules = core_rules();
        let mut names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn default_registry_has_rust_plugin() {
        assert!(default_registry().get("rust").is_some());
    }

    #[test]
    fn recommended_sources_compose_cleanly() {
        let sources = recommended_sources().expect("static presets build");
        let plan = compose(sources).expect("recommended plan composes");
        // Three rust preset fragments plus the base hygiene fragment.
        assert_eq!(plan.len(), 4);
    }
}
