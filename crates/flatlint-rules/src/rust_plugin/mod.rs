//! The built-in `rust` plugin: `syn`-AST rules for Rust sources.
//!
//! Declared under the `rust` namespace, so fragments reference its rules
//! as `rust/no-unwrap`, `rust/no-dbg`, and `rust/no-wildcard-use`. The
//! plugin also ships a `recommended` preset: a pre-built fragment array
//! that ignores build output, binds the `rust` parser for `**/*.rs`, and
//! enables all three rules.

mod no_dbg;
mod no_unwrap;
mod no_wildcard_use;

pub use no_dbg::NoDbg;
pub use no_unwrap::NoUnwrap;
pub use no_wildcard_use::NoWildcardUse;

use flatlint_core::{
    Fragment, FragmentError, LanguageOptions, PluginRef, Rule, RuleEntry, RulePlugin, Severity,
};
use std::sync::Arc;

/// Plugin namespace.
pub const PLUGIN_NAME: &str = "rust";

/// The `rust` plugin implementation.
#[derive(Default)]
pub struct RustPlugin {
    no_unwrap: NoUnwrap,
    no_dbg: NoDbg,
    no_wildcard_use: NoWildcardUse,
}

impl RustPlugin {
    /// Creates the plugin with its full rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle, ready to declare in a fragment.
    #[must_use]
    pub fn shared() -> PluginRef {
        Arc::new(Self::new())
    }
}

impl RulePlugin for RustPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn rule_names(&self) -> Vec<&'static str> {
        vec![
            self.no_unwrap.name(),
            self.no_dbg.name(),
            self.no_wildcard_use.name(),
        ]
    }

    fn rule(&self, name: &str) -> Option<&dyn Rule> {
        match name {
            no_unwrap::NAME => Some(&self.no_unwrap),
            no_dbg::NAME => Some(&self.no_dbg),
            no_wildcard_use::NAME => Some(&self.no_wildcard_use),
            _ => None,
        }
    }

    fn preset(&self, name: &str) -> Option<Vec<Fragment>> {
        match name {
            "recommended" => recommended().ok(),
            _ => None,
        }
    }
}

/// Builds the `recommended` fragment array.
///
/// Static patterns; the error arm is unreachable in practice but keeps
/// the builders honest.
fn recommended() -> Result<Vec<Fragment>, FragmentError> {
    let ignores = Fragment::new().with_ignores(["target/**", "vendor/**"])?;

    let binding = Fragment::new()
        .with_files(["**/*.rs"])?
        .with_language(LanguageOptions::new("rust"))
        .with_plugin(PLUGIN_NAME, RustPlugin::shared());

    let rules = Fragment::new()
        .with_files(["**/*.rs"])?
        .with_rule("rust/no-unwrap", RuleEntry::new(Severity::Error))?
        .with_rule("rust/no-dbg", RuleEntry::new(Severity::Warn))?
        .with_rule("rust/no-wildcard-use", RuleEntry::new(Severity::Warn))?;

    Ok(vec![ignores, binding, rules])
}

/// Checks if attributes contain `#[cfg(test)]`.
pub(crate) fn has_cfg_test(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && matches!(&attr.meta, syn::Meta::List(list) if list.tokens.to_string().contains("test"))
    })
}

/// Checks if attributes mark a test function (`#[test]`, `#[tokio::test]`).
pub(crate) fn has_test_attr(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|s| s.ident == "test")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_exposes_all_rules() {
        let plugin = RustPlugin::new();
        assert_eq!(plugin.name(), "rust");
        assert_eq!(plugin.rule_names().len(), 3);
        assert!(plugin.rule("no-unwrap").is_some());
        assert!(plugin.rule("no-dbg").is_some());
        assert!(plugin.rule("no-wildcard-use").is_some());
        assert!(plugin.rule("no-such").is_none());
    }

    #[test]
    fn recommended_preset_is_prebuilt_fragment_array() {
        let plugin = RustPlugin::new();
        let fragments = plugin.preset("recommended").expect("preset exists");
        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].is_ignores_only());
        assert_eq!(fragments[1].language().unwrap().parser, "rust");
        assert_eq!(fragments[2].rules().len(), 3);
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(RustPlugin::new().preset("strict").is_none());
    }

    #[test]
    fn cfg_test_detection() {
        let attrs: Vec<syn::Attribute> = syn::parse_quote!(#[cfg(test)]);
        assert!(has_cfg_test(&attrs));

        let attrs: Vec<syn::Attribute> = syn::parse_quote!(#[cfg(feature = "foo")]);
        assert!(!has_cfg_test(&attrs));
    }

    #[test]
    fn test_attr_detection() {
        let attrs: Vec<syn::Attribute> = syn::parse_quote!(#[test]);
        assert!(has_test_attr(&attrs));

        let attrs: Vec<syn::Attribute> = syn::parse_quote!(#[inline]);
        assert!(!has_test_attr(&attrs));
    }
}
