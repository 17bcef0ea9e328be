//! DTO → fragment conversion with validation.
//!
//! Each error carries the fragment index and the offending key, so a bad
//! config aborts the run with a pointer to the exact declaration.

use crate::fragment::{Fragment, FragmentError, LanguageOptions, RuleEntry, RuleOptions};
use crate::plan::FragmentSource;
use crate::rule::PluginRegistry;
use crate::types::Severity;
use std::collections::HashMap;

use super::dto::{ConfigDto, FragmentDto};
use super::LoadedConfig;

/// Errors during DTO → fragment conversion.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "fragment[0].files").
        context: String,
        /// The underlying fragment error.
        source: FragmentError,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: off, warn, error")]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A rule entry was neither a severity string nor a table.
    #[error("{context}: rule entry must be a severity string or a table")]
    MalformedRuleEntry {
        /// Where the error occurred.
        context: String,
    },

    /// A rule or preset references a plugin missing from the registry.
    #[error("{context}: unknown plugin `{plugin}`")]
    UnknownPlugin {
        /// Where the error occurred.
        context: String,
        /// The unresolvable plugin namespace.
        plugin: String,
    },

    /// A plugin does not ship the referenced preset.
    #[error("{context}: plugin `{plugin}` has no preset `{preset}`")]
    UnknownPreset {
        /// Where the error occurred.
        context: String,
        /// The plugin namespace.
        plugin: String,
        /// The missing preset name.
        preset: String,
    },

    /// A preset reference was not in `plugin/name` form.
    #[error("{context}: preset must be `plugin/name`, got `{value}`")]
    InvalidPresetRef {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A fragment mixed `preset` with other keys.
    #[error("{context}: `preset` must be the fragment's only key")]
    PresetNotAlone {
        /// Where the error occurred.
        context: String,
    },
}

/// Converts a [`ConfigDto`] into a [`LoadedConfig`].
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(dto: ConfigDto, registry: &PluginRegistry) -> Result<LoadedConfig, LoadError> {
    let fail_on = match dto.fail_on.as_deref() {
        None => Severity::Error,
        Some(value) => parse_severity(value, "fail_on")?,
    };

    let sources = dto
        .fragments
        .into_iter()
        .enumerate()
        .map(|(i, f)| convert_fragment(f, i, registry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LoadedConfig {
        fail_on,
        respect_gitignore: dto.respect_gitignore.unwrap_or(true),
        sources,
    })
}

fn convert_fragment(
    dto: FragmentDto,
    index: usize,
    registry: &PluginRegistry,
) -> Result<FragmentSource, LoadError> {
    let ctx = format!("fragment[{index}]");

    if let Some(preset) = dto.preset {
        if !dto.files.is_empty()
            || !dto.ignores.is_empty()
            || dto.language.is_some()
            || !dto.rules.is_empty()
        {
            return Err(LoadError::PresetNotAlone { context: ctx });
        }
        return resolve_preset(&preset, &ctx, registry);
    }

    let mut fragment = Fragment::new()
        .with_files(&dto.files)
        .map_err(|e| LoadError::Validation {
            context: format!("{ctx}.files"),
            source: e,
        })?
        .with_ignores(&dto.ignores)
        .map_err(|e| LoadError::Validation {
            context: format!("{ctx}.ignores"),
            source: e,
        })?;

    if let Some(language) = dto.language {
        fragment = fragment.with_language(LanguageOptions {
            parser: language.parser,
            options: language.options,
        });
    }

    for (name, value) in dto.rules {
        let rule_ctx = format!("{ctx}.rules.{name}");

        // Attach the implementation for namespaced rules so the composer's
        // at-or-before check holds for config-authored fragments.
        if let Some((plugin_name, _)) = name.split_once('/') {
            let plugin = registry
                .get(plugin_name)
                .ok_or_else(|| LoadError::UnknownPlugin {
                    context: rule_ctx.clone(),
                    plugin: plugin_name.to_string(),
                })?;
            fragment = fragment.with_plugin(plugin_name, plugin.clone());
        }

        let entry = convert_rule_entry(&value, &rule_ctx)?;
        fragment = fragment
            .with_rule(&name, entry)
            .map_err(|e| LoadError::Validation {
                context: rule_ctx,
                source: e,
            })?;
    }

    Ok(FragmentSource::Single(fragment))
}

fn resolve_preset(
    value: &str,
    ctx: &str,
    registry: &PluginRegistry,
) -> Result<FragmentSource, LoadError> {
    let Some((plugin_name, preset_name)) = value.split_once('/') else {
        return Err(LoadError::InvalidPresetRef {
            context: ctx.to_string(),
            value: value.to_string(),
        });
    };

    let plugin = registry
        .get(plugin_name)
        .ok_or_else(|| LoadError::UnknownPlugin {
            context: ctx.to_string(),
            plugin: plugin_name.to_string(),
        })?;

    let fragments = plugin
        .preset(preset_name)
        .ok_or_else(|| LoadError::UnknownPreset {
            context: ctx.to_string(),
            plugin: plugin_name.to_string(),
            preset: preset_name.to_string(),
        })?;

    Ok(FragmentSource::Array(fragments))
}

fn convert_rule_entry(value: &toml::Value, ctx: &str) -> Result<RuleEntry, LoadError> {
    match value {
        toml::Value::String(severity) => {
            Ok(RuleEntry::new(parse_severity(severity, ctx)?))
        }
        toml::Value::Table(table) => {
            let severity = match table.get("severity") {
                None => Severity::Error,
                Some(toml::Value::String(s)) => parse_severity(s, ctx)?,
                Some(_) => {
                    return Err(LoadError::MalformedRuleEntry {
                        context: ctx.to_string(),
                    })
                }
            };

            let options: HashMap<String, toml::Value> = table
                .iter()
                .filter(|(key, _)| key.as_str() != "severity")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();

            Ok(RuleEntry::new(severity).with_options(RuleOptions::from_map(options)))
        }
        _ => Err(LoadError::MalformedRuleEntry {
            context: ctx.to_string(),
        }),
    }
}

fn parse_severity(value: &str, context: &str) -> Result<Severity, LoadError> {
    match value {
        "off" => Ok(Severity::Off),
        "warn" => Ok(Severity::Warn),
        "error" => Ok(Severity::Error),
        _ => Err(LoadError::UnknownSeverity {
            context: context.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::RuleName;
    use crate::rule::{Rule, RulePlugin};
    use std::sync::Arc;

    struct StubPlugin;

    impl RulePlugin for StubPlugin {
        fn name(&self) -> &'static str {
            "stub"
        }
        fn rule_names(&self) -> Vec<&'static str> {
            vec!["noop"]
        }
        fn rule(&self, _name: &str) -> Option<&dyn Rule> {
            None
        }
        fn preset(&self, name: &str) -> Option<Vec<Fragment>> {
            (name == "recommended").then(|| {
                vec![
                    Fragment::new(),
                    Fragment::new(),
                    Fragment::new(),
                ]
            })
        }
    }

    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(Arc::new(StubPlugin));
        registry
    }

    fn parse_and_load(toml_str: &str) -> Result<LoadedConfig, LoadError> {
        let dto: ConfigDto = toml::from_str(toml_str).unwrap();
        load(dto, &registry())
    }

    // -- Happy path --

    #[test]
    fn load_empty_config() {
        let config = parse_and_load("").unwrap();
        assert!(config.sources.is_empty());
        assert_eq!(config.fail_on, Severity::Error);
        assert!(config.respect_gitignore);
    }

    #[test]
    fn load_local_fragment_with_entries() {
        let config = parse_and_load(
            r#"
[[fragment]]
files = ["src/**/*.rs"]
language = { parser = "rust" }

[fragment.rules]
"max-line-length" = { severity = "warn", limit = 100 }
"stub/noop" = "error"
"#,
        )
        .unwrap();

        assert_eq!(config.sources.len(), 1);
        let FragmentSource::Single(fragment) = &config.sources[0] else {
            panic!("expected single fragment");
        };
        assert_eq!(fragment.files().len(), 1);
        assert_eq!(fragment.language().unwrap().parser, "rust");

        let name = RuleName::new("max-line-length").unwrap();
        let entry = &fragment.rules()[&name];
        assert_eq!(entry.severity, Severity::Warn);
        assert_eq!(entry.options.get_int("limit", 80), 100);

        // Referencing stub/noop attached the plugin to this fragment.
        assert!(fragment.plugins().contains_key("stub"));
    }

    #[test]
    fn load_preset_splices_array() {
        let config = parse_and_load(
            r#"
[[fragment]]
preset = "stub/recommended"
"#,
        )
        .unwrap();
        assert!(matches!(
            &config.sources[0],
            FragmentSource::Array(fragments) if fragments.len() == 3
        ));
    }

    #[test]
    fn load_fail_on_override() {
        let config = parse_and_load("fail_on = \"warn\"").unwrap();
        assert_eq!(config.fail_on, Severity::Warn);
    }

    // -- Error cases --

    #[test]
    fn load_rejects_unknown_severity() {
        let err = parse_and_load(
            r#"
[[fragment]]
[fragment.rules]
"no-tabs" = "critical"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownSeverity { .. }));
    }

    #[test]
    fn load_rejects_malformed_glob() {
        let err = parse_and_load(
            r#"
[[fragment]]
files = ["src/[bad"]
"#,
        )
        .unwrap_err();
        match err {
            LoadError::Validation { context, .. } => {
                assert_eq!(context, "fragment[0].files");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_rejects_unknown_plugin() {
        let err = parse_and_load(
            r#"
[[fragment]]
[fragment.rules]
"ghost/no-thing" = "error"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownPlugin { .. }));
    }

    #[test]
    fn load_rejects_unknown_preset() {
        let err = parse_and_load(
            r#"
[[fragment]]
preset = "stub/strict"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::UnknownPreset { .. }));
    }

    #[test]
    fn load_rejects_preset_with_other_keys() {
        let err = parse_and_load(
            r#"
[[fragment]]
preset = "stub/recommended"
files = ["src/**"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::PresetNotAlone { .. }));
    }

    #[test]
    fn load_rejects_bare_preset_name() {
        let err = parse_and_load(
            r#"
[[fragment]]
preset = "recommended"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidPresetRef { .. }));
    }

    #[test]
    fn load_rejects_non_string_rule_entry() {
        let err = parse_and_load(
            r#"
[[fragment]]
[fragment.rules]
"no-tabs" = 2
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::MalformedRuleEntry { .. }));
    }
}
