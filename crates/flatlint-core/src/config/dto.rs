//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization. They are converted
//! to validated fragments via the loader.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Raw TOML representation of a flatlint configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigDto {
    /// Severity threshold for a failing exit status (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Whether discovery respects .gitignore files (default: true).
    #[serde(default)]
    pub respect_gitignore: Option<bool>,

    /// Ordered fragment sequence.
    #[serde(rename = "fragment", default)]
    pub fragments: Vec<FragmentDto>,
}

/// TOML representation of one fragment.
///
/// Either `preset` is set (and nothing else), splicing a plugin's
/// pre-built fragment array in place, or the remaining keys describe a
/// locally authored fragment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FragmentDto {
    /// Preset reference in `plugin/name` form.
    #[serde(default)]
    pub preset: Option<String>,

    /// Glob patterns scoping this fragment.
    #[serde(default)]
    pub files: Vec<String>,

    /// Glob patterns excluded from this fragment, or from everything when
    /// this is the fragment's only key.
    #[serde(default)]
    pub ignores: Vec<String>,

    /// Parser binding.
    #[serde(default)]
    pub language: Option<LanguageDto>,

    /// Rule entries: severity string or `{ severity = "...", ... }` table.
    #[serde(default)]
    pub rules: BTreeMap<String, toml::Value>,
}

/// TOML representation of a parser binding.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageDto {
    /// Parser name (e.g., "rust").
    pub parser: String,

    /// Parser-defined options (edition and the like).
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: ConfigDto = toml::from_str("").unwrap();
        assert!(dto.fragments.is_empty());
        assert!(dto.fail_on.is_none());
    }

    #[test]
    fn deserialize_full_config() {
        let toml_str = r#"
fail_on = "warn"
respect_gitignore = false

[[fragment]]
preset = "rust/recommended"

[[fragment]]
files = ["src/**/*.rs"]
ignores = ["src/generated/**"]
language = { parser = "rust", edition = "2021" }

[fragment.rules]
"max-line-length" = { severity = "warn", limit = 100 }
"rust/no-unwrap" = "error"

[[fragment]]
ignores = ["target/**"]
"#;
        let dto: ConfigDto = toml::from_str(toml_str).unwrap();
        assert_eq!(dto.fail_on.as_deref(), Some("warn"));
        assert_eq!(dto.respect_gitignore, Some(false));
        assert_eq!(dto.fragments.len(), 3);
        assert_eq!(dto.fragments[0].preset.as_deref(), Some("rust/recommended"));

        let local = &dto.fragments[1];
        assert_eq!(local.files, vec!["src/**/*.rs"]);
        assert_eq!(local.rules.len(), 2);
        let language = local.language.as_ref().unwrap();
        assert_eq!(language.parser, "rust");
        assert_eq!(
            language.options.get("edition").and_then(|v| v.as_str()),
            Some("2021")
        );

        assert_eq!(dto.fragments[2].ignores, vec!["target/**"]);
    }

    #[test]
    fn deserialize_string_rule_entry() {
        let toml_str = r#"
[[fragment]]
[fragment.rules]
"no-tabs" = "warn"
"#;
        let dto: ConfigDto = toml::from_str(toml_str).unwrap();
        let value = dto.fragments[0].rules.get("no-tabs").unwrap();
        assert_eq!(value.as_str(), Some("warn"));
    }
}
