//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# flatlint configuration
# Fragments are evaluated in order; later entries override earlier ones
# for the same rule name where their file scopes overlap.

# Severity threshold for a failing exit status: "warn" or "error"
fail_on = "error"

# Respect .gitignore files during discovery
respect_gitignore = true

# Splice the rust plugin's pre-built fragment array in place
[[fragment]]
preset = "rust/recommended"

# Text-level hygiene for everything
[[fragment]]
[fragment.rules]
"no-trailing-whitespace" = "warn"
"max-file-lines" = { severity = "warn", limit = 1000 }

# Tighten rules for library sources only
[[fragment]]
files = ["src/**/*.rs"]
[fragment.rules]
"max-line-length" = { severity = "warn", limit = 100 }

# Paths excluded from all linting, regardless of position
[[fragment]]
ignores = ["target/**", "dist/**"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("flatlint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created flatlint.toml");
    println!("\nNext steps:");
    println!("  1. Edit flatlint.toml to adjust fragments");
    println!("  2. Run: flatlint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatlint_core::config::load_from_toml;
    use flatlint_rules::default_registry;

    #[test]
    fn default_config_template_loads() {
        let config =
            load_from_toml(DEFAULT_CONFIG, &default_registry()).expect("template should load");
        // rust/recommended splices to an array; three local fragments follow.
        assert_eq!(config.sources.len(), 4);
    }
}
