//! List rules command implementation.

use flatlint_core::RulePlugin;
use flatlint_rules::{core_rules, default_registry};

/// Runs the list-rules command.
pub fn run() {
    println!("Core rules:\n");
    println!("{:<28} Description", "Name");
    println!("{}", "-".repeat(72));

    for rule in core_rules() {
        println!("{:<28} {}", rule.name(), rule.description());
    }

    let registry = default_registry();
    for (name, plugin) in registry.plugins() {
        println!("\nPlugin `{name}`:\n");
        println!("{:<28} Description", "Name");
        println!("{}", "-".repeat(72));
        for rule_name in plugin.rule_names() {
            if let Some(rule) = plugin.rule(rule_name) {
                println!("{:<28} {}", format!("{name}/{rule_name}"), rule.description());
            }
        }
    }

    println!("\nPresets:");
    println!("  rust/recommended  - rust parser for **/*.rs plus all rust/ rules");

    println!("\nReference rules in flatlint.toml fragments, e.g.:");
    println!("  [[fragment]]");
    println!("  files = [\"src/**/*.rs\"]");
    println!("  [fragment.rules]");
    println!("  \"rust/no-unwrap\" = \"error\"");
}
