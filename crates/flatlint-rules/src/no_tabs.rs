//! Rule forbidding tab characters.
//!
//! Text-level: works under any parser binding.

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};

/// Rule name for no-tabs.
pub const NAME: &str = "no-tabs";

/// Flags the first tab character on each line that has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTabs;

impl Rule for NoTabs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids tab characters"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _source: &ParsedSource,
        _options: &RuleOptions,
    ) -> Vec<Violation> {
        ctx.content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                line.chars().position(|c| c == '\t').map(|col| {
                    Violation::new(
                        NAME,
                        Severity::Warn,
                        Location::new(ctx.relative_path.clone(), i + 1, col + 1),
                        "tab character",
                    )
                    .with_help("Use spaces for indentation")
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check(content: &str) -> Vec<Violation> {
        let ctx = FileContext::new(Path::new("a.txt"), content, Path::new("."));
        NoTabs.check(&ctx, &ParsedSource::Text(vec![]), &RuleOptions::new())
    }

    #[test]
    fn flags_first_tab_per_line() {
        let violations = check("ok\n\tindented\ta\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 1);
    }

    #[test]
    fn space_indentation_passes() {
        assert!(check("    indented\n").is_empty());
    }
}
