//! Rule forbidding trailing whitespace.
//!
//! Text-level: works under any parser binding.

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};

/// Rule name for no-trailing-whitespace.
pub const NAME: &str = "no-trailing-whitespace";

/// Flags lines ending in spaces or tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrailingWhitespace;

impl Rule for NoTrailingWhitespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids trailing whitespace at end of line"
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
                let trimmed = line.trim_end_matches([' ', '\t']);
                (trimmed.len() < line.len()).then(|| {
                    Violation::new(
                        NAME,
                        Severity::Warn,
                        Location::new(
                            ctx.relative_path.clone(),
                            i + 1,
                            trimmed.chars().count() + 1,
                        ),
                        "trailing whitespace",
                    )
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
        NoTrailingWhitespace.check(&ctx, &ParsedSource::Text(vec![]), &RuleOptions::new())
    }

    #[test]
    fn flags_trailing_spaces_and_tabs() {
        let violations = check("clean\ndirty  \nalso dirty\t\n");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 6);
        assert_eq!(violations[1].location.line, 3);
    }

    #[test]
    fn clean_content_passes() {
        assert!(check("one\ntwo\n").is_empty());
    }
}
