//! Rule limiting line length.
//!
//! Text-level: works under any parser binding.
//!
//! # Configuration
//!
//! - `limit`: maximum line length in characters (default: 120)

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};

/// Rule name for max-line-length.
pub const NAME: &str = "max-line-length";

const DEFAULT_LIMIT: i64 = 120;

/// Flags lines longer than the configured limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLineLength;

impl Rule for MaxLineLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits line length to a configurable maximum"
    }

    fn check(
        &self,
        ctx: &FileContext,
        _source: &ParsedSource,
        options: &RuleOptions,
    ) -> Vec<Violation> {
        let limit = usize::try_from(options.get_int("limit", DEFAULT_LIMIT)).unwrap_or(0);
        if limit == 0 {
            return Vec::new();
        }

        ctx.content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let width = line.chars().count();
                (width > limit).then(|| {
                    Violation::new(
                        NAME,
                        Severity::Warn,
                        Location::new(ctx.relative_path.clone(), i + 1, limit + 1),
                        format!("line is {width} characters, limit is {limit}"),
                    )
                    .with_help("Break the line or raise the `limit` option")
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn check(content: &str, options: RuleOptions) -> Vec<Violation> {
        let ctx = FileContext::new(Path::new("a.txt"), content, Path::new("."));
        MaxLineLength.check(&ctx, &ParsedSource::Text(vec![]), &options)
    }

    #[test]
    fn flags_long_line_with_custom_limit() {
        let mut map = HashMap::new();
        map.insert("limit".to_string(), toml::Value::Integer(10));
        let violations = check("short\nthis line is too long\n", RuleOptions::from_map(map));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.column, 11);
    }

    #[test]
    fn default_limit_allows_normal_lines() {
        let violations = check("fn main() {}\n", RuleOptions::new());
        assert!(violations.is_empty());
    }
}
