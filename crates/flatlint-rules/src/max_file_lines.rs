//! Rule limiting file length.
//!
//! Text-level: works under any parser binding.
//!
//! # Configuration
//!
//! - `limit`: maximum number of lines (default: 1000)

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};

/// Rule name for max-file-lines.
pub const NAME: &str = "max-file-lines";

const DEFAULT_LIMIT: i64 = 1000;

/// Flags files with more lines than the configured limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFileLines;

impl Rule for MaxFileLines {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Limits total file length to a configurable maximum"
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

        let count = ctx.content.lines().count();
        if count <= limit {
            return Vec::new();
        }

        vec![Violation::new(
            NAME,
            Severity::Warn,
            Location::new(ctx.relative_path.clone(), limit + 1, 1),
            format!("file has {count} lines, limit is {limit}"),
        )
        .with_help("Split the file or raise the `limit` option")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn check(content: &str, limit: i64) -> Vec<Violation> {
        let mut map = HashMap::new();
        map.insert("limit".to_string(), toml::Value::Integer(limit));
        let ctx = FileContext::new(Path::new("a.txt"), content, Path::new("."));
        MaxFileLines.check(
            &ctx,
            &ParsedSource::Text(vec![]),
            &RuleOptions::from_map(map),
        )
    }

    #[test]
    fn flags_file_over_limit() {
        let violations = check("a\nb\nc\nd\n", 3);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 4);
        assert!(violations[0].message.contains("4 lines"));
    }

    #[test]
    fn file_at_limit_passes() {
        assert!(check("a\nb\nc\n", 3).is_empty());
    }
}
