//! Rule forbidding `.unwrap()` and `.expect()` in production code.
//!
//! # Configuration
//!
//! - `allow_in_tests`: skip test files and test contexts (default: true)
//! - `allow_expect`: allow `.expect()` but forbid `.unwrap()` (default: false)

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};
use syn::visit::Visit;
use syn::{ExprMethodCall, ItemFn, ItemMod};

use super::{has_cfg_test, has_test_attr};

/// Rule name for no-unwrap.
pub const NAME: &str = "no-unwrap";

/// Forbids `.unwrap()` and `.expect()` calls in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnwrap;

impl Rule for NoUnwrap {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids .unwrap() and .expect() in production code"
    }

    fn check(
        &self,
        ctx: &FileContext,
        source: &ParsedSource,
        options: &RuleOptions,
    ) -> Vec<Violation> {
        let Some(ast) = source.as_rust() else {
            return Vec::new();
        };

        let allow_in_tests = options.get_bool("allow_in_tests", true);
        if allow_in_tests && ctx.is_test {
            return Vec::new();
        }

        let mut visitor = UnwrapVisitor {
            ctx,
            allow_in_tests,
            allow_expect: options.get_bool("allow_expect", false),
            in_test_context: false,
            violations: Vec::new(),
        };
        visitor.visit_file(ast);
        visitor.violations
    }
}

struct UnwrapVisitor<'a> {
    ctx: &'a FileContext<'a>,
    allow_in_tests: bool,
    allow_expect: bool,
    in_test_context: bool,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for UnwrapVisitor<'_> {
    fn visit_item_mod(&mut self, node: &'ast ItemMod) {
        let was_in_test = self.in_test_context;
        if has_cfg_test(&node.attrs) {
            self.in_test_context = true;
        }
        syn::visit::visit_item_mod(self, node);
        self.in_test_context = was_in_test;
    }

    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        let was_in_test = self.in_test_context;
        if has_test_attr(&node.attrs) {
            self.in_test_context = true;
        }
        syn::visit::visit_item_fn(self, node);
        self.in_test_context = was_in_test;
    }

    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        if self.allow_in_tests && self.in_test_context {
            syn::visit::visit_expr_method_call(self, node);
            return;
        }

        let method = node.method.to_string();
        let is_unwrap = method == "unwrap";
        let is_expect = method == "expect";

        if is_unwrap || (is_expect && !self.allow_expect) {
            let location = Location::from_span(
                self.ctx.relative_path.clone(),
                node.method.span(),
            );
            let (message, help) = if is_unwrap {
                (
                    ".unwrap() is forbidden in production code",
                    "Use the ? operator, .ok_or(..)?, or pattern matching",
                )
            } else {
                (
                    ".expect() is forbidden in production code",
                    "Propagate the error with ? and a typed error",
                )
            };
            self.violations.push(
                Violation::new(NAME, Severity::Error, location, message).with_help(help),
            );
        }

        syn::visit::visit_expr_method_call(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn check_with(code: &str, options: RuleOptions) -> Vec<Violation> {
        let ast = syn::parse_file(code).expect("code should parse");
        let ctx = FileContext::new(Path::new("src/lib.rs"), code, Path::new("."));
        NoUnwrap.check(&ctx, &ParsedSource::Rust(ast), &options)
    }

    fn check(code: &str) -> Vec<Violation> {
        check_with(code, RuleOptions::new())
    }

    #[test]
    fn detects_unwrap() {
        let violations = check(
            r"
fn foo() {
    let x = Some(1).unwrap();
}
",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, NAME);
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn detects_expect() {
        let violations = check(
            r#"
fn foo() {
    let x = Some(1).expect("should exist");
}
"#,
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn allow_expect_option_permits_expect_only() {
        let mut map = HashMap::new();
        map.insert("allow_expect".to_string(), toml::Value::Boolean(true));
        let violations = check_with(
            r#"
fn foo() {
    let a = Some(1).expect("fine");
    let b = Some(1).unwrap();
}
"#,
            RuleOptions::from_map(map),
        );
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("unwrap"));
    }

    #[test]
    fn allows_in_test_fn() {
        let violations = check(
            r"
#[test]
fn test_foo() {
    let x = Some(1).unwrap();
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_in_cfg_test_mod() {
        let violations = check(
            r"
#[cfg(test)]
mod tests {
    fn helper() {
        let x = Some(1).unwrap();
    }
}
",
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn strict_mode_flags_tests_too() {
        let mut map = HashMap::new();
        map.insert("allow_in_tests".to_string(), toml::Value::Boolean(false));
        let violations = check_with(
            r"
#[test]
fn test_foo() {
    let x = Some(1).unwrap();
}
",
            RuleOptions::from_map(map),
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn non_rust_source_is_skipped() {
        let ctx = FileContext::new(Path::new("a.txt"), "unwrap()", Path::new("."));
        let violations = NoUnwrap.check(&ctx, &ParsedSource::Text(vec![]), &RuleOptions::new());
        assert!(violations.is_empty());
    }
}
