//! Rule forbidding `dbg!` macro invocations.
//!
//! `dbg!` prints to stderr and is meant for interactive debugging; it
//! should not survive into committed code.

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};
use syn::spanned::Spanned;
use syn::visit::Visit;

/// Rule name for no-dbg.
pub const NAME: &str = "no-dbg";

/// Flags every `dbg!` invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDbg;

impl Rule for NoDbg {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids dbg! macro invocations"
    }

    fn check(
        &self,
        ctx: &FileContext,
        source: &ParsedSource,
        _options: &RuleOptions,
    ) -> Vec<Violation> {
        let Some(ast) = source.as_rust() else {
            return Vec::new();
        };

        let mut visitor = DbgVisitor {
            ctx,
            violations: Vec::new(),
        };
        visitor.visit_file(ast);
        visitor.violations
    }
}

struct DbgVisitor<'a> {
    ctx: &'a FileContext<'a>,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for DbgVisitor<'_> {
    fn visit_macro(&mut self, node: &'ast syn::Macro) {
        let is_dbg = node
            .path
            .segments
            .last()
            .is_some_and(|s| s.ident == "dbg");
        if is_dbg {
            let location =
                Location::from_span(self.ctx.relative_path.clone(), node.path.span());
            self.violations.push(
                Violation::new(NAME, Severity::Warn, location, "dbg! left in code")
                    .with_help("Remove the dbg! call or use tracing::debug!"),
            );
        }
        syn::visit::visit_macro(self, node);
    }
}
