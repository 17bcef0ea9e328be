//! Rule forbidding wildcard imports.
//!
//! `use foo::*` hides where names come from and makes upgrades riskier.
//! Prelude-style modules can be excepted via configuration.
//!
//! # Configuration
//!
//! - `allow`: path prefixes where wildcards are acceptable
//!   (e.g., `["prelude"]` allows `use crate::prelude::*`)

use flatlint_core::{FileContext, Location, ParsedSource, Rule, RuleOptions, Severity, Violation};
use syn::spanned::Spanned;
use syn::visit::Visit;

/// Rule name for no-wildcard-use.
pub const NAME: &str = "no-wildcard-use";

/// Flags `use path::*` imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWildcardUse;

impl Rule for NoWildcardUse {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids wildcard (glob) imports"
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

        let mut visitor = WildcardVisitor {
            ctx,
            allow: options.get_str_array("allow"),
            violations: Vec::new(),
        };
        visitor.visit_file(ast);
        visitor.violations
    }
}

struct WildcardVisitor<'a> {
    ctx: &'a FileContext<'a>,
    allow: Vec<String>,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for WildcardVisitor<'_> {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        let mut globs = Vec::new();
        collect_globs(&node.tree, "", &mut globs);

        for (prefix, span) in globs {
            let allowed = self
                .allow
                .iter()
                .any(|segment| prefix.split("::").any(|p| p == segment));
            if allowed {
                continue;
            }

            let location = Location::from_span(self.ctx.relative_path.clone(), span);
            self.violations.push(
                Violation::new(
                    NAME,
                    Severity::Warn,
                    location,
                    format!("wildcard import `use {prefix}::*`"),
                )
                .with_help("Import the names you use explicitly"),
            );
        }

        syn::visit::visit_item_use(self, node);
    }
}

/// Walks a use-tree and records every glob leaf with its `::` prefix.
fn collect_globs(tree: &syn::UseTree, prefix: &str, out: &mut Vec<(String, proc_macro2::Span)>) {
    match tree {
        syn::UseTree::Path(p) => {
            let next = if prefix.is_empty() {
                p.ident.to_string()
            } else {
                format!("{prefix}::{}", p.ident)
            };
            collect_globs(&p.tree, &next, out);
        }
        syn::UseTree::Group(g) => {
            for item in &g.items {
                collect_globs(item, prefix, out);
            }
        }
        syn::UseTree::Glob(g) => {
            out.push((prefix.to_string(), g.span()));
        }
        syn::UseTree::Name(_) | syn::UseTree::Rename(_) => {}
    }
}
