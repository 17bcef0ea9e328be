//! Parser bindings: named parsers producing a [`ParsedSource`].
//!
//! A fragment's `language` record names the parser that turns file content
//! into the form rules evaluate against. The registry ships two parsers:
//!
//! - `rust` — `syn`-based Rust AST
//! - `text` — line-indexed plain text (the default binding)

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Error produced when a parser fails on a file.
#[derive(Debug, thiserror::Error)]
#[error("parse error in {path}: {message}")]
pub struct ParseError {
    /// Path to the file that failed to parse.
    pub path: PathBuf,
    /// Parser-specific error message.
    pub message: String,
}

/// The parsed form of one source file.
#[derive(Debug)]
pub enum ParsedSource {
    /// A Rust syntax tree.
    Rust(syn::File),
    /// Plain text split into lines.
    Text(Vec<String>),
}

impl ParsedSource {
    /// Returns the Rust AST, if this source was parsed as Rust.
    #[must_use]
    pub fn as_rust(&self) -> Option<&syn::File> {
        match self {
            Self::Rust(ast) => Some(ast),
            Self::Text(_) => None,
        }
    }

    /// Returns the text lines, if this source was parsed as plain text.
    #[must_use]
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Self::Rust(_) => None,
            Self::Text(lines) => Some(lines),
        }
    }
}

/// A named parser turning file content into a [`ParsedSource`].
pub trait SourceParser: Send + Sync {
    /// Returns the name fragments bind this parser under.
    fn name(&self) -> &'static str;

    /// Parses one file.
    ///
    /// Parser options come from the fragment's `language` record and are
    /// parser-defined; unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid for this parser.
    fn parse(
        &self,
        path: &Path,
        content: &str,
        options: &HashMap<String, toml::Value>,
    ) -> Result<ParsedSource, ParseError>;
}

/// The `syn`-backed Rust parser.
#[derive(Debug, Default)]
pub struct RustParser;

impl SourceParser for RustParser {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn parse(
        &self,
        path: &Path,
        content: &str,
        _options: &HashMap<String, toml::Value>,
    ) -> Result<ParsedSource, ParseError> {
        let ast = syn::parse_file(content).map_err(|e| ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(ParsedSource::Rust(ast))
    }
}

/// The plain-text parser. Never fails; splits content into lines.
#[derive(Debug, Default)]
pub struct TextParser;

impl SourceParser for TextParser {
    fn name(&self) -> &'static str {
        "text"
    }

    fn parse(
        &self,
        _path: &Path,
        content: &str,
        _options: &HashMap<String, toml::Value>,
    ) -> Result<ParsedSource, ParseError> {
        Ok(ParsedSource::Text(
            content.lines().map(String::from).collect(),
        ))
    }
}

/// Name of the parser used when no fragment binds one.
pub const DEFAULT_PARSER: &str = "text";

/// Registry of named parsers available to the engine.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<&'static str, Box<dyn SourceParser>>,
}

impl ParserRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in `rust` and `text` parsers.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RustParser));
        registry.register(Box::new(TextParser));
        registry
    }

    /// Registers a parser under its canonical name.
    pub fn register(&mut self, parser: Box<dyn SourceParser>) {
        self.parsers.insert(parser.name(), parser);
    }

    /// Looks up a parser by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn SourceParser> {
        self.parsers.get(name).map(AsRef::as_ref)
    }

    /// Returns true if a parser with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_rust_and_text() {
        let registry = ParserRegistry::builtin();
        assert!(registry.contains("rust"));
        assert!(registry.contains("text"));
        assert!(!registry.contains("kotlin"));
    }

    #[test]
    fn rust_parser_accepts_valid_source() {
        let parsed = RustParser
            .parse(Path::new("a.rs"), "fn main() {}", &HashMap::new())
            .unwrap();
        assert!(parsed.as_rust().is_some());
    }

    #[test]
    fn rust_parser_rejects_invalid_source() {
        let result = RustParser.parse(Path::new("a.rs"), "fn main( {", &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn text_parser_splits_lines() {
        let parsed = TextParser
            .parse(Path::new("a.txt"), "one\ntwo\n", &HashMap::new())
            .unwrap();
        assert_eq!(parsed.as_text().map(<[String]>::len), Some(2));
    }
}
