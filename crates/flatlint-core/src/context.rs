//! Context types for rule execution.

use std::path::{Path, PathBuf};

/// Context provided to rules for the file being evaluated.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Whether this file is detected as a test file.
    pub is_test: bool,
    /// Path relative to the lint root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let is_test = Self::detect_test_file(path);
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            is_test,
            relative_path,
        }
    }

    /// Detects if a file is a test file based on path conventions.
    fn detect_test_file(path: &Path) -> bool {
        for component in path.components() {
            if let std::path::Component::Normal(s) = component {
                let s = s.to_string_lossy();
                if s == "tests" || s == "test" || s == "benches" {
                    return true;
                }
            }
        }

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.ends_with("_test.rs")
                || file_name.ends_with("_tests.rs")
                || file_name.starts_with("test_")
                || file_name == "tests.rs"
            {
                return true;
            }
        }

        false
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 1-indexed column number
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or 0 if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let mut offset = 0;
        for (i, line_content) in self.content.lines().enumerate() {
            if i + 1 == line {
                return offset + column.saturating_sub(1);
            }
            offset += line_content.len() + 1; // +1 for newline
        }

        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_test_file_by_convention() {
        assert!(FileContext::detect_test_file(Path::new("src/tests/foo.rs")));
        assert!(FileContext::detect_test_file(Path::new(
            "tests/integration.rs"
        )));
        assert!(FileContext::detect_test_file(Path::new("src/foo_test.rs")));
        assert!(!FileContext::detect_test_file(Path::new("src/foo.rs")));
        assert!(!FileContext::detect_test_file(Path::new("src/lib.rs")));
    }

    #[test]
    fn relative_path_strips_root() {
        let content = "";
        let ctx = FileContext::new(
            Path::new("/proj/src/lib.rs"),
            content,
            Path::new("/proj"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("src/lib.rs"));
    }

    #[test]
    fn offset_calculation() {
        let content = "line1\nline2\nline3";
        let ctx = FileContext {
            path: Path::new("test.rs"),
            content,
            is_test: false,
            relative_path: PathBuf::from("test.rs"),
        };

        assert_eq!(ctx.offset_for(1, 1), 0); // Start of line 1
        assert_eq!(ctx.offset_for(2, 1), 6); // Start of line 2
        assert_eq!(ctx.offset_for(2, 3), 8); // "ne" in line2
    }
}
