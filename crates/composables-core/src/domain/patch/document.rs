//! Line-oriented view of a Gradle Kotlin script.
//!
//! This is not a parser. Blocks are located by their opening line and closed
//! by counting braces, so a `{` or `}` inside a string literal or comment
//! throws the count off. Callers treat an unfound block as "skip this step".

use std::fmt;

/// Named blocks the patcher knows how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Plugins,
    Kotlin,
    SourceSets,
}

impl Block {
    /// `true` when `line` opens this block.
    pub fn opens(&self, line: &str) -> bool {
        let trimmed = line.trim();
        match self {
            Self::Plugins => trimmed.starts_with("plugins {"),
            Self::Kotlin => trimmed.starts_with("kotlin {"),
            Self::SourceSets => trimmed.contains("sourceSets") && trimmed.contains('{'),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Plugins => "plugins",
            Self::Kotlin => "kotlin",
            Self::SourceSets => "sourceSets",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An editable configuration file held as lines.
///
/// Lines are split on `\n` and joined back with `\n`, so an unmodified
/// document renders byte-identical to its input, trailing newline included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    lines: Vec<String>,
}

impl ConfigDocument {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Index of the line that closes `block`.
    ///
    /// Depth starts at 1 on the opening line; every later line adds its
    /// number of `{` and subtracts its number of `}`. The first line that
    /// brings depth to zero closes the block. An opener that never closes
    /// is skipped in favour of the next opener.
    pub fn find_block_end(&self, block: Block) -> Option<usize> {
        let mut from = 0;
        while let Some(offset) = self.lines[from..].iter().position(|l| block.opens(l)) {
            let start = from + offset;
            let mut depth: i64 = 1;
            for (index, line) in self.lines.iter().enumerate().skip(start + 1) {
                depth += brace_delta(line);
                if depth <= 0 {
                    return Some(index);
                }
            }
            from = start + 1;
        }
        None
    }

    /// Insert `fragment` (possibly multi-line) just before the line closing
    /// `block`. Returns `false`, changing nothing, when the block is absent.
    pub fn insert_before_block_end(&mut self, block: Block, fragment: &str) -> bool {
        match self.find_block_end(block) {
            Some(index) => {
                self.insert_at(index, fragment);
                true
            }
            None => false,
        }
    }

    /// Add an import line unless it is already present.
    ///
    /// Goes after the last `import ` line, else before the first line that
    /// is neither blank nor a `//` comment, else at the end.
    pub fn ensure_import(&mut self, import: &str) -> bool {
        if self.lines.iter().any(|line| line.trim() == import) {
            return false;
        }

        let index = match self.lines.iter().rposition(|l| l.starts_with("import ")) {
            Some(last) => last + 1,
            None => self
                .lines
                .iter()
                .position(|l| {
                    let t = l.trim();
                    !t.is_empty() && !t.starts_with("//")
                })
                .unwrap_or(self.lines.len()),
        };
        self.lines.insert(index, import.to_string());
        true
    }

    /// Append `fragment` at the end of the file, keeping a final newline if
    /// the document had one.
    pub fn append_block(&mut self, fragment: &str) {
        let ends_with_newline = self.lines.len() > 1 && self.lines.last().is_some_and(String::is_empty);
        let index = if ends_with_newline {
            self.lines.len() - 1
        } else {
            self.lines.len()
        };
        self.insert_at(index, fragment);
    }

    /// Put `fragment` at the very top of the file.
    pub fn prepend(&mut self, fragment: &str) {
        self.insert_at(0, fragment);
    }

    /// Insert `fragment` so that its first line lands at `index`.
    pub fn insert_at(&mut self, index: usize, fragment: &str) {
        let new_lines: Vec<String> = fragment.split('\n').map(str::to_owned).collect();
        self.lines.splice(index..index, new_lines);
    }
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILD: &str = "import a.B

plugins {
    alias(libs.plugins.x)
}

kotlin {
    jvm()

    sourceSets {
        commonMain.dependencies {
            implementation(compose.runtime)
        }
    }
}
";

    #[test]
    fn render_round_trips_exactly() {
        assert_eq!(ConfigDocument::parse(BUILD).render(), BUILD);
        assert_eq!(ConfigDocument::parse("no newline").render(), "no newline");
    }

    #[test]
    fn finds_nested_block_ends() {
        let doc = ConfigDocument::parse(BUILD);
        assert_eq!(doc.lines()[doc.find_block_end(Block::Plugins).unwrap()], "}");
        assert_eq!(doc.find_block_end(Block::Kotlin), Some(14));
        assert_eq!(doc.find_block_end(Block::SourceSets), Some(13));
    }

    #[test]
    fn missing_block_is_skipped() {
        let mut doc = ConfigDocument::parse("dependencies {\n}\n");
        assert!(!doc.insert_before_block_end(Block::Kotlin, "    jvm()"));
        assert_eq!(doc.render(), "dependencies {\n}\n");
    }

    #[test]
    fn inserts_multi_line_fragment_before_close() {
        let mut doc = ConfigDocument::parse(BUILD);
        assert!(doc.insert_before_block_end(Block::Kotlin, "\n    js {\n    }"));
        let text = doc.render();
        assert!(text.contains("    }\n\n    js {\n    }\n}\n"));
    }

    #[test]
    fn import_goes_after_last_import_or_before_code() {
        let mut doc = ConfigDocument::parse(BUILD);
        assert!(doc.ensure_import("import c.D"));
        assert_eq!(doc.lines()[1], "import c.D");
        assert!(!doc.ensure_import("import c.D"));

        let mut bare = ConfigDocument::parse("// header\n\nplugins {\n}");
        bare.ensure_import("import x.Y");
        assert_eq!(bare.render(), "// header\n\nimport x.Y\nplugins {\n}");
    }

    #[test]
    fn append_keeps_trailing_newline() {
        let mut doc = ConfigDocument::parse("a\n");
        doc.append_block("\nb {\n}");
        assert_eq!(doc.render(), "a\n\nb {\n}\n");

        let mut no_newline = ConfigDocument::parse("a");
        no_newline.append_block("b");
        assert_eq!(no_newline.render(), "a\nb");
    }

    #[test]
    fn counts_every_brace_on_a_line() {
        let doc = ConfigDocument::parse("kotlin {\n    a { b { } }\n}");
        assert_eq!(doc.find_block_end(Block::Kotlin), Some(2));
    }

    #[test]
    fn braces_in_strings_are_a_known_limitation() {
        // The quoted brace opens a phantom level, so the block never closes.
        let doc = ConfigDocument::parse("kotlin {\n    val s = \"{\"\n}");
        assert_eq!(doc.find_block_end(Block::Kotlin), None);
    }
}
