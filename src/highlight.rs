use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

pub struct CodeHighlighter {
    syntaxset: SyntaxSet,
}

/// A highlighter that can be instantiated once and used many times for better performance.
impl CodeHighlighter {
    pub fn new() -> CodeHighlighter {
        let syntaxset = SyntaxSet::load_defaults_newlines();

        CodeHighlighter { syntaxset }
    }

    /// Turn source text into HTML spans with `syntect-` CSS classes, so the
    /// theme lives in the stylesheet instead of inline styles. `token` is a
    /// syntax token such as `lua` or a file extension; unknown tokens fall
    /// back to plain text.
    pub fn highlight(&self, code: &str, token: &str) -> String {
        let syntax = self
            .syntaxset
            .find_syntax_by_token(token)
            .unwrap_or_else(|| self.syntaxset.find_syntax_plain_text());

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntaxset,
            ClassStyle::SpacedPrefixed { prefix: "syntect-" },
        );
        for line in LinesWithEndings::from(code) {
            if generator
                .parse_html_for_line_which_includes_newline(line)
                .is_err()
            {
                break;
            }
        }
        generator.finalize()
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        CodeHighlighter::new()
    }
}

/// Line count for the gutter; a trailing newline does not add a line.
pub fn line_count(code: &str) -> usize {
    if code.is_empty() {
        return 1;
    }
    code.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_token_produces_spans() {
        let highlighter = CodeHighlighter::new();
        let html = highlighter.highlight("local x = 1\n", "lua");
        assert!(html.contains("<span"));
        assert!(html.contains("syntect-"));
    }

    #[test]
    fn unknown_token_escapes_plain_text() {
        let highlighter = CodeHighlighter::new();
        let html = highlighter.highlight("a < b && c\n", "nosuchlang");
        assert!(html.contains("&lt;"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn gutter_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("one\ntwo\n"), 2);
        assert_eq!(line_count("one\ntwo\nthree"), 3);
    }
}
