// crates/agenticops-app/src/syntax.rs
// Code block highlighting for assistant answers (syntect, pure Rust)

use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    let ts = THEME_SET.get_or_init(ThemeSet::load_defaults);
    ts.themes
        .get("base16-ocean.dark")
        .or_else(|| ts.themes.values().next())
}

/// Backend answers tag CLI snippets loosely; map the common names
fn syntax_token(language: &str) -> &str {
    match language.to_ascii_lowercase().as_str() {
        "shell" | "bash" | "sh" | "console" => "sh",
        "yaml" | "yml" => "yaml",
        "json" => "json",
        "python" | "py" => "py",
        _ => language,
    }
}

/// Highlight a whole code block, returning HTML with inline styles
pub fn highlight_block(code: &str, language: &str) -> String {
    let ss = syntax_set();
    let Some(theme) = theme() else {
        return html_escape(code);
    };
    let syntax = ss
        .find_syntax_by_token(syntax_token(language))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let html = highlighter
            .highlight_line(line, ss)
            .ok()
            .and_then(|ranges| styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No).ok());
        match html {
            Some(html) => out.push_str(&html),
            None => out.push_str(&html_escape(line)),
        }
    }
    out
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn test_syntax_token_aliases() {
        assert_eq!(syntax_token("Bash"), "sh");
        assert_eq!(syntax_token("yml"), "yaml");
        assert_eq!(syntax_token("rust"), "rust");
    }

    #[test]
    fn test_highlight_escapes_plain_text() {
        let html = highlight_block("if a < b {}", "no-such-language");
        assert!(html.contains("&lt;"));
        assert!(!html.contains("< b"));
    }
}
