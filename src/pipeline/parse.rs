//! Slide parsing: split extractor output into titled pages.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Page separator emitted by `pdftotext`.
pub const PAGE_BREAK: char = '\x0c';

/// One PDF page: the first non-blank line is the title, the rest is body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub lines: Vec<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }

    /// Body with each line trimmed and blank lines dropped, newline-joined.
    ///
    /// Overlay merging compares variants by the length of this key.
    pub fn content_key(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Split raw extractor text into slides, one per non-empty page.
///
/// Body lines are the lines positionally after the title line, with trailing
/// whitespace removed and leading indentation kept. `\r\n` and bare `\r`
/// count as line breaks.
pub fn parse_slides(raw: &str) -> Vec<Slide> {
    let raw = normalise_newlines(raw);
    raw.split(PAGE_BREAK).filter_map(parse_page).collect()
}

fn normalise_newlines(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn parse_page(page: &str) -> Option<Slide> {
    let page = page.trim();
    if page.is_empty() {
        return None;
    }

    let lines: Vec<&str> = page.lines().map(str::trim_end).collect();
    let title_pos = lines.iter().position(|l| !l.trim().is_empty())?;

    Some(Slide {
        title: lines[title_pos].trim().to_string(),
        lines: lines[title_pos + 1..].iter().map(|l| l.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        let slides = parse_slides("Intro\nHello world\x0cOutline\nA\nB\x0c");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "Intro");
        assert_eq!(slides[0].lines, vec!["Hello world"]);
        assert_eq!(slides[1].title, "Outline");
        assert_eq!(slides[1].lines, vec!["A", "B"]);
    }

    #[test]
    fn skips_blank_pages() {
        let slides = parse_slides("\x0c  \n\t\x0cTitle\x0c\n\n");
        assert_eq!(slides, vec![Slide::new("Title", vec![])]);
    }

    #[test]
    fn title_is_first_non_blank_line_trimmed() {
        let slides = parse_slides("\n\n   Resolution   \n  indented body  \n\nlast");
        assert_eq!(slides[0].title, "Resolution");
        assert_eq!(slides[0].lines, vec!["  indented body", "", "last"]);
    }

    #[test]
    fn title_only_page_has_empty_body() {
        let slides = parse_slides("Questions?\n");
        assert_eq!(slides.len(), 1);
        assert!(slides[0].lines.is_empty());
    }

    #[test]
    fn carriage_returns_break_lines() {
        let slides = parse_slides("Title\rbody one\r\nbody two\x0cNext\r\rlast\r");
        assert_eq!(
            slides,
            vec![
                Slide::new("Title", vec!["body one".into(), "body two".into()]),
                Slide::new("Next", vec!["".into(), "last".into()]),
            ]
        );
    }

    #[test]
    fn content_key_ignores_blank_and_padding() {
        let s = Slide::new(
            "T",
            vec!["  a ".into(), "".into(), "   ".into(), "b".into()],
        );
        assert_eq!(s.content_key(), "a\nb");
    }
}
