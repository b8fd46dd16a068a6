//! Slide formatting: turn extracted body lines into Markdown lines.
//!
//! `pdftotext` flattens a slide into plain lines. The formatter rebuilds the
//! structure beamer slides actually use:
//!
//! - `▶`, `•` and `↭` itemize glyphs become `- ` bullets, and the wrapped
//!   lines that follow a bullet are appended to it;
//! - TPTP problems and prover commands (`fof(`, `cnf(`, `%` comments, `run `)
//!   become fenced code blocks;
//! - everything else is gathered into whitespace-collapsed paragraphs.
//!
//! ## Rule order
//!
//! Each line is tested against the rules in a fixed order and the first
//! match wins: blank, bullet glyph, code marker, code continuation, prose.
//! A line that is both bullet-prefixed and code-like is therefore a bullet.

use super::parse::Slide;
use once_cell::sync::Lazy;
use regex::Regex;

/// Glyphs beamer themes render in front of `\item`.
const BULLET_GLYPHS: [char; 3] = ['▶', '•', '↭'];

/// A line made only of these characters extends an open code block.
static RE_CODE_CONTINUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\[\]()\s:=.,\-+><!?&|%/]+$").expect("valid code-continuation regex")
});

static RE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// What the line loop is currently accumulating.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatState {
    /// Nothing buffered.
    #[default]
    Idle,
    /// Trimmed prose lines waiting to be joined into one paragraph.
    Paragraph(Vec<String>),
    /// Raw code lines waiting to be fenced.
    Code(Vec<String>),
}

/// Line classifier state plus the Markdown emitted so far.
#[derive(Debug)]
pub struct SlideFormatter<'a> {
    code_language: &'a str,
    state: FormatState,
    out: Vec<String>,
}

impl<'a> SlideFormatter<'a> {
    pub fn new(code_language: &'a str) -> Self {
        Self {
            code_language,
            state: FormatState::Idle,
            out: Vec::new(),
        }
    }

    pub fn state(&self) -> &FormatState {
        &self.state
    }

    /// Feed one body line.
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim_end();
        let stripped = line.trim();

        if stripped.is_empty() {
            match &mut self.state {
                FormatState::Code(buf) => buf.push(String::new()),
                _ => self.flush_paragraph(),
            }
            return;
        }

        if stripped.starts_with(BULLET_GLYPHS) {
            self.flush_code();
            self.flush_paragraph();
            let text = normalise_bullet(stripped);
            if !text.is_empty() {
                self.out.push(format!("- {text}"));
            }
            return;
        }

        if is_code_line(line) {
            self.flush_paragraph();
            match &mut self.state {
                FormatState::Code(buf) => buf.push(stripped.to_string()),
                _ => self.state = FormatState::Code(vec![stripped.to_string()]),
            }
            return;
        }

        if let FormatState::Code(buf) = &mut self.state {
            if RE_CODE_CONTINUATION.is_match(stripped) {
                buf.push(stripped.to_string());
                return;
            }
        }

        self.flush_code();
        if let Some(last) = self.out.last_mut() {
            if last.starts_with("- ") {
                last.push(' ');
                last.push_str(stripped);
                return;
            }
        }
        match &mut self.state {
            FormatState::Paragraph(buf) => buf.push(stripped.to_string()),
            _ => self.state = FormatState::Paragraph(vec![stripped.to_string()]),
        }
    }

    /// Flush open buffers and return the non-blank Markdown lines.
    pub fn finish(mut self) -> Vec<String> {
        self.flush_paragraph();
        self.flush_code();
        self.out.retain(|l| !l.trim().is_empty());
        self.out
    }

    fn flush_paragraph(&mut self) {
        if let FormatState::Paragraph(buf) = &mut self.state {
            let joined = std::mem::take(buf).join(" ");
            self.state = FormatState::Idle;
            let merged = RE_WHITESPACE.replace_all(&joined, " ");
            self.out.push(merged.trim().to_string());
        }
    }

    fn flush_code(&mut self) {
        if let FormatState::Code(buf) = &mut self.state {
            let lines = std::mem::take(buf);
            self.state = FormatState::Idle;
            self.out.push(format!("```{}", self.code_language));
            self.out.extend(lines);
            self.out.push("```".to_string());
        }
    }
}

/// Format one slide body as Markdown lines.
///
/// Slides titled "Outline" (any case) are a plain list: every non-blank line
/// becomes a bullet and no other rule applies.
pub fn format_slide(slide: &Slide, code_language: &str) -> Vec<String> {
    if slide.title.to_lowercase() == "outline" {
        return slide
            .lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| format!("- {l}"))
            .collect();
    }

    let mut formatter = SlideFormatter::new(code_language);
    for line in &slide.lines {
        formatter.push_line(line);
    }
    formatter.finish()
}

/// Whether a line looks like TPTP input or a prover command.
pub fn is_code_line(line: &str) -> bool {
    let s = line.trim_start();
    if s.is_empty() {
        return false;
    }
    s.starts_with('%')
        || s.starts_with('!')
        || s.starts_with('?')
        || s.starts_with("include(")
        || s.contains("fof(")
        || s.contains("cnf(")
        || s.starts_with("run ")
}

/// Strip itemize glyphs and a leading `- ` marker from a bullet line.
pub fn normalise_bullet(text: &str) -> String {
    let text = text.trim_start_matches(BULLET_GLYPHS).trim();
    match text.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("- ") => text[2..].trim().to_string(),
        _ => text.to_string(),
    }
}
