//! Post-processing: make the assembled Markdown safe for the MDX compiler.
//!
//! MDX treats `<` as the start of a JSX element and `{` as the start of a
//! JavaScript expression, and the TPTP syntax on the slides is full of both
//! (`<=>`, `=>`, `{...}` sets). Anything outside a fenced code block must be
//! entity-encoded. Code fences are left untouched so the highlighter sees the
//! unescaped source.
//!
//! ## Rule Order
//!
//! 1. Escape image-like brackets `![label]` that are not real links
//! 2. Fence-aware entity encoding of angle brackets and curly braces

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all escaping rules in order.
pub fn escape_mdx(input: &str) -> String {
    let s = escape_non_image_brackets(input);
    escape_outside_fences(&s)
}

// ── Rule 1: Escape `![label]` not followed by `(` ───────────────────────────

static RE_IMAGE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]+)\]").expect("valid image-label regex"));

/// `![label]` without a `(url)` would be parsed as a broken image reference;
/// prefix a backslash so it renders literally. Real `![alt](url)` links are
/// kept.
fn escape_non_image_brackets(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for m in RE_IMAGE_LABEL.find_iter(input) {
        out.push_str(&input[last..m.start()]);
        if input[m.end()..].starts_with('(') {
            out.push_str(m.as_str());
        } else {
            out.push('\\');
            out.push_str(m.as_str());
        }
        last = m.end();
    }
    out.push_str(&input[last..]);
    out
}

// ── Rule 2: Entity-encode `<`, `>`, `{`, `}` outside code fences ────────────

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn escape_angle_brackets(line: &str) -> String {
    line.replace("<=", "&lt;=")
        .replace(">=", "&gt;=")
        .replace("<>", "&lt;&gt;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_curly_braces(line: &str) -> String {
    line.replace('{', "&#123;").replace('}', "&#125;")
}

fn escape_outside_fences(input: &str) -> String {
    let mut in_code = false;
    input
        .lines()
        .map(|line| {
            if is_fence(line) {
                in_code = !in_code;
                line.to_string()
            } else if in_code {
                line.to_string()
            } else {
                escape_curly_braces(&escape_angle_brackets(line))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ────────────────────────────────────────────────────────────────────
