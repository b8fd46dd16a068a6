//! Document assembly: front matter, one section per slide, image gallery.

use super::format::format_slide;
use super::images::alt_text;
use super::input::Lecture;
use super::parse::Slide;
use super::postprocess;
use crate::config::ConversionConfig;

/// Build the final document text for a lecture.
///
/// `slides` must already be overlay-merged and non-empty; the first slide's
/// title becomes the document title. `images` are file names inside the
/// lecture's static folder, in display order.
pub fn assemble_document(
    lecture: &Lecture,
    slides: &[Slide],
    images: &[String],
    config: &ConversionConfig,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    let number = lecture.number();
    let first_title = slides.first().map(|s| s.title.as_str()).unwrap_or_default();

    lines.push("---".to_string());
    lines.push(format!("id: {}", lecture.doc_id()));
    lines.push(format!(
        "title: {}",
        yaml_quote(&format!("Lecture {number}: {first_title}"))
    ));
    lines.push(format!("sidebar_label: Lecture {number}"));
    lines.push("---\n".to_string());

    for (i, slide) in slides.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("## {}", slide.title));
        lines.extend(format_slide(slide, &config.code_language));
    }

    if !images.is_empty() {
        lines.push(String::new());
        lines.push("## Lecture Images".to_string());
        for img in images {
            lines.push(format!(
                "![{}]({}/{}/{})",
                alt_text(img),
                config.image_url_prefix,
                lecture.id,
                img
            ));
        }
    }

    let text = lines.join("\n");
    let escaped = postprocess::escape_mdx(text.trim());
    format!("{escaped}\n")
}

fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lecture(id: &str) -> Lecture {
        Lecture::new(id, PathBuf::from("docs/Lectures").join(id))
    }

    fn slide(title: &str, lines: &[&str]) -> Slide {
        Slide::new(title, lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn front_matter_precedes_first_heading() {
        let doc = assemble_document(
            &lecture("L3"),
            &[slide("Intro", &["Hello world"]), slide("Outline", &["A", "B"])],
            &[],
            &ConversionConfig::default(),
        );
        let expected = "---\n\
id: l3\n\
title: \"Lecture 3: Intro\"\n\
sidebar_label: Lecture 3\n\
---\n\
\n\
## Intro\n\
Hello world\n\
\n\
## Outline\n\
- A\n\
- B\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn quotes_in_title_are_escaped() {
        let doc = assemble_document(
            &lecture("L1"),
            &[slide("The \"given\" clause", &[])],
            &[],
            &ConversionConfig::default(),
        );
        assert!(doc.contains(r#"title: "Lecture 1: The \"given\" clause""#), "got: {doc}");
    }

    #[test]
    fn images_section_lists_links() {
        let doc = assemble_document(
            &lecture("L2"),
            &[slide("Saturation", &[])],
            &["given_clause-loop.png".to_string(), "tree.svg".to_string()],
            &ConversionConfig::default(),
        );
        assert!(doc.ends_with(
            "## Saturation\n\
\n\
## Lecture Images\n\
![Given Clause Loop](/img/lectures/L2/given_clause-loop.png)\n\
![Tree](/img/lectures/L2/tree.svg)\n"
        ));
    }

    #[test]
    fn body_is_escaped_outside_code() {
        let doc = assemble_document(
            &lecture("L4"),
            &[slide("Ordering", &["{x < y}", "fof(a, axiom, {x < y})."])],
            &[],
            &ConversionConfig::default(),
        );
        assert!(doc.contains("\n&#123;x &lt; y&#125;\n"), "got: {doc}");
        assert!(doc.contains("\nfof(a, axiom, {x < y}).\n"), "got: {doc}");
    }
}
