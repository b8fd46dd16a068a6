//! # beamer2mdx
//!
//! Convert beamer lecture-slide PDFs into MDX pages for a documentation site.
//!
//! ## Why this crate?
//!
//! Beamer decks make poor web pages: every `\pause` produces another PDF page
//! with the same title, bullets come out as `▶` glyphs, and TPTP listings are
//! indistinguishable from prose once the PDF is flattened to text. This crate
//! reads the text `pdftotext` extracts, keeps only the final overlay step of
//! each frame, rebuilds bullets, paragraphs and fenced code blocks, and writes
//! one MDX page per lecture with the lecture's figures alongside.
//!
//! ## Pipeline Overview
//!
//! ```text
//! docs/Lectures/L<n>/L<n>.pdf
//!  │
//!  ├─ 1. Extract  pdftotext <pdf> -  (form-feed separated pages)
//!  ├─ 2. Parse    first non-blank line = title, rest = body
//!  ├─ 3. Merge    consecutive same-title pages → fullest variant
//!  ├─ 4. Format   bullets / paragraphs / ```tptp blocks
//!  ├─ 5. Images   static/img/lectures/L<n>/
//!  └─ 6. Output   docs/lectures/l<n>.mdx (front matter + escaped body)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beamer2mdx::{convert_all, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::for_site_root("docusaurus-site");
//!     let report = convert_all(&config).await?;
//!     for lecture in &report.lectures {
//!         eprintln!("{} → {}", lecture.lecture_id, lecture.output_path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `beamer2mdx` binary (clap, anyhow, indicatif, serde_json, tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, LectureSelection};
pub use convert::{convert_all, convert_all_sync, convert_lecture, inspect, output_path_for};
pub use error::{Beamer2MdxError, LectureError};
pub use output::{ConversionReport, ConversionStats, LectureOutput};
pub use pipeline::extract::{PdfToText, TextExtractor};
pub use pipeline::format::format_slide;
pub use pipeline::input::{discover_lectures, Lecture};
pub use pipeline::merge::merge_overlays;
pub use pipeline::parse::{parse_slides, Slide};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
