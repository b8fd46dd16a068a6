//! Pipeline stages for lecture-to-MDX conversion.
//!
//! Each submodule implements exactly one transformation step and can be
//! tested on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ parse ──▶ merge ──▶ format ──▶ assemble ──▶ postprocess
//! (L<n>/)   (pdftotext)  (pages)  (overlays) (markdown)  (+ images)   (escaping)
//! ```
//!
//! 1. [`input`]    — discover `L<n>` folders and resolve each lecture's PDF
//! 2. [`extract`]  — run the external text extractor; the only stage that
//!    spawns a process
//! 3. [`parse`]    — split on form feeds into titled [`parse::Slide`]s
//! 4. [`merge`]    — collapse beamer overlay steps into one slide
//! 5. [`format`]   — classify body lines into bullets, paragraphs and code
//! 6. [`images`]   — refresh the lecture's static image folder
//! 7. [`assemble`] — front matter, sections and image gallery
//! 8. [`postprocess`] — MDX escaping outside code fences

pub mod assemble;
pub mod extract;
pub mod format;
pub mod images;
pub mod input;
pub mod merge;
pub mod parse;
pub mod postprocess;
