//! Overlay merging.
//!
//! A beamer overlay (`\pause`, `\only<2->`, …) emits one full PDF page per
//! reveal step, all with the same frame title. Only the fullest step is kept.

use super::parse::Slide;

/// Collapse runs of consecutive same-title slides into their fullest variant.
///
/// Within a run the slide with the longest [`Slide::content_key`] (counted in
/// characters) wins; on a tie the later slide wins. A title that reappears
/// after a different title starts a new run.
pub fn merge_overlays(slides: Vec<Slide>) -> Vec<Slide> {
    let mut merged: Vec<Slide> = Vec::with_capacity(slides.len());
    let mut best_len = 0usize;

    for slide in slides {
        let len = slide.content_key().chars().count();
        match merged.last_mut() {
            Some(best) if best.title == slide.title => {
                if len >= best_len {
                    *best = slide;
                    best_len = len;
                }
            }
            _ => {
                merged.push(slide);
                best_len = len;
            }
        }
    }

    merged
}
