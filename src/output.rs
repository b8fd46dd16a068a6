//! Result types returned by the conversion entry points.

use crate::error::LectureError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One converted lecture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LectureOutput {
    /// Folder name, e.g. `L3`.
    pub lecture_id: String,
    /// Final document text, exactly as written to `output_path`.
    pub document: String,
    pub output_path: PathBuf,
    /// Image file names copied into the lecture's static folder.
    pub images: Vec<String>,
    /// PDF pages that produced a slide (blank pages excluded).
    pub page_count: usize,
    /// Slides remaining after overlay merging.
    pub slide_count: usize,
    pub duration_ms: u64,
}

/// Aggregate numbers for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_lectures: usize,
    pub converted_lectures: usize,
    pub failed_lectures: usize,
    pub total_slides: usize,
    pub total_images: usize,
    pub total_duration_ms: u64,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    pub lectures: Vec<LectureOutput>,
    /// Only populated when `fail_fast` is disabled.
    pub failures: Vec<LectureError>,
    pub stats: ConversionStats,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn lecture(&self, id: &str) -> Option<&LectureOutput> {
        self.lectures.iter().find(|l| l.lecture_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serialises_to_json() {
        let report = ConversionReport {
            lectures: vec![LectureOutput {
                lecture_id: "L1".into(),
                document: "---\n".into(),
                output_path: PathBuf::from("docs/lectures/l1.mdx"),
                images: vec!["tree.png".into()],
                page_count: 10,
                slide_count: 4,
                duration_ms: 12,
            }],
            failures: vec![LectureError {
                lecture_id: "L2".into(),
                message: "No slides parsed for L2".into(),
            }],
            stats: ConversionStats {
                total_lectures: 2,
                converted_lectures: 1,
                failed_lectures: 1,
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"lecture_id\":\"L1\""));
        assert!(json.contains("No slides parsed for L2"));
        assert!(!report.is_success());
        assert_eq!(report.lecture("L1").map(|l| l.slide_count), Some(4));

        let back: ConversionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stats, report.stats);
    }
}
