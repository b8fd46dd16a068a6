//! Input resolution: find lecture folders and their PDFs.
//!
//! A lecture is a directory named `L<n>` under the source root, holding
//! `L<n>.pdf` plus any figures used by the LaTeX source.

use crate::error::Beamer2MdxError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

static RE_LECTURE_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^L\d+$").expect("valid lecture-dir regex"));

/// A discovered lecture folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    /// Folder name, e.g. `L3`.
    pub id: String,
    /// Path of the folder.
    pub dir: PathBuf,
}

impl Lecture {
    pub fn new(id: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            dir: dir.into(),
        }
    }

    /// Lecture number as written in the folder name (`L03` → `03`).
    pub fn number(&self) -> &str {
        self.id.trim_start_matches('L')
    }

    /// Document id used in front matter and the output file name.
    pub fn doc_id(&self) -> String {
        self.id.to_lowercase()
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.dir.join(format!("{}.pdf", self.id))
    }

    /// The lecture PDF, or [`Beamer2MdxError::MissingPdf`].
    pub fn resolve_pdf(&self) -> Result<PathBuf, Beamer2MdxError> {
        let path = self.pdf_path();
        if !path.is_file() {
            return Err(Beamer2MdxError::MissingPdf {
                lecture_id: self.id.clone(),
                path,
            });
        }
        debug!("Resolved lecture PDF: {}", path.display());
        Ok(path)
    }
}

/// Whether a folder name follows the `L<n>` convention.
pub fn is_lecture_dir_name(name: &str) -> bool {
    RE_LECTURE_DIR.is_match(name)
}

/// List the lecture folders under `source_dir`, sorted by name.
pub async fn discover_lectures(source_dir: &Path) -> Result<Vec<Lecture>, Beamer2MdxError> {
    let read_err = |e: std::io::Error| {
        Beamer2MdxError::Internal(format!(
            "Failed to list '{}': {}",
            source_dir.display(),
            e
        ))
    };

    if !tokio::fs::try_exists(source_dir).await.map_err(read_err)? {
        return Err(Beamer2MdxError::SourceDirNotFound {
            path: source_dir.to_path_buf(),
        });
    }

    let mut lectures = Vec::new();
    let mut entries = tokio::fs::read_dir(source_dir).await.map_err(read_err)?;
    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !is_lecture_dir_name(&name) {
            continue;
        }
        if entry.file_type().await.map_err(read_err)?.is_dir() {
            lectures.push(Lecture::new(name, entry.path()));
        }
    }
    lectures.sort_by(|a, b| a.id.cmp(&b.id));

    debug!(
        "Discovered {} lecture folders in {}",
        lectures.len(),
        source_dir.display()
    );
    Ok(lectures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lecture_dir_names() {
        assert!(is_lecture_dir_name("L1"));
        assert!(is_lecture_dir_name("L12"));
        assert!(!is_lecture_dir_name("L"));
        assert!(!is_lecture_dir_name("l1"));
        assert!(!is_lecture_dir_name("L1-old"));
        assert!(!is_lecture_dir_name("Lab2"));
    }

    #[test]
    fn test_lecture_derived_names() {
        let l = Lecture::new("L7", "/site/docs/Lectures/L7");
        assert_eq!(l.number(), "7");
        assert_eq!(l.doc_id(), "l7");
        assert_eq!(l.pdf_path(), PathBuf::from("/site/docs/Lectures/L7/L7.pdf"));
    }

    #[test]
    fn test_missing_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let l = Lecture::new("L1", dir.path());
        let err = l.resolve_pdf().unwrap_err();
        assert!(matches!(err, Beamer2MdxError::MissingPdf { ref lecture_id, .. } if lecture_id == "L1"));

        fs::write(dir.path().join("L1.pdf"), b"%PDF").unwrap();
        assert_eq!(l.resolve_pdf().unwrap(), dir.path().join("L1.pdf"));
    }

    #[tokio::test]
    async fn test_discover_sorted_dirs_only() {
        let root = tempfile::tempdir().unwrap();
        for name in ["L2", "L10", "L1", "notes", "Lx"] {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        fs::write(root.path().join("L3"), b"a file, not a folder").unwrap();

        let ids: Vec<String> = discover_lectures(root.path())
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["L1", "L10", "L2"]);
    }

    #[tokio::test]
    async fn test_discover_missing_root() {
        let err = discover_lectures(Path::new("/no/such/site/docs/Lectures"))
            .await
            .unwrap_err();
        assert!(matches!(err, Beamer2MdxError::SourceDirNotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_discover_unreadable_root_is_not_missing() {
        // A path below a regular file fails with ENOTDIR, not NotFound.
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("docs"), b"not a folder").unwrap();

        let err = discover_lectures(&root.path().join("docs").join("Lectures"))
            .await
            .unwrap_err();
        assert!(matches!(err, Beamer2MdxError::Internal(_)), "got: {err}");
    }
}
