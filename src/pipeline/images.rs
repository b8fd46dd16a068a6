//! Image copying: mirror a lecture's figures into the static asset tree.

use crate::config::ConversionConfig;
use crate::error::Beamer2MdxError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Stems like `l1`, `l12_fig` are left behind by an earlier TeX-to-HTML
/// pass and are not source figures.
static RE_GENERATED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^l\d+").expect("valid generated-asset regex"));

/// Whether a file name is a generated artefact (checked on the lower-cased stem).
pub fn is_generated_asset(file_name: &str) -> bool {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    RE_GENERATED.is_match(&stem.to_lowercase())
}

/// Replace `dest_dir` with a fresh copy of the images found in `src_dir`.
///
/// Files are visited in file-name order; the returned names follow that
/// order. Anything already in `dest_dir` is deleted first.
pub async fn copy_images(
    src_dir: &Path,
    dest_dir: &Path,
    config: &ConversionConfig,
) -> Result<Vec<String>, Beamer2MdxError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| Beamer2MdxError::ImageCopyFailed { path, source }
    };

    if tokio::fs::try_exists(dest_dir)
        .await
        .map_err(io_err(dest_dir))?
    {
        tokio::fs::remove_dir_all(dest_dir)
            .await
            .map_err(io_err(dest_dir))?;
    }
    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(io_err(dest_dir))?;

    let mut names: Vec<String> = Vec::new();
    let mut entries = tokio::fs::read_dir(src_dir).await.map_err(io_err(src_dir))?;
    while let Some(entry) = entries.next_entry().await.map_err(io_err(src_dir))? {
        let file_type = entry.file_type().await.map_err(io_err(&entry.path()))?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();

    let mut copied = Vec::new();
    for name in names {
        if !config.is_image(Path::new(&name)) || is_generated_asset(&name) {
            continue;
        }
        let dest = dest_dir.join(&name);
        tokio::fs::copy(src_dir.join(&name), &dest)
            .await
            .map_err(io_err(&dest))?;
        debug!("Copied image {}", dest.display());
        copied.push(name);
    }

    Ok(copied)
}

/// Alt text for an image: stem with `_`/`-` as spaces, title-cased.
pub fn alt_text(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    title_case(&stem.replace(['_', '-'], " "))
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn generated_assets() {
        assert!(is_generated_asset("l1_diagram.png"));
        assert!(is_generated_asset("L12.svg"));
        assert!(!is_generated_asset("lemma.png"));
        assert!(!is_generated_asset("figure.png"));
    }

    #[test]
    fn alt_text_is_title_cased() {
        assert_eq!(alt_text("proof_search-tree.png"), "Proof Search Tree");
        assert_eq!(alt_text("SAT_solver.jpg"), "Sat Solver");
        assert_eq!(alt_text("fig2a.svg"), "Fig2A");
    }

    #[tokio::test]
    async fn copies_only_source_images() {
        let src = tempfile::tempdir().unwrap();
        let dest_root = tempfile::tempdir().unwrap();
        let dest = dest_root.path().join("L1");

        fs::write(src.path().join("l1_diagram.png"), b"gen").unwrap();
        fs::write(src.path().join("figure.png"), b"fig").unwrap();
        fs::write(src.path().join("L1.pdf"), b"%PDF").unwrap();
        fs::write(src.path().join("L1.tex"), b"\\begin").unwrap();
        fs::create_dir(src.path().join("nested.png")).unwrap();

        let copied = copy_images(src.path(), &dest, &ConversionConfig::default())
            .await
            .unwrap();
        assert_eq!(copied, vec!["figure.png"]);
        assert_eq!(fs::read(dest.join("figure.png")).unwrap(), b"fig");
        assert!(!dest.join("l1_diagram.png").exists());
    }

    #[tokio::test]
    async fn destination_is_replaced_and_sorted() {
        let src = tempfile::tempdir().unwrap();
        let dest_root = tempfile::tempdir().unwrap();
        let dest = dest_root.path().join("nested").join("L2");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.png"), b"old").unwrap();

        fs::write(src.path().join("b.JPG"), b"b").unwrap();
        fs::write(src.path().join("a.gif"), b"a").unwrap();

        let copied = copy_images(src.path(), &dest, &ConversionConfig::default())
            .await
            .unwrap();
        assert_eq!(copied, vec!["a.gif", "b.JPG"]);
        assert!(!dest.join("stale.png").exists());
    }

    #[tokio::test]
    async fn missing_source_is_an_error() {
        let dest_root = tempfile::tempdir().unwrap();
        let err = copy_images(
            Path::new("/no/such/lecture"),
            &dest_root.path().join("L9"),
            &ConversionConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Beamer2MdxError::ImageCopyFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_destination_is_reported() {
        let src = tempfile::tempdir().unwrap();
        let dest_root = tempfile::tempdir().unwrap();
        fs::write(dest_root.path().join("static"), b"not a folder").unwrap();
        let dest = dest_root.path().join("static").join("L1");

        let err = copy_images(src.path(), &dest, &ConversionConfig::default())
            .await
            .unwrap_err();
        assert!(
            matches!(err, Beamer2MdxError::ImageCopyFailed { ref path, .. } if *path == dest),
            "got: {err}"
        );
    }
}
