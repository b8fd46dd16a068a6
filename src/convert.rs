//! Conversion entry points: one lecture, or every lecture under the source root.
//!
//! Lectures are converted strictly one after another. With the default
//! `fail_fast = true` the first failing lecture aborts the run; lectures
//! finished before it keep their written outputs.

use crate::config::ConversionConfig;
use crate::error::{Beamer2MdxError, LectureError};
use crate::output::{ConversionReport, ConversionStats, LectureOutput};
use crate::pipeline::extract::{PdfToText, TextExtractor};
use crate::pipeline::input::{self, Lecture};
use crate::pipeline::{assemble, images, merge, parse};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every selected lecture under `config.source_dir`.
///
/// # Errors
/// - [`Beamer2MdxError::SourceDirNotFound`] before any work is done
/// - with `fail_fast`, the first lecture error (missing PDF, extractor
///   failure, no slides, I/O failure)
///
/// Without `fail_fast`, lecture errors are collected in
/// [`ConversionReport::failures`] and the call succeeds.
pub async fn convert_all(config: &ConversionConfig) -> Result<ConversionReport, Beamer2MdxError> {
    let total_start = Instant::now();
    let lectures: Vec<Lecture> = input::discover_lectures(&config.source_dir)
        .await?
        .into_iter()
        .filter(|l| config.lectures.includes(&l.id))
        .collect();
    let total = lectures.len();
    info!(
        "Converting {} lectures from {}",
        total,
        config.source_dir.display()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total);
    }

    let extractor = resolve_extractor(config);
    let mut report = ConversionReport::default();

    for (i, lecture) in lectures.iter().enumerate() {
        let index = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_lecture_start(&lecture.id, index, total);
        }

        match convert_with(extractor.as_ref(), lecture, config).await {
            Ok(out) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_lecture_complete(&lecture.id, index, total, out.slide_count);
                }
                report.lectures.push(out);
            }
            Err(e) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_lecture_error(&lecture.id, index, total, &e.to_string());
                }
                if config.fail_fast {
                    return Err(e);
                }
                warn!("Skipping {}: {}", lecture.id, e);
                report.failures.push(LectureError::new(&lecture.id, &e));
            }
        }
    }

    report.stats = ConversionStats {
        total_lectures: total,
        converted_lectures: report.lectures.len(),
        failed_lectures: report.failures.len(),
        total_slides: report.lectures.iter().map(|l| l.slide_count).sum(),
        total_images: report.lectures.iter().map(|l| l.images.len()).sum(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} lectures, {}ms total",
        report.stats.converted_lectures, total, report.stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(total, report.stats.converted_lectures);
    }

    Ok(report)
}

/// Convert a single lecture folder and write its document and images.
pub async fn convert_lecture(
    lecture: &Lecture,
    config: &ConversionConfig,
) -> Result<LectureOutput, Beamer2MdxError> {
    let extractor = resolve_extractor(config);
    convert_with(extractor.as_ref(), lecture, config).await
}

/// Synchronous wrapper around [`convert_all`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_all_sync(config: &ConversionConfig) -> Result<ConversionReport, Beamer2MdxError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Beamer2MdxError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert_all(config))
}

/// Extract, parse and merge a lecture PDF without writing anything.
pub async fn inspect(
    lecture: &Lecture,
    config: &ConversionConfig,
) -> Result<Vec<parse::Slide>, Beamer2MdxError> {
    let pdf_path = lecture.resolve_pdf()?;
    let raw = resolve_extractor(config).extract(&pdf_path).await?;
    Ok(merge::merge_overlays(parse::parse_slides(&raw)))
}

/// Path of the generated document for `lecture`.
pub fn output_path_for(lecture: &Lecture, config: &ConversionConfig) -> PathBuf {
    config
        .output_dir
        .join(format!("{}.{}", lecture.doc_id(), config.output_extension))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Use the injected extractor, else spawn `config.extractor_program` with
/// `config.extractor_args`.
fn resolve_extractor(config: &ConversionConfig) -> Arc<dyn TextExtractor> {
    match config.extractor {
        Some(ref extractor) => Arc::clone(extractor),
        None => Arc::new(
            PdfToText::new(config.extractor_program.clone())
                .with_args(config.extractor_args.iter().cloned()),
        ),
    }
}

async fn convert_with(
    extractor: &dyn TextExtractor,
    lecture: &Lecture,
    config: &ConversionConfig,
) -> Result<LectureOutput, Beamer2MdxError> {
    let start = Instant::now();
    info!("Converting {}", lecture.id);

    // ── Step 1: Extract text ─────────────────────────────────────────────
    let pdf_path = lecture.resolve_pdf()?;
    let raw = extractor.extract(&pdf_path).await?;

    // ── Step 2: Parse pages and merge overlays ───────────────────────────
    let pages = parse::parse_slides(&raw);
    let page_count = pages.len();
    let slides = merge::merge_overlays(pages);
    if slides.is_empty() {
        return Err(Beamer2MdxError::NoSlides {
            lecture_id: lecture.id.clone(),
        });
    }
    debug!(
        "{}: {} pages merged into {} slides",
        lecture.id,
        page_count,
        slides.len()
    );

    // ── Step 3: Copy images ──────────────────────────────────────────────
    let image_dir = config.static_dir.join(&lecture.id);
    let copied = images::copy_images(&lecture.dir, &image_dir, config).await?;
    debug!("{}: copied {} images", lecture.id, copied.len());

    // ── Step 4: Assemble and write ───────────────────────────────────────
    let document = assemble::assemble_document(lecture, &slides, &copied, config);
    let output_path = output_path_for(lecture, config);
    write_atomic(&output_path, &document).await?;

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Wrote {} ({} slides, {} images) in {}ms",
        output_path.display(),
        slides.len(),
        copied.len(),
        duration_ms
    );

    Ok(LectureOutput {
        lecture_id: lecture.id.clone(),
        document,
        output_path,
        images: copied,
        page_count,
        slide_count: slides.len(),
        duration_ms,
    })
}

/// Write to a sibling temp file, then rename over `path`.
async fn write_atomic(path: &Path, contents: &str) -> Result<(), Beamer2MdxError> {
    let write_err = |e| Beamer2MdxError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;
    Ok(())
}
