//! Configuration types for lecture conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the layout of a
//! Docusaurus site run from its root directory:
//!
//! | Role | Default |
//! |------|---------|
//! | lecture sources | `docs/Lectures/L<n>/` |
//! | generated docs  | `docs/lectures/l<n>.mdx` |
//! | copied images   | `static/img/lectures/L<n>/` |
//! | image URLs      | `/img/lectures/L<n>/<file>` |

use crate::error::Beamer2MdxError;
use crate::pipeline::extract::TextExtractor;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default image extensions copied from lecture folders (lower-case, no dot).
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg"];

/// Configuration for a batch conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use beamer2mdx::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .site_root("website")
///     .code_language("tptp")
///     .fail_fast(false)
///     .build()
///     .unwrap();
/// assert!(config.source_dir.ends_with("docs/Lectures"));
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Folder containing one `L<n>` directory per lecture.
    pub source_dir: PathBuf,

    /// Folder receiving one generated document per lecture.
    pub output_dir: PathBuf,

    /// Folder receiving one image directory per lecture.
    pub static_dir: PathBuf,

    /// URL path under which `static_dir` is served. Default: `/img/lectures`.
    pub image_url_prefix: String,

    /// Extension of generated documents, without the dot. Default: `mdx`.
    pub output_extension: String,

    /// Language tag placed on fenced code blocks. Default: `tptp`.
    pub code_language: String,

    /// Image extensions (lower-case, no dot) copied from lecture folders.
    pub image_extensions: Vec<String>,

    /// Program used by the default [`crate::PdfToText`] extractor. Default: `pdftotext`.
    pub extractor_program: String,

    /// Arguments placed before the PDF path when running `extractor_program`,
    /// e.g. `["-enc", "UTF-8"]`. Default: none.
    pub extractor_args: Vec<String>,

    /// Pre-constructed extractor. Takes precedence over `extractor_program`.
    pub extractor: Option<Arc<dyn TextExtractor>>,

    /// Which lecture folders to convert. Default: all of them.
    pub lectures: LectureSelection,

    /// Abort the whole run on the first failing lecture. Default: true.
    ///
    /// When false, a failing lecture is recorded as a
    /// [`crate::error::LectureError`] in the report and the run moves on.
    pub fail_fast: bool,

    /// Optional per-lecture progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::for_site_root(".")
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("source_dir", &self.source_dir)
            .field("output_dir", &self.output_dir)
            .field("static_dir", &self.static_dir)
            .field("image_url_prefix", &self.image_url_prefix)
            .field("output_extension", &self.output_extension)
            .field("code_language", &self.code_language)
            .field("image_extensions", &self.image_extensions)
            .field("extractor_program", &self.extractor_program)
            .field("extractor_args", &self.extractor_args)
            .field("extractor", &self.extractor.as_ref().map(|_| "<dyn TextExtractor>"))
            .field("lectures", &self.lectures)
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Default configuration with every directory resolved against `root`.
    pub fn for_site_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            source_dir: root.join("docs").join("Lectures"),
            output_dir: root.join("docs").join("lectures"),
            static_dir: root.join("static").join("img").join("lectures"),
            image_url_prefix: "/img/lectures".to_string(),
            output_extension: "mdx".to_string(),
            code_language: "tptp".to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            extractor_program: "pdftotext".to_string(),
            extractor_args: Vec::new(),
            extractor: None,
            lectures: LectureSelection::default(),
            fail_fast: true,
            progress_callback: None,
        }
    }

    /// Whether `file_name` carries one of the configured image extensions.
    pub fn is_image(&self, file_name: &Path) -> bool {
        file_name
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.image_extensions.iter().any(|known| *known == e)
            })
            .unwrap_or(false)
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl fmt::Debug for ConversionConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl ConversionConfigBuilder {
    /// Re-derive the three directories from a site root.
    ///
    /// Call this before the per-directory setters, which override it.
    pub fn site_root(mut self, root: impl AsRef<Path>) -> Self {
        let derived = ConversionConfig::for_site_root(root);
        self.config.source_dir = derived.source_dir;
        self.config.output_dir = derived.output_dir;
        self.config.static_dir = derived.static_dir;
        self
    }

    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    pub fn image_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        self.config.image_url_prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        let ext: String = ext.into();
        self.config.output_extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn code_language(mut self, lang: impl Into<String>) -> Self {
        self.config.code_language = lang.into();
        self
    }

    pub fn image_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.image_extensions = exts
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn extractor_program(mut self, program: impl Into<String>) -> Self {
        self.config.extractor_program = program.into();
        self
    }

    pub fn extractor_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extractor_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.config.extractor = Some(extractor);
        self
    }

    pub fn lectures(mut self, selection: LectureSelection) -> Self {
        self.config.lectures = selection;
        self
    }

    pub fn fail_fast(mut self, v: bool) -> Self {
        self.config.fail_fast = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Beamer2MdxError> {
        let c = &self.config;
        if c.output_extension.is_empty() {
            return Err(Beamer2MdxError::InvalidConfig(
                "Output extension must not be empty".into(),
            ));
        }
        if c.extractor.is_none() && c.extractor_program.trim().is_empty() {
            return Err(Beamer2MdxError::InvalidConfig(
                "Extractor program must not be empty".into(),
            ));
        }
        if c.code_language.chars().any(char::is_whitespace) {
            return Err(Beamer2MdxError::InvalidConfig(format!(
                "Code language tag must be a single word, got {:?}",
                c.code_language
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which discovered lecture folders to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LectureSelection {
    /// Convert every `L<n>` folder (default).
    #[default]
    All,
    /// Convert only the named folders (matched case-insensitively).
    Only(Vec<String>),
}

impl LectureSelection {
    /// Whether the lecture with folder name `id` is selected.
    pub fn includes(&self, id: &str) -> bool {
        match self {
            LectureSelection::All => true,
            LectureSelection::Only(ids) => ids.iter().any(|wanted| wanted.eq_ignore_ascii_case(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_site() {
        let c = ConversionConfig::default();
        assert_eq!(c.source_dir, Path::new(".").join("docs").join("Lectures"));
        assert_eq!(c.output_dir, Path::new(".").join("docs").join("lectures"));
        assert_eq!(
            c.static_dir,
            Path::new(".").join("static").join("img").join("lectures")
        );
        assert_eq!(c.image_url_prefix, "/img/lectures");
        assert_eq!(c.output_extension, "mdx");
        assert_eq!(c.code_language, "tptp");
        assert_eq!(c.extractor_program, "pdftotext");
        assert!(c.extractor_args.is_empty());
        assert!(c.fail_fast);
    }

    #[test]
    fn builder_normalises_inputs() {
        let c = ConversionConfig::builder()
            .image_url_prefix("/assets/")
            .output_extension(".md")
            .image_extensions([".PNG", "webp"])
            .build()
            .unwrap();
        assert_eq!(c.image_url_prefix, "/assets");
        assert_eq!(c.output_extension, "md");
        assert_eq!(c.image_extensions, vec!["png", "webp"]);
    }

    #[test]
    fn explicit_dir_overrides_site_root() {
        let c = ConversionConfig::builder()
            .site_root("/srv/site")
            .output_dir("/tmp/out")
            .build()
            .unwrap();
        assert_eq!(c.source_dir, Path::new("/srv/site/docs/Lectures"));
        assert_eq!(c.output_dir, Path::new("/tmp/out"));
    }

    #[test]
    fn build_rejects_bad_values() {
        assert!(ConversionConfig::builder().output_extension("").build().is_err());
        assert!(ConversionConfig::builder().extractor_program(" ").build().is_err());
        assert!(ConversionConfig::builder().code_language("a b").build().is_err());
    }

    #[test]
    fn is_image_is_case_insensitive() {
        let c = ConversionConfig::default();
        assert!(c.is_image(Path::new("figure.PNG")));
        assert!(c.is_image(Path::new("tree.svg")));
        assert!(!c.is_image(Path::new("L1.pdf")));
        assert!(!c.is_image(Path::new("README")));
    }

    #[test]
    fn lecture_selection() {
        assert!(LectureSelection::All.includes("L9"));
        let only = LectureSelection::Only(vec!["l2".into(), "L5".into()]);
        assert!(only.includes("L2"));
        assert!(only.includes("L5"));
        assert!(!only.includes("L3"));
    }
}
