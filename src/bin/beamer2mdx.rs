//! CLI binary for beamer2mdx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and prints results. Every flag has a default, so running
//! `beamer2mdx` from the site root converts all lectures.

use anyhow::{Context, Result};
use beamer2mdx::{
    convert_all, discover_lectures, inspect, ConversionConfig, ConversionProgressCallback,
    LectureSelection, ProgressCallback,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar across lectures plus a log line per
/// finished lecture.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Start time of the lecture currently being converted.
    started: Mutex<Option<Instant>>,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Scanning lecture folders…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            started: Mutex::new(None),
            errors: AtomicUsize::new(0),
        })
    }

    fn elapsed_secs(&self) -> f64 {
        self.started
            .lock()
            .ok()
            .and_then(|mut g| g.take())
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_lectures: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} lectures  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_lectures as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Converting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_lectures} lectures…"))
        ));
    }

    fn on_lecture_start(&self, lecture_id: &str, _index: usize, _total: usize) {
        if let Ok(mut started) = self.started.lock() {
            *started = Some(Instant::now());
        }
        self.bar.set_message(lecture_id.to_string());
    }

    fn on_lecture_complete(&self, lecture_id: &str, index: usize, total: usize, slides: usize) {
        let secs = self.elapsed_secs();
        self.bar.println(format!(
            "  {} {:<5} {:>3}/{:<3}  {}  {}",
            green("✓"),
            lecture_id,
            index,
            total,
            dim(&format!("{slides:>3} slides")),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_lecture_error(&self, lecture_id: &str, index: usize, total: usize, error: &str) {
        let secs = self.elapsed_secs();
        self.errors.fetch_add(1, Ordering::SeqCst);

        let first_line = error.lines().next().unwrap_or(error);
        self.bar.println(format!(
            "  {} {:<5} {:>3}/{:<3}  {}  {}",
            red("✗"),
            lecture_id,
            index,
            total,
            red(first_line),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, total_lectures: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = self.errors.load(Ordering::SeqCst);
        if failed == 0 {
            eprintln!(
                "{} {} lectures converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} lectures converted  ({} failed)",
                cyan("⚠"),
                bold(&success_count.to_string()),
                total_lectures,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every lecture, run from the Docusaurus site root
  beamer2mdx

  # Point at a site elsewhere
  beamer2mdx --site-root ../docusaurus-site

  # Only some lectures, keep going past failures
  beamer2mdx --lectures L3,L4 --keep-going

  # Show the merged slides of one lecture without writing anything
  beamer2mdx --inspect L3

  # Machine-readable summary
  beamer2mdx --json > report.json

LAYOUT (relative to --site-root):
  docs/Lectures/L<n>/L<n>.pdf    input deck (+ figures)
  docs/lectures/l<n>.mdx         generated page
  static/img/lectures/L<n>/      copied figures

REQUIREMENTS:
  pdftotext (poppler-utils) on PATH, or --extractor <program>.
  Pass tool options with --extractor-arg, e.g. --extractor-arg=-enc --extractor-arg=UTF-8
"#;

/// Convert beamer lecture PDFs into MDX documentation pages.
#[derive(Parser, Debug)]
#[command(
    name = "beamer2mdx",
    version,
    about = "Convert beamer lecture PDFs into MDX documentation pages",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Site root the default directories are resolved against.
    #[arg(long, env = "BEAMER2MDX_SITE_ROOT", default_value = ".")]
    site_root: PathBuf,

    /// Folder holding the L<n> lecture directories.
    #[arg(long, env = "BEAMER2MDX_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Folder receiving the generated documents.
    #[arg(short, long, env = "BEAMER2MDX_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Folder receiving one image directory per lecture.
    #[arg(long, env = "BEAMER2MDX_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// URL path under which the static image folder is served.
    #[arg(long, env = "BEAMER2MDX_IMAGE_URL_PREFIX", default_value = "/img/lectures")]
    image_url_prefix: String,

    /// Extension of generated documents.
    #[arg(long, env = "BEAMER2MDX_EXTENSION", default_value = "mdx")]
    extension: String,

    /// Language tag for fenced code blocks.
    #[arg(long, env = "BEAMER2MDX_CODE_LANGUAGE", default_value = "tptp")]
    code_language: String,

    /// PDF-to-text program, invoked as `<program> <pdf> -`.
    #[arg(long, env = "BEAMER2MDX_EXTRACTOR", default_value = "pdftotext")]
    extractor: String,

    /// Extra argument for the extractor, placed before the PDF path (repeatable).
    #[arg(long = "extractor-arg", value_name = "ARG", allow_hyphen_values = true)]
    extractor_args: Vec<String>,

    /// Comma-separated lecture folders to convert (default: all).
    #[arg(long, env = "BEAMER2MDX_LECTURES", value_delimiter = ',')]
    lectures: Vec<String>,

    /// Record failing lectures and continue instead of aborting.
    #[arg(long, env = "BEAMER2MDX_KEEP_GOING")]
    keep_going: bool,

    /// Print the merged slides of one lecture and exit.
    #[arg(long, value_name = "LECTURE")]
    inspect: Option<String>,

    /// Output the conversion report as JSON on stdout.
    #[arg(long, env = "BEAMER2MDX_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "BEAMER2MDX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "BEAMER2MDX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "BEAMER2MDX_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs when it is shown.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && cli.inspect.is_none();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if let Some(ref wanted) = cli.inspect {
        let lecture = discover_lectures(&config.source_dir)
            .await
            .context("Failed to scan lecture folders")?
            .into_iter()
            .find(|l| l.id.eq_ignore_ascii_case(wanted))
            .with_context(|| format!("No lecture folder named {wanted}"))?;
        let slides = inspect(&lecture, &config)
            .await
            .with_context(|| format!("Failed to inspect {}", lecture.id))?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&slides).context("Failed to serialise slides")?
            );
        } else {
            println!("Lecture:  {}", lecture.id);
            println!("PDF:      {}", lecture.pdf_path().display());
            println!("Slides:   {}", slides.len());
            for (i, slide) in slides.iter().enumerate() {
                println!("{:>4}. {}  {}", i + 1, slide.title, dim(&format!("({} lines)", slide.lines.len())));
            }
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    let report = convert_all(&config).await.context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        eprintln!(
            "Converted {}/{} lectures ({} slides, {} images) in {}ms",
            report.stats.converted_lectures,
            report.stats.total_lectures,
            report.stats.total_slides,
            report.stats.total_images,
            report.stats.total_duration_ms
        );
        for failure in &report.failures {
            eprintln!("  {} {}", red("✗"), failure);
        }
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} lectures failed",
            report.stats.failed_lectures,
            report.stats.total_lectures
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .site_root(&cli.site_root)
        .image_url_prefix(cli.image_url_prefix.clone())
        .output_extension(cli.extension.clone())
        .code_language(cli.code_language.clone())
        .extractor_program(cli.extractor.clone())
        .extractor_args(cli.extractor_args.iter().cloned())
        .lectures(parse_lectures(&cli.lectures))
        .fail_fast(!cli.keep_going);

    if let Some(ref dir) = cli.source_dir {
        builder = builder.source_dir(dir);
    }
    if let Some(ref dir) = cli.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(ref dir) = cli.static_dir {
        builder = builder.static_dir(dir);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--lectures` values into a `LectureSelection`.
fn parse_lectures(ids: &[String]) -> LectureSelection {
    let ids: Vec<String> = ids
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if ids.is_empty() || ids.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        LectureSelection::All
    } else {
        LectureSelection::Only(ids)
    }
}
