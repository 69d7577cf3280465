//! CLI binary for md2pdf-merge.
//!
//! A thin shim over the library crate that maps CLI flags to `MergeConfig`
//! and prints per-file progress.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf_merge::{
    merge, MergeConfig, MergeProgressCallback, PageSize, ProgressCallback, DEFAULT_OUTPUT,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback ────────────────────────────────────────────────────

/// Prints one `Processing file:` line per file and one error line per
/// skipped file. With a terminal attached it also keeps an [indicatif] bar
/// at the bottom, suspending it around each printed line.
struct CliProgressCallback {
    bar: Option<ProgressBar>,
    /// Send the per-file lines to stderr so stdout stays clean JSON.
    to_stderr: bool,
    /// Only error lines are printed.
    quiet: bool,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new(show_bar: bool, to_stderr: bool, quiet: bool) -> Arc<Self> {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.set_prefix("Scanning");
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        Arc::new(Self {
            bar,
            to_stderr,
            quiet,
            errors: AtomicUsize::new(0),
        })
    }

    fn line(&self, msg: String, is_error: bool) {
        let emit = || {
            if is_error || self.to_stderr {
                eprintln!("{msg}");
            } else {
                println!("{msg}");
            }
        };
        match &self.bar {
            Some(bar) => bar.suspend(emit),
            None => emit(),
        }
    }
}

impl MergeProgressCallback for CliProgressCallback {
    fn on_merge_start(&self, total_files: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total_files as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            bar.set_prefix("Merging");
        }
    }

    fn on_file_start(&self, _index: usize, _total: usize, path: &Path) {
        if self.quiet {
            return;
        }
        self.line(format!("Processing file: {}", path.display()), false);
        if let Some(bar) = &self.bar {
            bar.set_message(path.display().to_string());
        }
    }

    fn on_file_complete(&self, _index: usize, _total: usize, _path: &Path, _text_len: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_file_error(&self, _index: usize, _total: usize, _path: &Path, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.line(format!("{} {}", red("✗"), error), true);
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_merge_complete(&self, total_files: usize, merged: usize) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        let failed = self.errors.load(Ordering::SeqCst);
        if failed > 0 && !self.quiet {
            eprintln!(
                "{} {}/{} files merged  ({} skipped)",
                cyan("⚠"),
                bold(&merged.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Merge every .md under the current directory into merged_output.pdf
  md2pdf

  # Merge a docs tree into a named file
  md2pdf --input docs --output handbook.pdf

  # US Letter, smaller text
  md2pdf -i notes -o notes.pdf --page-size letter --font-size 10 --line-height 6

  # Machine-readable run summary
  md2pdf -i docs --json > stats.json

NOTES:
  Files are picked up by the exact, case-sensitive .md extension and merged in
  sorted depth-first order, one page (plus overflow pages) per file.
  Unreadable files are reported and skipped; an unreadable directory or an
  unwritable output path fails the whole run with a non-zero exit code.
"#;

/// Merge a directory tree of Markdown files into one PDF.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Merge a directory tree of Markdown files into one PDF",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input directory containing .md files.
    #[arg(short, long, env = "MD2PDF_INPUT", default_value = ".")]
    input: PathBuf,

    /// Output PDF file.
    #[arg(short, long, env = "MD2PDF_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Paper size: a4, letter, legal.
    #[arg(long, env = "MD2PDF_PAGE_SIZE", value_enum, default_value = "a4")]
    page_size: PageSizeArg,

    /// Font size in points (6–72).
    #[arg(long, env = "MD2PDF_FONT_SIZE", default_value_t = 12.0)]
    font_size: f32,

    /// Line height in millimetres.
    #[arg(long, env = "MD2PDF_LINE_HEIGHT", default_value_t = 10.0)]
    line_height: f32,

    /// Title stored in the PDF metadata.
    #[arg(long, env = "MD2PDF_TITLE", default_value = "Merged Markdown")]
    title: String,

    /// Print the run summary (MergeStats) as JSON on stdout.
    #[arg(long, env = "MD2PDF_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum PageSizeArg {
    A4,
    Letter,
    Legal,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::Legal => PageSize::Legal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The per-file lines already report skipped files, so library warnings
    // would only duplicate them; --verbose or RUST_LOG brings them back.
    let show_bar = !cli.quiet && !cli.no_progress && io::stderr().is_terminal();
    let filter = if cli.verbose { "debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: ProgressCallback = CliProgressCallback::new(show_bar, cli.json, cli.quiet);
    let config = build_config(&cli, progress_cb)?;

    // ── Run merge ────────────────────────────────────────────────────────
    let document = merge(&cli.input, &config).context("Merge failed")?;
    let stats = document
        .write_to(&cli.output)
        .context("Failed to write merged PDF")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        println!("Merged .md files into {}", cli.output.display());
        if show_bar {
            eprintln!(
                "{} {} files  →  {} pages  {}ms",
                green("✔"),
                stats.merged_files,
                stats.total_pages,
                stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `MergeConfig`.
fn build_config(cli: &Cli, progress: ProgressCallback) -> Result<MergeConfig> {
    MergeConfig::builder()
        .page_size(cli.page_size.clone().into())
        .font_size(cli.font_size)
        .line_height(cli.line_height)
        .title(cli.title.clone())
        .progress_callback(progress)
        .build()
        .context("Invalid configuration")
}
