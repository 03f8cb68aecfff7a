//! CLI binary for pdf2img.
//!
//! A thin shim over the library crate: maps CLI flags to `ConversionConfig`,
//! runs one session and writes every artifact to the output directory.

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2img::{
    run_session, write_outputs, ConversionConfig, ConversionProgressCallback, Orientation,
    ProgressCallback, RequestContext,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
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

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner while pdfium renders, then a bar that ticks once per saved page.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(TICKS),
        );
        bar.set_prefix("Rendering");
        bar.set_message("Converting PDF to images…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(TICKS),
        );
        self.bar.set_length(total_pages as u64);
        self.bar.set_prefix("Saving");
    }

    fn on_page_saved(&self, page_num: usize, total: usize, path: &Path, width: u32, height: u32) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {:<12}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{width}x{height}")),
            dim(&path.file_name().unwrap_or_default().to_string_lossy()),
        ));
        self.bar.inc(1);
    }

    fn on_collage_ready(&self, width: u32, height: u32) {
        self.bar
            .println(format!("  {} Collage {}", green("✓"), dim(&format!("{width}x{height}"))));
    }

    fn on_conversion_complete(&self, total_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} pages converted successfully",
            green("✔"),
            bold(&total_pages.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every page, write artifacts to ./pdf2img-output
  pdf2img document.pdf

  # Choose the output directory and a vertical collage
  pdf2img document.pdf -o pages/ --orientation Vertical

  # Lower resolution for a quick preview
  pdf2img --dpi 96 slides.pdf

  # Machine-readable summary
  pdf2img --json document.pdf > summary.json

OUTPUT FILES:
  page_<N>.png           one PNG per page, 1-indexed
  converted_images.zip   every page_<N>.png in one archive
  collage.png            thumbnails of the first 4 pages

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to an existing libpdfium (skips the download)
  PDFIUM_SETUP_CACHE_DIR  Override the default pdfium cache directory

  PDFium (~30 MB) is downloaded automatically on first run and cached in
  ~/.cache/pdf2img/pdfium-7690/.
"#;

/// Convert PDF pages to PNG images, a ZIP archive and a collage.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2img",
    version,
    about = "Convert PDF pages to PNG images, a ZIP archive and a thumbnail collage",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Directory receiving page_<N>.png, converted_images.zip and collage.png.
    #[arg(short, long, env = "PDF2IMG_OUTPUT", default_value = "pdf2img-output")]
    output: PathBuf,

    /// Collage orientation.
    #[arg(long, env = "PDF2IMG_ORIENTATION", default_value = "Horizontal",
          value_parser = PossibleValuesParser::new(["Horizontal", "Vertical"]), ignore_case = true)]
    orientation: String,

    /// Rendering DPI (72–600).
    #[arg(long, env = "PDF2IMG_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Cap on the longest rendered edge in pixels.
    #[arg(long, env = "PDF2IMG_MAX_PIXELS")]
    max_pixels: Option<u32>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2IMG_PASSWORD")]
    password: Option<String>,

    /// Print a JSON summary of the written artifacts.
    #[arg(long, env = "PDF2IMG_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2IMG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2IMG_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2IMG_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
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

    // ── Ensure PDFium engine is available ────────────────────────────────
    // Without a cached copy the first run downloads the library (~30 MB).
    // A failure here is fatal: nothing can be rendered without it.
    if !pdf2img::is_backend_installed() && !cli.quiet {
        let dl_bar = ProgressBar::new(0);
        dl_bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {bytes}/{total_bytes}  ETA {eta_precise}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(TICKS),
        );
        dl_bar.set_prefix("PDF engine");
        dl_bar.enable_steady_tick(Duration::from_millis(80));

        let bar = dl_bar.clone();
        tokio::task::block_in_place(|| {
            pdf2img::ensure_backend(Some(&|downloaded, total| {
                if let Some(t) = total {
                    if bar.length().unwrap_or(0) != t {
                        bar.set_length(t);
                    }
                }
                bar.set_position(downloaded);
            }))
        })
        .context("Failed to install required dependency (PDFium)")?;

        dl_bar.finish_with_message("ready ✓");
    } else {
        tokio::task::block_in_place(|| pdf2img::ensure_backend(None))
            .context("Failed to install required dependency (PDFium)")?;
    }

    // ── Build request ────────────────────────────────────────────────────
    let orientation: Orientation = cli
        .orientation
        .to_lowercase()
        .parse()
        .context("Invalid --orientation")?;

    let pdf_bytes = tokio::fs::read(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let file_name = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let ctx = RequestContext::new(file_name, pdf_bytes, orientation);
    let output = run_session(ctx, &config)
        .await
        .context("Failed to convert PDF to images")?;

    let written = write_outputs(&output, &cli.output)
        .await
        .context("Failed to write output files")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output.summary())
            .context("Failed to serialise summary")?;
        println!("{json}");
    } else if !cli.quiet {
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            cyan("◆"),
            output.stats.total_pages,
            output.stats.total_duration_ms,
            bold(&cli.output.display().to_string()),
        );
        for path in &written {
            eprintln!("   {}", dim(&path.display().to_string()));
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder().dpi(cli.dpi);

    if let Some(px) = cli.max_pixels {
        builder = builder.max_rendered_pixels(px);
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
