//! pagesize binary
//!
//! Reports page count, page sizes and size uniformity for PDF, text,
//! markdown and Excel files.

mod render;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use pagesize_core::{
    open_document, AnalysisCommand, AnalyzerConfig, FallbackPolicy, PageAnalyzer, PaperSize,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pagesize")]
#[command(version, about = "Page count, page size and size uniformity for documents")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file with analyzer settings; flags below override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-axis clustering tolerance in points
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Paper assumed for text, markdown and spreadsheet input (A4, Letter, ...)
    #[arg(long, global = true)]
    paper: Option<String>,

    /// Spreadsheet rows per printed page
    #[arg(long, global = true)]
    rows_per_page: Option<usize>,

    /// Fail instead of substituting A4 when a page size is unreadable
    #[arg(long, global = true)]
    no_fallback: bool,

    /// Swap width and height of PDF pages rotated by 90/270 degrees
    #[arg(long, global = true)]
    honor_rotation: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// List individual pages in text output only up to this many pages
    #[arg(long, global = true, default_value = "20")]
    detail_limit: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count pages
    Count { file: PathBuf },
    /// Per-page dimensions
    Info { file: PathBuf },
    /// Group pages by size
    Uniformity { file: PathBuf },
    /// Page count, common size and paper size
    Summary { file: PathBuf },
}

impl Command {
    fn file(&self) -> &Path {
        match self {
            Command::Count { file }
            | Command::Info { file }
            | Command::Uniformity { file }
            | Command::Summary { file } => file,
        }
    }

    fn to_analysis(&self, tolerance: Option<f64>) -> AnalysisCommand {
        match self {
            Command::Count { .. } => AnalysisCommand::CountPages,
            Command::Info { .. } => AnalysisCommand::PageInfo,
            Command::Uniformity { .. } => AnalysisCommand::Uniformity { tolerance },
            Command::Summary { .. } => AnalysisCommand::Summary,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries results; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;
    let path = args.command.file();
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path.file_name().and_then(|name| name.to_str());

    tracing::debug!("Analyzing {} ({} bytes)", path.display(), bytes.len());

    match args.format {
        OutputFormat::Json => {
            let command = args.command.to_analysis(args.tolerance);
            let result = pagesize_core::execute(&command, &bytes, filename, &config);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }
        OutputFormat::Text => {
            let source = open_document(&bytes, filename, &config)
                .with_context(|| format!("opening {}", path.display()))?;
            let analyzer = PageAnalyzer::new(source, config.clone());

            let output = match &args.command {
                Command::Count { .. } => render::count(analyzer.count_pages()?),
                Command::Info { .. } => {
                    render::page_info(&analyzer.get_page_info()?, args.detail_limit)
                }
                Command::Uniformity { .. } => {
                    render::uniformity(&analyzer.check_uniformity(config.tolerance_pt)?)
                }
                Command::Summary { .. } => render::summary(&analyzer.get_summary()?),
            };
            print!("{}", output);
            print!("{}", render::notes(&analyzer.notes()));
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AnalyzerConfig::default(),
    };

    if let Some(tolerance) = args.tolerance {
        config.tolerance_pt = tolerance;
    }
    if let Some(label) = &args.paper {
        match PaperSize::from_label(label) {
            Some(paper) => {
                config.estimate.default_paper = paper;
                config.estimate.custom_paper_mm = None;
            }
            None => bail!("unknown paper size: {}", label),
        }
    }
    if let Some(rows) = args.rows_per_page {
        config.estimate.rows_per_page = rows;
    }
    if args.no_fallback {
        config.fallback = FallbackPolicy::Propagate;
    }
    if args.honor_rotation {
        config.pdf.honor_rotation = true;
    }

    Ok(config)
}
