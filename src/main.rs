use anyhow::Result;
use clap::{Parser, ValueEnum};

use arxiv_fetch::config::{find_config_file, load_config, FetchConfig};
use arxiv_fetch::fetcher::ArxivFetcher;
use arxiv_fetch::models::{DownloadOutcome, SaveTarget};
use arxiv_fetch::namer::build_file_name;
use arxiv_fetch::progress::{ConsoleProgress, NullProgress, ProgressObserver};
use arxiv_fetch::ui;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// arxiv-fetch - Download a single arXiv paper by ID or URL
#[derive(Parser, Debug)]
#[command(name = "arxiv-fetch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download an arXiv paper and name it after its title", long_about = None)]
struct Cli {
    /// Paper reference: bare ID, abstract URL, or PDF URL
    reference: String,

    /// Custom file name (without extension); used verbatim when given
    #[arg(long, short)]
    filename: Option<String>,

    /// Directory to save into (created if missing)
    #[arg(long, short = 'd', default_value = ".")]
    save_dir: PathBuf,

    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Output format for the final result
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic (progress bar on a TTY, plain line prints otherwise)
    Auto,
    /// Plain text
    Plain,
    /// JSON (machine-readable)
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("arxiv_fetch={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        FetchConfig::default()
    };

    let fetcher = ArxivFetcher::with_config(config);

    let paper = match fetcher.resolve(&cli.reference) {
        Ok(paper) => paper,
        Err(err) => return report_failure(&cli, err.to_string()),
    };

    let title = fetcher.fetch_title(&paper).await;
    let chatty = !cli.quiet && cli.output != OutputFormat::Json;
    if chatty {
        ui::print_info(&format!("title: {}", title.text));
    }

    let stem = build_file_name(&title, cli.filename.as_deref(), &paper.id);
    let target = SaveTarget::new(&cli.save_dir, stem);
    if chatty {
        ui::print_info(&format!("fetching {}", paper.pdf_url));
        ui::print_info(&format!("saving to {}", target.path.display()));
    }

    let step = fetcher.config().progress_step_bytes;
    let bar;
    let console;
    let null = NullProgress;
    let observer: &dyn ProgressObserver = if cli.quiet {
        &null
    } else if std::io::stderr().is_terminal() && cli.output != OutputFormat::Json {
        bar = ui::DownloadBar::new();
        &bar
    } else {
        console = ConsoleProgress::new(step);
        &console
    };

    match fetcher.download(&paper, &target, observer).await {
        Ok(path) => {
            let bytes = tokio::fs::metadata(&path).await.map(|m| m.len()).unwrap_or(0);
            match cli.output {
                OutputFormat::Json => {
                    let outcome = DownloadOutcome::success(path.display().to_string(), bytes);
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                }
                _ => {
                    ui::print_success(&format!(
                        "saved to {} ({})",
                        path.display(),
                        ui::format_file_size(bytes)
                    ));
                }
            }
            Ok(())
        }
        Err(err) => report_failure(&cli, err.to_string()),
    }
}

/// Print the failure in the selected format and exit non-zero.
fn report_failure(cli: &Cli, cause: String) -> Result<()> {
    match cli.output {
        OutputFormat::Json => {
            let outcome = DownloadOutcome::error(&cause);
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome).unwrap_or_default()
            );
        }
        _ => ui::print_error(&format!("download failed: {}", cause)),
    }
    std::process::exit(1);
}
