mod style;
mod terminal;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use subex_client::{ClientError, SubexClient, SubtitleLine, track};
use subex_config::{ConfigError, SubexConfig};
use subex_page::ListFilter;
use subex_status::StatusRenderer;
use tracing_subscriber::EnvFilter;

use terminal::{STATUS_ID, TerminalContainer, TerminalPage};

#[derive(Parser)]
#[command(name = "subex", version)]
struct Cli {
    /// Path to a subex.toml (default: ./subex.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL, overriding the config file
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Extract a subtitle track from a video on the server
    Extract {
        /// Video path relative to the server's media root
        video: String,

        /// Subtitle track index
        track: u32,

        /// Print the longer session preview after extracting
        #[arg(long)]
        preview: bool,

        /// Download the full subtitle to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the lines from stdin that contain QUERY (case-insensitive)
    Filter {
        query: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum SubexError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("could not read stdin: {0}")]
    Stdin(std::io::Error),
    #[error("{0}")]
    Setup(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // On a terminal, client errors were already drawn on the status line.
            if !matches!(e, SubexError::Client(_)) || !console::Term::stderr().is_term() {
                eprintln!("{} {e}", style::error_prefix());
            }
            ExitCode::from(exit_code(&e))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SUBEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), SubexError> {
    match cli.command {
        Commands::Extract {
            video,
            track,
            preview,
            output,
        } => {
            let config = load_config(cli.config.as_deref(), cli.server)?;
            extract(&config, &video, track, preview, output.as_deref()).await
        }
        Commands::Filter { query } => filter_stdin(&query),
    }
}

fn load_config(path: Option<&Path>, server: Option<String>) -> Result<SubexConfig, SubexError> {
    let mut config = match path {
        Some(path) => subex_config::load_file(path)?,
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| SubexError::Setup(format!("could not read current directory: {e}")))?;
            subex_config::load(&cwd)?.unwrap_or_default()
        }
    };
    if let Some(server) = server {
        config.server.base_url = server;
        subex_config::validate(&config)?;
    }
    tracing::debug!(base_url = %config.server.base_url, "config loaded");
    Ok(config)
}

async fn extract(
    config: &SubexConfig,
    video: &str,
    track_index: u32,
    preview: bool,
    output: Option<&Path>,
) -> Result<(), SubexError> {
    let client = SubexClient::new(&config.server.base_url, config.server.timeout())
        .map_err(|e| SubexError::Setup(e.to_string()))?;
    let page = TerminalPage::new(TerminalContainer::stderr());
    let renderer = StatusRenderer::new(page.clone());

    let extracted = track(
        &renderer,
        STATUS_ID,
        &format!("Extracting track {track_index} from {video}…"),
        client.extract_subtitle(video, track_index),
    )
    .await?;
    page.status()
        .finish_ok(&format!("Extracted {} lines", extracted.lines_count));

    if preview {
        let preview = track(
            &renderer,
            STATUS_ID,
            "Loading preview…",
            client.subtitle_preview(),
        )
        .await?;
        page.status().finish_ok(&format!(
            "Showing {} of {} lines",
            preview.lines.len(),
            preview.total_lines
        ));
        print_lines(&preview.lines);
    } else {
        print_lines(&extracted.preview);
    }

    if let Some(output) = output {
        let text = track(
            &renderer,
            STATUS_ID,
            "Downloading subtitle…",
            client.download_subtitle(),
        )
        .await?;
        std::fs::write(output, &text).map_err(|e| SubexError::Write {
            path: output.display().to_string(),
            source: e,
        })?;
        page.status()
            .finish_ok(&format!("Saved {}", output.display()));
    }

    Ok(())
}

fn print_lines(lines: &[SubtitleLine]) {
    for line in lines {
        let range = style::timestamp(&line.time_range());
        if line.character.is_empty() {
            println!("{range}  {}", line.text);
        } else {
            println!("{range}  {} {}", style::dim(&line.character), line.text);
        }
    }
}

fn filter_stdin(query: &str) -> Result<(), SubexError> {
    let lines = std::io::stdin()
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(SubexError::Stdin)?;
    let filter = ListFilter::new(&lines);
    for index in filter.matches(query) {
        println!("{}", lines[index]);
    }
    Ok(())
}

fn exit_code(err: &SubexError) -> u8 {
    match err {
        SubexError::Config(_) => 2,
        SubexError::Client(ClientError::Api { .. } | ClientError::NoSession) => 3,
        SubexError::Client(ClientError::Http(_) | ClientError::Parse(_)) => 4,
        SubexError::Write { .. } | SubexError::Stdin(_) => 5,
        SubexError::Setup(_) => 1,
    }
}
