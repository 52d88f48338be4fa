mod api;
mod app;
mod config;
mod download;
mod input;
mod lyrics;
mod player;
mod tui;

use anyhow::Context;
use api::Source;
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "chroma", version, about = "Colorful music search/playback TUI")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Search tracks and print a page to stdout (headless).
    Search {
        query: String,
        /// Zero-based page number.
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        backend: Option<Backend>,
    },
    /// Resolve a track id to its stream URL (headless).
    Resolve {
        id: String,
        #[arg(long)]
        backend: Option<Backend>,
    },
    /// Print a track's LRC transcript (headless).
    Lyrics {
        id: String,
        #[arg(long)]
        backend: Option<Backend>,
    },
    /// Download a track into the downloads directory (headless).
    Download {
        id: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        backend: Option<Backend>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Primary,
    Backup,
}

impl From<Backend> for Source {
    fn from(b: Backend) -> Self {
        match b {
            Backend::Primary => Source::Primary,
            Backend::Backup => Source::Backup,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let mut terminal =
                tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Search {
            query,
            page,
            backend,
        } => {
            let (api, source) = make_client(&cfg, backend)?;
            let result = api.search(&query, page, source).await?;
            if result.total_pages == 0 {
                println!("No results.");
            } else {
                println!(
                    "Page {}/{} ({source}):",
                    result.page_index + 1,
                    result.total_pages
                );
                for (i, t) in result.tracks.iter().enumerate() {
                    println!("{:02}. {}  (id={})", i + 1, t.display_line(), t.id);
                }
            }
        }
        Command::Resolve { id, backend } => {
            let (api, source) = make_client(&cfg, backend)?;
            println!("{}", api.resolve(&id, source).await?);
        }
        Command::Lyrics { id, backend } => {
            let (api, source) = make_client(&cfg, backend)?;
            print!("{}", api.lyrics(&id, source).await?);
        }
        Command::Download {
            id,
            artist,
            title,
            backend,
        } => {
            let (api, source) = make_client(&cfg, backend)?;
            let track = api::Track {
                id,
                title,
                artist,
                album: None,
                source,
            };
            let path = download::download_track(&api, &track, &cfg.paths.downloads_dir).await?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

fn make_client(
    cfg: &config::Config,
    backend: Option<Backend>,
) -> anyhow::Result<(api::Client, Source)> {
    let api = api::Client::new(Duration::from_secs(cfg.search.timeout_secs))?;
    let source = backend.map(Source::from).unwrap_or(cfg.search.backend);
    Ok((api, source))
}
