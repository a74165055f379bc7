use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::sync::mpsc;

use shelf::app::{genre_index, App, AppEvent, GENRES};
use shelf::catalog::CatalogClient;
use shelf::config::{self, Config};
use shelf::ui;

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    version = shelf::VERSION,
    about = "Browse the Project Gutenberg catalog by genre"
)]
struct Args {
    /// Start on the book list for this genre
    #[arg(long, value_name = "NAME", conflicts_with = "browse")]
    genre: Option<String>,

    /// Start on the book list for all genres
    #[arg(long)]
    browse: bool,

    /// Catalog endpoint (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Config file (default: ~/.config/shelf/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file (default: ~/.config/shelf/shelf.log)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Resolve a genre given on the command line to its index in `GENRES`.
fn resolve_genre(name: &str) -> Result<usize> {
    genre_index(name).with_context(|| {
        format!(
            "Unknown genre '{}'. Available: {}",
            name,
            GENRES.join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Reject a bad --genre before touching the config directory.
    let start_genre = args.genre.as_deref().map(resolve_genre).transpose()?;

    let config_dir = config::config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
    }

    // The TUI owns the terminal, so logs go to a file.
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| config_dir.join("shelf.log"));
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let catalog = CatalogClient::new(
        &config.base_url,
        config.request_timeout(),
        config.max_response_bytes(),
    )
    .context("Failed to create catalog client")?;
    tracing::info!(
        version = shelf::VERSION,
        base_url = %catalog.base_url(),
        "Starting"
    );

    let mut app = App::new(catalog);

    let initial_request = if let Some(index) = start_genre {
        app.selected_genre = index;
        app.choose_genre()
    } else if args.browse {
        Some(app.choose_all_genres())
    } else {
        None
    };

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, initial_request, event_tx, event_rx).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_genre_ignores_case() {
        assert_eq!(resolve_genre("drama").unwrap(), 1);
        assert_eq!(resolve_genre("Philosophy").unwrap(), 4);
    }

    #[test]
    fn test_resolve_genre_unknown_lists_choices() {
        let err = resolve_genre("Poetry").unwrap_err().to_string();
        assert!(err.contains("Unknown genre 'Poetry'"));
        assert!(err.contains("Fiction, Drama"));
    }

    #[test]
    fn test_genre_conflicts_with_browse() {
        let result = Args::try_parse_from(["shelf", "--genre", "Drama", "--browse"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_parses_direct_entry_flags() {
        let args = Args::try_parse_from(["shelf", "--genre", "humour"]).unwrap();
        assert_eq!(args.genre.as_deref(), Some("humour"));
        assert!(!args.browse);

        let args = Args::try_parse_from(["shelf", "--browse", "--base-url", "http://localhost/books/"])
            .unwrap();
        assert!(args.browse);
        assert!(args.genre.is_none());
        assert_eq!(args.base_url.as_deref(), Some("http://localhost/books/"));
    }
}
