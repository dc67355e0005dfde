//! tokenboard - track AI coding assistant usage on a local leaderboard

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tokenboard::cli::{Cli, Command};
use tokenboard::output;
use tokenboard::service::{UploadRequest, UploadService};
use tokenboard::{MemoryStore, Result, TokenboardError};
use tokenboard_store::{LeaderboardQuery, LeaderboardStore};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn data_file_path(cli: &Cli) -> PathBuf {
    cli.data_file.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tokenboard")
            .join("leaderboard.json")
    })
}

fn read_report(file: &PathBuf) -> Result<(String, u64)> {
    let size = fs::metadata(file)?.len();
    let content = fs::read_to_string(file)?;
    Ok((content, size))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tokenboard=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !is_terminal::is_terminal(std::io::stdout()) {
        colored::control::set_override(false);
    }

    let data_file = data_file_path(&cli);

    match cli.command {
        Command::Preview { ref file } => {
            let (content, size) = read_report(file)?;
            let service = UploadService::new(MemoryStore::new());
            let preview = service.preview(&content, Some(size))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&preview.report)?);
            } else {
                println!("{}", output::format_preview(&preview));
            }
        }

        Command::Ingest {
            ref file,
            ref name,
            tool,
            visibility,
            ref x_handle,
        } => {
            let (content, size) = read_report(file)?;
            let store = MemoryStore::load(&data_file)?;
            let service = UploadService::new(store);

            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let outcome = service.handle_upload(UploadRequest {
                // Local ingestion has a single client identity
                client_key: "local".to_string(),
                filename,
                content,
                declared_size: Some(size),
                display_name: name.clone(),
                visibility: visibility.into(),
                source_tool: tool.into(),
                x_handle: x_handle.clone(),
            })?;

            service.store().save(&data_file)?;
            info!(path = %data_file.display(), "snapshot saved");

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome.user)?);
            } else {
                println!("{}", output::format_upload_outcome(&outcome));
            }
        }

        Command::Leaderboard {
            sort,
            tool,
            ref model,
            ref search,
            limit,
            offset,
        } => {
            let store = MemoryStore::load(&data_file)?;
            let mut query = LeaderboardQuery::default()
                .with_sort(sort.into())
                .with_limit(limit)
                .with_offset(offset);
            if let Some(tool) = tool {
                query = query.with_tool(tool.into());
            }
            if let Some(model) = model {
                query = query.with_model(model.clone());
            }
            if let Some(search) = search {
                query = query.with_search(search.clone());
            }

            let entries = store.leaderboard(&query)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", output::format_leaderboard(&entries));
            }
        }

        Command::Models { limit } => {
            let store = MemoryStore::load(&data_file)?;
            let stats = store.model_leaderboard(limit)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", output::format_model_stats(&stats));
            }
        }

        Command::User { ref slug } => {
            let store = MemoryStore::load(&data_file)?;
            match store.user_by_slug(slug)? {
                Some(user) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&user)?);
                    } else {
                        println!("{}", output::format_user(&user));
                    }
                }
                None => {
                    return Err(TokenboardError::InvalidRequest(format!(
                        "No user with slug '{slug}'"
                    )));
                }
            }
        }
    }

    Ok(())
}
