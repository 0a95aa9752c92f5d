use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use quip::board::QuoteBoard;
use quip::filter::FilterState;
use quip::model::{RemoteConfig, default_page_limit};
use quip::present::{ConsolePresenter, Presenter};
use quip::remote::RemoteClient;
use quip::store::{ALL_CATEGORIES, QuoteStore};
use quip::sync::SyncEngine;

#[derive(Parser)]
#[command(name = "quip")]
#[command(about = "Local quote board with remote sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a board (.quip)
    Init {
        /// Re-initialize if .quip already exists
        #[arg(long)]
        force: bool,
        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Add a quote to the board
    Add {
        text: String,
        category: String,
    },

    /// Show one random quote
    Show {
        /// Restrict to a category (defaults to the saved filter)
        #[arg(long)]
        category: Option<String>,
    },

    /// List quotes
    List {
        /// Restrict to a category
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List distinct categories
    Categories {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or set the saved category filter
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },

    /// Import quotes from a JSON file
    Import {
        file: PathBuf,
    },

    /// Export quotes to a JSON file
    Export {
        file: PathBuf,
    },

    /// Configure or show the remote
    Remote {
        #[command(subcommand)]
        command: RemoteCommands,
    },

    /// Run one fetch-merge cycle against the remote now
    Sync,

    /// Push all local-origin quotes to the remote
    Push,

    /// Re-attempt queued failed pushes
    Retry,

    /// Run the periodic sync loop (fetch every interval, retry every 2x)
    Watch {
        /// Override the configured sync interval, in seconds
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[derive(Subcommand)]
enum FilterCommands {
    /// Show the saved filter
    Show,
    /// Set and save the filter
    Set { category: String },
}

#[derive(Subcommand)]
enum RemoteCommands {
    /// Show the configured remote
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Set the configured remote
    Set {
        #[arg(long)]
        url: String,
        /// Page size for fetch cycles
        #[arg(long, default_value_t = default_page_limit())]
        limit: usize,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let presenter = ConsolePresenter;

    match cli.command {
        Commands::Init { force, path } => {
            let root = path.unwrap_or(std::env::current_dir().context("get current dir")?);
            QuoteBoard::init(&root, force)?;
            println!("Initialized quip board at {}", root.display());
        }

        Commands::Add { text, category } => {
            let board = discover()?;
            let quote = board.add_quote(&text, &category)?;
            println!("Quote added.");
            push_after_mutation(&board, &presenter, &[quote])?;
            board.refresh_saved(&presenter)?;
        }

        Commands::Show { category } => {
            let board = discover()?;
            let category = match category {
                Some(c) => c,
                None => {
                    let categories = board.store.categories()?;
                    let mut filter = FilterState::new(&board.store);
                    filter.restore(&categories)?;
                    filter.current().to_string()
                }
            };
            board.show_random(&presenter, &category)?;
        }

        Commands::List { category, json } => {
            let board = discover()?;
            let quotes = board.store.list_by_category(&category)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&quotes).context("serialize quotes json")?
                );
            } else {
                for q in quotes {
                    println!("[{}] {}", q.category, q.text);
                }
            }
        }

        Commands::Categories { json } => {
            let board = discover()?;
            let categories = board.store.categories()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&categories)
                        .context("serialize categories json")?
                );
            } else {
                presenter.render_categories(&categories);
            }
        }

        Commands::Filter { command } => {
            let board = discover()?;
            match command {
                FilterCommands::Show => {
                    let saved = board
                        .store
                        .get_last_filter()?
                        .unwrap_or_else(|| ALL_CATEGORIES.to_string());
                    println!("{}", saved);
                }
                FilterCommands::Set { category } => {
                    let mut filter = FilterState::new(&board.store);
                    filter.select(&category)?;
                    board.show_random(&presenter, filter.current())?;
                }
            }
        }

        Commands::Import { file } => {
            let board = discover()?;
            let imported = board.import_from_json_file(&file)?;
            println!("Imported {} quotes.", imported.len());
            push_after_mutation(&board, &presenter, &imported)?;
            board.refresh_saved(&presenter)?;
        }

        Commands::Export { file } => {
            let board = discover()?;
            let count = board.export_to_json_file(&file)?;
            println!("Exported {} quotes to {}", count, file.display());
        }

        Commands::Remote { command } => {
            let board = discover()?;
            match command {
                RemoteCommands::Show { json } => {
                    let cfg = board.store.read_config()?;
                    if json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&cfg.remote)
                                .context("serialize remote json")?
                        );
                    } else if let Some(remote) = cfg.remote {
                        println!("url: {}", remote.base_url);
                        println!("limit: {}", remote.page_limit);
                    } else {
                        println!("No remote configured");
                    }
                }
                RemoteCommands::Set { url, limit } => {
                    let mut cfg = board.store.read_config()?;
                    cfg.remote = Some(RemoteConfig {
                        base_url: url,
                        page_limit: limit,
                    });
                    board.store.write_config(&cfg)?;
                    println!("Remote configured");
                }
            }
        }

        Commands::Sync => {
            let board = discover()?;
            let engine = engine_for(&board.store)?;
            let outcome = engine.run_fetch_cycle()?;
            presenter.notify(&format!(
                "Synced with server: {} new, {} conflicts resolved.",
                outcome.added, outcome.resolved
            ));
            if outcome.changed() {
                board.refresh_saved(&presenter)?;
            }
        }

        Commands::Push => {
            let board = discover()?;
            let engine = engine_for(&board.store)?;
            let quotes = engine.pushable_quotes()?;
            let outcome = engine.run_push_cycle(&quotes)?;
            presenter.notify(&format!(
                "Pushed {} quotes, {} queued for retry.",
                outcome.pushed, outcome.queued
            ));
        }

        Commands::Retry => {
            let board = discover()?;
            let engine = engine_for(&board.store)?;
            let outcome = engine.run_retry_cycle()?;
            presenter.notify(&format!(
                "Retried failed pushes: {} sent, {} still queued.",
                outcome.succeeded, outcome.remaining
            ));
        }

        Commands::Watch { interval_secs } => {
            let board = discover()?;
            let cfg = board.store.read_config()?;
            let engine = engine_for(&board.store)?;
            let interval = Duration::from_secs(interval_secs.unwrap_or(cfg.sync_interval_secs));
            println!("Watching (interval {}s, Ctrl-C to stop)", interval.as_secs());
            quip::watch::run(&board, &engine, &presenter, interval)?;
        }
    }

    Ok(())
}

fn discover() -> Result<QuoteBoard> {
    QuoteBoard::discover(&std::env::current_dir().context("get current dir")?)
}

fn require_remote(store: &QuoteStore) -> Result<RemoteConfig> {
    let cfg = store.read_config()?;
    cfg.remote
        .context("no remote configured (run `quip remote set --url ...`)")
}

fn engine_for(store: &QuoteStore) -> Result<SyncEngine> {
    let remote = require_remote(store)?;
    let client = RemoteClient::new(remote)?;
    Ok(SyncEngine::new(store.clone(), client))
}

/// Add and import trigger an immediate push when a remote is configured;
/// failures land in the retry queue, never abort the mutation.
fn push_after_mutation(
    board: &QuoteBoard,
    presenter: &dyn Presenter,
    quotes: &[quip::model::Quote],
) -> Result<()> {
    let cfg = board.store.read_config()?;
    let Some(remote) = cfg.remote else {
        return Ok(());
    };
    let client = RemoteClient::new(remote)?;
    let engine = SyncEngine::new(board.store.clone(), client);
    let outcome = engine.run_push_cycle(quotes)?;
    if outcome.queued > 0 {
        presenter.notify(&format!(
            "{} push(es) failed and were queued for retry.",
            outcome.queued
        ));
    }
    Ok(())
}
