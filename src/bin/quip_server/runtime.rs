use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use clap::Parser;
use tokio::sync::RwLock;

use crate::handlers::{get_posts, healthz, post_posts};
use crate::persistence::{Post, load_posts_from_disk, sample_posts};

#[derive(Parser)]
#[command(name = "quip-server")]
#[command(about = "Mock posts endpoint for quip (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Data directory for persisted posts
    #[arg(long, default_value = "./quip-data")]
    data_dir: PathBuf,

    /// Reject POST /posts with 503 (exercise the failed-push path)
    #[arg(long)]
    reject_writes: bool,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) data_dir: PathBuf,
    pub(crate) reject_writes: bool,
    pub(crate) posts: Arc<RwLock<Vec<Post>>>,
}

pub(crate) async fn run() -> Result<()> {
    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    // Survive restarts; fall back to the canned sample set.
    let posts = match load_posts_from_disk(&args.data_dir).context("load posts from disk")? {
        Some(posts) => posts,
        None => sample_posts(),
    };

    let state = Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        reject_writes: args.reject_writes,
        posts: Arc::new(RwLock::new(posts)),
    });

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/posts", get(get_posts).post(post_posts))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("quip-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
