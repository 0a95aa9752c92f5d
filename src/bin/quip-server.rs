//! Development stand-in for the remote posts collection: a minimal
//! jsonplaceholder-style service quip syncs against in tests and demos.

#[path = "quip_server/runtime.rs"]
mod runtime;
#[path = "quip_server/handlers.rs"]
mod handlers;
#[path = "quip_server/persistence.rs"]
mod persistence;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
