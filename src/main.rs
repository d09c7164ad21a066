//! feedsmith — a small web service that grows hand-curated RSS channels
//! from submitted page URLs.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  lookup+lock  ┌─────────────┐  add_item_by_url  ┌────────────┐
//! │ server.rs │ ────────────► │ registry.rs │ ────────────────► │ channel.rs │
//! └───────────┘               └─────────────┘                   └─────┬──────┘
//!                                                                     │
//!                                               ┌─────────────────────┴──┐
//!                                               ▼                        ▼
//!                                         ┌────────────┐          ┌──────────┐
//!                                         │ extract.rs │          │ store.rs │
//!                                         │ + fetch.rs │          │  (YAML)  │
//!                                         └────────────┘          └──────────┘
//! ```
//!
//! * **`channel`** — the core entity: item list, dedup index, cached feed
//!   XML, and the mutation path that keeps them in step with the file.
//! * **`store`** — YAML persistence: startup load, full rewrite, and the
//!   append-compatible single-item fragment writer.
//! * **`extract`** — turns a URL into a candidate item by fetching the page
//!   and pulling out its HTML title.
//! * **`fetch`** — the outbound HTTP client, optionally routed through Tor.
//! * **`registry`** — startup directory scan and by-name channel lookup.
//! * **`server`** — axum routes: add form, submission, feed, static files.
//! * **`main`** — wires everything together: logging, CLI, scan, serve.

mod channel;
mod cli;
mod error;
mod extract;
mod fetch;
mod item;
mod registry;
mod server;
mod store;


use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::extract::TitleExtractor;
use crate::fetch::HttpFetcher;
use crate::registry::Registry;
use crate::server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with RUST_LOG support
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = cli::Cli::parse();

    info!(
        assets = ?cli.assets,
        data = ?cli.data,
        prefix = %cli.prefix,
        port = cli.port,
        torify = cli.torify,
        "feedsmith starting"
    );

    // -- outbound fetching ---------------------------------------------------
    let fetcher = HttpFetcher::new(cli.torify).context("failed to build the HTTP client")?;
    let extractor =
        TitleExtractor::new(Box::new(fetcher)).context("failed to build the title extractor")?;

    // -- channel discovery ---------------------------------------------------
    // Any unreadable or malformed channel file aborts startup here.
    info!("Reading channel files...");
    let registry = Registry::scan(&cli.data)?;
    if registry.is_empty() {
        warn!("No channel files found in {}", cli.data.display());
    } else {
        info!("Serving {} channels", registry.len());
    }

    // -- HTTP (blocks until shutdown) ----------------------------------------
    let state = AppState {
        registry: Arc::new(registry),
        extractor: Arc::new(extractor),
        prefix: cli.prefix.clone(),
    };
    server::run_server(cli.port, state, &cli.assets)
        .await
        .context("server error")?;

    Ok(())
}
