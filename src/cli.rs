use clap::Parser;
use std::path::PathBuf;

/// feedsmith: grow hand-curated RSS channels from submitted page URLs
#[derive(Parser, Debug)]
#[command(name = "feedsmith")]
#[command(about = "Serve hand-curated RSS channels and add items to them by URL", long_about = None)]
pub struct Cli {
    /// Assets directory, with the served static files under static/
    #[arg(long)]
    pub assets: PathBuf,

    /// Data directory scanned for channel .yaml/.yml files at startup
    #[arg(long)]
    pub data: PathBuf,

    /// URL prefix mounted in front of every route, e.g. /rss
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Route outbound fetches through the local Tor SOCKS proxy
    #[arg(long, default_value_t = false)]
    pub torify: bool,
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
