//! The outbound fetch capability.
//!
//! [`Fetcher`] is the seam between title extraction and the network: the
//! extractor only ever sees `bytes or error`.  The one real implementation,
//! [`HttpFetcher`], wraps a single [`reqwest::Client`] built at startup —
//! optionally tunneled through Tor — and is shared for the life of the
//! process.  Tests substitute their own `Fetcher` and never touch the
//! network.

use anyhow::Result;
use async_trait::async_trait;

/// Where a torified client sends its traffic.  `socks5h` so the proxy, not
/// this process, resolves hostnames.
pub const TOR_PROXY: &str = "socks5h://127.0.0.1:9050";

/// Retrieves the raw body of a URL.
///
/// Implementations decide what counts as failure; the HTTP implementation
/// below only fails on transport problems, not on non-success status codes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return the response body bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP(S) fetcher over a process-wide [`reqwest::Client`].
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the client once.  With `torify`, all requests are routed through
    /// [`TOR_PROXY`].
    ///
    /// No request timeout is configured: a hanging fetch holds the calling
    /// channel's guard until the transport itself gives up.
    pub fn new(torify: bool) -> Result<Self> {
        let client = if torify {
            reqwest::Client::builder()
                .proxy(reqwest::Proxy::all(TOR_PROXY)?)
                .build()?
        } else {
            reqwest::Client::new()
        };
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        // A 404 or 500 page still has a body, and that body may still carry a
        // title; status codes are not checked here.
        let response = self.client.get(url).send().await?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
