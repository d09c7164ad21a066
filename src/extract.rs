//! Title extraction: turns a submitted URL into a candidate [`Item`].
//!
//! One extractor is built at startup and shared by every channel.  It owns
//! the two things extraction needs — the fetch capability and the compiled
//! title pattern — so nothing here lives in ambient global state.
//!
//! The scan is deliberately strict: lowercase `<html`, then `<head`, then a
//! `<title>` whose closing tag sits on the same line.  Pages that shout
//! `<TITLE>` in uppercase, or spread the title over several lines, are
//! rejected rather than guessed at.

use anyhow::Result;
use regex::Regex;

use crate::error::ChannelError;
use crate::fetch::Fetcher;
use crate::item::Item;

/// The title pattern.  Compiled exactly once, in [`TitleExtractor::new`].
///
/// `(?s:.)` lets the stretches between tags span lines while the captured
/// title itself (`.*`) cannot, which is what pins the closing tag to the
/// title's own line.
const TITLE_PATTERN: &str = "(?:<html(?s:.)*<head(?s:.)*<title>)(.*)(?:</title>)";

/// Fetches a page and pulls its document title out.
pub struct TitleExtractor {
    fetcher: Box<dyn Fetcher>,
    title_re: Regex,
}

impl TitleExtractor {
    /// Wire the extractor to its fetch capability and compile the pattern.
    pub fn new(fetcher: Box<dyn Fetcher>) -> Result<Self> {
        Ok(Self {
            fetcher,
            title_re: Regex::new(TITLE_PATTERN)?,
        })
    }

    /// Fetch `url` and build an item from its title.
    ///
    /// Performs the one outbound fetch and nothing else: no shared state is
    /// touched, so a failure here leaves every channel exactly as it was.
    pub async fn extract(&self, url: &str) -> Result<Item, ChannelError> {
        let body = self
            .fetcher
            .fetch(url)
            .await
            .map_err(ChannelError::Fetch)?;
        let text = String::from_utf8_lossy(&body);
        let title = self.scan_title(&text).ok_or(ChannelError::NoTitle)?;
        Ok(Item::new(title, url))
    }

    /// Scan already-fetched text for a title and decode its HTML entities.
    ///
    /// Pure (no I/O), so tests can exercise the matching rules without a
    /// fetcher.
    fn scan_title(&self, body: &str) -> Option<String> {
        let captured = self.title_re.captures(body)?.get(1)?;
        Some(html_escape::decode_html_entities(captured.as_str()).into_owned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
