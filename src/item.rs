//! The core data type: one entry of a curated channel.
//!
//! An `Item` is created exactly once — when a submitted URL survives fetch
//! and title extraction — and is immutable afterwards.  The struct doubles as
//! the persistence schema: serde field order below is the on-disk YAML field
//! order, and both the full-document and single-item serializers in
//! [`crate::store`] rely on it staying `title, link, description, date,
//! date_unix`.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Every item carries this description; the curator submits only a URL, so
/// there is no real summary to record.
pub const DESCRIPTION_PLACEHOLDER: &str = "None";

/// Wall-clock stamp with a numeric zone offset, e.g. `25 Aug 26 14:30 +0000`.
pub const DATE_FORMAT: &str = "%d %b %y %H:%M %z";

/// A single channel entry, stamped at creation time.
///
/// `link` is the deduplication key: a channel never holds two items with the
/// same link.  `date` and `date_unix` describe the same instant — the moment
/// the item was added, not anything parsed from the fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Extracted and entity-decoded page title.
    pub title: String,
    /// The submitted URL, verbatim.
    pub link: String,
    /// Always [`DESCRIPTION_PLACEHOLDER`].
    pub description: String,
    /// Human-readable creation stamp in [`DATE_FORMAT`].
    pub date: String,
    /// Epoch seconds of the same instant as `date`.
    pub date_unix: i64,
}

impl Item {
    /// Build an item for `link` titled `title`, stamped with the current
    /// local wall-clock time.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            title: title.into(),
            link: link.into(),
            description: DESCRIPTION_PLACEHOLDER.to_string(),
            date: now.format(DATE_FORMAT).to_string(),
            date_unix: now.timestamp(),
        }
    }

    /// Render this item as the `<item>` block used inside the channel
    /// document.
    ///
    /// Text fields are substituted verbatim — no XML escaping.  Markup in a
    /// page title lands in the feed as-is; feed readers of hand-curated
    /// channels have to live with that.
    pub fn to_xml(&self) -> String {
        format!(
            " <item>
  <title>{}</title>
  <description>{}</description>
  <link>{}</link>
  <pubDate>{}</pubDate>
 </item>
",
            self.title, self.description, self.link, self.date
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
