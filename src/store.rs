//! Channel persistence: startup load, full rewrite, incremental append.
//!
//! A channel lives in one YAML file.  Two serializers write it:
//!
//! * [`serialize_full`] renders the whole document (metadata plus every item
//!   in stored order) and backs [`rewrite`], which overwrites the file.
//! * [`serialize_item`] renders a one-element `items` fragment and backs
//!   [`append_item`], which tacks those bytes onto the end of the file
//!   without re-reading anything.
//!
//! The two must stay concatenation-compatible: appending a fragment to a
//! rewritten file has to produce, byte for byte, what a full rewrite with
//! that item would have produced.  The emitter guarantees this because block
//! sequences are never indented under their key, so an item renders
//! identically at the document's tail and on its own.  The tests below check
//! the bytes rather than trusting that reasoning.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::error::ChannelError;
use crate::item::Item;

/// On-disk shape of a channel file.
#[derive(Debug, Deserialize)]
pub(crate) struct ChannelDoc {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) link: String,
    /// A freshly provisioned channel file may omit the key entirely.
    #[serde(default)]
    pub(crate) items: Vec<Item>,
}

/// Borrowing view of a live channel, serialized by [`serialize_full`].
#[derive(Serialize)]
struct ChannelDocRef<'a> {
    title: &'a str,
    description: &'a str,
    link: &'a str,
    items: &'a [Item],
}

/// Load a channel from `path`.
///
/// Read or parse failures are fatal at startup, so they carry the offending
/// path as context instead of mapping into [`ChannelError`].
pub fn load(path: &Path) -> Result<Channel> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read channel file {}", path.display()))?;
    let doc: ChannelDoc = serde_yaml::from_str(&text)
        .with_context(|| format!("malformed channel file {}", path.display()))?;
    Ok(Channel::from_doc(doc, path.to_path_buf()))
}

/// Serialize the channel's entire current state and overwrite its file.
///
/// Used for the first item added to an empty channel, and usable as the
/// recovery path for any channel state.
pub fn rewrite(channel: &Channel) -> Result<(), ChannelError> {
    let yaml = serialize_full(channel)?;
    fs::write(channel.path(), yaml)?;
    Ok(())
}

/// Append one item's fragment to the end of an existing channel file.
///
/// The file is opened append-only and never read; the fragment's bytes
/// continue the document's `items` list.  The file must already exist — a
/// channel gets its first item via [`rewrite`].
pub fn append_item(path: &Path, item: &Item) -> Result<(), ChannelError> {
    let fragment = serialize_item(item)?;
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(fragment.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Render the whole channel document.  Ends with exactly one newline and no
/// padding after the last item, which is what keeps raw appends valid.
pub(crate) fn serialize_full(channel: &Channel) -> Result<String, ChannelError> {
    let doc = ChannelDocRef {
        title: channel.title(),
        description: channel.description(),
        link: channel.link(),
        items: channel.items(),
    };
    Ok(serde_yaml::to_string(&doc)?)
}

/// Render one item as a single-element list fragment, formatted exactly as
/// the full serializer renders the last element of `items`.
pub(crate) fn serialize_item(item: &Item) -> Result<String, ChannelError> {
    Ok(serde_yaml::to_string(&[item])?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
