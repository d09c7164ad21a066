//! The channel aggregate: an ordered list of items plus the metadata and
//! caches that serve it.
//!
//! A [`Channel`] owns four views of the same data and keeps them in step:
//! the item list (append order), the on-disk YAML file, the pre-rendered
//! feed XML served to readers, and a set of member links for duplicate
//! rejection.  All mutation funnels through [`Channel::add_item`], which
//! persists before it updates the caches.  If persistence fails the item
//! list is left one entry ahead of the file and the caches; readers keep
//! seeing the last good feed until an operator repairs the file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::ChannelError;
use crate::extract::TitleExtractor;
use crate::item::{DATE_FORMAT, Item};
use crate::store::{self, ChannelDoc};

/// One hand-curated feed, loaded from a YAML file at startup.
#[derive(Debug)]
pub struct Channel {
    title: String,
    description: String,
    link: String,
    /// Oldest first.  Rendering reverses this so readers see newest first.
    items: Vec<Item>,
    path: PathBuf,
    name: String,
    /// Feed XML rendered at load time and after every successful add.
    xml: String,
    /// Links of every member item, for constant-time duplicate checks.
    link_set: HashSet<String>,
}

impl Channel {
    /// Build a live channel from its parsed file.
    ///
    /// The channel's public name is the file's base name up to the first
    /// dot, so `news.yaml` and `news.backup.yaml` both answer to `news`.
    pub(crate) fn from_doc(doc: ChannelDoc, path: PathBuf) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string();
        let link_set = doc.items.iter().map(|item| item.link.clone()).collect();
        let mut channel = Self {
            title: doc.title,
            description: doc.description,
            link: doc.link,
            items: doc.items,
            path,
            name,
            xml: String::new(),
            link_set,
        };
        channel.xml = channel.render_xml();
        channel
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The cached feed document, ready to serve.
    pub fn feed_xml(&self) -> &str {
        &self.xml
    }

    pub fn contains_link(&self, link: &str) -> bool {
        self.link_set.contains(link)
    }

    /// Append an item and persist it.
    ///
    /// The first item triggers a full file rewrite, which also provisions a
    /// file that does not exist yet; every later item is appended to the
    /// existing file without rereading it.  The feed cache and link set are
    /// only refreshed once the write succeeds.
    pub fn add_item(&mut self, item: &Item) -> Result<(), ChannelError> {
        self.items.push(item.clone());
        if self.items.len() == 1 {
            store::rewrite(self)?;
        } else {
            store::append_item(&self.path, item)?;
        }
        self.xml = self.render_xml();
        self.link_set.insert(item.link.clone());
        Ok(())
    }

    /// Fetch `url`, build an item from its page title, and add it.
    ///
    /// Rejects the URL before fetching when it is already a member.  Any
    /// failure after the duplicate check leaves the served feed unchanged.
    pub async fn add_item_by_url(
        &mut self,
        extractor: &TitleExtractor,
        url: &str,
    ) -> Result<Item, ChannelError> {
        if self.contains_link(url) {
            return Err(ChannelError::DuplicateLink);
        }
        let item = extractor.extract(url).await?;
        self.add_item(&item)?;
        Ok(item)
    }

    /// Render the RSS 2.0 document: header, items newest first, footer.
    ///
    /// `lastBuildDate` and `pubDate` are stamped with the wall clock at
    /// render time, not with any stored date.
    fn render_xml(&self) -> String {
        let date = Local::now().format(DATE_FORMAT).to_string();
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">
<channel>
 <title>{title}</title>
 <description>{description}</description>
 <link>{link}</link>
 <lastBuildDate>{date}</lastBuildDate>
 <pubDate>{date}</pubDate>

"#,
            title = self.title,
            description = self.description,
            link = self.link,
            date = date,
        );
        for item in self.items.iter().rev() {
            xml.push_str(&item.to_xml());
        }
        xml.push_str("</channel>\n</rss>");
        xml
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
