//! Startup discovery of channel files and by-name lookup at runtime.
//!
//! The registry is populated once, before the server starts listening, and
//! is immutable afterwards: new channels are provisioned by dropping a file
//! into the data directory and restarting.  Each channel sits behind its own
//! async mutex, so a slow fetch against one channel never blocks another.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;

use crate::channel::Channel;
use crate::store;

/// All channels the service knows about, keyed by channel name.
#[derive(Debug)]
pub struct Registry {
    channels: HashMap<String, Mutex<Channel>>,
}

impl Registry {
    /// Scan `data_dir` and load every channel file in it.
    ///
    /// Plain files with a `.yaml` or `.yml` extension count; anything else
    /// in the directory is ignored.  A single unreadable or malformed file
    /// fails the whole scan, so the process refuses to start half-loaded.
    pub fn scan(data_dir: &Path) -> Result<Self> {
        let mut channels = HashMap::new();
        let entries = fs::read_dir(data_dir)
            .with_context(|| format!("failed to read data directory {}", data_dir.display()))?;
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to scan data directory {}", data_dir.display()))?;
            let path = entry.path();
            let is_channel_file = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml" | "yml")
            );
            if !is_channel_file || path.is_dir() {
                continue;
            }
            let channel = store::load(&path)?;
            info!(
                "Loaded channel file {} with name: {}",
                path.display(),
                channel.name()
            );
            channels.insert(channel.name().to_string(), Mutex::new(channel));
        }
        Ok(Self { channels })
    }

    /// Look up a channel by name, yielding its guard for the caller to lock.
    pub fn get(&self, name: &str) -> Option<&Mutex<Channel>> {
        self.channels.get(name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_channel(dir: &Path, file: &str, title: &str) {
        fs::write(
            dir.join(file),
            format!("title: {title}\ndescription: d\nlink: http://l.example\nitems: []\n"),
        )
        .unwrap();
    }

    #[test]
    fn scan_loads_yaml_and_yml_and_skips_everything_else() {
        let dir = TempDir::new().unwrap();
        write_channel(dir.path(), "news.yaml", "News");
        write_channel(dir.path(), "links.yml", "Links");
        fs::write(dir.path().join("notes.txt"), "not a channel").unwrap();
        fs::write(dir.path().join("README"), "also not").unwrap();

        let registry = Registry::scan(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("news").is_some());
        assert!(registry.get("links").is_some());
        assert!(registry.get("notes").is_none());
    }

    #[test]
    fn scan_of_an_empty_directory_yields_no_channels() {
        let dir = TempDir::new().unwrap();
        let registry = Registry::scan(dir.path()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn scan_skips_directories_even_with_a_channel_extension() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("fake.yaml")).unwrap();
        write_channel(dir.path(), "real.yaml", "Real");

        let registry = Registry::scan(dir.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("real").is_some());
    }

    #[test]
    fn one_malformed_file_fails_the_whole_scan() {
        let dir = TempDir::new().unwrap();
        write_channel(dir.path(), "good.yaml", "Good");
        fs::write(dir.path().join("bad.yaml"), "title: [unclosed\n").unwrap();

        let err = Registry::scan(dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn scan_of_a_missing_directory_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");
        let err = Registry::scan(&missing).unwrap_err();
        assert!(err.to_string().contains("no-such-dir"));
    }

    #[test]
    fn channels_are_found_under_their_derived_names() {
        let dir = TempDir::new().unwrap();
        write_channel(dir.path(), "news.backup.yaml", "News");

        let registry = Registry::scan(dir.path()).unwrap();
        assert!(registry.get("news").is_some());
        assert!(registry.get("news.backup").is_none());
    }
}
