//! The error type shared by channel operations.
//!
//! Everything a channel operation can fail with lives in one enum so that the
//! HTTP layer can render any failure with a single `Display` call.  Errors
//! raised while loading channel files at startup are deliberately *not* here:
//! those are fatal, never rendered to a client, and travel as `anyhow::Error`
//! with path context (see [`crate::store::load`]).

use thiserror::Error;

/// Failures surfaced by add/extract/persist operations on a channel.
///
/// The first three variants occur before any state is touched.  The last two
/// occur after the in-memory item sequence has already been extended — see
/// [`crate::channel::Channel::add_item`] for the resulting cache/index skew.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The outbound fetch could not reach or read the URL.
    #[error("fetch failed: {0}")]
    Fetch(anyhow::Error),

    /// The fetched page contains nothing the title pattern recognizes.
    #[error("no html title found")]
    NoTitle,

    /// The URL is already recorded in the channel's link set.
    #[error("URL already exists in the channel")]
    DuplicateLink,

    /// The channel state could not be serialized for persistence.
    #[error("failed to serialize channel: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The channel's backing file could not be written.
    #[error("failed to write channel file: {0}")]
    Write(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_user_facing_messages() {
        assert_eq!(ChannelError::NoTitle.to_string(), "no html title found");
        assert_eq!(
            ChannelError::DuplicateLink.to_string(),
            "URL already exists in the channel"
        );
    }

    #[test]
    fn fetch_variant_carries_the_cause() {
        let err = ChannelError::Fetch(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "fetch failed: connection refused");
    }

    #[test]
    fn io_errors_convert_into_write() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ChannelError = io.into();
        assert!(matches!(err, ChannelError::Write(_)));
    }
}
