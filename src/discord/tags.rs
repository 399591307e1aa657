//! Resolution of forum tag IDs to display names.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::discord::client::DiscordClient;
use crate::discord::models::{ChannelMetadata, ForumTag, TagId};
use crate::error::ScrapeError;

/// Tag ID to display name lookup, built once per run.
#[derive(Debug, Clone, Default)]
pub struct TagMapping {
    names: HashMap<TagId, String>,
}

impl TagMapping {
    /// Build a mapping from tags in source order. Later duplicates win.
    #[must_use]
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = ForumTag>,
    {
        let names = tags.into_iter().map(|tag| (tag.id, tag.name)).collect();
        Self { names }
    }

    /// Display name for `id`, or `Unknown (<id>)` if the channel does not define it.
    #[must_use]
    pub fn resolve(&self, id: &TagId) -> Cow<'_, str> {
        self.names.get(id).map_or_else(
            || Cow::Owned(format!("Unknown ({id})")),
            |name| Cow::Borrowed(name.as_str()),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Fetch the channel's available tags.
///
/// No retry is attempted, including on 429.
///
/// # Errors
///
/// Returns [`ScrapeError::RemoteFetch`] on any non-2xx status, which callers
/// are expected to downgrade to an empty mapping. Transport and decode
/// failures are returned as-is.
pub async fn fetch_tag_mapping(
    client: &DiscordClient,
    channel_id: &str,
) -> Result<TagMapping, ScrapeError> {
    debug!(channel_id = %channel_id, "Fetching channel metadata");

    let response = client.get(&format!("/channels/{channel_id}"), &[]).await?;
    if !response.status.is_success() {
        return Err(ScrapeError::RemoteFetch {
            endpoint: response.endpoint,
            status: response.status,
        });
    }

    let metadata: ChannelMetadata = response.json()?;
    let mapping = TagMapping::from_tags(metadata.available_tags);
    info!(tags = mapping.len(), "Fetched tags from channel metadata");

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, name: &str) -> ForumTag {
        ForumTag {
            id: TagId::from(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_resolve_known_tag() {
        let mapping = TagMapping::from_tags([tag("1", "Bug"), tag("2", "Question")]);
        assert_eq!(mapping.resolve(&TagId::from("2")), "Question");
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_resolve_unknown_tag_falls_back() {
        let mapping = TagMapping::from_tags([tag("1", "Bug")]);
        assert_eq!(mapping.resolve(&TagId::from("999")), "Unknown (999)");
        assert_eq!(mapping.resolve(&TagId::from(5)), "Unknown (5)");
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let mapping = TagMapping::from_tags([tag("1", "Old"), tag("1", "New")]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.resolve(&TagId::from("1")), "New");
    }

    #[test]
    fn test_default_is_empty() {
        let mapping = TagMapping::default();
        assert!(mapping.is_empty());
        assert_eq!(mapping.resolve(&TagId::from("1")), "Unknown (1)");
    }
}
