//! In-memory host backed by a space snapshot

use super::{EntryCollection, EntryQuery, Host};
use crate::entry::{ContentType, Entry};
use crate::error::HostError;
use crate::prune::links_to;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Serializable dump of a space: content types, entries and editor context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSnapshot {
    /// Entry open in the editor
    pub current_entry_id: String,
    /// Default locale of the space
    pub default_locale: String,
    /// Content type descriptors
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    /// Entries, in host order
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl SpaceSnapshot {
    /// Parse a snapshot from JSON
    pub fn from_json(raw: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Render the snapshot as pretty JSON
    pub fn to_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// [`Host`] serving a [`SpaceSnapshot`] from memory.
///
/// Updates follow the platform's optimistic versioning: a submitted entry
/// carrying a version must match the stored one, and each write bumps it.
#[derive(Debug)]
pub struct MemoryHost {
    current_entry_id: String,
    default_locale: String,
    content_types: IndexMap<String, ContentType>,
    entries: RwLock<IndexMap<String, Entry>>,
}

impl MemoryHost {
    /// Create host from snapshot
    #[must_use]
    pub fn new(snapshot: SpaceSnapshot) -> Self {
        Self {
            current_entry_id: snapshot.current_entry_id,
            default_locale: snapshot.default_locale,
            content_types: snapshot
                .content_types
                .into_iter()
                .map(|ct| (ct.id().to_owned(), ct))
                .collect(),
            entries: RwLock::new(
                snapshot
                    .entries
                    .into_iter()
                    .map(|e| (e.id().to_owned(), e))
                    .collect(),
            ),
        }
    }

    /// Switch the entry considered open in the editor
    #[must_use]
    pub fn with_current_entry(mut self, entry_id: impl Into<String>) -> Self {
        self.current_entry_id = entry_id.into();
        self
    }

    /// Current state as a snapshot
    #[must_use]
    pub fn snapshot(&self) -> SpaceSnapshot {
        SpaceSnapshot {
            current_entry_id: self.current_entry_id.clone(),
            default_locale: self.default_locale.clone(),
            content_types: self.content_types.values().cloned().collect(),
            entries: self.entries.read().values().cloned().collect(),
        }
    }

    /// Stored entry, without going through the async API
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<Entry> {
        self.entries.read().get(id).cloned()
    }
}

#[async_trait]
impl Host for MemoryHost {
    async fn get_entry(&self, id: &str) -> Result<Entry, HostError> {
        self.entry(id).ok_or_else(|| HostError::not_found("Entry", id))
    }

    async fn update_entry(&self, mut entry: Entry) -> Result<Entry, HostError> {
        let mut entries = self.entries.write();
        let stored = entries
            .get_mut(entry.id())
            .ok_or_else(|| HostError::not_found("Entry", entry.id()))?;

        let current = stored.sys.version.unwrap_or(0);
        if let Some(submitted) = entry.sys.version {
            if submitted != current {
                return Err(HostError::VersionConflict {
                    id: entry.sys.id,
                    submitted,
                    current,
                });
            }
        }

        entry.sys.version = Some(current + 1);
        *stored = entry.clone();
        Ok(entry)
    }

    async fn get_content_type(&self, id: &str) -> Result<ContentType, HostError> {
        self.content_types
            .get(id)
            .cloned()
            .ok_or_else(|| HostError::not_found("ContentType", id))
    }

    async fn search_entries(&self, query: &EntryQuery) -> Result<EntryCollection, HostError> {
        let target = query.links_to_entry.as_str();
        let items: Vec<Entry> = self
            .entries
            .read()
            .values()
            .filter(|e| e.id() != target && links_to(target, e))
            .cloned()
            .collect();
        let total = items.len();
        Ok(EntryCollection {
            items,
            total,
            skip: 0,
            limit: total,
        })
    }

    fn current_entry_id(&self) -> &str {
        &self.current_entry_id
    }

    fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FieldValue;

    fn host() -> MemoryHost {
        MemoryHost::new(SpaceSnapshot {
            current_entry_id: "target".into(),
            default_locale: "en-US".into(),
            content_types: vec![ContentType::new("post", Some("title"))],
            entries: vec![
                Entry::new("target", "s", "post").with_version(1),
                Entry::new("a", "s", "post")
                    .with_version(2)
                    .with_field("refs", "en-US", FieldValue::Array(vec![FieldValue::entry_link("target")])),
                Entry::new("b", "s", "post").with_field("title", "en-US", FieldValue::text("B")),
                Entry::new("c", "s", "post").with_field("ref", "en-US", FieldValue::entry_link("target")),
            ],
        })
    }

    #[tokio::test]
    async fn search_returns_linking_entries_in_order() {
        let host = host();
        let found = host
            .search_entries(&EntryQuery::links_to_entry("target"))
            .await
            .unwrap();
        let ids: Vec<_> = found.items.iter().map(Entry::id).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(found.total, 2);
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let host = host();
        let entry = host.get_entry("a").await.unwrap();
        let stored = host.update_entry(entry).await.unwrap();
        assert_eq!(stored.sys.version, Some(3));
        assert_eq!(host.entry("a").unwrap().sys.version, Some(3));
    }

    #[tokio::test]
    async fn stale_update_conflicts() {
        let host = host();
        let stale = host.get_entry("a").await.unwrap();
        host.update_entry(stale.clone()).await.unwrap();

        let err = host.update_entry(stale).await.unwrap_err();
        assert_eq!(
            err,
            HostError::VersionConflict {
                id: "a".into(),
                submitted: 2,
                current: 3
            }
        );
    }

    #[tokio::test]
    async fn missing_resources() {
        let host = host();
        assert!(matches!(
            host.get_entry("nope").await,
            Err(HostError::NotFound { kind: "Entry", .. })
        ));
        assert!(matches!(
            host.get_content_type("nope").await,
            Err(HostError::NotFound { kind: "ContentType", .. })
        ));
        assert!(host.update_entry(Entry::new("nope", "s", "post")).await.is_err());
    }

    #[test]
    fn snapshot_json_round_trip() {
        let host = host();
        let json = host.snapshot().to_json().unwrap();
        let back = SpaceSnapshot::from_json(&json).unwrap();
        assert_eq!(back, host.snapshot());
    }
}
