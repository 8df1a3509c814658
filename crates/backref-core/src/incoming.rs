//! Incoming-link query
//!
//! Finds the entries linking to the current entry and projects them into
//! list items. Projections run concurrently but results keep host order.

use crate::entry::Entry;
use crate::error::{BackrefError, BackrefResult, ReadOp};
use crate::host::{EntryQuery, Host};
use crate::session::Backref;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

/// Entry shown in the incoming-links list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    /// Entry id
    pub id: String,
    /// Resolved title
    pub title: String,
    /// Space id
    pub space: String,
}

impl<H: Host> Backref<H> {
    /// Entries linking to the current entry, in host order
    pub async fn list_incoming_links(&self) -> BackrefResult<Vec<Entry>> {
        let query = EntryQuery::links_to_entry(self.current_entry_id());
        let collection = self
            .host
            .search_entries(&query)
            .await
            .map_err(|e| BackrefError::read(ReadOp::SearchEntries, e))?;

        tracing::debug!(
            entry = self.current_entry_id(),
            count = collection.items.len(),
            "incoming links listed"
        );
        Ok(collection.items)
    }

    /// Incoming links projected to `{id, title, space}`, in host order
    pub async fn incoming_link_items(&self) -> BackrefResult<Vec<LinkItem>> {
        let entries = self.list_incoming_links().await?;
        self.project_items(entries).await
    }

    /// Project entries to list items, at most `title_concurrency` at a time
    pub async fn project_items(&self, entries: Vec<Entry>) -> BackrefResult<Vec<LinkItem>> {
        stream::iter(entries)
            .map(|entry| self.project(entry))
            .buffered(self.config.title_concurrency.max(1))
            .try_collect()
            .await
    }

    async fn project(&self, entry: Entry) -> BackrefResult<LinkItem> {
        let title = self.resolve_title(&entry).await?;
        Ok(LinkItem {
            title,
            space: entry.sys.space.id,
            id: entry.sys.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ContentType, FieldValue};
    use crate::host::{MemoryHost, SpaceSnapshot};

    fn session() -> Backref<MemoryHost> {
        let linking = |id: &str, title: &str| {
            Entry::new(id, "space-1", "post")
                .with_field("title", "en", FieldValue::text(title))
                .with_field("related", "en", FieldValue::entry_link("me"))
        };
        Backref::new(MemoryHost::new(SpaceSnapshot {
            current_entry_id: "me".into(),
            default_locale: "en".into(),
            content_types: vec![ContentType::new("post", Some("title"))],
            entries: vec![
                linking("z", "Zeta"),
                Entry::new("me", "space-1", "post"),
                linking("a", "Alpha"),
                Entry::new("loner", "space-1", "post"),
                linking("m", "Mu"),
            ],
        }))
    }

    #[tokio::test]
    async fn items_follow_host_order() {
        let items = session().incoming_link_items().await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["z", "a", "m"]);
        assert_eq!(items[1].title, "Alpha");
        assert_eq!(items[1].space, "space-1");
    }

    #[tokio::test]
    async fn order_kept_with_single_slot() {
        let mut s = session();
        s.config.title_concurrency = 1;
        let items = s.incoming_link_items().await.unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Zeta", "Alpha", "Mu"]);
    }

    #[tokio::test]
    async fn nothing_links_here() {
        let s = Backref::new(session().into_host().with_current_entry("loner"));
        assert!(s.incoming_link_items().await.unwrap().is_empty());
    }
}
