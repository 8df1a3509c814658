//! Unlink orchestration
//!
//! fetch target → drop links to the current entry → submit. Reads are strict.
//! The submit is at-most-once with no retry; [`Backref::unlink`] logs and
//! swallows its failure, [`Backref::try_unlink`] returns it.

use crate::entry::Entry;
use crate::error::{BackrefError, BackrefResult, HostError, ReadOp};
use crate::host::Host;
use crate::prune::{count_links_to, remove_links_to};
use crate::session::Backref;
use crate::sidebar::SidebarModel;

/// Successful unlink
#[derive(Debug, Clone, PartialEq)]
pub struct Unlinked {
    /// Entry as stored by the host after the update
    pub entry: Entry,
    /// Number of link values removed
    pub removed: usize,
}

/// Result of a best-effort unlink
#[derive(Debug, Clone, PartialEq)]
pub enum UnlinkOutcome {
    /// Update accepted by the host
    Updated(Unlinked),
    /// Update rejected; already logged, nothing rolled back
    WriteFailed {
        /// Entry that was not updated
        entry_id: String,
        /// Host error
        error: HostError,
    },
}

impl UnlinkOutcome {
    /// True if the host stored the update
    #[inline]
    #[must_use]
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

impl<H: Host> Backref<H> {
    /// Remove links to the current entry from `target_id` and submit it.
    ///
    /// # Errors
    /// - `BackrefError::Read` if the target cannot be fetched
    /// - `BackrefError::WriteFailed` if the host rejects the update
    pub async fn try_unlink(&self, target_id: &str) -> BackrefResult<Unlinked> {
        let current = self.current_entry_id();
        let target = self
            .host
            .get_entry(target_id)
            .await
            .map_err(|e| BackrefError::read(ReadOp::GetEntry, e))?;

        let removed = count_links_to(current, &target);
        let pruned = remove_links_to(current, &target);
        tracing::info!(
            entry = target_id,
            linked_entry = current,
            removed,
            "submitting unlinked entry"
        );

        let entry = self
            .host
            .update_entry(pruned)
            .await
            .map_err(|e| BackrefError::write_failed(target_id, e))?;
        Ok(Unlinked { entry, removed })
    }

    /// Best-effort unlink: read failures propagate, a failed write is
    /// logged and reported as [`UnlinkOutcome::WriteFailed`].
    pub async fn unlink(&self, target_id: &str) -> BackrefResult<UnlinkOutcome> {
        match self.try_unlink(target_id).await {
            Ok(unlinked) => Ok(UnlinkOutcome::Updated(unlinked)),
            Err(BackrefError::WriteFailed { entry_id, source }) => {
                tracing::error!(entry = %entry_id, error = %source, "unlink write failed");
                Ok(UnlinkOutcome::WriteFailed {
                    entry_id,
                    error: source,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the row from `sidebar` first, then unlink its entry.
    ///
    /// The row stays removed whatever the outcome.
    pub async fn unlink_row(
        &self,
        sidebar: &mut SidebarModel,
        target_id: &str,
    ) -> BackrefResult<UnlinkOutcome> {
        if sidebar.remove_row(target_id).is_none() {
            tracing::warn!(entry = target_id, "unlinking entry not listed in sidebar");
        }
        self.unlink(target_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ContentType, FieldValue};
    use crate::host::{MemoryHost, SpaceSnapshot};

    fn session() -> Backref<MemoryHost> {
        Backref::new(MemoryHost::new(SpaceSnapshot {
            current_entry_id: "me".into(),
            default_locale: "en".into(),
            content_types: vec![ContentType::new("post", Some("title"))],
            entries: vec![
                Entry::new("me", "s", "post").with_version(1),
                Entry::new("a", "s", "post")
                    .with_version(5)
                    .with_field("title", "en", FieldValue::text("A"))
                    .with_field(
                        "refs",
                        "en",
                        FieldValue::Array(vec![
                            FieldValue::entry_link("me"),
                            FieldValue::entry_link("other"),
                            FieldValue::entry_link("me"),
                        ]),
                    ),
            ],
        }))
    }

    #[tokio::test]
    async fn try_unlink_updates_host() {
        let s = session();
        let unlinked = s.try_unlink("a").await.unwrap();

        assert_eq!(unlinked.removed, 2);
        assert_eq!(unlinked.entry.sys.version, Some(6));
        let stored = s.host().entry("a").unwrap();
        assert_eq!(
            stored.field_value("refs", "en"),
            Some(&FieldValue::Array(vec![FieldValue::entry_link("other")]))
        );
        assert!(s.incoming_link_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_target_is_read_error() {
        let s = session();
        let err = s.unlink("ghost").await.unwrap_err();
        assert!(matches!(err, BackrefError::Read { op: ReadOp::GetEntry, .. }));
    }

    #[tokio::test]
    async fn unlink_row_removes_row_first() {
        let s = session();
        let mut sidebar = s.sidebar().await.unwrap();
        assert_eq!(sidebar.len(), 1);

        let outcome = s.unlink_row(&mut sidebar, "a").await.unwrap();
        assert!(outcome.is_updated());
        assert!(sidebar.is_empty());
    }
}
