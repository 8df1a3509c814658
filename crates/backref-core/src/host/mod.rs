//! Host boundary
//!
//! Everything backref knows about the content platform goes through [`Host`].
//! Implementations wrap the platform's content API; [`MemoryHost`] serves a
//! space snapshot from memory.

pub mod memory;

use crate::entry::{ContentType, Entry};
use crate::error::HostError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::{MemoryHost, SpaceSnapshot};

/// Entry search filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryQuery {
    /// Only entries holding a link to this entry id
    pub links_to_entry: String,
}

impl EntryQuery {
    /// Entries linking to `entry_id`
    #[inline]
    #[must_use]
    pub fn links_to_entry(entry_id: impl Into<String>) -> Self {
        Self {
            links_to_entry: entry_id.into(),
        }
    }
}

/// Page of search results, in host order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCollection {
    /// Matching entries
    pub items: Vec<Entry>,
    /// Total number of matches
    #[serde(default)]
    pub total: usize,
    /// Offset of this page
    #[serde(default)]
    pub skip: usize,
    /// Page size
    #[serde(default)]
    pub limit: usize,
}

/// Capabilities the host platform grants to backref.
///
/// All remote calls are async request/response. Calls are made one at a
/// time per user action, except title projections which may overlap.
#[async_trait]
pub trait Host: Send + Sync {
    /// Fetch an entry by id
    async fn get_entry(&self, id: &str) -> Result<Entry, HostError>;

    /// Submit a modified entry; returns the stored revision
    async fn update_entry(&self, entry: Entry) -> Result<Entry, HostError>;

    /// Fetch a content type descriptor
    async fn get_content_type(&self, id: &str) -> Result<ContentType, HostError>;

    /// Search entries
    async fn search_entries(&self, query: &EntryQuery) -> Result<EntryCollection, HostError>;

    /// Id of the entry open in the editor
    fn current_entry_id(&self) -> &str;

    /// Default locale of the space
    fn default_locale(&self) -> &str;
}
