//! Testing utilities for backref workspace
//!
//! Shared test helpers, fixtures, and a call-counting host wrapper.

#![allow(missing_docs)]

use async_trait::async_trait;
use backref_core::{
    ContentType, Entry, EntryCollection, EntryQuery, FieldValue, Host, HostError, MemoryHost,
    SpaceSnapshot,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const SPACE_ID: &str = "space-1";
pub const LOCALE: &str = "en-US";
pub const CURRENT_ENTRY: &str = "current";

/// JSON for an entry link
pub fn link_json(id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": "Entry", "id": id}})
}

/// Entry with the given fields JSON
pub fn entry_from_fields(id: &str, content_type: &str, fields: Value) -> Entry {
    serde_json::from_value(json!({
        "sys": {
            "id": id,
            "type": "Entry",
            "version": 1,
            "space": {"sys": {"type": "Link", "linkType": "Space", "id": SPACE_ID}},
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": content_type}}
        },
        "fields": fields
    }))
    .unwrap()
}

/// `post` entry titled `title` with a `related` link to [`CURRENT_ENTRY`]
pub fn linking_post(id: &str, title: &str) -> Entry {
    Entry::new(id, SPACE_ID, "post")
        .with_version(1)
        .with_field("title", LOCALE, FieldValue::text(title))
        .with_field("related", LOCALE, FieldValue::entry_link(CURRENT_ENTRY))
}

/// Snapshot with `post` (display field `title`) and `author` (display field `name`)
pub fn snapshot(entries: Vec<Entry>) -> SpaceSnapshot {
    SpaceSnapshot {
        current_entry_id: CURRENT_ENTRY.into(),
        default_locale: LOCALE.into(),
        content_types: vec![
            ContentType::new("post", Some("title")),
            ContentType::new("author", Some("name")),
            ContentType::new("tag", None),
        ],
        entries,
    }
}

/// Per-method call counts
#[derive(Debug, Default)]
pub struct CallCounts {
    pub get_entry: AtomicUsize,
    pub update_entry: AtomicUsize,
    pub get_content_type: AtomicUsize,
    pub search_entries: AtomicUsize,
}

/// Host wrapper counting calls, with switchable failures
#[derive(Debug)]
pub struct CountingHost<H = MemoryHost> {
    inner: H,
    pub calls: CallCounts,
    fail_writes: Mutex<Option<HostError>>,
    fail_reads: AtomicBool,
}

impl<H: Host> CountingHost<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            calls: CallCounts::default(),
            fail_writes: Mutex::new(None),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Make every `update_entry` fail with `error`
    pub fn fail_writes_with(&self, error: HostError) {
        *self.fail_writes.lock() = Some(error);
    }

    /// Make every read fail with a transport error
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn content_type_lookups(&self) -> usize {
        self.calls.get_content_type.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.calls.update_entry.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), HostError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(HostError::Transport("connection reset".into()));
        }
        Ok(())
    }
}

impl CountingHost<MemoryHost> {
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self::new(MemoryHost::new(snapshot(entries)))
    }
}

#[async_trait]
impl<H: Host> Host for CountingHost<H> {
    async fn get_entry(&self, id: &str) -> Result<Entry, HostError> {
        self.calls.get_entry.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        self.inner.get_entry(id).await
    }

    async fn update_entry(&self, entry: Entry) -> Result<Entry, HostError> {
        self.calls.update_entry.fetch_add(1, Ordering::SeqCst);
        let injected = self.fail_writes.lock().clone();
        if let Some(error) = injected {
            return Err(error);
        }
        self.inner.update_entry(entry).await
    }

    async fn get_content_type(&self, id: &str) -> Result<ContentType, HostError> {
        self.calls.get_content_type.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        self.inner.get_content_type(id).await
    }

    async fn search_entries(&self, query: &EntryQuery) -> Result<EntryCollection, HostError> {
        self.calls.search_entries.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        self.inner.search_entries(query).await
    }

    fn current_entry_id(&self) -> &str {
        self.inner.current_entry_id()
    }

    fn default_locale(&self) -> &str {
        self.inner.default_locale()
    }
}
