//! Display-field cache using moka
//!
//! Maps content-type id to the name of its display field. Entries are filled
//! on first lookup and never invalidated or evicted: display-field
//! configuration is assumed immutable for the lifetime of the session that
//! owns the cache. One cache belongs to one host; sharing a cache between
//! hosts of different spaces would serve one space's configuration to the
//! other.

use crate::error::HostError;
use crate::host::Host;
use moka::future::Cache;

/// Content-type id → display field (`None` when the type has none)
#[derive(Debug, Clone)]
pub struct DisplayFieldCache {
    inner: Cache<String, Option<String>>,
}

impl DisplayFieldCache {
    /// Create an empty, unbounded cache
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }

    /// Display field of `content_type_id`, asking `host` only on a miss.
    ///
    /// Check-then-fill: concurrent misses for the same id may each call the
    /// host and store the same value. Host errors are not cached.
    pub async fn lookup<H: Host + ?Sized>(
        &self,
        host: &H,
        content_type_id: &str,
    ) -> Result<Option<String>, HostError> {
        if let Some(cached) = self.inner.get(content_type_id).await {
            tracing::debug!(content_type = content_type_id, "display field cache hit");
            return Ok(cached);
        }

        let content_type = host.get_content_type(content_type_id).await?;
        let display_field = content_type.display_field;
        tracing::debug!(
            content_type = content_type_id,
            display_field = ?display_field,
            "display field resolved"
        );

        self.inner
            .insert(content_type_id.to_owned(), display_field.clone())
            .await;
        Ok(display_field)
    }

    /// Cached value without touching the host
    #[inline]
    pub async fn get(&self, content_type_id: &str) -> Option<Option<String>> {
        self.inner.get(content_type_id).await
    }

    /// Number of cached content types
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for DisplayFieldCache {
    fn default() -> Self {
        Self::new()
    }
}
