//! Session context
//!
//! [`Backref`] ties one host to its display-field cache and configuration.
//! Operations are implemented across `title`, `incoming` and `unlink`.

use crate::cache::DisplayFieldCache;
use crate::config::BackrefConfig;
use crate::host::Host;

/// Session over a single host
#[derive(Debug)]
pub struct Backref<H> {
    pub(crate) host: H,
    pub(crate) cache: DisplayFieldCache,
    pub(crate) config: BackrefConfig,
}

impl<H: Host> Backref<H> {
    /// Create session with default configuration
    #[inline]
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, BackrefConfig::default())
    }

    /// Create session with configuration
    #[inline]
    #[must_use]
    pub fn with_config(host: H, config: BackrefConfig) -> Self {
        Self {
            host,
            cache: DisplayFieldCache::new(),
            config,
        }
    }

    /// Get host
    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BackrefConfig {
        &self.config
    }

    /// Get display-field cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &DisplayFieldCache {
        &self.cache
    }

    /// Id of the entry open in the editor
    #[inline]
    #[must_use]
    pub fn current_entry_id(&self) -> &str {
        self.host.current_entry_id()
    }

    /// Locale used for titles
    #[inline]
    #[must_use]
    pub fn locale(&self) -> &str {
        self.config
            .default_locale_override
            .as_deref()
            .unwrap_or_else(|| self.host.default_locale())
    }

    /// Consume session, returning the host
    #[inline]
    pub fn into_host(self) -> H {
        self.host
    }
}
