//! backref core
//!
//! Lists the entries that link to the entry open in a headless CMS editor and
//! removes such links on request.
//!
//! # Core Operations
//!
//! - **Resolve title**: content type display field → locale value → placeholder
//! - **Remove links**: structural copy of an entry without links to a given id
//! - **Unlink**: fetch → remove links → submit, with a best-effort write
//! - **Incoming links**: host search projected to `{id, title, space}` rows
//!
//! # Architecture
//!
//! ```text
//! Host (content API) ──search──▶ Backref ──resolve_title──▶ SidebarModel
//!        ▲     │                   │  ↑___________↓
//!        │     └──get_entry──▶ remove_links_to      DisplayFieldCache (moka)
//!        └────update_entry─────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use backref_core::{Backref, MemoryHost, SpaceSnapshot};
//!
//! # async fn example(raw: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let session = Backref::new(MemoryHost::new(SpaceSnapshot::from_json(raw)?));
//!
//! let mut sidebar = session.sidebar().await?;
//! println!("{sidebar}");
//!
//! session.unlink_row(&mut sidebar, "linking-entry").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod config;
pub mod entry;
pub mod error;
pub mod host;
pub mod incoming;
pub mod prune;
pub mod session;
pub mod sidebar;
pub mod title;
pub mod unlink;

// Re-exports for convenience
pub use cache::DisplayFieldCache;
pub use config::BackrefConfig;
pub use entry::{ContentType, Entry, EntrySys, FieldValue, Fields, Link, LocalizedValues, Scalar};
pub use error::{BackrefError, BackrefResult, ConfigError, HostError, ReadOp};
pub use host::{EntryCollection, EntryQuery, Host, MemoryHost, SpaceSnapshot};
pub use incoming::LinkItem;
pub use prune::{count_links_to, links_to, remove_links_to};
pub use session::Backref;
pub use sidebar::{entry_href, incoming_links_message, SidebarModel, SidebarRow};
pub use title::select_title;
pub use unlink::{UnlinkOutcome, Unlinked};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with backref
    pub use crate::{
        Backref, BackrefConfig, BackrefError, BackrefResult, Entry, FieldValue, Host, HostError,
        LinkItem, SidebarModel, UnlinkOutcome,
    };
}
