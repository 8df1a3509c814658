//! Subcommand implementations, kept free of process I/O for testing

use anyhow::{Context, Result};
use backref_core::{
    remove_links_to, Backref, BackrefConfig, Entry, MemoryHost, SpaceSnapshot, UnlinkOutcome,
};
use std::path::Path;

/// Pruned entry JSON for `raw` with links to `target` removed
pub(crate) fn prune(raw: &str, target: &str) -> Result<String> {
    let entry: Entry = serde_json::from_str(raw).context("input is not an entry")?;
    let pruned = remove_links_to(target, &entry);
    Ok(serde_json::to_string_pretty(&pruned)?)
}

/// Load a snapshot host, optionally overriding the open entry
pub(crate) fn load_host(path: &Path, entry: Option<&str>) -> Result<MemoryHost> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let host = MemoryHost::new(SpaceSnapshot::from_json(&raw)?);
    Ok(match entry {
        Some(id) => host.with_current_entry(id),
        None => host,
    })
}

/// Rendered sidebar for the open entry
pub(crate) async fn incoming(host: MemoryHost, config: BackrefConfig) -> Result<String> {
    let session = Backref::with_config(host, config);
    let sidebar = session.sidebar().await?;
    Ok(sidebar.to_string())
}

/// Unlink `target` and return the report line plus the resulting snapshot
pub(crate) async fn unlink(
    host: MemoryHost,
    config: BackrefConfig,
    target: &str,
) -> Result<(String, SpaceSnapshot)> {
    let session = Backref::with_config(host, config);
    let report = match session.unlink(target).await? {
        UnlinkOutcome::Updated(unlinked) => format!(
            "removed {} link(s) from {} (version {})",
            unlinked.removed,
            unlinked.entry.id(),
            unlinked.entry.sys.version.unwrap_or_default()
        ),
        UnlinkOutcome::WriteFailed { entry_id, error } => {
            format!("update of {entry_id} failed: {error}")
        }
    };
    Ok((report, session.into_host().snapshot()))
}
