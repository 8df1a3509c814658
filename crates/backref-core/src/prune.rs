//! Link removal
//!
//! Structural recursion over [`FieldValue`] that builds a new tree without the
//! entry links pointing at a given id. Children are pruned before their
//! container decides whether to keep them, so a link nested at any depth is
//! removed and the surrounding structure is kept.
//!
//! Besides the canonical [`Link`](crate::entry::Link) variant, any record whose
//! `sys` carries `type: "Link"`, `linkType: "Entry"` and the target id counts
//! as a link, whatever other keys it or its `sys` hold.

use crate::entry::{Entry, FieldValue, Fields, LocalizedValues, Scalar, ENTRY_LINK_TYPE};
use indexmap::IndexMap;

/// Copy of `entry` with every entry link to `target_id` removed from its fields.
///
/// Matching values are dropped from arrays (remaining items keep their order)
/// and from records and locale maps (the key is removed). Field maps left empty
/// stay present. `sys` is copied unchanged.
#[must_use]
pub fn remove_links_to(target_id: &str, entry: &Entry) -> Entry {
    Entry {
        sys: entry.sys.clone(),
        fields: prune_fields(target_id, &entry.fields),
    }
}

/// Number of entry links to `target_id` anywhere in the fields of `entry`
#[must_use]
pub fn count_links_to(target_id: &str, entry: &Entry) -> usize {
    entry
        .fields
        .values()
        .flat_map(LocalizedValues::values)
        .map(|value| count_in_value(target_id, value))
        .sum()
}

/// True if `entry` holds at least one entry link to `target_id`
#[inline]
#[must_use]
pub fn links_to(target_id: &str, entry: &Entry) -> bool {
    count_links_to(target_id, entry) > 0
}

fn prune_fields(target_id: &str, fields: &Fields) -> Fields {
    fields
        .iter()
        .map(|(name, locales)| {
            let kept = locales
                .iter()
                .filter_map(|(locale, value)| {
                    prune_value(target_id, value).map(|v| (locale.clone(), v))
                })
                .collect();
            (name.clone(), kept)
        })
        .collect()
}

/// Pruned copy of `value`, or `None` when `value` itself is a matching link
fn prune_value(target_id: &str, value: &FieldValue) -> Option<FieldValue> {
    match value {
        FieldValue::Link(link) if link.points_at_entry(target_id) => None,
        FieldValue::Array(items) => Some(FieldValue::Array(
            items
                .iter()
                .filter_map(|item| prune_value(target_id, item))
                .collect(),
        )),
        FieldValue::Record(map) => {
            let pruned: IndexMap<String, FieldValue> = map
                .iter()
                .filter_map(|(key, item)| prune_value(target_id, item).map(|v| (key.clone(), v)))
                .collect();
            if record_links_to(&pruned, target_id) {
                None
            } else {
                Some(FieldValue::Record(pruned))
            }
        }
        other => Some(other.clone()),
    }
}

/// Record whose `sys` marks it as an entry link to `target_id`
fn record_links_to(map: &IndexMap<String, FieldValue>, target_id: &str) -> bool {
    let Some(FieldValue::Record(sys)) = map.get("sys") else {
        return false;
    };
    let text = |key: &str| match sys.get(key) {
        Some(FieldValue::Scalar(Scalar::String(s))) => Some(s.as_str()),
        _ => None,
    };
    text("type") == Some("Link")
        && text("linkType") == Some(ENTRY_LINK_TYPE)
        && text("id") == Some(target_id)
}

fn count_in_value(target_id: &str, value: &FieldValue) -> usize {
    match value {
        FieldValue::Link(link) => usize::from(link.points_at_entry(target_id)),
        FieldValue::Array(items) => items.iter().map(|v| count_in_value(target_id, v)).sum(),
        FieldValue::Record(map) if record_links_to(map, target_id) => 1,
        FieldValue::Record(map) => map.values().map(|v| count_in_value(target_id, v)).sum(),
        FieldValue::Scalar(_) => 0,
    }
}
