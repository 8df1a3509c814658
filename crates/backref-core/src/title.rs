//! Display-title resolution

use crate::entry::{Entry, FieldValue, Fields, Scalar};
use crate::error::{BackrefError, BackrefResult, ReadOp};
use crate::host::Host;
use crate::session::Backref;

/// Title text from `fields`, or `None` when nothing usable is there.
///
/// Takes `fields[display_field][locale]` whenever it renders, even to `""`.
/// Otherwise the first locale value in map order (host delivery order) that
/// is truthy: empty strings, `false`, zero and null are skipped.
// TODO: confirm with content owners that "first locale in host order" is the
// wanted fallback before exposing locale priority in BackrefConfig.
#[must_use]
pub fn select_title(fields: &Fields, display_field: Option<&str>, locale: &str) -> Option<String> {
    let values = fields.get(display_field?)?;

    values
        .get(locale)
        .and_then(FieldValue::display_text)
        .or_else(|| values.values().filter(|v| is_truthy(v)).find_map(FieldValue::display_text))
}

fn is_truthy(value: &FieldValue) -> bool {
    match value {
        FieldValue::Scalar(Scalar::Null | Scalar::Bool(false)) => false,
        FieldValue::Scalar(Scalar::String(s)) => !s.is_empty(),
        FieldValue::Scalar(Scalar::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

impl<H: Host> Backref<H> {
    /// Human readable title of `entry`.
    ///
    /// The content type's display field comes from the session cache; the
    /// first lookup per content type goes to the host and its errors
    /// propagate.
    pub async fn resolve_title(&self, entry: &Entry) -> BackrefResult<String> {
        let display_field = self
            .cache
            .lookup(&self.host, entry.content_type_id())
            .await
            .map_err(|e| BackrefError::read(ReadOp::GetContentType, e))?;

        Ok(
            select_title(&entry.fields, display_field.as_deref(), self.locale())
                .unwrap_or_else(|| self.config.untitled_title.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ContentType;
    use crate::host::{MemoryHost, SpaceSnapshot};
    use serde_json::json;

    fn fields(raw: serde_json::Value) -> Fields {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn exact_locale_value() {
        let f = fields(json!({"title": {"de": "Hallo", "en": "Hello"}}));
        assert_eq!(select_title(&f, Some("title"), "en").as_deref(), Some("Hello"));
    }

    #[test]
    fn falls_back_to_first_locale_in_order() {
        let f = fields(json!({"title": {"fr": "", "de": "Hallo", "it": "Ciao"}}));
        assert_eq!(select_title(&f, Some("title"), "en").as_deref(), Some("Hallo"));
    }

    #[test]
    fn empty_default_locale_is_kept() {
        let f = fields(json!({"title": {"en": "", "de": "Hallo"}}));
        assert_eq!(select_title(&f, Some("title"), "en").as_deref(), Some(""));
    }

    #[test]
    fn falsy_values_skipped_in_fallback() {
        let f = fields(json!({"title": {"de": false, "fr": 0, "it": 0.0, "es": "x"}}));
        assert_eq!(select_title(&f, Some("title"), "en").as_deref(), Some("x"));

        let f = fields(json!({"title": {"de": false, "fr": ""}}));
        assert_eq!(select_title(&f, Some("title"), "en"), None);
    }

    #[test]
    fn falsy_default_locale_value_is_kept() {
        let f = fields(json!({"title": {"en": false, "de": "Hallo"}}));
        assert_eq!(select_title(&f, Some("title"), "en").as_deref(), Some("false"));
    }

    #[test]
    fn missing_display_field() {
        let f = fields(json!({"name": {"en": "x"}}));
        assert_eq!(select_title(&f, Some("title"), "en"), None);
        assert_eq!(select_title(&f, None, "en"), None);
    }

    #[test]
    fn non_text_values_skipped() {
        let f = fields(json!({"title": {"en": null, "de": {"nested": true}, "fr": 42}}));
        assert_eq!(select_title(&f, Some("title"), "en").as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn resolves_through_host() {
        let host = MemoryHost::new(SpaceSnapshot {
            current_entry_id: "x".into(),
            default_locale: "en-US".into(),
            content_types: vec![
                ContentType::new("post", Some("title")),
                ContentType::new("tag", None),
            ],
            entries: vec![],
        });
        let session = Backref::new(host);

        let post = Entry::new("p", "s", "post").with_field("title", "en-US", FieldValue::text("Launch"));
        assert_eq!(session.resolve_title(&post).await.unwrap(), "Launch");

        let untitled = Entry::new("p2", "s", "post");
        assert_eq!(session.resolve_title(&untitled).await.unwrap(), "Untitled");

        let tag = Entry::new("t", "s", "tag").with_field("title", "en-US", FieldValue::text("ignored"));
        assert_eq!(session.resolve_title(&tag).await.unwrap(), "Untitled");

        let orphan = Entry::new("o", "s", "deleted-type");
        let err = session.resolve_title(&orphan).await.unwrap_err();
        assert!(matches!(
            err,
            BackrefError::Read {
                op: ReadOp::GetContentType,
                ..
            }
        ));
    }
}
