//! Entry data model
//!
//! Entries arrive from the host as JSON. Field values are decoded into the
//! [`FieldValue`] sum type so that links are a distinct variant instead of an
//! object shape to be sniffed at every use site.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Link type of references that point at entries
pub const ENTRY_LINK_TYPE: &str = "Entry";

/// Locale code → value for a single field
pub type LocalizedValues = IndexMap<String, FieldValue>;

/// Field name → localized values
pub type Fields = IndexMap<String, LocalizedValues>;

/// Typed reference to another resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LinkWire", into = "LinkWire")]
pub struct Link {
    /// Kind of resource linked to ("Entry", "Asset", "Space", ...)
    pub link_type: String,
    /// Id of the linked resource
    pub id: String,
}

impl Link {
    /// Create a link
    #[inline]
    #[must_use]
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            link_type: link_type.into(),
            id: id.into(),
        }
    }

    /// Create an entry link
    #[inline]
    #[must_use]
    pub fn entry(id: impl Into<String>) -> Self {
        Self::new(ENTRY_LINK_TYPE, id)
    }

    /// True iff this is an entry link whose id is exactly `entry_id`
    #[inline]
    #[must_use]
    pub fn points_at_entry(&self, entry_id: &str) -> bool {
        self.link_type == ENTRY_LINK_TYPE && self.id == entry_id
    }

    /// Decode the canonical `{"sys": {"type": "Link", "linkType", "id"}}` shape.
    ///
    /// Objects carrying anything beyond those keys are not links; keeping them
    /// as records preserves them byte-for-byte on write back. Link removal
    /// still recognises such records by their `sys`.
    fn from_object(map: &Map<String, Value>) -> Option<Self> {
        if map.len() != 1 {
            return None;
        }
        let Value::Object(sys) = map.get("sys")? else {
            return None;
        };
        if sys.len() != 3 || sys.get("type")?.as_str()? != "Link" {
            return None;
        }
        Some(Self::new(
            sys.get("linkType")?.as_str()?,
            sys.get("id")?.as_str()?,
        ))
    }

    fn to_value(&self) -> Value {
        let mut sys = Map::new();
        sys.insert("type".into(), Value::String("Link".into()));
        sys.insert("linkType".into(), Value::String(self.link_type.clone()));
        sys.insert("id".into(), Value::String(self.id.clone()));
        let mut outer = Map::new();
        outer.insert("sys".into(), Value::Object(sys));
        Value::Object(outer)
    }
}

#[derive(Serialize, Deserialize)]
struct LinkWire {
    sys: LinkSysWire,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkSysWire {
    #[serde(rename = "type")]
    kind: String,
    link_type: String,
    id: String,
}

impl TryFrom<LinkWire> for Link {
    type Error = String;

    fn try_from(wire: LinkWire) -> Result<Self, Self::Error> {
        if wire.sys.kind != "Link" {
            return Err(format!("expected sys.type \"Link\", got {:?}", wire.sys.kind));
        }
        Ok(Self::new(wire.sys.link_type, wire.sys.id))
    }
}

impl From<Link> for LinkWire {
    fn from(link: Link) -> Self {
        Self {
            sys: LinkSysWire {
                kind: "Link".into(),
                link_type: link.link_type,
                id: link.id,
            },
        }
    }
}

/// Leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON null
    Null,
    /// Boolean
    Bool(bool),
    /// Number, kept in its JSON representation
    Number(Number),
    /// String
    String(String),
}

/// Value stored under a field locale, arbitrarily nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    /// Null, boolean, number or string
    Scalar(Scalar),
    /// Ordered list of values
    Array(Vec<FieldValue>),
    /// Object that is not a link, in host key order
    Record(IndexMap<String, FieldValue>),
    /// Reference to another resource
    Link(Link),
}

impl FieldValue {
    /// String scalar
    #[inline]
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(s.into()))
    }

    /// Entry link value
    #[inline]
    #[must_use]
    pub fn entry_link(id: impl Into<String>) -> Self {
        Self::Link(Link::entry(id))
    }

    /// Borrow as link, if this is one
    #[inline]
    #[must_use]
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Self::Link(link) => Some(link),
            _ => None,
        }
    }

    /// Text shown when this value is used as a title.
    ///
    /// Strings render as-is, numbers and booleans as their JSON text.
    /// Null, containers and links do not render.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s.clone()),
            Self::Scalar(Scalar::Number(n)) => Some(n.to_string()),
            Self::Scalar(Scalar::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => match Link::from_object(&map) {
                Some(link) => Self::Link(link),
                None => Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
            },
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Scalar(Scalar::Null) => Value::Null,
            FieldValue::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            FieldValue::Scalar(Scalar::Number(n)) => Value::Number(n),
            FieldValue::Scalar(Scalar::String(s)) => Value::String(s),
            FieldValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            FieldValue::Record(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            FieldValue::Link(link) => link.to_value(),
        }
    }
}

/// Entry system metadata. Never modified by backref.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    /// Entry id
    pub id: String,
    /// Space the entry belongs to
    pub space: Link,
    /// Content type of the entry
    pub content_type: Link,
    /// Host revision, used for optimistic concurrency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Remaining host attributes, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// System metadata
    pub sys: EntrySys,
    /// Localized field values
    #[serde(default)]
    pub fields: Fields,
}

impl Entry {
    /// Create an entry with no fields
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        space_id: impl Into<String>,
        content_type_id: impl Into<String>,
    ) -> Self {
        Self {
            sys: EntrySys {
                id: id.into(),
                space: Link::new("Space", space_id),
                content_type: Link::new("ContentType", content_type_id),
                version: None,
                extra: Map::new(),
            },
            fields: Fields::new(),
        }
    }

    /// Set a localized field value
    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        locale: impl Into<String>,
        value: FieldValue,
    ) -> Self {
        self.fields
            .entry(name.into())
            .or_default()
            .insert(locale.into(), value);
        self
    }

    /// Set the host version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.sys.version = Some(version);
        self
    }

    /// Entry id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    /// Space id
    #[inline]
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.sys.space.id
    }

    /// Content type id
    #[inline]
    #[must_use]
    pub fn content_type_id(&self) -> &str {
        &self.sys.content_type.id
    }

    /// Value of `field` in `locale`
    #[inline]
    #[must_use]
    pub fn field_value(&self, field: &str, locale: &str) -> Option<&FieldValue> {
        self.fields.get(field)?.get(locale)
    }
}

/// Content type system metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSys {
    /// Content type id
    pub id: String,
    /// Remaining host attributes
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Content type descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// System metadata
    pub sys: ContentTypeSys,
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// Field used as the entry title; unset on some content types
    #[serde(default)]
    pub display_field: Option<String>,
    /// Remaining attributes (field definitions, description, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentType {
    /// Create a descriptor
    #[must_use]
    pub fn new(id: impl Into<String>, display_field: Option<&str>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            sys: ContentTypeSys {
                id,
                extra: Map::new(),
            },
            display_field: display_field.map(str::to_owned),
            extra: Map::new(),
        }
    }

    /// Content type id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.sys.id
    }
}
