//! Error types for backref
//!
//! Two layers:
//! - `HostError`: failures reported by the host content API
//! - `BackrefError`: failures of backref operations, split by read and write side

use std::path::PathBuf;

/// Errors raised at the host boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Requested resource does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Resource kind ("Entry", "ContentType")
        kind: &'static str,
        /// Requested id
        id: String,
    },

    /// Submitted version is stale
    #[error("version conflict on entry {id}: submitted {submitted}, current {current}")]
    VersionConflict {
        /// Entry id
        id: String,
        /// Version carried by the submitted entry
        submitted: u64,
        /// Version currently stored by the host
        current: u64,
    },

    /// Transport failure talking to the host
    #[error("transport error: {0}")]
    Transport(String),

    /// Host refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Payload could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl HostError {
    /// Create not found error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Host read operation, used to label read failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOp {
    /// `get_entry`
    GetEntry,
    /// `get_content_type`
    GetContentType,
    /// `search_entries`
    SearchEntries,
}

impl std::fmt::Display for ReadOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReadOp::GetEntry => "get entry",
            ReadOp::GetContentType => "get content type",
            ReadOp::SearchEntries => "search entries",
        };
        f.write_str(name)
    }
}

/// Errors during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `BackrefConfig`
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config value out of range
    #[error("invalid value for {field}: {message}")]
    Invalid {
        /// Name of the offending config key
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },
}

/// Main backref error type
#[derive(Debug, thiserror::Error)]
pub enum BackrefError {
    /// A host read failed; reads are never swallowed
    #[error("{op} failed: {source}")]
    Read {
        /// Which read failed
        op: ReadOp,
        #[source]
        source: HostError,
    },

    /// Submitting an updated entry failed
    #[error("write failed for entry {entry_id}: {source}")]
    WriteFailed {
        /// Entry that could not be written
        entry_id: String,
        #[source]
        source: HostError,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BackrefError {
    /// Label a host error as a read failure
    #[inline]
    pub fn read(op: ReadOp, source: HostError) -> Self {
        Self::Read { op, source }
    }

    /// Wrap a host error as a write failure
    #[inline]
    pub fn write_failed(entry_id: impl Into<String>, source: HostError) -> Self {
        Self::WriteFailed {
            entry_id: entry_id.into(),
            source,
        }
    }

    /// Check if error is worth retrying by the caller
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::WriteFailed {
                source: HostError::Transport(_) | HostError::VersionConflict { .. },
                ..
            } | Self::Read {
                source: HostError::Transport(_),
                ..
            }
        )
    }
}

/// Result type alias for backref operations
pub type BackrefResult<T> = Result<T, BackrefError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_display() {
        let err = HostError::not_found("Entry", "abc");
        assert_eq!(err.to_string(), "Entry not found: abc");
    }

    #[test]
    fn read_error_display() {
        let err = BackrefError::read(ReadOp::GetContentType, HostError::Transport("reset".into()));
        assert_eq!(err.to_string(), "get content type failed: transport error: reset");
    }

    #[test]
    fn write_failed_retryable() {
        let conflict = BackrefError::write_failed(
            "post-1",
            HostError::VersionConflict {
                id: "post-1".into(),
                submitted: 3,
                current: 4,
            },
        );
        assert!(conflict.is_retryable());

        let rejected = BackrefError::write_failed("post-1", HostError::Rejected("validation".into()));
        assert!(!rejected.is_retryable());

        let missing = BackrefError::read(ReadOp::GetEntry, HostError::not_found("Entry", "x"));
        assert!(!missing.is_retryable());
    }

    #[test]
    fn config_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: BackrefError = ConfigError::from(parse_err).into();
        assert!(matches!(err, BackrefError::Config(ConfigError::Parse(_))));
    }
}
