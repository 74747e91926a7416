use std::io;

/// Why a metric source could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("permission denied reading {path}")]
    PermissionDenied { path: String },

    #[error("{what} unavailable: {reason}")]
    SourceUnavailable { what: &'static str, reason: String },
}

impl CollectionError {
    pub fn unavailable(what: &'static str, reason: impl Into<String>) -> Self {
        CollectionError::SourceUnavailable {
            what,
            reason: reason.into(),
        }
    }

    /// Classify an IO failure against `path`.
    pub fn from_io(err: &io::Error, what: &'static str, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => CollectionError::PermissionDenied {
                path: path.to_string(),
            },
            _ => CollectionError::unavailable(what, format!("{path}: {err}")),
        }
    }
}

/// One metric category. A collector fills missing optional fields with
/// `None` or zero and only fails when its whole source is gone.
pub trait Collector {
    type Output;

    fn name(&self) -> &'static str;

    fn collect(&mut self) -> Result<Self::Output, CollectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_permission_denied_is_classified() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(
            CollectionError::from_io(&err, "partition usage", "/mnt/secret"),
            CollectionError::PermissionDenied {
                path: "/mnt/secret".to_string()
            }
        );
    }

    #[test]
    fn other_io_errors_are_unavailable() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        let classified = CollectionError::from_io(&err, "partition usage", "/mnt/gone");
        assert!(matches!(
            classified,
            CollectionError::SourceUnavailable {
                what: "partition usage",
                ..
            }
        ));
        assert!(classified.to_string().starts_with("partition usage unavailable: /mnt/gone"));
    }
}
