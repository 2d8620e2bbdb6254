//! Metadata snapshot of an uploaded object.

/// Result of a metadata-only read of the uploaded object.
///
/// Either field may be absent when the object store does not report it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// Content type (MIME type) as recorded by the object store.
    pub content_type: Option<String>,

    /// Size in bytes.
    pub content_length: Option<i64>,
}

impl ObjectMetadata {
    #[cfg(test)]
    pub fn new(content_type: impl Into<String>, content_length: i64) -> Self {
        Self {
            content_type: Some(content_type.into()),
            content_length: Some(content_length),
        }
    }

    /// Content type for logging and error messages, `unknown` when absent.
    pub fn content_type_or_unknown(&self) -> &str {
        self.content_type.as_deref().unwrap_or("unknown")
    }

    /// Whether the content type is one of `allowed` (case-insensitive).
    pub fn is_allowed(&self, allowed: &[String]) -> bool {
        self.content_type.as_deref().is_some_and(|content_type| {
            allowed
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(content_type))
        })
    }
}
