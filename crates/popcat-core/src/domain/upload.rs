use std::fmt;

/// A file handed over by the boundary, fully buffered in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    original_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        original_name: Option<String>,
        content_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            original_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Shorthand for the common case where both name and type are known.
    pub fn named(
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(
            Some(original_name.into()),
            Some(content_type.into()),
            bytes,
        )
    }

    pub fn original_name(&self) -> Option<&str> {
        self.original_name.as_deref()
    }

    /// The declared name, or a placeholder for log and error messages.
    pub fn display_name(&self) -> &str {
        match self.original_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "<unnamed>",
        }
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The original name without its final extension.
    ///
    /// A leading dot is not treated as an extension separator, so
    /// `.hidden` stays `.hidden`.
    pub fn base_name(&self) -> Option<&str> {
        let name = self.original_name.as_deref().filter(|n| !n.is_empty())?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }
}

// Payloads can be megabytes long; keep them out of debug output.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("original_name", &self.original_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}
