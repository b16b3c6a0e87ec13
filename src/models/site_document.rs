use serde_json::Value;

/// Singleton settings documents, read and replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Contact,
    Footer,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Contact => "contact",
            DocumentKind::Footer => "footer",
        }
    }

    /// URL segment under `/api` and `/api/admin`.
    pub fn path(&self) -> &'static str {
        match self {
            DocumentKind::Contact => "contact-settings",
            DocumentKind::Footer => "footer-settings",
        }
    }

    /// Returned when the document was never written.
    pub fn default_document(&self) -> Value {
        Value::Object(Default::default())
    }
}
