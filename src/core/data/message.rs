use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A translator-facing description: plain text, or a structured object
/// literal carried through as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Structured(Value),
}

impl Description {
    /// Only empty text is considered blank; any object counts as a value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// The description as interpolated into hashed id content, which is how
    /// a JavaScript template literal stringifies it.
    pub fn as_content(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Structured(_) => "[object Object]",
        }
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// A message descriptor as found in source code, before identifier resolution.
///
/// Created by the extractor for each `defineMessages` entry, `formatMessage`
/// call or `<FormattedMessage>` element. `id` may be missing when the
/// developer relies on an identifier interpolation pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub id: Option<String>,
    pub default_message: Option<String>,
    pub description: Option<Description>,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

/// Ownership labels derived from a source file path.
///
/// A file belongs to at most one of the application tree or the shared
/// package tree, so `package` is normally absent whenever `app` is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scopes {
    pub app: Option<String>,
    pub feature: Option<String>,
    pub package: Option<String>,
}

/// The unit of aggregation: one message, one source file, scope-annotated.
///
/// Serialized field names and order are the catalog's output format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDescriptor {
    pub id: String,
    pub default_message: Option<String>,
    pub description: Option<Description>,
    pub source_file: String,
    pub app_scope: Option<String>,
    pub feature_scope: Option<String>,
    pub package_scope: Option<String>,
    #[serde(default)]
    pub is_duplicate: bool,
}

impl MessageDescriptor {
    pub fn new(id: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_file: source_file.into(),
            ..Default::default()
        }
    }

    pub fn with_default_message(mut self, default_message: impl Into<String>) -> Self {
        self.default_message = Some(default_message.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<Description>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_scopes(mut self, scopes: Scopes) -> Self {
        self.app_scope = scopes.app;
        self.feature_scope = scopes.feature;
        self.package_scope = scopes.package;
        self
    }
}

/// Every descriptor extracted from one file, in extraction order.
///
/// A batch is always complete: the aggregator never sees half of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBatch {
    pub file_path: String,
    pub messages: Vec<MessageDescriptor>,
}

impl FileBatch {
    pub fn new(file_path: impl Into<String>, messages: Vec<MessageDescriptor>) -> Self {
        Self {
            file_path: file_path.into(),
            messages,
        }
    }
}
