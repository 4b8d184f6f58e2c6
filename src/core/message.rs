use std::collections::BTreeMap;
use std::fmt;

/// Named parameters interpolated into a localized string.
pub type FormatParams = BTreeMap<String, String>;

/// Severity category of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Error,
    Information,
    Ok,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Information => "information",
            MessageKind::Ok => "ok",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MessageKind::Error => "❌",
            MessageKind::Information => "ℹ️",
            MessageKind::Ok => "✅",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the message says: a catalog key to localize, or literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Key(String),
    Text(String),
}

/// A reply decided by a command handler, before localization.
///
/// Handlers only pick the key, the parameters and the kind; turning this into
/// something a chat platform can display is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: MessageKind,
    pub body: MessageBody,
    pub params: FormatParams,
    /// Already localized title, if the handler wants one.
    pub title: Option<String>,
}

impl Reply {
    pub fn new(kind: MessageKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            body: MessageBody::Key(key.into()),
            params: FormatParams::new(),
            title: None,
        }
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, key)
    }

    pub fn info(key: impl Into<String>) -> Self {
        Self::new(MessageKind::Information, key)
    }

    pub fn ok(key: impl Into<String>) -> Self {
        Self::new(MessageKind::Ok, key)
    }

    pub fn text(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            body: MessageBody::Text(text.into()),
            params: FormatParams::new(),
            title: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The catalog key, if this reply is key-based.
    pub fn key(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Key(key) => Some(key),
            MessageBody::Text(_) => None,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// A reply after localization, ready to be handed to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub kind: MessageKind,
    pub title: Option<String>,
    pub content: String,
}

impl fmt::Display for RenderedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} {}\n{}", self.kind.icon(), title, self.content),
            None => write!(f, "{} {}", self.kind.icon(), self.content),
        }
    }
}
