/// Represents an inbound chat message
///
/// `content` is rewritten in place during dispatch: by the time a handler
/// sees the message, the prefix and command token are gone and only the
/// trimmed arguments remain.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub author_id: String,
    pub channel_id: String,
    pub group_id: String,
    pub content: String,
    pub platform: String,
}

impl Message {
    pub fn new(
        author_id: impl Into<String>,
        channel_id: impl Into<String>,
        group_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            author_id: author_id.into(),
            channel_id: channel_id.into(),
            group_id: group_id.into(),
            content: content.into(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Arguments left after dispatch stripped the prefix and command name
    pub fn args(&self) -> &str {
        &self.content
    }
}
