use thiserror::Error;
use watch_core::Link;

/// What happened to the optional publication step after a message was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossPostOutcome {
    Disabled,
    /// The destination cannot publish messages (not an announcement channel).
    NotEligible,
    Published,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub link: Link,
    pub message_id: String,
    pub cross_post: CrossPostOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("channel {channel_id} cannot receive text messages (channel type {kind})")]
    ChannelType { channel_id: String, kind: u8 },
    #[error("channel {channel_id} does not exist or is not visible to the bot")]
    ChannelUnavailable { channel_id: String },
    #[error("missing permission to send messages in channel {channel_id}")]
    Permission { channel_id: String },
    #[error("bot token was rejected")]
    Unauthorized,
    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

impl NotifyError {
    /// Configuration failures that will not go away on the next cycle.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, NotifyError::Delivery(_))
    }
}

/// Announces one newly listed item.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, link: &str) -> Result<Delivery, NotifyError>;
}
