use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use watch_logging::{watch_debug, watch_info, watch_warn};

use crate::notify::{CrossPostOutcome, Delivery, Notifier, NotifyError};

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

const GUILD_TEXT: u8 = 0;
const GUILD_VOICE: u8 = 2;
const GUILD_ANNOUNCEMENT: u8 = 5;
const ANNOUNCEMENT_THREAD: u8 = 10;
const PUBLIC_THREAD: u8 = 11;
const PRIVATE_THREAD: u8 = 12;

#[derive(Debug, Clone)]
pub struct DiscordSettings {
    pub token: String,
    pub channel_id: String,
    /// Publish sent messages to following servers when the channel allows it.
    pub cross_post: bool,
    pub api_base: String,
    pub connect_timeout: Duration,
    /// Bounds each API call so a stalled connection cannot hold up the cycle.
    pub request_timeout: Duration,
}

impl DiscordSettings {
    pub fn new(token: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            channel_id: channel_id.into(),
            cross_post: false,
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "type")]
    kind: u8,
}

#[derive(Debug, Deserialize)]
struct Message {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Posts each new link as a plain message in one Discord channel.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: Client,
    settings: DiscordSettings,
}

impl DiscordNotifier {
    pub fn new(settings: DiscordSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("anime_watch/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/channels/{}{}",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.channel_id,
            path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            format!("Bot {}", self.settings.token),
        )
    }

    async fn channel_kind(&self) -> Result<u8, NotifyError> {
        let response = self
            .authorized(self.client.get(self.url("")))
            .send()
            .await
            .map_err(|err| NotifyError::Delivery(err.to_string()))?;
        let channel: Channel = self.checked(response).await?.json().await.map_err(|err| {
            NotifyError::Delivery(format!("unexpected channel payload: {err}"))
        })?;

        match channel.kind {
            GUILD_TEXT | GUILD_VOICE | GUILD_ANNOUNCEMENT | ANNOUNCEMENT_THREAD
            | PUBLIC_THREAD | PRIVATE_THREAD => Ok(channel.kind),
            kind => Err(NotifyError::ChannelType {
                channel_id: self.settings.channel_id.clone(),
                kind,
            }),
        }
    }

    async fn send(&self, content: &str) -> Result<Message, NotifyError> {
        let response = self
            .authorized(self.client.post(self.url("/messages")))
            .json(&CreateMessage { content })
            .send()
            .await
            .map_err(|err| NotifyError::Delivery(err.to_string()))?;
        self.checked(response)
            .await?
            .json()
            .await
            .map_err(|err| NotifyError::Delivery(format!("unexpected message payload: {err}")))
    }

    /// Publishes a sent message. Never fails the delivery it belongs to.
    async fn cross_post(&self, channel_kind: u8, message: &Message) -> CrossPostOutcome {
        if !self.settings.cross_post {
            return CrossPostOutcome::Disabled;
        }
        if channel_kind != GUILD_ANNOUNCEMENT {
            watch_debug!(
                "Channel {} is not an announcement channel; not publishing",
                self.settings.channel_id
            );
            return CrossPostOutcome::NotEligible;
        }

        let path = format!("/messages/{}/crosspost", message.id);
        let result = match self
            .authorized(self.client.post(self.url(&path)))
            .send()
            .await
        {
            Ok(response) => self.checked(response).await.map(|_| ()),
            Err(err) => Err(NotifyError::Delivery(err.to_string())),
        };

        match result {
            Ok(()) => CrossPostOutcome::Published,
            Err(err) => {
                watch_warn!("Failed to publish message {}: {}", message.id, err);
                CrossPostOutcome::Failed(err.to_string())
            }
        }
    }

    async fn checked(&self, response: Response) -> Result<Response, NotifyError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let channel_id = self.settings.channel_id.clone();
        match status {
            StatusCode::UNAUTHORIZED => Err(NotifyError::Unauthorized),
            StatusCode::FORBIDDEN => Err(NotifyError::Permission { channel_id }),
            StatusCode::NOT_FOUND => Err(NotifyError::ChannelUnavailable { channel_id }),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(NotifyError::Delivery(format!("{status}: {body}")))
            }
        }
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, link: &str) -> Result<Delivery, NotifyError> {
        let channel_kind = self.channel_kind().await?;
        let message = self.send(link).await?;
        watch_info!(
            "Announced {} in channel {} (message {})",
            link,
            self.settings.channel_id,
            message.id
        );
        let cross_post = self.cross_post(channel_kind, &message).await;
        Ok(Delivery {
            link: link.to_string(),
            message_id: message.id,
            cross_post,
        })
    }
}
