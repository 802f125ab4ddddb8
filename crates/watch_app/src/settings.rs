//! Settings file for the watcher, written in RON.
//!
//! Every field has a default, so a file only needs the Discord destination:
//!
//! ```ron
//! (discord: (channel_id: "123456789012345678", cross_post: true))
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use watch_core::{LinkFilter, DEFAULT_SITE_MARKER, DEFAULT_THUMBNAIL_MARKER};
use watch_engine::{DiscordSettings, FetchSettings, DEFAULT_API_BASE};

/// Overrides `discord.token` so the secret can stay out of the settings file.
pub const TOKEN_ENV: &str = "ANIME_WATCH_DISCORD_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub source_url: String,
    pub state_path: PathBuf,
    pub interval_secs: u64,
    /// Stop polling when the notifier reports a configuration failure.
    pub exit_on_config_error: bool,
    pub fetch: FetchSection,
    pub filter: FilterSection,
    pub discord: DiscordSection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: "https://mavanimes.co".to_string(),
            state_path: PathBuf::from("state/seen_links.json"),
            interval_secs: 300,
            exit_on_config_error: true,
            fetch: FetchSection::default(),
            filter: FilterSection::default(),
            discord: DiscordSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchSection {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for FetchSection {
    fn default() -> Self {
        let defaults = FetchSettings::default();
        Self {
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            max_bytes: defaults.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSection {
    pub site_marker: String,
    pub thumbnail_marker: String,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            site_marker: DEFAULT_SITE_MARKER.to_string(),
            thumbnail_marker: DEFAULT_THUMBNAIL_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscordSection {
    pub token: String,
    pub channel_id: String,
    pub cross_post: bool,
    pub api_base: String,
}

impl Default for DiscordSection {
    fn default() -> Self {
        Self {
            token: String::new(),
            channel_id: String::new(),
            cross_post: false,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let mut settings = Self::parse(&content)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        settings.apply_token_override(std::env::var(TOKEN_ENV).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            self.discord.token = token;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.discord.token.trim().is_empty() {
            bail!("discord.token is empty; set it in the settings file or {TOKEN_ENV}");
        }
        if self.discord.channel_id.trim().is_empty() {
            bail!("discord.channel_id is empty");
        }
        if self.interval_secs == 0 {
            bail!("interval_secs must be greater than zero");
        }
        if self.filter.site_marker.is_empty() || self.filter.thumbnail_marker.is_empty() {
            bail!("filter markers must not be empty");
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            max_bytes: self.fetch.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn link_filter(&self) -> LinkFilter {
        LinkFilter {
            site_marker: self.filter.site_marker.clone(),
            thumbnail_marker: self.filter.thumbnail_marker.clone(),
        }
    }

    pub fn discord_settings(&self) -> DiscordSettings {
        DiscordSettings {
            token: self.discord.token.clone(),
            channel_id: self.discord.channel_id.clone(),
            cross_post: self.discord.cross_post,
            api_base: self.discord.api_base.clone(),
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
        }
    }
}
