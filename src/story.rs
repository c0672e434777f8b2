use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Identifier the API assigns to a story. The server is the source of truth
/// for these; the client never mints its own.
pub type StoryId = String;

/// One story, exactly as the API returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: StoryId,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Parses the story's url and returns its host name.
    ///
    /// Fails for a relative url or one without a host; no fallback value is
    /// guessed.
    pub fn host_name(&self) -> Result<String> {
        let parsed = Url::parse(&self.url)?;
        match parsed.host_str() {
            Some(host) => Ok(host.to_string()),
            None => Err(Error::BadStoryUrl(url::ParseError::EmptyHost)),
        }
    }
}
