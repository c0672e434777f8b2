use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::story::Story;

pub const DEFAULT_API_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Raw user record as the API returns it. The `stories` field holds the
/// stories this user submitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<Story>,
    #[serde(default)]
    pub stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserRecord,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct StoriesResponse {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct StoryResponse {
    story: Story,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: UserRecord,
}

/// The three fields a user supplies when submitting a story.
#[derive(Debug, Clone, Serialize)]
pub struct NewStory {
    pub author: String,
    pub title: String,
    pub url: String,
}

#[derive(Serialize)]
struct CreateStoryRequest<'a> {
    token: &'a str,
    story: &'a NewStory,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    user: SignupUser<'a>,
}

#[derive(Serialize)]
struct SignupUser<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    user: LoginUser<'a>,
}

#[derive(Serialize)]
struct LoginUser<'a> {
    username: &'a str,
    password: &'a str,
}

/// Thin wrapper around `reqwest::Client` with one method per API endpoint.
///
/// Every method is a single request/response cycle: no retry, no caching,
/// no pagination. Non-2xx responses surface as errors.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Snooze/0.1 (story reader)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the full story list. No auth required; order is API-defined,
    /// newest first.
    pub async fn stories(&self) -> Result<Vec<Story>> {
        let response = self
            .client
            .get(format!("{}/stories", self.base_url))
            .send()
            .await?
            .error_for_status()?;

        let body: StoriesResponse = response.json().await?;
        Ok(body.stories)
    }

    /// Submit a new story. The token travels in the request body for this
    /// endpoint, unlike the query-param endpoints below.
    pub async fn create_story(&self, token: &str, story: &NewStory) -> Result<Story> {
        debug!(title = %story.title, "creating story");

        let response = self
            .client
            .post(format!("{}/stories", self.base_url))
            .json(&CreateStoryRequest { token, story })
            .send()
            .await?
            .error_for_status()?;

        let body: StoryResponse = response.json().await?;
        Ok(body.story)
    }

    pub async fn signup(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let response = self
            .client
            .post(format!("{}/signup", self.base_url))
            .json(&SignupRequest {
                user: SignupUser {
                    username,
                    password,
                    name,
                },
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest {
                user: LoginUser { username, password },
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetch a user record with a previously issued token. Used to restore
    /// a session without a password.
    pub async fn user(&self, token: &str, username: &str) -> Result<UserRecord> {
        let response = self
            .client
            .get(format!("{}/users/{}", self.base_url, username))
            .query(&[("token", token)])
            .send()
            .await?
            .error_for_status()?;

        let body: UserResponse = response.json().await?;
        Ok(body.user)
    }

    /// Mark a story as a favorite. Returns the server's complete favorites
    /// list after the change, not a delta.
    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<Vec<Story>> {
        self.favorite_request(Method::POST, token, username, story_id)
            .await
    }

    /// Remove a story from the favorites. Same snapshot contract as
    /// [`add_favorite`](Self::add_favorite).
    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<Vec<Story>> {
        self.favorite_request(Method::DELETE, token, username, story_id)
            .await
    }

    async fn favorite_request(
        &self,
        method: Method,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<Vec<Story>> {
        debug!(%method, story_id, "favorite request");

        // Trailing slash matters to this API.
        let url = format!(
            "{}/users/{}/favorites/{}/",
            self.base_url, username, story_id
        );
        let response = self
            .client
            .request(method, url)
            .query(&[("token", token)])
            .send()
            .await?
            .error_for_status()?;

        let body: UserResponse = response.json().await?;
        Ok(body.user.favorites)
    }

    /// Delete a story the user submitted. The response body is not consumed.
    pub async fn delete_story(&self, token: &str, story_id: &str) -> Result<()> {
        debug!(story_id, "deleting story");

        self.client
            .delete(format!("{}/stories/{}/", self.base_url, story_id))
            .query(&[("token", token)])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
