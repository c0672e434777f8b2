use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{ApiClient, AuthResponse, NewStory};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::session::{Auth, Session};
use crate::store::StoryStore;
use crate::story::Story;

/// Everything the front end works with, in one place: the API client, the
/// story store, and the authentication state. Callers pass this around by
/// reference; there are no globals.
pub struct App {
    client: ApiClient,
    pub store: StoryStore,
    pub auth: Auth,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            client: ApiClient::new(
                &config.api_url,
                Duration::from_secs(config.request_timeout_secs),
            ),
            store: StoryStore::new(),
            auth: Auth::Anonymous,
        }
    }

    /// Refresh the front page from the API. Returns how many stories came
    /// back; the store keeps them in the order received.
    pub async fn fetch_front_page(&mut self) -> Result<usize> {
        let stories = self.client.stories().await?;
        let count = stories.len();
        self.store.replace_front_page(stories);
        info!("fetched {count} stories");
        Ok(count)
    }

    /// Create an account and log in with the returned token.
    pub async fn signup(&mut self, username: &str, password: &str, name: &str) -> Result<()> {
        let auth = self.client.signup(username, password, name).await?;
        info!(username, "signed up");
        self.install_session(auth);
        Ok(())
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let auth = self.client.login(username, password).await?;
        info!(username, "logged in");
        self.install_session(auth);
        Ok(())
    }

    /// Re-authenticate with a stored token, without a password.
    ///
    /// This runs unattended at startup, so failure (stale token, network
    /// trouble) is absorbed: the app stays anonymous and no error reaches
    /// the caller.
    pub async fn restore_session(&mut self, credentials: &Credentials) -> Option<&Session> {
        match self
            .client
            .user(&credentials.token, &credentials.username)
            .await
        {
            Ok(record) => {
                let session = Session::from_record(&record, credentials.token.clone());
                for story in record.favorites.into_iter().chain(record.stories) {
                    self.store.upsert(story);
                }
                debug!(username = %session.username, "session restored");
                self.auth = Auth::Authenticated(session);
                self.auth.session()
            }
            Err(err) => {
                warn!("session restore failed: {err}");
                None
            }
        }
    }

    pub fn logout(&mut self) {
        self.auth = Auth::Anonymous;
    }

    /// Handle for operations that require a logged-in user. While the app
    /// is anonymous there is nothing to call them on.
    pub fn signed_in(&mut self) -> Option<SignedIn<'_>> {
        match &mut self.auth {
            Auth::Authenticated(session) => Some(SignedIn {
                client: &self.client,
                store: &mut self.store,
                session,
            }),
            Auth::Anonymous => None,
        }
    }

    fn install_session(&mut self, auth: AuthResponse) {
        let session = Session::from_record(&auth.user, auth.token);
        for story in auth.user.favorites.into_iter().chain(auth.user.stories) {
            self.store.upsert(story);
        }
        self.auth = Auth::Authenticated(session);
    }
}

/// Borrowed view of the app carrying a live session.
pub struct SignedIn<'a> {
    client: &'a ApiClient,
    store: &'a mut StoryStore,
    session: &'a mut Session,
}

impl SignedIn<'_> {
    pub fn session(&self) -> &Session {
        self.session
    }

    /// Submit a story. On success the new story lands at the top of the
    /// front page and of the user's own list; on failure nothing local is
    /// touched.
    pub async fn submit_story(&mut self, new_story: &NewStory) -> Result<Story> {
        let story = self
            .client
            .create_story(self.session.token(), new_story)
            .await?;
        info!(story_id = %story.story_id, "story submitted");

        self.session.push_own_front(story.story_id.clone());
        self.store.push_front(story.clone());
        Ok(story)
    }

    /// Favorite the story if it is not one yet, unfavorite it otherwise.
    ///
    /// The server replies with the complete post-change favorites list,
    /// which replaces the local one wholesale. Returns whether the story is
    /// a favorite after the toggle.
    pub async fn toggle_favorite(&mut self, story_id: &str) -> Result<bool> {
        let was_favorite = self.session.is_favorite(story_id);
        debug!(story_id, was_favorite, "toggling favorite");

        let snapshot = if was_favorite {
            self.client
                .remove_favorite(self.session.token(), &self.session.username, story_id)
                .await?
        } else {
            self.client
                .add_favorite(self.session.token(), &self.session.username, story_id)
                .await?
        };

        let ids = snapshot.iter().map(|s| s.story_id.clone()).collect();
        for story in snapshot {
            self.store.upsert(story);
        }
        self.session.set_favorites(ids);
        Ok(!was_favorite)
    }

    /// Delete one of the user's stories. The id is purged from the front
    /// page, the own list, and the favorites only after the server confirms.
    pub async fn delete_story(&mut self, story_id: &str) -> Result<()> {
        self.client
            .delete_story(self.session.token(), story_id)
            .await?;
        info!(story_id, "story deleted");

        self.session.forget_story(story_id);
        self.store.remove(story_id);
        Ok(())
    }

    /// Favorited stories resolved against the store, in favorites order.
    pub fn favorites(&self) -> Vec<&Story> {
        self.session
            .favorites()
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Stories this user submitted, resolved against the store.
    pub fn own_stories(&self) -> Vec<&Story> {
        self.session
            .own_stories()
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }
}
