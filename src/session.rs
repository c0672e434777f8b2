use chrono::{DateTime, Utc};

use crate::api::UserRecord;
use crate::story::StoryId;

/// The logged-in user: identity, the token the API issued, and which
/// stories they favorited or submitted, by id.
///
/// The token is opaque and never refreshed; an expired token simply makes
/// the next authenticated request fail.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    token: String,
    favorites: Vec<StoryId>,
    own_stories: Vec<StoryId>,
}

impl Session {
    pub(crate) fn from_record(record: &UserRecord, token: String) -> Self {
        Self {
            username: record.username.clone(),
            name: record.name.clone(),
            created_at: record.created_at,
            token,
            favorites: record.favorites.iter().map(|s| s.story_id.clone()).collect(),
            own_stories: record.stories.iter().map(|s| s.story_id.clone()).collect(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether the story is currently a favorite. Drives the add-vs-remove
    /// decision when toggling, and the marker shown next to a story.
    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|id| id == story_id)
    }

    pub fn owns(&self, story_id: &str) -> bool {
        self.own_stories.iter().any(|id| id == story_id)
    }

    /// Favorited story ids, in the order the API last reported them.
    pub fn favorites(&self) -> &[StoryId] {
        &self.favorites
    }

    /// Ids of the stories this user submitted, newest first.
    pub fn own_stories(&self) -> &[StoryId] {
        &self.own_stories
    }

    /// Replace the favorites list wholesale with the server's snapshot.
    pub(crate) fn set_favorites(&mut self, ids: Vec<StoryId>) {
        self.favorites = ids;
    }

    pub(crate) fn push_own_front(&mut self, id: StoryId) {
        self.own_stories.insert(0, id);
    }

    /// Drop a story id from both membership lists.
    pub(crate) fn forget_story(&mut self, story_id: &str) {
        self.own_stories.retain(|id| id != story_id);
        self.favorites.retain(|id| id != story_id);
    }
}

/// Authentication state of the app.
///
/// Operations that need a token are only reachable through a handle derived
/// from the `Authenticated` variant, so they cannot be called while
/// anonymous. There are no intermediate states.
#[derive(Debug, Default)]
pub enum Auth {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl Auth {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Auth::Authenticated(session) => Some(session),
            Auth::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Auth::Authenticated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::Story;

    fn story(id: &str) -> Story {
        Story {
            story_id: id.to_string(),
            title: "T".to_string(),
            author: "A".to_string(),
            url: "https://example.com".to_string(),
            username: "u".to_string(),
            created_at: Utc::now(),
        }
    }

    fn record(favorites: Vec<Story>, stories: Vec<Story>) -> UserRecord {
        UserRecord {
            username: "u".to_string(),
            name: "User".to_string(),
            created_at: Utc::now(),
            favorites,
            stories,
        }
    }

    #[test]
    fn test_from_record_maps_lists_to_ids() {
        let session = Session::from_record(
            &record(vec![story("1"), story("2")], vec![story("3")]),
            "tok".to_string(),
        );

        assert_eq!(session.token(), "tok");
        assert_eq!(session.favorites(), ["1".to_string(), "2".to_string()]);
        assert_eq!(session.own_stories(), ["3".to_string()]);
    }

    #[test]
    fn test_from_record_empty_lists() {
        let session = Session::from_record(&record(vec![], vec![]), "tok".to_string());
        assert!(session.favorites().is_empty());
        assert!(session.own_stories().is_empty());
    }

    #[test]
    fn test_is_favorite_scans_by_id() {
        let session = Session::from_record(&record(vec![story("5")], vec![]), "tok".to_string());
        assert!(session.is_favorite("5"));
        assert!(!session.is_favorite("6"));
    }

    #[test]
    fn test_owns() {
        let session = Session::from_record(&record(vec![], vec![story("9")]), "tok".to_string());
        assert!(session.owns("9"));
        assert!(!session.owns("5"));
    }

    #[test]
    fn test_forget_story_clears_both_lists() {
        let mut session = Session::from_record(
            &record(vec![story("5"), story("6")], vec![story("5")]),
            "tok".to_string(),
        );

        session.forget_story("5");

        assert_eq!(session.favorites(), ["6".to_string()]);
        assert!(session.own_stories().is_empty());
    }

    #[test]
    fn test_push_own_front() {
        let mut session = Session::from_record(&record(vec![], vec![story("1")]), "tok".to_string());
        session.push_own_front("2".to_string());
        assert_eq!(session.own_stories(), ["2".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_auth_states() {
        let auth = Auth::Anonymous;
        assert!(!auth.is_authenticated());
        assert!(auth.session().is_none());

        let session = Session::from_record(&record(vec![], vec![]), "tok".to_string());
        let auth = Auth::Authenticated(session);
        assert!(auth.is_authenticated());
        assert_eq!(auth.session().unwrap().username, "u");
    }
}
