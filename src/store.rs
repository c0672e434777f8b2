use std::collections::HashMap;

use crate::story::{Story, StoryId};

/// Single authoritative holder for every story the client knows about.
///
/// The front page keeps the API's order (newest first). Favorites and
/// own-story lists elsewhere reference stories here by id instead of
/// carrying their own copies, so a story is never represented twice.
#[derive(Debug, Default)]
pub struct StoryStore {
    stories: HashMap<StoryId, Story>,
    front_page: Vec<StoryId>,
}

impl StoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the front page with a fresh batch from the API, preserving
    /// the order the API returned.
    pub fn replace_front_page(&mut self, batch: Vec<Story>) {
        self.front_page = batch.iter().map(|s| s.story_id.clone()).collect();
        for story in batch {
            self.stories.insert(story.story_id.clone(), story);
        }
    }

    /// Record a story without touching the front page ordering.
    pub fn upsert(&mut self, story: Story) {
        self.stories.insert(story.story_id.clone(), story);
    }

    /// Insert a newly submitted story at the top of the front page.
    pub fn push_front(&mut self, story: Story) {
        let id = story.story_id.clone();
        self.front_page.retain(|existing| *existing != id);
        self.front_page.insert(0, id.clone());
        self.stories.insert(id, story);
    }

    /// Forget a story everywhere the store tracks it.
    pub fn remove(&mut self, story_id: &str) {
        self.front_page.retain(|id| id != story_id);
        self.stories.remove(story_id);
    }

    pub fn get(&self, story_id: &str) -> Option<&Story> {
        self.stories.get(story_id)
    }

    pub fn contains(&self, story_id: &str) -> bool {
        self.stories.contains_key(story_id)
    }

    /// Stories in front-page order.
    pub fn front_page(&self) -> impl Iterator<Item = &Story> {
        self.front_page.iter().filter_map(|id| self.stories.get(id))
    }

    pub fn front_page_len(&self) -> usize {
        self.front_page.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn story(id: &str) -> Story {
        Story {
            story_id: id.to_string(),
            title: format!("Story {}", id),
            author: "Author".to_string(),
            url: "https://example.com".to_string(),
            username: "user".to_string(),
            created_at: Utc::now(),
        }
    }

    fn front_page_ids(store: &StoryStore) -> Vec<&str> {
        store.front_page().map(|s| s.story_id.as_str()).collect()
    }

    mod front_page_tests {
        use super::*;

        #[test]
        fn test_replace_preserves_order_and_size() {
            let mut store = StoryStore::new();
            store.replace_front_page(vec![story("3"), story("2"), story("1")]);

            assert_eq!(store.front_page_len(), 3);
            assert_eq!(front_page_ids(&store), vec!["3", "2", "1"]);
        }

        #[test]
        fn test_replace_discards_previous_page() {
            let mut store = StoryStore::new();
            store.replace_front_page(vec![story("1"), story("2")]);
            store.replace_front_page(vec![story("9")]);

            assert_eq!(front_page_ids(&store), vec!["9"]);
        }

        #[test]
        fn test_push_front_lands_at_index_zero() {
            let mut store = StoryStore::new();
            store.replace_front_page(vec![story("2"), story("1")]);
            store.push_front(story("3"));

            assert_eq!(front_page_ids(&store), vec!["3", "2", "1"]);
        }

        #[test]
        fn test_push_front_does_not_duplicate_existing_id() {
            let mut store = StoryStore::new();
            store.replace_front_page(vec![story("2"), story("1")]);
            store.push_front(story("1"));

            assert_eq!(front_page_ids(&store), vec!["1", "2"]);
        }

        #[test]
        fn test_empty_store() {
            let store = StoryStore::new();
            assert_eq!(store.front_page_len(), 0);
            assert!(store.front_page().next().is_none());
        }
    }

    mod membership_tests {
        use super::*;

        #[test]
        fn test_upsert_and_get() {
            let mut store = StoryStore::new();
            store.upsert(story("7"));

            assert!(store.contains("7"));
            assert_eq!(store.get("7").unwrap().title, "Story 7");
            // Upserted stories do not appear on the front page
            assert_eq!(store.front_page_len(), 0);
        }

        #[test]
        fn test_upsert_overwrites() {
            let mut store = StoryStore::new();
            store.upsert(story("7"));

            let mut updated = story("7");
            updated.title = "Updated".to_string();
            store.upsert(updated);

            assert_eq!(store.get("7").unwrap().title, "Updated");
        }

        #[test]
        fn test_remove_clears_story_and_front_page_entry() {
            let mut store = StoryStore::new();
            store.replace_front_page(vec![story("5"), story("6")]);

            store.remove("5");

            assert!(!store.contains("5"));
            assert_eq!(front_page_ids(&store), vec!["6"]);
        }

        #[test]
        fn test_remove_unknown_id_is_noop() {
            let mut store = StoryStore::new();
            store.replace_front_page(vec![story("1")]);

            store.remove("missing");

            assert_eq!(store.front_page_len(), 1);
        }
    }
}
