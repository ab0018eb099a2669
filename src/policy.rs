use crate::item::Item;
use chrono::{DateTime, Duration, Utc};

/// Decides which tweets must be left alone.
#[derive(Clone, Debug)]
pub struct Policy {
    max_age: Duration,
    keep: Vec<String>,
}

impl Policy {
    pub fn new(max_age: Duration, keep: Vec<String>) -> Policy {
        Policy { max_age, keep }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Whether the ID or the text of the tweet matches any keep-list token.
    ///
    /// IDs must match exactly, while text matches are case-insensitive substring matches.
    pub fn is_kept(&self, id: u64, text: &str) -> bool {
        let id = id.to_string();
        let text = text.to_lowercase();

        self.keep
            .iter()
            .any(|token| *token == id || text.contains(&token.to_lowercase()))
    }

    pub fn is_too_recent(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(created_at) < self.max_age
    }

    pub fn is_exempt(&self, item: &Item, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.is_too_recent(created_at, now) || self.is_kept(item.id, &item.text)
    }
}
