use chrono::{DateTime, Utc};
use egg_mode::tweet::Tweet;

/// The timestamp format used by the Twitter v1.1 API (e.g. `Tue Nov 03 09:16:10 +0000 2020`).
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Creation time given to items we can't see, far enough in the past to never be too recent.
pub const PLACEHOLDER_TIMESTAMP: &str = "Mon Nov 13 00:00:00 +0000 2000";

/// A single tweet as seen by the cleaner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub id: u64,
    pub created_at: String,
    pub text: String,
    pub retweeted: bool,
    pub favorited: bool,
}

impl Item {
    /// An item we know only by ID (because the API refused to show it to us).
    ///
    /// Both flags are set so that the cleaner will still try to undo the retweet or remove the
    /// like, and the placeholder timestamp means the age filter never protects it.
    pub fn unseen(id: u64) -> Item {
        Item {
            id,
            created_at: PLACEHOLDER_TIMESTAMP.to_string(),
            text: String::new(),
            retweeted: true,
            favorited: true,
        }
    }

    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT)
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }
}

impl From<Tweet> for Item {
    fn from(tweet: Tweet) -> Self {
        Item {
            id: tweet.id,
            created_at: tweet.created_at.format(TIMESTAMP_FORMAT).to_string(),
            text: tweet.text,
            retweeted: tweet.retweeted.unwrap_or(false),
            favorited: tweet.favorited.unwrap_or(false),
        }
    }
}
