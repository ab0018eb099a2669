mod live;
mod replay;

use std::fmt::{Display, Formatter};

/// Which of the user's collections a sweep works through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// The user's own tweets and retweets, which get deleted or unretweeted.
    Tweets,
    /// The tweets the user has liked, which get unfavorited.
    Likes,
}

impl Target {
    pub fn collection(&self) -> &'static str {
        match self {
            Target::Tweets => "timeline",
            Target::Likes => "favorites",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Target::Tweets => "deleted",
            Target::Likes => "unfavorited",
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Target::Tweets => "tweets",
            Target::Likes => "likes",
        })
    }
}

/// Bounds on how much of a live collection a single run walks through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SweepLimits {
    pub max_pages: usize,
    pub page_size: usize,
}

impl SweepLimits {
    /// Pages fetched per collection per run. Accounts with more tweets than this covers need several runs.
    pub const DEFAULT_MAX_PAGES: usize = 10;
    /// The largest page the timeline endpoints allow (the default is only 20).
    pub const DEFAULT_PAGE_SIZE: usize = 200;
}

impl Default for SweepLimits {
    fn default() -> Self {
        SweepLimits {
            max_pages: Self::DEFAULT_MAX_PAGES,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
