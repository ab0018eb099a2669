use crate::archive::Archive;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::policy::Policy;
use crate::sweep::{SweepLimits, Target};
use crate::twitter::{self, Api};
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// A mutating call the cleaner can make for a tweet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Delete,
    UndoRetweet,
    Unfavorite,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Delete => "delete",
            Action::UndoRetweet => "unretweet",
            Action::Unfavorite => "unfavorite",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts of tweets acted on during a full run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub archive_deleted: usize,
    pub archive_unfavorited: usize,
    pub timeline_deleted: usize,
    pub unfavorited: usize,
}

pub struct Cleaner<A> {
    pub(crate) api: A,
    pub(crate) policy: Policy,
    pub(crate) limits: SweepLimits,
    pub(crate) dry_run: bool,
    keep_likes: bool,
}

impl<A: Api> Cleaner<A> {
    pub fn new(api: A, policy: Policy) -> Cleaner<A> {
        Cleaner {
            api,
            policy,
            limits: SweepLimits::default(),
            dry_run: false,
            keep_likes: false,
        }
    }

    /// Report what would be done without making any mutating calls.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Skip both unfavoriting sweeps.
    pub fn keep_likes(mut self, keep_likes: bool) -> Self {
        self.keep_likes = keep_likes;
        self
    }

    pub fn limits(mut self, limits: SweepLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run every sweep in order, stopping at the first fatal error.
    pub async fn run(&self, archive: Option<&Archive>) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if let Some(archive) = archive {
            log::info!("Deleting tweets from Twitter archive at {:?}", archive.path());
            let records = archive.tweets()?;
            summary.archive_deleted = self
                .sweep_archive(Target::Tweets, &records, archive.tweets_ledger_path())
                .await?;

            if !self.keep_likes {
                log::info!(
                    "Unfavoriting tweets from Twitter archive at {:?}",
                    archive.path()
                );
                let records = archive.likes()?;
                summary.archive_unfavorited = self
                    .sweep_archive(Target::Likes, &records, archive.likes_ledger_path())
                    .await?;
            }
        }

        log::info!("Deleting tweets from Twitter timeline");
        summary.timeline_deleted = self.sweep_live(Target::Tweets).await?;

        if !self.keep_likes {
            log::info!("Unfavoriting tweets from Twitter favorites");
            summary.unfavorited = self.sweep_live(Target::Likes).await?;
        }

        Ok(summary)
    }

    pub(crate) async fn act(&self, target: Target, item: &Item) -> Result<bool> {
        match target {
            Target::Tweets => self.act_on_item(item).await,
            Target::Likes => self.unfavorite_item(item).await,
        }
    }

    /// Delete a tweet, or undo it if it's a retweet.
    ///
    /// Returns whether anything was (or in a dry run, would have been) done. A tweet that is not a
    /// retweet but that we've liked is left alone here.
    pub async fn act_on_item(&self, item: &Item) -> Result<bool> {
        let created_at = Self::created_at(item)?;

        if self.policy.is_exempt(item, created_at, Utc::now()) {
            return Ok(false);
        }

        let action = if item.retweeted {
            Action::UndoRetweet
        } else if !item.favorited {
            Action::Delete
        } else {
            return Ok(false);
        };

        self.perform(action, item, created_at).await
    }

    /// Remove our like from a tweet.
    pub async fn unfavorite_item(&self, item: &Item) -> Result<bool> {
        if !item.favorited {
            return Ok(false);
        }

        let created_at = Self::created_at(item)?;

        if self.policy.is_exempt(item, created_at, Utc::now()) {
            return Ok(false);
        }

        self.perform(Action::Unfavorite, item, created_at).await
    }

    /// Look up the current state of a tweet given its ID as a string.
    ///
    /// Returns `None` if the tweet no longer exists. If we're not allowed to see it, we assume it's
    /// a retweet or like of a protected account and return a placeholder.
    pub async fn lookup(&self, raw_id: &str) -> Result<Option<Item>> {
        let id = parse_tweet_id(raw_id)?;
        self.lookup_id(id).await
    }

    pub(crate) async fn lookup_id(&self, id: u64) -> Result<Option<Item>> {
        match self.api.get_item(id).await {
            Ok(item) => Ok(Some(item)),
            Err(error) if error.is_not_found() => {
                log::warn!("Ignoring 404 for tweet {}: {}", id, error);
                Ok(None)
            }
            Err(error) if error.is_forbidden() || error.is_unauthorized() => {
                log::warn!(
                    "Will try to unretweet and unfavorite {} anyway after: {}",
                    id,
                    error
                );
                Ok(Some(Item::unseen(id)))
            }
            Err(source) => Err(Error::Lookup { id, source }),
        }
    }

    fn created_at(item: &Item) -> Result<DateTime<Utc>> {
        item.created_at_time()
            .ok_or_else(|| Error::TimestampParse {
                id: item.id,
                raw: item.created_at.clone(),
            })
    }

    async fn perform(
        &self,
        action: Action,
        item: &Item,
        created_at: DateTime<Utc>,
    ) -> Result<bool> {
        log::debug!(
            "Going to {} tweet {} ({}): {}",
            action,
            item.id,
            created_at,
            item.text
        );

        if self.dry_run {
            return Ok(true);
        }

        let result = match action {
            Action::Delete => self.api.delete_item(item.id).await,
            Action::UndoRetweet => self.api.undo_reshare(item.id).await,
            Action::Unfavorite => self.api.remove_favorite(item.id).await,
        };

        match result {
            Ok(()) => Ok(true),
            Err(error) if is_tolerated(&error) => {
                log::warn!(
                    "Ignored error while trying to {} tweet {}: {}",
                    action,
                    item.id,
                    error
                );
                Ok(false)
            }
            Err(source) => Err(Error::Action {
                action: action.name(),
                id: item.id,
                source,
            }),
        }
    }
}

fn is_tolerated(error: &twitter::Error) -> bool {
    error.is_forbidden() || error.is_not_found()
}

pub fn parse_tweet_id(input: &str) -> Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::TweetIdParse(input.to_string()))
}
