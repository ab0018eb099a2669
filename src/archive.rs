//! Reading tweet and like IDs from a Twitter data export.
//!
//! The export's data files are JavaScript rather than JSON: each one assigns a JSON array to a
//! global (e.g. `window.YTD.tweets.part0 = [...]`). We strip the assignment and decode the rest.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A tweet or like ID from the archive, as it appears in the export.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub id: String,
}

#[derive(Deserialize)]
struct TweetEntry {
    tweet: TweetRecord,
}

#[derive(Deserialize)]
struct TweetRecord {
    id: String,
}

#[derive(Deserialize)]
struct LikeEntry {
    like: LikeRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeRecord {
    tweet_id: String,
}

pub struct Archive {
    base: PathBuf,
}

impl Archive {
    const DATA_DIR_NAME: &'static str = "data";
    const TWEETS_FILE_NAME: &'static str = "tweets.js";
    const LIKES_FILE_NAME: &'static str = "like.js";
    const TWEETS_LEDGER_FILE_NAME: &'static str = "handled_tweets.txt";
    const LIKES_LEDGER_FILE_NAME: &'static str = "handled_likes.txt";
    const TWEETS_PREFIX: &'static str = "window.YTD.tweets.part0 = ";
    const LIKES_PREFIX: &'static str = "window.YTD.like.part0 = ";

    pub fn open<P: AsRef<Path>>(base: P) -> Result<Archive> {
        let base = base.as_ref().to_path_buf();

        if base.is_dir() {
            Ok(Archive { base })
        } else {
            Err(Error::ArchivePath(base))
        }
    }

    pub fn path(&self) -> &Path {
        &self.base
    }

    fn data_path(&self, file_name: &str) -> PathBuf {
        self.base.join(Self::DATA_DIR_NAME).join(file_name)
    }

    pub fn tweets_ledger_path(&self) -> PathBuf {
        self.data_path(Self::TWEETS_LEDGER_FILE_NAME)
    }

    pub fn likes_ledger_path(&self) -> PathBuf {
        self.data_path(Self::LIKES_LEDGER_FILE_NAME)
    }

    pub fn tweets(&self) -> Result<Vec<Record>> {
        let entries: Vec<TweetEntry> =
            Self::load(&self.data_path(Self::TWEETS_FILE_NAME), Self::TWEETS_PREFIX)?;

        Ok(entries
            .into_iter()
            .map(|entry| Record { id: entry.tweet.id })
            .collect())
    }

    pub fn likes(&self) -> Result<Vec<Record>> {
        let entries: Vec<LikeEntry> =
            Self::load(&self.data_path(Self::LIKES_FILE_NAME), Self::LIKES_PREFIX)?;

        Ok(entries
            .into_iter()
            .map(|entry| Record {
                id: entry.like.tweet_id,
            })
            .collect())
    }

    fn load<T: DeserializeOwned>(path: &Path, prefix: &str) -> Result<T> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ArchiveRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(strip_assignment(&contents, prefix)).map_err(|source| {
            Error::ArchiveDecode {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

/// Remove the JavaScript assignment in front of the JSON value.
///
/// Larger exports are split into several parts with different variable names, so if the expected
/// prefix isn't there we fall back to cutting at the first `=`.
fn strip_assignment<'a>(contents: &'a str, prefix: &str) -> &'a str {
    let contents = contents.trim_start_matches('\u{feff}');

    if let Some(rest) = contents.strip_prefix(prefix) {
        rest
    } else if contents.starts_with("window.") {
        contents
            .find('=')
            .map(|index| &contents[index + 1..])
            .unwrap_or(contents)
    } else {
        contents
    }
}
