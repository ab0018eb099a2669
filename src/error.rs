use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not parse time '{raw}' from tweet {id}")]
    TimestampParse { id: u64, raw: String },
    #[error("Invalid tweet ID: {0:?}")]
    TweetIdParse(String),
    #[error("Failed to {action} tweet {id}")]
    Action {
        action: &'static str,
        id: u64,
        #[source]
        source: crate::twitter::Error,
    },
    #[error("Failed to look up tweet {id}")]
    Lookup {
        id: u64,
        #[source]
        source: crate::twitter::Error,
    },
    #[error("Failed to get {collection}")]
    Page {
        collection: &'static str,
        #[source]
        source: crate::twitter::Error,
    },
    #[error("Twitter API error")]
    Api(#[from] crate::twitter::Error),
    #[error("Ledger I/O error for {path:?}")]
    LedgerIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid ledger entry in {path:?} at line {line}: {value:?}")]
    LedgerEntry {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("Archive directory not found: {0:?}")]
    ArchivePath(PathBuf),
    #[error("Failed to read archive file {path:?}")]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode archive file {path:?}")]
    ArchiveDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid duration: {0:?}")]
    DurationParse(String),
    #[error("Failed to read config file")]
    ConfigRead(#[source] std::io::Error),
    #[error("Failed to parse config file")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Missing Twitter credentials: {0}")]
    MissingCredentials(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
