use crate::error::{Error, Result};
use egg_mode::KeyPair;
use serde_derive::Deserialize;
use std::fs;
use std::path::Path;

/// Contents of a TOML key file, whose credentials live in a `[twitter]` table.
#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct Config {
    pub twitter: Credentials,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(Error::ConfigRead)?;

        Ok(toml::from_str(&contents)?)
    }
}

/// The application and user keys needed to act on the account.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Credentials {
    pub const CONSUMER_KEY_VAR: &'static str = "TWITTER_CONSUMER_KEY";
    pub const CONSUMER_SECRET_VAR: &'static str = "TWITTER_CONSUMER_SECRET";
    pub const ACCESS_TOKEN_VAR: &'static str = "TWITTER_ACCESS_TOKEN";
    pub const ACCESS_TOKEN_SECRET_VAR: &'static str = "TWITTER_ACCESS_TOKEN_SECRET";

    /// Assemble credentials from individually supplied values (flags or environment variables).
    ///
    /// Missing and blank values are both errors, reported by the variable name.
    pub fn from_parts(
        consumer_key: Option<&str>,
        consumer_secret: Option<&str>,
        access_token: Option<&str>,
        access_token_secret: Option<&str>,
    ) -> Result<Credentials> {
        Ok(Credentials {
            consumer_key: required(consumer_key, Self::CONSUMER_KEY_VAR)?,
            consumer_secret: required(consumer_secret, Self::CONSUMER_SECRET_VAR)?,
            access_token: required(access_token, Self::ACCESS_TOKEN_VAR)?,
            access_token_secret: required(access_token_secret, Self::ACCESS_TOKEN_SECRET_VAR)?,
        })
    }

    /// Consumer and access key pairs, in the order egg-mode's `Token::Access` takes them.
    pub fn key_pairs(&self) -> (KeyPair, KeyPair) {
        (
            KeyPair::new(self.consumer_key.clone(), self.consumer_secret.clone()),
            KeyPair::new(self.access_token.clone(), self.access_token_secret.clone()),
        )
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::MissingCredentials(name)),
    }
}
