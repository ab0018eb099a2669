pub mod config;
mod error;
#[cfg(test)]
pub(crate) mod mock;

pub use error::{Error, FORBIDDEN, NOT_FOUND, UNAUTHORIZED};

use crate::item::Item;
use self::config::Credentials;
use egg_mode::{tweet::Timeline, user::TwitterUser, KeyPair, Token};
use futures::{future::LocalBoxFuture, FutureExt, TryFutureExt};
use std::path::Path;

pub type Result<T> = std::result::Result<T, Error>;
pub type ApiFuture<'a, T> = LocalBoxFuture<'a, Result<T>>;

/// The parts of the Twitter API the cleaner needs.
///
/// Timeline methods return tweets in descending ID order. The `max_id` cursor is exclusive: only
/// tweets strictly older than it are returned.
pub trait Api {
    fn timeline(&self, page_size: usize, max_id: Option<u64>) -> ApiFuture<'_, Vec<Item>>;
    fn favorites(&self, page_size: usize, max_id: Option<u64>) -> ApiFuture<'_, Vec<Item>>;
    fn get_item(&self, id: u64) -> ApiFuture<'_, Item>;
    fn delete_item(&self, id: u64) -> ApiFuture<'_, ()>;
    fn undo_reshare(&self, id: u64) -> ApiFuture<'_, ()>;
    fn remove_favorite(&self, id: u64) -> ApiFuture<'_, ()>;
}

pub struct Client {
    token: Token,
    user: TwitterUser,
}

impl Client {
    pub async fn from_key_pairs(consumer: KeyPair, access: KeyPair) -> Result<Client> {
        let token = Token::Access { consumer, access };
        let user = egg_mode::auth::verify_tokens(&token).await?.response;

        log::info!("Authenticated as @{}", user.screen_name);

        Ok(Client { token, user })
    }

    pub async fn from_credentials(credentials: &Credentials) -> Result<Client> {
        let (consumer, access) = credentials.key_pairs();

        Self::from_key_pairs(consumer, access).await
    }

    pub async fn from_config_file<P: AsRef<Path>>(path: P) -> crate::Result<Client> {
        let config = config::Config::load(path)?;

        Ok(Self::from_credentials(&config.twitter).await?)
    }

    pub fn user_id(&self) -> u64 {
        self.user.id
    }

    fn page(timeline: Timeline, max_id: Option<u64>) -> ApiFuture<'static, Vec<Item>> {
        // Twitter's max_id is inclusive.
        let max_id = max_id.map(|id| id.saturating_sub(1));

        async move {
            let response = timeline.call(None, max_id).await?;
            let res: Result<Vec<Item>> =
                Ok(response.response.into_iter().map(Item::from).collect());
            res
        }
        .boxed_local()
    }
}

impl Api for Client {
    fn timeline(&self, page_size: usize, max_id: Option<u64>) -> ApiFuture<'_, Vec<Item>> {
        // With a count, retweets are excluded unless we ask for them.
        let timeline = egg_mode::tweet::user_timeline(self.user.id, true, true, &self.token)
            .with_page_size(page_size as i32);

        Self::page(timeline, max_id)
    }

    fn favorites(&self, page_size: usize, max_id: Option<u64>) -> ApiFuture<'_, Vec<Item>> {
        let timeline =
            egg_mode::tweet::liked_by(self.user.id, &self.token).with_page_size(page_size as i32);

        Self::page(timeline, max_id)
    }

    fn get_item(&self, id: u64) -> ApiFuture<'_, Item> {
        egg_mode::tweet::show(id, &self.token)
            .map_ok(|response| Item::from(response.response))
            .map_err(Error::from)
            .boxed_local()
    }

    fn delete_item(&self, id: u64) -> ApiFuture<'_, ()> {
        egg_mode::tweet::delete(id, &self.token)
            .map_ok(|_| ())
            .map_err(Error::from)
            .boxed_local()
    }

    fn undo_reshare(&self, id: u64) -> ApiFuture<'_, ()> {
        egg_mode::tweet::unretweet(id, &self.token)
            .map_ok(|_| ())
            .map_err(Error::from)
            .boxed_local()
    }

    fn remove_favorite(&self, id: u64) -> ApiFuture<'_, ()> {
        egg_mode::tweet::unlike(id, &self.token)
            .map_ok(|_| ())
            .map_err(Error::from)
            .boxed_local()
    }
}
