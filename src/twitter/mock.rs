use super::{Api, ApiFuture, Error};
use crate::item::{Item, TIMESTAMP_FORMAT};
use chrono::{Duration, Utc};
use futures::{future::ready, FutureExt};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Call {
    Timeline(Option<u64>),
    Favorites(Option<u64>),
    GetItem(u64),
    Delete(u64),
    UndoReshare(u64),
    RemoveFavorite(u64),
}

impl Call {
    pub(crate) fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Delete(_) | Call::UndoReshare(_) | Call::RemoveFavorite(_)
        )
    }
}

/// An in-memory stand-in for the Twitter API that records every call.
#[derive(Default)]
pub(crate) struct MockApi {
    pub(crate) timeline: Vec<Item>,
    pub(crate) favorites: Vec<Item>,
    pub(crate) items: HashMap<u64, Item>,
    pub(crate) failures: HashMap<Call, u16>,
    calls: RefCell<Vec<Call>>,
}

impl MockApi {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    pub(crate) fn fail(mut self, call: Call, status: u16) -> Self {
        self.failures.insert(call, status);
        self
    }

    fn record(&self, call: Call) -> super::Result<()> {
        self.calls.borrow_mut().push(call);

        match self.failures.get(&call) {
            Some(status) => Err(Error::Status {
                status: *status,
                message: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn page(items: &[Item], page_size: usize, max_id: Option<u64>) -> Vec<Item> {
        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| b.id.cmp(&a.id));

        sorted
            .into_iter()
            .filter(|item| max_id.map_or(true, |max_id| item.id < max_id))
            .take(page_size)
            .collect()
    }
}

impl Api for MockApi {
    fn timeline(&self, page_size: usize, max_id: Option<u64>) -> ApiFuture<'_, Vec<Item>> {
        let result = self
            .record(Call::Timeline(max_id))
            .map(|_| Self::page(&self.timeline, page_size, max_id));
        ready(result).boxed_local()
    }

    fn favorites(&self, page_size: usize, max_id: Option<u64>) -> ApiFuture<'_, Vec<Item>> {
        let result = self
            .record(Call::Favorites(max_id))
            .map(|_| Self::page(&self.favorites, page_size, max_id));
        ready(result).boxed_local()
    }

    fn get_item(&self, id: u64) -> ApiFuture<'_, Item> {
        let result = self.record(Call::GetItem(id)).and_then(|_| {
            self.items.get(&id).cloned().ok_or_else(|| Error::Status {
                status: super::NOT_FOUND,
                message: "No status found with that ID".to_string(),
            })
        });
        ready(result).boxed_local()
    }

    fn delete_item(&self, id: u64) -> ApiFuture<'_, ()> {
        ready(self.record(Call::Delete(id))).boxed_local()
    }

    fn undo_reshare(&self, id: u64) -> ApiFuture<'_, ()> {
        ready(self.record(Call::UndoReshare(id))).boxed_local()
    }

    fn remove_favorite(&self, id: u64) -> ApiFuture<'_, ()> {
        ready(self.record(Call::RemoveFavorite(id))).boxed_local()
    }
}

/// A plain tweet created the given number of days ago.
pub(crate) fn tweet(id: u64, days_ago: i64, text: &str) -> Item {
    Item {
        id,
        created_at: (Utc::now() - Duration::days(days_ago))
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        text: text.to_string(),
        retweeted: false,
        favorited: false,
    }
}

pub(crate) fn retweet(id: u64, days_ago: i64) -> Item {
    Item {
        retweeted: true,
        ..tweet(id, days_ago, "RT @someone: hi")
    }
}

pub(crate) fn liked(id: u64, days_ago: i64) -> Item {
    Item {
        favorited: true,
        ..tweet(id, days_ago, "a tweet I liked")
    }
}
