use super::Target;
use crate::cleaner::Cleaner;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::twitter::Api;

impl<A: Api> Cleaner<A> {
    /// Walk backwards through the live collection, acting on every tweet we find.
    ///
    /// The cursor advances past every tweet whether or not we acted on it, so pages that are
    /// entirely kept or too recent don't stall the sweep. We stop after the page limit or at the
    /// first empty page.
    pub async fn sweep_live(&self, target: Target) -> Result<usize> {
        let mut count = 0;
        let mut max_id = None;

        for page_number in 1..=self.limits.max_pages {
            let page = self.fetch_page(target, max_id).await?;
            log::debug!(
                "{} page {} length {}",
                target.collection(),
                page_number,
                page.len()
            );

            if page.is_empty() {
                break;
            }

            for item in page {
                if self.act(target, &item).await? {
                    count += 1;
                }
                max_id = Some(item.id);
            }
        }

        log::info!(
            "{} {} {} from Twitter {}",
            target.past_tense(),
            count,
            target,
            target.collection()
        );

        Ok(count)
    }

    async fn fetch_page(&self, target: Target, max_id: Option<u64>) -> Result<Vec<Item>> {
        let page_size = self.limits.page_size;
        let result = match target {
            Target::Tweets => self.api.timeline(page_size, max_id).await,
            Target::Likes => self.api.favorites(page_size, max_id).await,
        };

        result.map_err(|source| Error::Page {
            collection: target.collection(),
            source,
        })
    }
}
