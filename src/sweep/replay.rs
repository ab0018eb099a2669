use super::Target;
use crate::archive::Record;
use crate::cleaner::{parse_tweet_id, Cleaner};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::twitter::Api;
use std::path::Path;

impl<A: Api> Cleaner<A> {
    /// Replay archive records that aren't yet in the ledger at the given path.
    ///
    /// Every record we get past the lookup for is written to the ledger, even if acting on it then
    /// fails, so that a later run never repeats a mutation that may already have gone through. A
    /// dry run reads the ledger but never writes to it.
    pub async fn sweep_archive<P: AsRef<Path>>(
        &self,
        target: Target,
        records: &[Record],
        ledger_path: P,
    ) -> Result<usize> {
        let mut ledger = Ledger::open(ledger_path)?;
        let mut count = 0;

        for record in records {
            let id = parse_tweet_id(&record.id)?;

            if ledger.contains(id) {
                log::debug!("Ignoring tweet {} handled in previous runs", id);
                continue;
            }

            let item = match self.lookup_id(id).await? {
                Some(item) => item,
                None => {
                    log::debug!("Couldn't find tweet {}", id);
                    if !self.dry_run {
                        ledger.record(id)?;
                    }
                    continue;
                }
            };

            let result = self.act(target, &item).await;
            if !self.dry_run {
                ledger.record(id)?;
            }

            if result? {
                count += 1;
            }
        }

        log::info!(
            "{} {} {} from Twitter archive",
            target.past_tense(),
            count,
            target
        );

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::policy::Policy;
    use crate::twitter::mock::{liked, retweet, tweet, Call, MockApi};
    use chrono::Duration;
    use std::fs;

    fn records(ids: &[&str]) -> Vec<Record> {
        ids.iter()
            .map(|id| Record { id: id.to_string() })
            .collect()
    }

    fn policy() -> Policy {
        Policy::new(Duration::days(7), vec![])
    }

    #[tokio::test]
    async fn skip_handled_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");
        fs::write(&path, "77\n").unwrap();

        let cleaner = Cleaner::new(MockApi::default(), policy());

        assert_eq!(
            cleaner
                .sweep_archive(Target::Tweets, &records(&["77"]), &path)
                .await
                .unwrap(),
            0
        );
        assert!(cleaner.api().calls().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "77\n");
    }

    #[tokio::test]
    async fn replay_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");

        let mut api = MockApi::default();
        api.items.insert(1, tweet(1, 30, "old"));
        api.items.insert(2, retweet(2, 30));
        api.items.insert(3, tweet(3, 1, "new"));
        let cleaner = Cleaner::new(api, policy());
        let records = records(&["1", "2", "3", "4"]);

        assert_eq!(
            cleaner
                .sweep_archive(Target::Tweets, &records, &path)
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            cleaner.api().mutations(),
            vec![Call::Delete(1), Call::UndoReshare(2)]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n3\n4\n");

        let calls_before = cleaner.api().calls().len();

        assert_eq!(
            cleaner
                .sweep_archive(Target::Tweets, &records, &path)
                .await
                .unwrap(),
            0
        );
        assert_eq!(cleaner.api().calls().len(), calls_before);
    }

    #[tokio::test]
    async fn exact_membership_does_not_skip_substrings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");
        fs::write(&path, "12345\n").unwrap();

        let mut api = MockApi::default();
        api.items.insert(234, tweet(234, 30, "old"));
        let cleaner = Cleaner::new(api, policy());

        assert_eq!(
            cleaner
                .sweep_archive(Target::Tweets, &records(&["234"]), &path)
                .await
                .unwrap(),
            1
        );
        assert_eq!(cleaner.api().mutations(), vec![Call::Delete(234)]);
    }

    #[tokio::test]
    async fn failed_action_is_still_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");

        let mut api = MockApi::default().fail(Call::Delete(2), 500);
        api.items.insert(1, tweet(1, 30, "old"));
        api.items.insert(2, tweet(2, 30, "old"));
        api.items.insert(3, tweet(3, 30, "old"));
        let cleaner = Cleaner::new(api, policy());

        assert!(matches!(
            cleaner
                .sweep_archive(Target::Tweets, &records(&["1", "2", "3"]), &path)
                .await,
            Err(Error::Action { id: 2, .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n");
        assert!(!cleaner.api().calls().contains(&Call::GetItem(3)));
    }

    #[tokio::test]
    async fn lookup_failure_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");

        let api = MockApi::default().fail(Call::GetItem(9), 500);
        let cleaner = Cleaner::new(api, policy());

        assert!(matches!(
            cleaner
                .sweep_archive(Target::Tweets, &records(&["9"]), &path)
                .await,
            Err(Error::Lookup { id: 9, .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn dry_run_leaves_ledger_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");
        let records = records(&["1", "2"]);

        let mut api = MockApi::default();
        api.items.insert(1, tweet(1, 30, "old"));
        let dry = Cleaner::new(api, policy()).dry_run(true);

        assert_eq!(
            dry.sweep_archive(Target::Tweets, &records, &path)
                .await
                .unwrap(),
            1
        );
        assert!(dry.api().mutations().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        let mut api = MockApi::default();
        api.items.insert(1, tweet(1, 30, "old"));
        let cleaner = Cleaner::new(api, policy());

        assert_eq!(
            cleaner
                .sweep_archive(Target::Tweets, &records, &path)
                .await
                .unwrap(),
            1
        );
        assert_eq!(cleaner.api().mutations(), vec![Call::Delete(1)]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n");
    }

    #[tokio::test]
    async fn forbidden_lookup_is_unretweeted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");

        let api = MockApi::default().fail(Call::GetItem(88), 403);
        let cleaner = Cleaner::new(api, policy());

        assert_eq!(
            cleaner
                .sweep_archive(Target::Tweets, &records(&["88"]), &path)
                .await
                .unwrap(),
            1
        );
        assert_eq!(cleaner.api().mutations(), vec![Call::UndoReshare(88)]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "88\n");
    }

    #[tokio::test]
    async fn malformed_record_id_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_tweets.txt");

        let cleaner = Cleaner::new(MockApi::default(), policy());

        assert!(matches!(
            cleaner
                .sweep_archive(Target::Tweets, &records(&["not-an-id"]), &path)
                .await,
            Err(Error::TweetIdParse(_))
        ));
    }

    #[tokio::test]
    async fn unauthorized_likes_are_unfavorited() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handled_likes.txt");

        let mut api = MockApi::default().fail(Call::GetItem(88), 401);
        api.items.insert(89, liked(89, 30));
        api.items.insert(90, tweet(90, 30, "never liked"));
        let cleaner = Cleaner::new(api, policy());

        assert_eq!(
            cleaner
                .sweep_archive(Target::Likes, &records(&["88", "89", "90"]), &path)
                .await
                .unwrap(),
            2
        );
        assert_eq!(
            cleaner.api().mutations(),
            vec![Call::RemoveFavorite(88), Call::RemoveFavorite(89)]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "88\n89\n90\n");
    }
}
