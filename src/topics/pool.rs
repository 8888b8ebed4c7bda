use futures::future::BoxFuture;
use rand::{Rng, seq::SliceRandom};

use super::{TOPICS_PER_ROTATION, TopicCandidate, TopicError, TopicResult, TopicSource};

/// Topic source drawing a random subset from a fixed catalog.
///
/// Every call shuffles a copy of the catalog and keeps the first six, so a
/// single run never repeats a topic. No history is kept across calls:
/// yesterday's topics may legitimately come back today.
pub struct PoolTopicSource {
    catalog: Vec<TopicCandidate>,
}

impl PoolTopicSource {
    /// Build a source over the given catalog.
    pub fn new(catalog: Vec<TopicCandidate>) -> Self {
        Self { catalog }
    }

    /// Shuffle the catalog with the provided RNG and keep the first six.
    fn select_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> TopicResult<[TopicCandidate; TOPICS_PER_ROTATION]> {
        let mut picks = self.catalog.clone();
        picks.shuffle(rng);
        picks.truncate(TOPICS_PER_ROTATION);
        <[TopicCandidate; TOPICS_PER_ROTATION]>::try_from(picks).map_err(
            |short: Vec<TopicCandidate>| TopicError::WrongShape {
                got: format!("an array of {}", short.len()),
            },
        )
    }
}

impl TopicSource for PoolTopicSource {
    fn next_six(&self) -> BoxFuture<'static, TopicResult<[TopicCandidate; TOPICS_PER_ROTATION]>> {
        let selection = self.select_with(&mut rand::rng());
        Box::pin(async move { selection })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::config::default_topic_pool;

    #[test]
    fn picks_are_pairwise_distinct() {
        let source = PoolTopicSource::new(default_topic_pool());

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = source.select_with(&mut rng).unwrap();
            let titles: HashSet<&str> = picks.iter().map(|topic| topic.title.as_str()).collect();
            assert_eq!(titles.len(), TOPICS_PER_ROTATION, "seed {seed} repeated a topic");
        }
    }

    #[test]
    fn selection_is_deterministic_for_a_seed() {
        let source = PoolTopicSource::new(default_topic_pool());

        let first = source.select_with(&mut StdRng::seed_from_u64(42)).unwrap();
        let second = source.select_with(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_catalog_is_rejected() {
        let catalog: Vec<_> = default_topic_pool().into_iter().take(4).collect();
        let source = PoolTopicSource::new(catalog);

        let err = source
            .select_with(&mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, TopicError::WrongShape { .. }));
    }

    #[tokio::test]
    async fn next_six_yields_a_full_cohort() {
        let source = PoolTopicSource::new(default_topic_pool());
        let picks = source.next_six().await.unwrap();
        assert_eq!(picks.len(), TOPICS_PER_ROTATION);
    }
}
