//! Business logic of the daily rotation: retire the previous cohort and open
//! six fresh rooms drawn from whichever topic strategy the caller selected.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tracing::info;

use crate::{
    dao::models::{DebateRoomEntity, NewDebateRoom},
    error::RotationError,
    state::SharedState,
    topics::{TOPICS_PER_ROTATION, TopicCandidate, TopicSource},
};

/// Lifetime of a room cohort. Plain duration arithmetic, not calendar
/// arithmetic: a cohort created at T closes at T + 24h even across a DST
/// boundary.
pub const ROOM_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything a successful rotation run produced.
#[derive(Debug)]
pub struct RotationOutcome {
    /// The stored rows of the new cohort, ids included.
    pub rooms: Vec<DebateRoomEntity>,
    /// Shared creation timestamp of the cohort.
    pub rotated_at: SystemTime,
}

/// Replace the active cohort with six rooms drawn from `source`.
///
/// Deactivation is fully issued before any insert, so a concurrent reader may
/// observe an empty active set mid-run but never a mix of two cohorts. The
/// run is not idempotent: invoking it twice produces two successive cohorts,
/// the first retired immediately. Keeping it to once per day is the external
/// scheduler's job.
pub async fn rotate(
    state: &SharedState,
    source: Arc<dyn TopicSource>,
) -> Result<RotationOutcome, RotationError> {
    let Ok(_gate) = state.rotation_gate().try_lock() else {
        return Err(RotationError::AlreadyRunning);
    };

    let candidates = source.next_six().await?;
    info!(
        titles = ?candidates.iter().map(|topic| topic.title.as_str()).collect::<Vec<_>>(),
        "selected topics for rotation"
    );

    let store = state.room_store();
    store
        .deactivate_active()
        .await
        .map_err(|source| RotationError::DeactivationFailed { source })?;
    info!("deactivated current debate rooms");

    let rotated_at = SystemTime::now();
    let rooms = store
        .insert_rooms(build_cohort(candidates, rotated_at))
        .await
        .map_err(|source| RotationError::CreationFailed { source })?;
    info!(count = rooms.len(), "created replacement debate rooms");

    Ok(RotationOutcome { rooms, rotated_at })
}

/// Stamp the six candidates into insertable rows sharing one creation time.
fn build_cohort(
    candidates: [TopicCandidate; TOPICS_PER_ROTATION],
    created_at: SystemTime,
) -> Vec<NewDebateRoom> {
    let expires_at = created_at + ROOM_LIFETIME;
    candidates
        .into_iter()
        .map(|candidate| NewDebateRoom {
            title: candidate.title,
            topic: candidate.topic,
            description: candidate.description,
            is_active: true,
            created_at,
            expires_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use futures::future::BoxFuture;
    use uuid::Uuid;

    use super::*;
    use crate::dao::room_store::RoomStore;
    use crate::dao::storage::{StorageError, StorageResult};
    use crate::state::AppState;
    use crate::topics::{TopicError, TopicResult};

    /// In-memory stand-in for the hosted datastore.
    #[derive(Clone, Default)]
    struct FakeStore {
        rooms: Arc<Mutex<Vec<DebateRoomEntity>>>,
        fail_deactivate: bool,
        fail_insert: bool,
        deactivate_calls: Arc<AtomicUsize>,
        insert_calls: Arc<AtomicUsize>,
    }

    impl FakeStore {
        fn seeded_with_active_cohort() -> Self {
            let store = Self::default();
            let created_at = SystemTime::now() - Duration::from_secs(24 * 60 * 60);
            let mut rooms = store.rooms.lock().unwrap();
            for index in 0..TOPICS_PER_ROTATION {
                rooms.push(DebateRoomEntity {
                    id: Uuid::new_v4(),
                    title: format!("Yesterday {index}"),
                    topic: format!("Old question {index}?"),
                    description: "Yesterday's debate.".to_string(),
                    is_active: true,
                    created_at,
                    expires_at: created_at + ROOM_LIFETIME,
                });
            }
            drop(rooms);
            store
        }

        fn active_rooms(&self) -> Vec<DebateRoomEntity> {
            self.rooms
                .lock()
                .unwrap()
                .iter()
                .filter(|room| room.is_active)
                .cloned()
                .collect()
        }

        fn total_rooms(&self) -> usize {
            self.rooms.lock().unwrap().len()
        }
    }

    fn transport_error(operation: &str) -> StorageError {
        StorageError::unavailable(
            format!("{operation} rejected"),
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
        )
    }

    impl RoomStore for FakeStore {
        fn deactivate_active(&self) -> BoxFuture<'static, StorageResult<()>> {
            let rooms = self.rooms.clone();
            let calls = self.deactivate_calls.clone();
            let fail = self.fail_deactivate;
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if fail {
                    return Err(transport_error("deactivate"));
                }
                for room in rooms.lock().unwrap().iter_mut() {
                    room.is_active = false;
                }
                Ok(())
            })
        }

        fn insert_rooms(
            &self,
            new_rooms: Vec<NewDebateRoom>,
        ) -> BoxFuture<'static, StorageResult<Vec<DebateRoomEntity>>> {
            let rooms = self.rooms.clone();
            let calls = self.insert_calls.clone();
            let fail = self.fail_insert;
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if fail {
                    return Err(transport_error("insert"));
                }
                let mut created = Vec::with_capacity(new_rooms.len());
                let mut guard = rooms.lock().unwrap();
                for room in new_rooms {
                    let entity = DebateRoomEntity {
                        id: Uuid::new_v4(),
                        title: room.title,
                        topic: room.topic,
                        description: room.description,
                        is_active: room.is_active,
                        created_at: room.created_at,
                        expires_at: room.expires_at,
                    };
                    guard.push(entity.clone());
                    created.push(entity);
                }
                Ok(created)
            })
        }

        fn list_active(&self) -> BoxFuture<'static, StorageResult<Vec<DebateRoomEntity>>> {
            let active = self.active_rooms();
            Box::pin(async move { Ok(active) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async move { Ok(()) })
        }
    }

    /// Topic source with scripted behavior.
    struct FakeSource {
        fail: bool,
    }

    impl TopicSource for FakeSource {
        fn next_six(
            &self,
        ) -> BoxFuture<'static, TopicResult<[TopicCandidate; TOPICS_PER_ROTATION]>> {
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    return Err(TopicError::UpstreamUnavailable {
                        reason: "provider offline".to_string(),
                    });
                }
                Ok(std::array::from_fn(|index| TopicCandidate {
                    title: format!("Fresh {index}"),
                    topic: format!("New question {index}?"),
                    description: format!("Context {index}."),
                }))
            })
        }
    }

    fn state_over(store: &FakeStore) -> SharedState {
        AppState::new(
            Arc::new(store.clone()),
            Arc::new(FakeSource { fail: false }),
            None,
        )
    }

    fn working_source() -> Arc<dyn TopicSource> {
        Arc::new(FakeSource { fail: false })
    }

    #[tokio::test]
    async fn rotation_replaces_the_previous_cohort() {
        let store = FakeStore::seeded_with_active_cohort();
        let state = state_over(&store);

        let outcome = rotate(&state, working_source()).await.unwrap();

        assert_eq!(outcome.rooms.len(), TOPICS_PER_ROTATION);
        assert_eq!(store.total_rooms(), 2 * TOPICS_PER_ROTATION);

        let active = store.active_rooms();
        assert_eq!(active.len(), TOPICS_PER_ROTATION);
        assert!(active.iter().all(|room| room.title.starts_with("Fresh")));
    }

    #[tokio::test]
    async fn cohort_shares_creation_and_expiry_timestamps() {
        let store = FakeStore::default();
        let state = state_over(&store);

        let outcome = rotate(&state, working_source()).await.unwrap();

        for room in &outcome.rooms {
            assert_eq!(room.created_at, outcome.rotated_at);
            assert_eq!(room.expires_at, outcome.rotated_at + ROOM_LIFETIME);
        }
    }

    #[tokio::test]
    async fn source_failure_leaves_the_store_untouched() {
        let store = FakeStore::seeded_with_active_cohort();
        let state = state_over(&store);

        let err = rotate(&state, Arc::new(FakeSource { fail: true }))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RotationError::Topic(TopicError::UpstreamUnavailable { .. })
        ));
        assert_eq!(store.deactivate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.active_rooms().len(), TOPICS_PER_ROTATION);
    }

    #[tokio::test]
    async fn deactivation_failure_skips_the_insert() {
        let store = FakeStore {
            fail_deactivate: true,
            ..FakeStore::seeded_with_active_cohort()
        };
        let state = state_over(&store);

        let err = rotate(&state, working_source()).await.unwrap_err();

        assert!(matches!(err, RotationError::DeactivationFailed { .. }));
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.active_rooms().len(), TOPICS_PER_ROTATION);
    }

    #[tokio::test]
    async fn creation_failure_leaves_no_active_cohort() {
        let store = FakeStore {
            fail_insert: true,
            ..FakeStore::seeded_with_active_cohort()
        };
        let state = state_over(&store);

        let err = rotate(&state, working_source()).await.unwrap_err();

        assert!(matches!(err, RotationError::CreationFailed { .. }));
        // Deactivation committed before the insert failed: the active set
        // stays empty until the next successful run.
        assert!(store.active_rooms().is_empty());
        assert_eq!(store.total_rooms(), TOPICS_PER_ROTATION);
    }

    #[tokio::test]
    async fn concurrent_rotation_is_rejected() {
        let store = FakeStore::seeded_with_active_cohort();
        let state = state_over(&store);

        let _held = state.rotation_gate().lock().await;
        let err = rotate(&state, working_source()).await.unwrap_err();

        assert!(matches!(err, RotationError::AlreadyRunning));
        assert_eq!(store.deactivate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }
}
