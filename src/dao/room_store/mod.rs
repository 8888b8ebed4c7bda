/// PostgREST-backed implementation targeting the hosted datastore.
pub mod rest;

use futures::future::BoxFuture;

use crate::dao::models::{DebateRoomEntity, NewDebateRoom};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for the debate room collection.
pub trait RoomStore: Send + Sync {
    /// Mark every currently active room inactive in one bulk statement.
    fn deactivate_active(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Insert a full cohort and return the stored rows with their assigned ids.
    fn insert_rooms(
        &self,
        rooms: Vec<NewDebateRoom>,
    ) -> BoxFuture<'static, StorageResult<Vec<DebateRoomEntity>>>;
    /// Fetch the rooms currently open for participation.
    fn list_active(&self) -> BoxFuture<'static, StorageResult<Vec<DebateRoomEntity>>>;
    /// Cheap probe verifying the datastore answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
