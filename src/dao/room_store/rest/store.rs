use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, Response};
use serde_json::json;

use crate::dao::{
    models::{DebateRoomEntity, NewDebateRoom},
    room_store::RoomStore,
    storage::StorageResult,
};

use super::{
    config::RestConfig,
    error::{RestDaoError, RestResult},
    models::{NewRoomRow, ROOMS_TABLE, RoomRow},
};

/// Room store speaking the PostgREST dialect of the hosted datastore.
///
/// Every operation is one stateless HTTP request; the bulk deactivation in
/// particular maps to a single filtered `PATCH`, which keeps it atomic on the
/// datastore side.
#[derive(Clone)]
pub struct RestRoomStore {
    client: Client,
    base_url: Arc<str>,
    service_key: Arc<str>,
}

impl RestRoomStore {
    /// Build the HTTP client for the configured datastore project.
    pub fn new(config: RestConfig) -> RestResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| RestDaoError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            service_key: Arc::from(config.service_key.as_str()),
        })
    }

    fn request(&self, method: Method, query: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}?{}", self.base_url, ROOMS_TABLE, query);
        self.client
            .request(method, url)
            .header("apikey", self.service_key.as_ref())
            .bearer_auth(self.service_key.as_ref())
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
    ) -> RestResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| RestDaoError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RestDaoError::RequestStatus {
                path: path.to_string(),
                status,
            })
        }
    }

    async fn deactivate(&self) -> RestResult<()> {
        let path = format!("{ROOMS_TABLE}?is_active=eq.true");
        let builder = self
            .request(Method::PATCH, "is_active=eq.true")
            .header("Prefer", "return=minimal")
            .json(&json!({ "is_active": false }));

        self.send(builder, &path).await.map(|_| ())
    }

    async fn insert(&self, rooms: Vec<NewDebateRoom>) -> RestResult<Vec<DebateRoomEntity>> {
        let rows: Vec<NewRoomRow> = rooms.into_iter().map(NewRoomRow::from_entity).collect();
        let path = ROOMS_TABLE.to_string();
        let builder = self
            .request(Method::POST, "select=*")
            .header("Prefer", "return=representation")
            .json(&rows);

        let response = self.send(builder, &path).await?;
        let created = response.json::<Vec<RoomRow>>().await.map_err(|source| {
            RestDaoError::DecodeResponse { path, source }
        })?;

        Ok(created.into_iter().map(RoomRow::into_entity).collect())
    }

    async fn fetch_active(&self) -> RestResult<Vec<DebateRoomEntity>> {
        let path = format!("{ROOMS_TABLE}?is_active=eq.true");
        let builder = self.request(Method::GET, "is_active=eq.true&select=*");

        let response = self.send(builder, &path).await?;
        let rows = response.json::<Vec<RoomRow>>().await.map_err(|source| {
            RestDaoError::DecodeResponse { path, source }
        })?;

        Ok(rows.into_iter().map(RoomRow::into_entity).collect())
    }

    async fn probe(&self) -> RestResult<()> {
        let path = format!("{ROOMS_TABLE}?select=id");
        let builder = self.request(Method::GET, "select=id&limit=1");

        self.send(builder, &path).await.map(|_| ())
    }
}

impl RoomStore for RestRoomStore {
    fn deactivate_active(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.deactivate().await.map_err(Into::into) })
    }

    fn insert_rooms(
        &self,
        rooms: Vec<NewDebateRoom>,
    ) -> BoxFuture<'static, StorageResult<Vec<DebateRoomEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.insert(rooms).await.map_err(Into::into) })
    }

    fn list_active(&self) -> BoxFuture<'static, StorageResult<Vec<DebateRoomEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.fetch_active().await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.probe().await.map_err(Into::into) })
    }
}
