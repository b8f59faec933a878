//! Remote resource abstraction used by [`Collection`](crate::Collection).

use std::marker::PhantomData;

use async_trait::async_trait;
use auditdesk_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{
    Engagement, EngagementInput, Finding, FindingInput, Recommendation, RecommendationInput,
};

/// An entity with a stable primary key.
pub trait Keyed {
    fn key(&self) -> DbId;
}

/// Remote CRUD operations for one entity type.
#[async_trait]
pub trait ResourceBackend: Send + Sync + 'static {
    type Item: Keyed + Clone + Send + Sync + 'static;
    type Create: Send + Sync;
    type Update: Send + Sync;

    async fn fetch_all(&self) -> Result<Vec<Self::Item>, ClientError>;
    async fn create(&self, input: &Self::Create) -> Result<Self::Item, ClientError>;
    async fn update(&self, id: DbId, input: &Self::Update) -> Result<Self::Item, ClientError>;
    async fn delete(&self, id: DbId) -> Result<(), ClientError>;
}

/// [`ResourceBackend`] over the REST endpoints at `/api/v1/<path>`.
pub struct HttpResource<T, C, U = C> {
    api: ApiClient,
    path: &'static str,
    filters: Vec<(&'static str, String)>,
    _marker: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> HttpResource<T, C, U> {
    pub fn new(api: ApiClient, path: &'static str) -> Self {
        Self {
            api,
            path,
            filters: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Restrict `fetch_all` with a list filter such as `engagement_id`.
    pub fn with_filter(mut self, key: &'static str, value: impl ToString) -> Self {
        self.filters.push((key, value.to_string()));
        self
    }
}

pub type EngagementResource = HttpResource<Engagement, EngagementInput>;
pub type FindingResource = HttpResource<Finding, FindingInput>;
pub type RecommendationResource = HttpResource<Recommendation, RecommendationInput>;

pub fn engagements(api: ApiClient) -> EngagementResource {
    HttpResource::new(api, "/engagements")
}

pub fn findings(api: ApiClient) -> FindingResource {
    HttpResource::new(api, "/findings")
}

/// Findings of one engagement.
pub fn engagement_findings(api: ApiClient, engagement_id: DbId) -> FindingResource {
    findings(api).with_filter("engagement_id", engagement_id)
}

pub fn recommendations(api: ApiClient) -> RecommendationResource {
    HttpResource::new(api, "/recommendations")
}

#[async_trait]
impl<T, C, U> ResourceBackend for HttpResource<T, C, U>
where
    T: Keyed + DeserializeOwned + Clone + Send + Sync + 'static,
    C: Serialize + Send + Sync + 'static,
    U: Serialize + Send + Sync + 'static,
{
    type Item = T;
    type Create = C;
    type Update = U;

    async fn fetch_all(&self) -> Result<Vec<T>, ClientError> {
        self.api.get_data_with(self.path, &self.filters).await
    }

    async fn create(&self, input: &C) -> Result<T, ClientError> {
        self.api.post(self.path, input).await
    }

    async fn update(&self, id: DbId, input: &U) -> Result<T, ClientError> {
        self.api.put(&format!("{}/{id}", self.path), input).await
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        self.api.delete(&format!("{}/{id}", self.path)).await
    }
}
