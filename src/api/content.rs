//! Async content API client (sites, collections, model deployments).

use super::models::*;
use super::{ContentSource, ensure_success, join_url, with_bearer};
use crate::config::{ApiConfig, CollectionsRoute, SecretString};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::Client;

pub struct ContentApiClient {
    base_url: String,
    route: CollectionsRoute,
    token: Option<SecretString>,
    http: Client,
}

impl ContentApiClient {
    pub fn new(base_url: impl Into<String>, route: CollectionsRoute) -> Self {
        Self {
            base_url: base_url.into(),
            route,
            token: None,
            http: Client::new(),
        }
    }

    pub fn from_config(api: &ApiConfig, token: Option<SecretString>) -> Self {
        Self::new(api.content_api_url.clone(), api.collections_route).with_token(token)
    }

    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    fn collections_url(&self, site_id: &str) -> String {
        let site = urlencoding::encode(site_id);
        match self.route {
            CollectionsRoute::Query => {
                join_url(&self.base_url, &format!("/api/collections?siteId={}", site))
            }
            CollectionsRoute::Path => {
                join_url(&self.base_url, &format!("/api/collections/{}", site))
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        if self.base_url.is_empty() {
            return Err(ApiError::NotConfigured("content API"));
        }
        tracing::debug!("GET {}", url);
        let resp = with_bearer(self.http.get(url), self.token.as_ref())
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_listing(&self, url: &str) -> ApiResult<Vec<(String, String)>> {
        let entries: Vec<ListingEntry> = self.get_json(url).await?;
        let total = entries.len();
        let pairs: Vec<(String, String)> =
            entries.into_iter().filter_map(ListingEntry::into_pair).collect();
        if pairs.len() != total {
            tracing::debug!("Dropped {} listing entries without an id", total - pairs.len());
        }
        Ok(pairs)
    }
}

#[async_trait]
impl ContentSource for ContentApiClient {
    async fn list_sites(&self) -> ApiResult<Vec<Website>> {
        let url = join_url(&self.base_url, "/api/sites");
        let sites = self.get_listing(&url).await?;
        Ok(sites.into_iter().map(Website::from).collect())
    }

    async fn list_collections(&self, site_id: &str) -> ApiResult<Vec<Collection>> {
        let url = self.collections_url(site_id);
        let collections = self.get_listing(&url).await?;
        Ok(collections.into_iter().map(Collection::from).collect())
    }

    async fn list_models(&self) -> ApiResult<Vec<ModelDeployment>> {
        let url = join_url(&self.base_url, "/azure/model-deployments");
        let list: ModelDeploymentList = self.get_json(&url).await?;
        Ok(list.available())
    }
}
