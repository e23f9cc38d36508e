//! Firebase Realtime Database client for user record persistence.
//!
//! Talks to the database over its REST interface: every node is addressable
//! as `{base}/{path}.json`, a `POST` to a list node assigns a push key and
//! returns it as `{"name": key}`, and missing nodes read as JSON `null`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use zipdir_core::{UserDocument, UserId, UserRecord};

use super::{StoreError, UserStore};
use crate::config::FirebaseConfig;

/// Node under which all user records live.
const USERS_PATH: &str = "users";

/// Firebase Realtime Database REST client.
#[derive(Clone)]
pub struct FirebaseClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<SecretString>,
}

/// Push-key assignment response from a `POST`.
#[derive(Debug, Deserialize)]
struct PushKeyResponse {
    name: String,
}

impl FirebaseClient {
    /// Create a new Firebase REST client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &FirebaseConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.database_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Build the REST URL for a node path (without the auth parameter).
    fn node_url(&self, path: &str) -> String {
        format!("{}/{path}.json", self.base_url)
    }

    /// Start a request against a node, attaching the auth token if configured.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, self.node_url(path));
        if let Some(token) = &self.auth_token {
            builder = builder.query(&[("auth", token.expose_secret())]);
        }
        builder
    }

    /// Send a request and surface non-success statuses as `StoreError::Api`.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl UserStore for FirebaseClient {
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let response = self.send(self.request(reqwest::Method::GET, USERS_PATH)).await?;

        // An empty list node reads as `null`, not as an empty object.
        let nodes: Option<BTreeMap<String, UserDocument>> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(nodes
            .unwrap_or_default()
            .into_iter()
            .map(|(key, document)| UserRecord::new(UserId::new(key), document))
            .collect())
    }

    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        let path = format!("{USERS_PATH}/{id}");
        let response = self.send(self.request(reqwest::Method::GET, &path)).await?;

        let document: Option<UserDocument> = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(document.map(|document| UserRecord::new(id.clone(), document)))
    }

    async fn insert(&self, document: &UserDocument) -> Result<UserRecord, StoreError> {
        let response = self
            .send(self.request(reqwest::Method::POST, USERS_PATH).json(document))
            .await?;

        let assigned: PushKeyResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        Ok(UserRecord::new(UserId::new(assigned.name), document.clone()))
    }

    async fn overwrite(
        &self,
        id: &UserId,
        document: &UserDocument,
    ) -> Result<UserRecord, StoreError> {
        let path = format!("{USERS_PATH}/{id}");
        self.send(self.request(reqwest::Method::PUT, &path).json(document))
            .await?;

        Ok(UserRecord::new(id.clone(), document.clone()))
    }

    async fn remove(&self, id: &UserId) -> Result<(), StoreError> {
        let path = format!("{USERS_PATH}/{id}");
        self.send(self.request(reqwest::Method::DELETE, &path)).await?;
        Ok(())
    }
}
