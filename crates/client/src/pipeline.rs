//! Authenticated request pipeline
//!
//! Every call to the recipe API goes through [`ApiClient`]:
//! - request side: the persisted token, if any, is attached as a bearer credential;
//! - response side: 4xx responses come back as [`ApiError::Client`] for the
//!   caller to render; anything else that fails is logged, reported through
//!   the [`Notifier`], and returned as [`ApiError::NetworkOrServer`].
//!
//! Single attempt per call, no retries.

use std::sync::Arc;

use recipehub_session::{persisted_token, KeyValueStore};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::notify::{Notifier, GENERIC_ERROR_MESSAGE};
use crate::{ApiError, ClientConfig};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            storage,
            notifier,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Request transform: attach the persisted token when there is one.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match persisted_token(self.storage.as_ref()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn report(
        &self,
        method: &Method,
        endpoint: &str,
        status: Option<u16>,
        message: String,
    ) -> ApiError {
        tracing::error!(%method, endpoint, status, error = %message, "API request failed");
        self.notifier.error(GENERIC_ERROR_MESSAGE);
        ApiError::NetworkOrServer { status, message }
    }

    /// Send through the pipeline, returning only 2xx responses.
    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let request = build(self.authorize(self.http.request(method.clone(), self.url(endpoint))));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.report(&method, endpoint, None, e.to_string())),
        };

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%method, endpoint, status = status.as_u16(), "API rejected request");
            return Err(ApiError::Client {
                status: status.as_u16(),
                body,
            });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(self.report(
                &method,
                endpoint,
                Some(status.as_u16()),
                format!("API returned {}: {}", status, body),
            ));
        }

        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.report(&method, endpoint, Some(status), e.to_string())),
        };

        // An empty body reads as JSON `null`
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };

        serde_json::from_slice(body).map_err(|e| {
            self.report(
                &method,
                endpoint,
                Some(status),
                format!("Unreadable response body: {}", e),
            )
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .execute(Method::GET, endpoint, |request| request.query(query))
            .await?;
        self.read_json(Method::GET, endpoint, response).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, endpoint, body).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, endpoint, body).await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PATCH, endpoint, body).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, endpoint, |request| request)
            .await
            .map(|_| ())
    }

    async fn send_json<B, T>(&self, method: Method, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute(method.clone(), endpoint, |request| request.json(body))
            .await?;
        self.read_json(method, endpoint, response).await
    }
}
