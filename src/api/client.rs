//! HTTP client for project API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the project API, handling authentication, status checks, and response
//! parsing.

use super::error::ApiError;
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// Envelope used by the API for single-entity responses.
///
#[derive(Debug, Deserialize)]
pub(crate) struct Wrapper<T> {
    pub data: T,
}

/// Makes requests to the project API and tries to conform response data to
/// the given model.
///
pub struct Client {
    pub(crate) access_token: Option<String>,
    pub(crate) base_url: Url,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional access
    /// token. The base URL is treated as a directory so that endpoints are
    /// resolved beneath it.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Client {
            access_token: access_token.map(str::to_owned),
            base_url,
            http_client: reqwest::Client::new(),
        })
    }

    /// Return the absolute URL for an endpoint path relative to the base URL.
    ///
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Make a GET request with query parameters and return the decoded body.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(path)?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        let response = self.call(Method::GET, url, None).await?;
        Self::decode(response).await
    }

    /// Make a request with a JSON body and return the decoded body.
    ///
    pub async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let body = serde_json::to_value(body)?;
        let response = self.call(method, url, Some(body)).await?;
        Self::decode(response).await
    }

    /// Make a DELETE request, ignoring any response body.
    ///
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        self.call(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Make request and return the response if its status is successful.
    ///
    async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        log::debug!("{} {}", method, url);
        let mut request = self.http_client.request(method, url);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            log::error!("API request failed with status {}: {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Deserialize a response body, logging the raw body if it does not match
    /// the expected model.
    ///
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            log::error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            ApiError::Deserialization(e)
        })
    }
}
