//! HTTP session with a base URL and request/response tracing

use crate::error::{HarnessError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A `reqwest` client bound to one service of the stand
#[derive(Debug, Clone)]
pub struct ApiSession {
    base_url: String,
    client: Client,
}

impl ApiSession {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// JSON session authorized with an OAuth access token
    pub fn bearer(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| HarnessError::Auth(format!("Invalid access token: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self::new(base_url, client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Execute a request, tracing method, URL and body
    pub async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response> {
        let request = request.build()?;
        let body = request
            .body()
            .and_then(|b| b.as_bytes())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();
        debug!(
            operation,
            method = %request.method(),
            url = %request.url(),
            %body,
            "HTTP request"
        );

        let response = self.client.execute(request).await?;
        debug!(operation, status = response.status().as_u16(), "HTTP response");
        Ok(response)
    }

    /// Fail with `UnexpectedStatus` unless the response has `expected`
    pub async fn expect_status(
        response: Response,
        expected: StatusCode,
        operation: &str,
    ) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        debug!(operation, status = status.as_u16(), %body, "HTTP response body");

        if status != expected {
            return Err(HarnessError::UnexpectedStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// `expect_status`, then decode the body as JSON
    pub async fn expect_json<T: DeserializeOwned>(
        response: Response,
        expected: StatusCode,
        operation: &str,
    ) -> Result<T> {
        let body = Self::expect_status(response, expected, operation).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
