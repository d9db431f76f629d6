//! Dialpad HTTP client (reqwest-based).
//!
//! Provides a `DialpadClient` that talks to the group, user, and operator
//! endpoints with caller-supplied authentication headers.

use crate::error::{ClientError, ClientResult};
use crate::models::{GroupListResponse, MembershipChange, UserProfile};
use crate::service::MembershipService;
use async_trait::async_trait;
use ccroster_core::{GroupId, GroupRecord, UserId};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default service endpoint.
pub const DEFAULT_API_URL: &str = "https://dialpad.com";

/// Header carrying the request time in epoch milliseconds.
const REQUEST_TIMESTAMP_HEADER: &str = "request-timestamp";

/// HTTP client for the group membership service.
#[derive(Debug, Clone)]
pub struct DialpadClient {
    /// Base URL, without trailing slash.
    base_url: String,
    /// Authentication headers sent with every request.
    headers: HeaderMap,
    http_client: Client,
}

impl DialpadClient {
    /// Create a new client.
    pub fn new(
        base_url: impl Into<String>,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ccroster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Self::with_http_client(base_url, headers, http_client)
    }

    /// Create a client with a pre-built `reqwest::Client` (for testing).
    pub fn with_http_client(
        base_url: impl Into<String>,
        headers: &BTreeMap<String, String>,
        http_client: Client,
    ) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            headers: build_header_map(headers)?,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .headers(self.headers.clone())
            .header(
                REQUEST_TIMESTAMP_HEADER,
                chrono::Utc::now().timestamp_millis().to_string(),
            )
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        debug!("GET {}", url);
        let response = self.request(Method::GET, url).send().await?;
        self.handle_response("GET", url, response).await
    }

    // ── Response Handling ─────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        if response.status().is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(Into::into)
        } else {
            Err(self.error_from_response(method, url, response).await)
        }
    }

    async fn error_from_response(
        &self,
        method: &str,
        url: &str,
        response: reqwest::Response,
    ) -> ClientError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        warn!(method, url, status = status.as_u16(), "Membership service call failed");
        ClientError::RemoteCallFailed {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
            body,
        }
    }
}

fn build_header_map(headers: &BTreeMap<String, String>) -> ClientResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::InvalidConfig(format!("Invalid value for header '{name}': {e}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

#[async_trait]
impl MembershipService for DialpadClient {
    async fn list_groups(&self) -> ClientResult<Vec<GroupRecord>> {
        let url = format!("{}/api/group", self.base_url);
        let groups: GroupListResponse = self.get(&url).await?;
        Ok(groups)
    }

    async fn get_user(&self, user_id: &UserId) -> ClientResult<UserProfile> {
        let url = format!("{}/api/user/{}?replay", self.base_url, user_id);
        self.get(&url).await
    }

    async fn set_membership(
        &self,
        user_id: &UserId,
        group_id: &GroupId,
        change: MembershipChange,
    ) -> ClientResult<()> {
        let url = format!(
            "{}/api/operator/{}?group_id={}",
            self.base_url, user_id, group_id
        );
        debug!(group_id = %group_id, change = %change, "PATCH {}", url);

        let response = self
            .request(Method::PATCH, &url)
            .json(&change.to_body())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from_response("PATCH", &url, response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client =
            DialpadClient::new("https://dialpad.test/", &BTreeMap::new(), Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url(), "https://dialpad.test");
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let headers = BTreeMap::from([("bad header".to_string(), "x".to_string())]);
        let err = DialpadClient::new(DEFAULT_API_URL, &headers, Duration::from_secs(5))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let headers = BTreeMap::from([("x-token".to_string(), "line\nbreak".to_string())]);
        assert!(DialpadClient::new(DEFAULT_API_URL, &headers, Duration::from_secs(5)).is_err());
    }
}
