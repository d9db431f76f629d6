//! Mock Dialpad API using wiremock for integration testing.

#![allow(dead_code)]

use ccroster_client::client::DialpadClient;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_COOKIE: &str = "session=test-cookie";

pub struct MockDialpadServer {
    server: MockServer,
}

impl MockDialpadServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn auth_headers() -> BTreeMap<String, String> {
        BTreeMap::from([("cookie".to_string(), TEST_COOKIE.to_string())])
    }

    /// Client pointed at this server with the test session headers.
    pub fn client(&self) -> DialpadClient {
        DialpadClient::with_http_client(self.uri(), &Self::auth_headers(), reqwest::Client::new())
            .unwrap()
    }

    // =========================================================================
    // Group catalog
    // =========================================================================

    pub async fn mock_groups(&self, groups: Value) {
        Mock::given(method("GET"))
            .and(path("/api/group"))
            .respond_with(ResponseTemplate::new(200).set_body_json(groups))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // User profile
    // =========================================================================

    pub async fn mock_user(&self, user_id: &str, group_ids: &[u64]) {
        let group_details: Vec<Value> = group_ids.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("GET"))
            .and(path(format!("/api/user/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "display_name": "Pat Operator",
                "primary_email": "pat@example.com",
                "group_details": group_details,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_user_error(&self, user_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/api/user/{user_id}")))
            .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
            .mount(&self.server)
            .await;
    }

    // =========================================================================
    // Operator membership changes
    // =========================================================================

    pub async fn mock_operator_patch(&self, user_id: &str, group_id: u64, status: u16) {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/operator/{user_id}")))
            .and(query_param("group_id", group_id.to_string()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({})))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every PATCH received so far, keyed by `group_id`.
    pub async fn patch_bodies(&self) -> Vec<(String, Value)> {
        let requests = self.server.received_requests().await.unwrap_or_default();
        requests
            .iter()
            .filter(|r| r.method.as_str() == "PATCH")
            .map(|r| {
                let group_id = r
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "group_id")
                    .map(|(_, v)| v.into_owned())
                    .unwrap_or_default();
                let body: Value = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
                (group_id, body)
            })
            .collect()
    }
}

pub fn group_list() -> Value {
    json!([
        { "id": 11, "display_name": "Nevada" },
        { "id": 1, "display_name": "Arizona" },
        { "id": 2, "display_name": "Arizona B" },
        { "id": 3, "display_name": "Arizona C" },
        { "id": 12, "display_name": "Nevada B" },
        { "id": 13, "display_name": "Nevada C" },
        { "id": 20, "display_name": "Texas" }
    ])
}
