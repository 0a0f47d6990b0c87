//! HTTP client for the remote candidate/skills API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::instrument;

use skillradar_core::traits::{CandidateSummary, RemoteDirectory, SkillDetail, SkillSummary};

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the dashboard API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for `base_url`. An empty string selects
    /// [`DEFAULT_BASE_URL`].
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let base = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url.trim()
        };
        let base_url =
            Url::parse(base).map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each percent-encoded
    /// (so "C/C++" stays one segment).
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .header("Cache-Control", "no-store")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ApiError::Network(format!(
                        "API not reachable at {}. Is it running?",
                        self.base_url
                    ))
                } else {
                    ApiError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ApiError::NotFound(what.to_string()));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status,
                message: body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(format!("{what}: {e}")))
    }
}

#[async_trait]
impl RemoteDirectory for ApiClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_candidates(&self) -> anyhow::Result<Vec<CandidateSummary>> {
        let url = self.endpoint(&["candidates"])?;
        Ok(self.get_json(url, "candidate list").await?)
    }

    async fn candidate_skills(&self, candidate_id: &str) -> anyhow::Result<SkillSummary> {
        let url = self.endpoint(&["candidates", candidate_id, "skills"])?;
        Ok(self
            .get_json(url, &format!("candidate '{candidate_id}'"))
            .await?)
    }

    async fn skill_details(&self, candidate_id: &str, skill: &str) -> anyhow::Result<SkillDetail> {
        let url = self.endpoint(&["candidates", candidate_id, "skills", skill, "details"])?;
        Ok(self
            .get_json(url, &format!("skill '{skill}' of candidate '{candidate_id}'"))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillradar_core::report::build_remote_report;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn endpoint_encodes_segments() {
        let client = ApiClient::new("http://localhost:8000/api/", 5).unwrap();
        let url = client
            .endpoint(&["candidates", "c1", "skills", "C/C++", "details"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/candidates/c1/skills/C%2FC++/details"
        );
    }

    #[test]
    fn empty_base_url_uses_default() {
        let client = ApiClient::new("", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", 5),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("mailto:someone@example.com", 5),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn lists_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "candidate_1", "name": "Alice Johnson"},
                {"id": "candidate_2", "name": "Bob Williams"}
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let list = client.list_candidates().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "Bob Williams");
    }

    #[tokio::test]
    async fn candidate_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates/nobody/skills"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Candidate not found"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let err = client.candidate_skills("nobody").await.unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api_err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn server_error_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let err = client.list_candidates().await.unwrap_err();
        assert_eq!(err.to_string(), "API error (HTTP 500): boom");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates/c1/skills"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let err = client.candidate_skills("c1").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn builds_report_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates/candidate_1/skills"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Alice Johnson",
                "scores": [
                    {"skill": "SQL", "score": 7.8},
                    {"skill": "System Design", "score": 6.5}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/candidates/candidate_1/skills/SQL/details"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "score": 7.8,
                "evidence": "Optimized a N-1 JOIN query by adding an index.",
                "trend": "Score has been consistent across two attempts."
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/candidates/candidate_1/skills/System%20Design/details"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), 5).unwrap();
        let report = build_remote_report(&client, "candidate_1").await.unwrap();
        assert_eq!(report.name, "Alice Johnson");
        assert_eq!(report.scores.len(), 2);
        assert!(report.detail("SQL").unwrap().evidence.contains("JOIN"));
        assert!(report.detail("System Design").is_none());
    }
}
