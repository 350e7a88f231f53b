//! HTTP client for the backend indexing service.
//!
//! Two JSON-over-HTTP operations, no auth, no versioning, no retry. Failures
//! are normalized to [`Error`] at this boundary; callers own the user-visible
//! messaging.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::constants::constants;
use crate::error::Error;

#[derive(Serialize)]
struct RegisterRequest<'a> {
  youtube_url: &'a str,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
  query_text: &'a str,
  youtube_url: &'a str,
}

/// Client for the indexing service's two operations.
#[derive(Clone)]
pub struct BackendClient {
  http: Client,
  base_url: String,
}

impl BackendClient {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { http: Client::new(), base_url: base_url.into() }
  }

  /// Ask the backend to index `url`.
  ///
  /// The acknowledgement payload is ignored; re-registering the same video is
  /// a cheap server-side no-op, so a failure here is simply retried on the
  /// next new-video notification.
  pub async fn register_video(&self, url: &str) -> Result<(), Error> {
    let endpoint = format!("{}{}", self.base_url, constants().store_video_path);
    let response = self.http.post(&endpoint).json(&RegisterRequest { youtube_url: url }).send().await?;
    if !response.status().is_success() {
      return Err(Error::BackendStatus(response.status()));
    }
    debug!(url, "video registered");
    Ok(())
  }

  /// Query the indexed video, returning ranked `HH:MM:SS` labels.
  pub async fn query_timestamps(&self, url: &str, query: &str) -> Result<Vec<String>, Error> {
    let endpoint = format!("{}{}", self.base_url, constants().query_timestamp_path);
    let response = self.http.post(&endpoint).json(&QueryRequest { query_text: query, youtube_url: url }).send().await?;
    if !response.status().is_success() {
      return Err(Error::BackendStatus(response.status()));
    }
    let timestamps: Vec<String> = response.json().await?;
    info!(url, count = timestamps.len(), "timestamp query returned");
    Ok(timestamps)
  }
}

impl Default for BackendClient {
  /// Client against the fixed local endpoint baked into `constants.ron`.
  fn default() -> Self {
    Self::new(constants().backend_base_url.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use reqwest::StatusCode;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  const VIDEO_URL: &str = "https://youtube.com/watch?v=abc";

  #[test]
  fn default_client_targets_fixed_endpoint() {
    let client = BackendClient::default();
    assert_eq!(client.base_url, constants().backend_base_url);
  }

  #[tokio::test]
  async fn register_posts_youtube_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/store_video_data"))
      .and(body_json(json!({ "youtube_url": VIDEO_URL })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "stored" })))
      .expect(1)
      .mount(&server)
      .await;

    let client = BackendClient::new(server.uri());
    client.register_video(VIDEO_URL).await.unwrap();
  }

  #[tokio::test]
  async fn register_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/store_video_data"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let client = BackendClient::new(server.uri());
    let err = client.register_video(VIDEO_URL).await.unwrap_err();
    assert!(matches!(err, Error::BackendStatus(StatusCode::INTERNAL_SERVER_ERROR)));
  }

  #[tokio::test]
  async fn register_transport_failure() {
    // Nothing listens on port 1.
    let client = BackendClient::new("http://127.0.0.1:1");
    let err = client.register_video(VIDEO_URL).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
  }

  #[tokio::test]
  async fn query_returns_labels() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/query_timestamp"))
      .and(body_json(json!({ "query_text": "intro", "youtube_url": VIDEO_URL })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!(["00:00:15", "00:01:02"])))
      .expect(1)
      .mount(&server)
      .await;

    let client = BackendClient::new(server.uri());
    let timestamps = client.query_timestamps(VIDEO_URL, "intro").await.unwrap();
    assert_eq!(timestamps, vec!["00:00:15".to_string(), "00:01:02".to_string()]);
  }

  #[tokio::test]
  async fn query_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/query_timestamp"))
      .respond_with(ResponseTemplate::new(503))
      .mount(&server)
      .await;

    let client = BackendClient::new(server.uri());
    let err = client.query_timestamps(VIDEO_URL, "intro").await.unwrap_err();
    assert!(matches!(err, Error::BackendStatus(StatusCode::SERVICE_UNAVAILABLE)));
  }

  #[tokio::test]
  async fn query_malformed_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/query_timestamp"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
      .mount(&server)
      .await;

    let client = BackendClient::new(server.uri());
    let err = client.query_timestamps(VIDEO_URL, "intro").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
  }
}
