use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong in this core.
///
/// None of these are fatal to the host page: backend-facing failures are
/// logged at the client boundary and surfaced as a generic notice, `Decode`
/// is swallowed at the result-click boundary, and `Validation` is handled
/// before any network call.
#[derive(Debug, Error)]
pub enum Error {
  /// Network unreachable, or the response body could not be read.
  #[error("transport failure talking to backend: {0}")]
  Transport(#[from] reqwest::Error),

  /// The backend answered with a non-success status.
  #[error("backend responded with status {0}")]
  BackendStatus(StatusCode),

  /// A timestamp label from the backend was not `HH:MM:SS`.
  #[error("malformed timestamp label {0:?}")]
  Decode(String),

  /// The user submitted an empty or whitespace-only query.
  #[error("query text is empty")]
  Validation,

  /// The player control bar never appeared, so the launcher was not injected.
  #[error("player control bar did not appear within {0:?}")]
  InjectionTimeout(Duration),
}
