//! The per-video session record and its sole persistence path.
//!
//! One JSON object lives under a single key in a session-scoped key-value
//! store (cleared when the browsing session ends — no cross-session
//! persistence exists). `SessionCache` is the only writer; every partial
//! update is a whole-record read-modify-write so one field never clobbers
//! the other.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::constants::constants;

// --- Store abstraction ---

/// Who may read the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
  /// Only trusted (extension-owned) contexts. The strictest tier consistent
  /// with content running on the hosted page.
  TrustedContexts,
  /// Any script context on the page.
  AllContexts,
}

/// A key-value store scoped to the browsing-tab session.
///
/// Implemented by the embedding plumbing over whatever the platform provides;
/// [`MemoryStore`] is the in-process stand-in.
pub trait SessionStore {
  /// Configure who may read the store. Called once, before the first read or
  /// write, to keep cached query content away from less-trusted contexts.
  fn set_access_level(&mut self, level: AccessLevel);
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: String);
}

/// In-process session store for tests and embeddings without a platform store.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: HashMap<String, String>,
  access_level: Option<AccessLevel>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// The access level last configured, if any.
  pub fn access_level(&self) -> Option<AccessLevel> {
    self.access_level
  }
}

impl SessionStore for MemoryStore {
  fn set_access_level(&mut self, level: AccessLevel) {
    self.access_level = Some(level);
  }

  fn get(&self, key: &str) -> Option<String> {
    self.entries.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) {
    self.entries.insert(key.to_string(), value);
  }
}

// --- Session record ---

/// The core's sole persisted record: last query text and last result list for
/// the current video. Both fields are absent until first populated; absence
/// means "no prior query this session."
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSession {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub query_text: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamps: Option<Vec<String>>,
}

impl VideoSession {
  /// A new record with `query_text` replaced and `timestamps` untouched.
  pub fn with_query_text(self, text: impl Into<String>) -> Self {
    Self { query_text: Some(text.into()), ..self }
  }

  /// A new record with `timestamps` replaced and `query_text` untouched.
  pub fn with_timestamps(self, timestamps: Vec<String>) -> Self {
    Self { timestamps: Some(timestamps), ..self }
  }
}

// --- Cache ---

/// Reads and writes the [`VideoSession`] record through the session store.
///
/// The only component that touches the store; its constructor restricts the
/// store to trusted contexts before the first read or write.
pub struct SessionCache {
  store: Box<dyn SessionStore>,
}

impl SessionCache {
  pub fn new(mut store: Box<dyn SessionStore>) -> Self {
    store.set_access_level(AccessLevel::TrustedContexts);
    Self { store }
  }

  /// The current record; empty if nothing is stored or the stored value is
  /// not valid structured data.
  pub fn load(&self) -> VideoSession {
    let Some(raw) = self.store.get(&constants().session_key) else {
      return VideoSession::default();
    };
    match serde_json::from_str(&raw) {
      Ok(session) => session,
      Err(e) => {
        debug!(err = %e, "stored session record is not valid JSON, starting empty");
        VideoSession::default()
      }
    }
  }

  /// Persist the latest input text, preserving any cached results.
  pub fn save_query(&mut self, text: &str) {
    self.persist(self.load().with_query_text(text));
  }

  /// Persist a successful result list, preserving the query text.
  pub fn save_results(&mut self, timestamps: &[String]) {
    self.persist(self.load().with_timestamps(timestamps.to_vec()));
  }

  fn persist(&mut self, session: VideoSession) {
    match serde_json::to_string(&session) {
      Ok(raw) => self.store.set(&constants().session_key, raw),
      Err(e) => warn!(err = %e, "failed to serialize session record"),
    }
  }
}
