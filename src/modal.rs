//! The single search modal: lifecycle, input binding, search submission,
//! result rendering, and error/loading states.
//!
//! The controller owns the modal's state explicitly — the page surface behind
//! [`PageHost`] is told what to paint, never asked what exists. Its visible
//! content is always derived from the session cache at render time; the modal
//! itself is not a source of truth.

use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use crate::backend::BackendClient;
use crate::error::Error;
use crate::session::SessionCache;
use crate::timestamp;

// --- Collaborator traits ---

/// The page-embedded surface the core renders into.
///
/// Implementations own all DOM concerns: element creation, styling, and the
/// `constants()` identifiers (`modal_id`, `launcher_class`).
pub trait PageHost {
  /// Create the modal if absent, then paint `view` into it.
  fn render_modal(&mut self, view: &ModalView);
  /// Remove the modal from the page.
  fn close_modal(&mut self);
  /// Show a transient user-visible notice.
  fn alert(&mut self, message: &str);
  /// Whether the player's control bar is mounted and can take the launcher.
  fn control_bar_ready(&self) -> bool;
  /// Insert the launcher control into the player control bar.
  fn inject_launcher(&mut self);
  /// The page's media element, if one is present.
  fn media(&mut self) -> Option<&mut dyn MediaControl>;
}

/// Abstract seek/play capability of the page's media element.
pub trait MediaControl {
  fn seek(&mut self, seconds: u64);
  fn play(&mut self);
}

// --- View ---

/// What the host paints: a pure function of controller state and the session
/// cache at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalView {
  /// Current input text (pre-filled from the cache on open).
  pub query_text: String,
  /// Cached result labels to list, newest search last to win.
  pub timestamps: Vec<String>,
  /// The submit control shows a busy label while a search is in flight.
  pub busy: bool,
}

// --- State ---

/// Modal lifecycle: `Closed → Idle → Loading → Idle | Error → Closed`.
///
/// Every non-`Closed` variant is an open modal. `Error` is "open with a retry
/// notice shown" and behaves as idle for further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
  Closed,
  Idle,
  Loading,
  Error,
}

const PROMPT_EMPTY_QUERY: &str = "Please enter text!";
const NOTICE_NO_RESULTS: &str = "VidLocator: No results found.";
const NOTICE_SEARCH_FAILED: &str = "An error occurred. Please try again.";

/// A finished search: which submission it answers, and what came back.
type SearchReply = (u64, Result<Vec<String>, Error>);

/// Empty or whitespace-only queries never reach the backend.
fn validate_query(input: &str) -> Result<String, Error> {
  let query = input.trim();
  if query.is_empty() { Err(Error::Validation) } else { Ok(query.to_string()) }
}

// --- Controller ---

pub struct ModalController {
  state: ModalState,
  backend: BackendClient,
  cache: SessionCache,
  video_url: Option<String>,
  input: String,
  /// Monotonically increasing per-submission tag; a reply whose tag is not
  /// the latest is stale and gets discarded (last-submitted-wins).
  search_seq: u64,
  search_rx: Option<oneshot::Receiver<SearchReply>>,
}

impl ModalController {
  pub fn new(backend: BackendClient, cache: SessionCache) -> Self {
    Self {
      state: ModalState::Closed,
      backend,
      cache,
      video_url: None,
      input: String::new(),
      search_seq: 0,
      search_rx: None,
    }
  }

  /// Bind searches to this video's canonical URL.
  pub fn bind_video(&mut self, url: &str) {
    self.video_url = Some(url.to_string());
  }

  pub fn state(&self) -> ModalState {
    self.state
  }

  /// The view the host should currently be showing. Cached timestamps are a
  /// display source, refreshed only by explicit new searches.
  pub fn view(&self) -> ModalView {
    ModalView {
      query_text: self.input.clone(),
      timestamps: self.cache.load().timestamps.unwrap_or_default(),
      busy: self.state == ModalState::Loading,
    }
  }

  /// Launcher activation. No-op if the modal already exists; otherwise the
  /// input is pre-filled from the cache and any cached results render
  /// immediately, without contacting the backend.
  pub fn open(&mut self, host: &mut dyn PageHost) {
    if self.state != ModalState::Closed {
      return;
    }
    self.input = self.cache.load().query_text.unwrap_or_default();
    self.state = ModalState::Idle;
    host.render_modal(&self.view());
  }

  /// Input-change event. Persisted immediately (no debounce) so the text
  /// survives close/reopen even without a successful search.
  pub fn input_changed(&mut self, text: &str) {
    if self.state == ModalState::Closed {
      return;
    }
    self.input = text.to_string();
    self.cache.save_query(&self.input);
  }

  /// Search submission.
  ///
  /// An empty or whitespace-only query is rejected with a prompt and no
  /// backend call. A submission while a search is already in flight simply
  /// supersedes it: the previous receiver is dropped and the sequence tag
  /// guarantees the latest submission wins.
  pub fn submit_search(&mut self, host: &mut dyn PageHost) {
    if self.state == ModalState::Closed {
      return;
    }
    let Ok(query) = validate_query(&self.input) else {
      host.alert(PROMPT_EMPTY_QUERY);
      return;
    };
    let Some(url) = self.video_url.clone() else {
      error!("search submitted before a video was bound");
      return;
    };

    self.search_seq += 1;
    let seq = self.search_seq;
    let backend = self.backend.clone();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
      let _ = tx.send((seq, backend.query_timestamps(&url, &query).await));
    });
    self.search_rx = Some(rx);
    self.state = ModalState::Loading;
    host.render_modal(&self.view());
  }

  /// Pump the in-flight search, if any. Driven from the host's event loop;
  /// never blocks.
  pub fn poll_pending(&mut self, host: &mut dyn PageHost) {
    let Some(mut rx) = self.search_rx.take() else { return };
    match rx.try_recv() {
      Ok((seq, result)) => {
        // Supersession is enforced by the receiver swap in `submit_search`:
        // replacing `search_rx` drops the old receiver, so a reply read here
        // normally carries the latest tag. The check stays as the explicit
        // correlation guard in case replies are ever delivered another way.
        if seq != self.search_seq {
          debug!(seq, latest = self.search_seq, "discarding stale search reply");
          return;
        }
        self.finish_search(result, host);
      }
      Err(oneshot::error::TryRecvError::Empty) => {
        self.search_rx = Some(rx);
      }
      Err(oneshot::error::TryRecvError::Closed) => {
        error!("search task dropped without replying");
        if self.state != ModalState::Closed {
          self.state = ModalState::Error;
          host.alert(NOTICE_SEARCH_FAILED);
          host.render_modal(&self.view());
        }
      }
    }
  }

  /// Apply the latest search reply.
  ///
  /// A reply landing after the modal was closed still updates the cache (so a
  /// reopen shows it) but paints nothing. An empty result list does not
  /// overwrite previously cached timestamps — last good results are kept.
  fn finish_search(&mut self, result: Result<Vec<String>, Error>, host: &mut dyn PageHost) {
    let open = self.state != ModalState::Closed;
    match result {
      Ok(timestamps) if timestamps.is_empty() => {
        if open {
          self.state = ModalState::Idle;
          host.alert(NOTICE_NO_RESULTS);
          host.render_modal(&self.view());
        }
      }
      Ok(timestamps) => {
        self.cache.save_results(&timestamps);
        if open {
          self.state = ModalState::Idle;
          host.render_modal(&self.view());
        }
      }
      Err(e) => {
        error!(err = %e, "timestamp query failed");
        if open {
          self.state = ModalState::Error;
          host.alert(NOTICE_SEARCH_FAILED);
          host.render_modal(&self.view());
        }
      }
    }
  }

  /// A rendered timestamp was activated: decode it and seek.
  ///
  /// A malformed label or a missing media element is logged and ends the
  /// click — terminal per-click outcomes, never retried, never fatal.
  pub fn result_clicked(&mut self, index: usize, host: &mut dyn PageHost) {
    if self.state == ModalState::Closed {
      return;
    }
    let session = self.cache.load();
    let Some(label) = session.timestamps.as_ref().and_then(|t| t.get(index)) else {
      warn!(index, "clicked timestamp index out of range");
      return;
    };
    let seconds = match timestamp::decode(label) {
      Ok(seconds) => seconds,
      Err(e) => {
        warn!(err = %e, "ignoring unseekable timestamp label");
        return;
      }
    };
    match host.media() {
      Some(media) => {
        media.seek(seconds);
        media.play();
      }
      None => error!("no media element found on the page"),
    }
  }

  /// Close-button activation. The session record is untouched, so reopening
  /// reconstructs the same view.
  pub fn close(&mut self, host: &mut dyn PageHost) {
    if self.state == ModalState::Closed {
      return;
    }
    host.close_modal();
    self.state = ModalState::Closed;
  }
}
