//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available —
//! no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // Backend indexing service
  pub backend_base_url: String,
  pub store_video_path: String,
  pub query_timestamp_path: String,

  // Session store
  pub session_key: String,

  // Page surface identifiers (used by `PageHost` implementations)
  pub modal_id: String,
  pub launcher_class: String,

  // Launcher injection
  pub control_bar_poll_ms: u64,
  pub control_bar_timeout_ms: u64,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this is a build-time error.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
