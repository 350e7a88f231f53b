//! Video lifecycle coordination: reacts to new-video notifications, keeps
//! registration idempotent, and owns launcher-control injection.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

use crate::backend::BackendClient;
use crate::constants::constants;
use crate::error::Error;
use crate::modal::{ModalController, PageHost};
use crate::session::SessionCache;

// --- Wire contract with the tab observer ---

/// Message the tab observer delivers into the page context, exactly once per
/// qualifying navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TabMessage {
  #[serde(rename = "NEW")]
  New {
    #[serde(rename = "youtubeUrl")]
    youtube_url: String,
  },
}

// --- User interaction events ---

/// Discrete user interactions forwarded by the embedding plumbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
  LauncherClicked,
  InputChanged(String),
  SearchSubmitted,
  ResultClicked(usize),
  CloseClicked,
}

// --- Coordinator ---

/// Registers each new video with the backend and makes sure exactly one
/// launcher control exists per page load.
pub struct Coordinator {
  backend: BackendClient,
  modal: ModalController,
  /// Explicit existence flag — never inferred from rendered output.
  launcher_injected: bool,
  /// How often to re-check for the player control bar while it mounts.
  pub poll_interval: Duration,
  /// How long to keep checking before giving up with `Error::InjectionTimeout`.
  pub poll_timeout: Duration,
}

impl Coordinator {
  pub fn new(backend: BackendClient, cache: SessionCache) -> Self {
    let c = constants();
    Self {
      modal: ModalController::new(backend.clone(), cache),
      backend,
      launcher_injected: false,
      poll_interval: Duration::from_millis(c.control_bar_poll_ms),
      poll_timeout: Duration::from_millis(c.control_bar_timeout_ms),
    }
  }

  pub fn modal(&self) -> &ModalController {
    &self.modal
  }

  pub fn launcher_injected(&self) -> bool {
    self.launcher_injected
  }

  /// Entry point for tab-observer messages.
  pub async fn handle_message(&mut self, message: TabMessage, host: &mut dyn PageHost) {
    match message {
      TabMessage::New { youtube_url } => self.handle_new_video(&youtube_url, host).await,
    }
  }

  /// Register the video, then make sure the launcher control exists.
  ///
  /// Registration is awaited so the launcher only appears once registration
  /// has been attempted; a failure is logged and otherwise ignored — the next
  /// notification retries naturally and re-registering is a server-side
  /// no-op. Re-delivery while a launcher already exists does nothing further.
  pub async fn handle_new_video(&mut self, url: &str, host: &mut dyn PageHost) {
    info!(url, "new video detected");
    if let Err(e) = self.backend.register_video(url).await {
      error!(err = %e, url, "failed to register video with backend");
    }

    // The launcher from an earlier notification stays, bound to its URL.
    if self.launcher_injected {
      return;
    }

    if let Err(e) = self.wait_for_control_bar(&*host).await {
      error!(err = %e, url, "launcher injection skipped");
      return;
    }
    host.inject_launcher();
    self.launcher_injected = true;
    self.modal.bind_video(url);
    info!(url, "launcher control injected");
  }

  /// The host page mounts its player UI asynchronously; poll for the control
  /// bar with a bounded timeout instead of assuming it already exists.
  async fn wait_for_control_bar(&self, host: &dyn PageHost) -> Result<(), Error> {
    let deadline = tokio::time::Instant::now() + self.poll_timeout;
    loop {
      if host.control_bar_ready() {
        return Ok(());
      }
      if tokio::time::Instant::now() >= deadline {
        return Err(Error::InjectionTimeout(self.poll_timeout));
      }
      sleep(self.poll_interval).await;
    }
  }

  /// Forward a user interaction to the modal controller.
  pub fn handle_page_event(&mut self, event: PageEvent, host: &mut dyn PageHost) {
    match event {
      PageEvent::LauncherClicked => self.modal.open(host),
      PageEvent::InputChanged(text) => self.modal.input_changed(&text),
      PageEvent::SearchSubmitted => self.modal.submit_search(host),
      PageEvent::ResultClicked(index) => self.modal.result_clicked(index, host),
      PageEvent::CloseClicked => self.modal.close(host),
    }
  }

  /// Pump any in-flight search reply. Drive from the host's event loop.
  pub fn poll_pending(&mut self, host: &mut dyn PageHost) {
    self.modal.poll_pending(host);
  }
}
