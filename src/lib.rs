//! Session state and query coordination for an in-page video search tool.
//!
//! The core reacts to new-video notifications from a tab observer, registers
//! each video with a backend indexing service, and lets the user query the
//! video's content in natural language from a single modal panel. Results are
//! ranked `HH:MM:SS` labels, cached for the browsing session, and seekable.
//!
//! Everything around this core — icon injection, raw styling, tab-URL pattern
//! matching — is mechanical plumbing behind the [`modal::PageHost`] and
//! [`session::SessionStore`] traits and the [`coordinator::TabMessage`] wire
//! contract.

pub mod backend;
pub mod constants;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod modal;
pub mod session;
pub mod timestamp;

pub use backend::BackendClient;
pub use coordinator::{Coordinator, PageEvent, TabMessage};
pub use error::Error;
pub use modal::{MediaControl, ModalController, ModalState, ModalView, PageHost};
pub use session::{AccessLevel, MemoryStore, SessionCache, SessionStore, VideoSession};
