//! HTTP client for the Tandem partner authority.
//!
//! Implements the remote traits defined in `tandem-core`:
//! [`tandem_core::partnerships::PartnerRemoteApi`] over the REST invite
//! surface, and [`tandem_core::sync::PartnerChangeFeed`] over a long-polled
//! per-partnership change feed.

mod client;
mod error;
mod realtime;
mod types;

pub use client::PartnerApiClient;
pub use error::{ConnectError, Result};
pub use realtime::RealtimeFeed;
pub use types::{ApiErrorResponse, ChangeMessage, ChangesResponse};
