//! Core components of the `yfinance-session` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`YahooSession`] and its builder.
//! - The primary [`YfError`] type.
//! - The shared [`SessionState`] token store.
//! - The transport-neutral [`Request`]/[`Response`] pair and the [`Transport`] seam.

/// The main session (`YahooSession`), builder, and configuration.
pub mod client;
/// The primary error type (`YfError`) for the crate.
pub mod error;
/// Transport-neutral request and response models.
pub mod request;
/// The session-scoped token store.
pub mod session;
/// The HTTP transport seam and its reqwest implementation.
pub mod transport;

pub use client::{Endpoints, YahooSession, YahooSessionBuilder};
pub use error::{ScrapeError, YfError};
pub use request::{Method, Request, Response};
pub use session::{SessionKey, SessionSnapshot, SessionState};
pub use transport::{ReqwestTransport, Transport};
