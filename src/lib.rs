//! yfinance-session: the Yahoo Finance cookie/consent/crumb handshake.
//!
//! Historical CSV downloads from Yahoo only succeed once a browser-like
//! session exists: a session id obtained by loading a quote page, regional
//! consent when that page redirects to a consent wall, and a crumb token sent
//! with every download. This crate performs that handshake, keeps the
//! recovered tokens in a shared [`SessionState`], and hands back the raw CSV
//! body of the download.
//!
//! ```no_run
//! use yfinance_session::{Resolution, YahooSession};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), yfinance_session::YfError> {
//! let session: YahooSession = YahooSession::default();
//! for symbol in ["AAPL", "MSFT"] {
//!     // The second fetch reuses the handshake of the first.
//!     let csv = session.new_fetcher(symbol, Resolution::Week).fetch_csv().await?;
//!     println!("{symbol}: {} bytes", csv.text().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod handshake;

pub use crate::core::{
    Endpoints, Method, Request, Response, ReqwestTransport, ScrapeError, SessionKey,
    SessionSnapshot, SessionState, Transport, YahooSession, YahooSessionBuilder, YfError,
};
pub use handshake::{
    Anomaly, AnomalyKind, CsvStream, Fetcher, HandshakeEvent, HandshakeState, Resolution, Step,
    StepOutcome,
};
