//! Public session surface + builder.
//! Default hosts and protocol literals live in `constants`.

pub(crate) mod constants;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::core::{ReqwestTransport, SessionSnapshot, SessionState, Transport, YfError};
use crate::handshake::{Fetcher, Resolution};
use constants::{DEFAULT_CONSENT_BASE, DEFAULT_FINANCE_BASE, DEFAULT_QUOTE_BASE, USER_AGENT};

/// The three origins the handshake talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Origin of the HTML quote pages (`https://finance.yahoo.com/`).
    pub quote_base: Url,
    /// Origin of the consent service (`https://guce.oath.com/`).
    pub consent_base: Url,
    /// Origin of the crumb and download API (`https://query1.finance.yahoo.com/`).
    pub finance_base: Url,
}

impl Endpoints {
    /// The production Yahoo hosts.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in default URL does not parse.
    pub fn yahoo() -> Result<Self, YfError> {
        Ok(Self {
            quote_base: Url::parse(DEFAULT_QUOTE_BASE)?,
            consent_base: Url::parse(DEFAULT_CONSENT_BASE)?,
            finance_base: Url::parse(DEFAULT_FINANCE_BASE)?,
        })
    }
}

/// One logical browsing session against Yahoo Finance.
///
/// Owns the transport (and with it the cookie jar) plus the [`SessionState`]
/// in which handshake tokens accumulate. Every [`Fetcher`] created from the
/// same session shares both, so the handshake is paid once and reused.
///
/// # Example
///
/// ```no_run
/// # use yfinance_session::{Resolution, YahooSession};
/// # use std::io::Read;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let session = YahooSession::builder().build()?;
/// let mut csv = session.new_fetcher("AAPL", Resolution::Day).fetch_csv().await?;
///
/// let mut text = String::new();
/// csv.read_to_string(&mut text)?;
/// println!("{} rows", text.lines().count().saturating_sub(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct YahooSession<T = ReqwestTransport> {
    transport: Arc<T>,
    state: SessionState,
    endpoints: Arc<Endpoints>,
    strict_scraping: bool,
}

impl<T> Clone for YahooSession<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            state: self.state.clone(),
            endpoints: Arc::clone(&self.endpoints),
            strict_scraping: self.strict_scraping,
        }
    }
}

impl Default for YahooSession {
    fn default() -> Self {
        Self::builder().build().expect("default session")
    }
}

impl YahooSession {
    /// Create a new builder.
    pub fn builder() -> YahooSessionBuilder {
        YahooSessionBuilder::default()
    }
}

impl<T: Transport> YahooSession<T> {
    /// Creates a fetcher for one symbol at one resolution.
    pub fn new_fetcher(&self, symbol: impl Into<String>, resolution: Resolution) -> Fetcher<T> {
        Fetcher::new(self.clone(), symbol.into(), resolution)
    }

    /// The shared token store.
    pub fn session_state(&self) -> &SessionState {
        &self.state
    }

    /// The origins requests are sent to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The transport shared by all fetchers.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn strict_scraping(&self) -> bool {
        self.strict_scraping
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct YahooSessionBuilder {
    user_agent: Option<String>,
    quote_base: Option<Url>,
    consent_base: Option<Url>,
    finance_base: Option<Url>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,

    strict_scraping: bool,
    state: Option<SessionState>,
}

impl YahooSessionBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quote page origin (e.g., `https://finance.yahoo.com/`).
    pub fn quote_base(mut self, url: Url) -> Self {
        self.quote_base = Some(url);
        self
    }

    /// Override the consent service origin (e.g., `https://guce.oath.com/`).
    pub fn consent_base(mut self, url: Url) -> Self {
        self.consent_base = Some(url);
        self
    }

    /// Override the crumb/download origin (e.g., `https://query1.finance.yahoo.com/`).
    pub fn finance_base(mut self, url: Url) -> Self {
        self.finance_base = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Fail a fetch when a consent token cannot be scraped. Default: off,
    /// in which case the failure is recorded as an anomaly and the fetch goes on.
    pub fn strict_scraping(mut self, strict: bool) -> Self {
        self.strict_scraping = strict;
        self
    }

    /// Back the session with an existing store.
    pub fn session_state(mut self, state: SessionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Start from an already-warmed session (bypasses challenge and crumb fetch).
    /// Replaces any store given to [`session_state`](Self::session_state).
    pub fn preauth(mut self, session_id: impl Into<String>, crumb: impl Into<String>) -> Self {
        let snapshot = SessionSnapshot {
            session_id: Some(session_id.into()),
            crumb: Some(crumb.into()),
            ..SessionSnapshot::default()
        };
        self.state = Some(SessionState::from_snapshot(&snapshot));
        self
    }

    fn endpoints(&mut self) -> Result<Endpoints, YfError> {
        let defaults = Endpoints::yahoo()?;
        Ok(Endpoints {
            quote_base: self.quote_base.take().unwrap_or(defaults.quote_base),
            consent_base: self.consent_base.take().unwrap_or(defaults.consent_base),
            finance_base: self.finance_base.take().unwrap_or(defaults.finance_base),
        })
    }

    /// Builds a session over a cookie-keeping reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is invalid or the HTTP client cannot be built.
    pub fn build(self) -> Result<YahooSession, YfError> {
        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;
        self.build_with_transport(ReqwestTransport::new(http))
    }

    /// Builds a session over a caller-supplied transport.
    ///
    /// `user_agent`, `timeout` and `connect_timeout` are the transport's concern
    /// and are ignored here.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is invalid.
    pub fn build_with_transport<T: Transport>(
        mut self,
        transport: T,
    ) -> Result<YahooSession<T>, YfError> {
        let endpoints = self.endpoints()?;
        Ok(YahooSession {
            transport: Arc::new(transport),
            state: self.state.unwrap_or_default(),
            endpoints: Arc::new(endpoints),
            strict_scraping: self.strict_scraping,
        })
    }
}
