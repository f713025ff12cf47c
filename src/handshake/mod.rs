//! The consent/crumb handshake and the download it unlocks.

mod anomaly;
mod csv;
pub mod factory;
mod params;
pub mod scrape;
mod state;

pub use anomaly::{Anomaly, AnomalyKind, Step, StepOutcome};
pub use csv::CsvStream;
pub use params::Resolution;
pub use state::{HandshakeEvent, HandshakeState};

use chrono::Utc;

use crate::core::{ReqwestTransport, Request, Response, SessionKey, Transport, YahooSession, YfError};
use scrape::ChallengeScrape;

/// Downloads the history of one symbol at one resolution.
///
/// Holds no state of its own beyond its inputs: tokens live in the
/// session's [`SessionState`](crate::SessionState), so many fetchers created
/// from one [`YahooSession`] share a single handshake.
#[derive(Debug)]
pub struct Fetcher<T = ReqwestTransport> {
    session: YahooSession<T>,
    symbol: String,
    resolution: Resolution,
}

impl<T: Transport> Fetcher<T> {
    pub(crate) fn new(session: YahooSession<T>, symbol: String, resolution: Resolution) -> Self {
        Self {
            session,
            symbol,
            resolution,
        }
    }

    /// The ticker symbol being fetched.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The bar size being fetched.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Acquires whatever of session id, consent and crumb the session lacks.
    ///
    /// Best effort: failed steps are recorded in the outcome and the sequence
    /// carries on, always ending in [`HandshakeState::Ready`].
    ///
    /// # Errors
    ///
    /// Only with [`strict_scraping`](crate::YahooSessionBuilder::strict_scraping)
    /// enabled, when the consent tokens cannot be scraped.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn handshake(&self) -> Result<StepOutcome<HandshakeState>, YfError> {
        let state = self.session.session_state();
        let endpoints = self.session.endpoints();

        let mut outcome = StepOutcome::new(HandshakeState::from_snapshot(&state.snapshot().await));
        let mut challenge: Option<(Request, Option<Response>)> = None;

        loop {
            let event = match outcome.value {
                HandshakeState::Ready => break,

                HandshakeState::NoSession => {
                    let req = factory::challenge(endpoints, &self.symbol);
                    let resp = self.send(Step::Challenge, &req, &mut outcome).await;
                    challenge = Some((req, resp));
                    HandshakeEvent::ChallengeIssued
                }

                HandshakeState::SessionNoConsentChecked => {
                    let scraped = match &challenge {
                        Some((req, Some(resp))) => scrape::scrape_challenge(req, resp),
                        _ => ChallengeScrape {
                            session_id: None,
                            consent: None,
                        },
                    };
                    let consent_required = scraped.consent_required();
                    self.apply_challenge(scraped, &mut outcome).await?;
                    HandshakeEvent::ChallengeScraped { consent_required }
                }

                HandshakeState::ConsentPending => {
                    if let Some((challenge_req, _)) = &challenge {
                        let req = factory::consent(endpoints, &state.snapshot().await, challenge_req);
                        self.send(Step::Consent, &req, &mut outcome).await;
                    }
                    HandshakeEvent::ConsentIssued
                }

                HandshakeState::SessionReady => HandshakeEvent::CrumbChecked {
                    present: state.has(SessionKey::Crumb).await,
                },

                HandshakeState::CrumbPending => {
                    let req = factory::crumb(endpoints);
                    if let Some(resp) = self.send(Step::Crumb, &req, &mut outcome).await {
                        state.set(SessionKey::Crumb, scrape::scrape_crumb(&resp)).await;
                    }
                    if !state.has(SessionKey::Crumb).await {
                        outcome.record(
                            Step::Crumb,
                            YfError::MissingToken {
                                step: Step::Crumb,
                                key: SessionKey::Crumb,
                            },
                        );
                    }
                    HandshakeEvent::CrumbIssued
                }
            };
            outcome.value = outcome.value.next(event);
        }

        Ok(outcome)
    }

    /// Runs the handshake, then downloads the CSV body without parsing it.
    ///
    /// # Errors
    ///
    /// A network failure or non-2xx status of the download itself, or a
    /// handshake error under strict scraping. Earlier step failures are only
    /// reported through [`CsvStream::anomalies`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn fetch_csv(&self) -> Result<CsvStream, YfError> {
        let handshake = self.handshake().await?;

        let snapshot = self.session.session_state().snapshot().await;
        let req = factory::data(
            self.session.endpoints(),
            &snapshot,
            &self.symbol,
            self.resolution,
            Utc::now(),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(step = %Step::Data, url = %req, "sending");

        let resp = self.session.transport().execute(&req).await?;
        if !resp.is_ok() {
            return Err(YfError::Status {
                status: resp.status(),
                url: req.to_string(),
            });
        }

        Ok(CsvStream::new(resp.into_body(), handshake.anomalies))
    }

    /// Issues one handshake request, recording a transport anomaly on failure
    /// or non-2xx status. A non-2xx response is still returned for scraping.
    async fn send(
        &self,
        step: Step,
        req: &Request,
        outcome: &mut StepOutcome<HandshakeState>,
    ) -> Option<Response> {
        #[cfg(feature = "tracing")]
        tracing::debug!(step = %step, url = %req, "sending");

        match self.session.transport().execute(req).await {
            Ok(resp) => {
                if !resp.is_ok() {
                    outcome.record(
                        step,
                        YfError::Status {
                            status: resp.status(),
                            url: req.to_string(),
                        },
                    );
                }
                Some(resp)
            }
            Err(e) => {
                outcome.record(step, e);
                None
            }
        }
    }

    async fn apply_challenge(
        &self,
        scraped: ChallengeScrape,
        outcome: &mut StepOutcome<HandshakeState>,
    ) -> Result<(), YfError> {
        let state = self.session.session_state();

        if let Some(session_id) = scraped.session_id {
            state.set(SessionKey::SessionId, session_id).await;
        }

        if let Some(consent) = scraped.consent {
            for (key, result) in consent.into_entries() {
                match result {
                    Ok(value) => state.set(key, value).await,
                    Err(e) if self.session.strict_scraping() => return Err(e.into()),
                    Err(e) => outcome.record(Step::Challenge, e.into()),
                }
            }
        }

        if !state.has(SessionKey::SessionId).await {
            outcome.record(
                Step::Challenge,
                YfError::MissingToken {
                    step: Step::Challenge,
                    key: SessionKey::SessionId,
                },
            );
        }
        Ok(())
    }
}
