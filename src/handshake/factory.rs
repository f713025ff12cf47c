//! Builders for the four request shapes of a fetch.
//!
//! All of these are pure: they read a [`SessionSnapshot`] and never touch the
//! network or the shared store.

use chrono::{DateTime, Utc};

use crate::core::client::constants::{
    CONSENT_COUNTRY, CONSENT_DONE_URL_PREFIX, CONSENT_DONE_URL_SUFFIX, CONSENT_LOCALE,
    CONSENT_PATH, CONSENT_STEP, CRUMB_PATH, DOWNLOAD_PATH, LOOKBACK_SECS, QUOTE_PATH,
};
use crate::core::{Endpoints, Method, Request, SessionKey, SessionSnapshot};
use crate::handshake::Resolution;

/// `GET` of the symbol's quote page. Reveals the session id and any consent wall.
pub fn challenge(endpoints: &Endpoints, symbol: &str) -> Request {
    Request::new(&endpoints.quote_base).path(format!("{QUOTE_PATH}{symbol}"))
}

/// `POST /consent` accepting the regional terms on behalf of `challenge`.
pub fn consent(endpoints: &Endpoints, snapshot: &SessionSnapshot, challenge: &Request) -> Request {
    let session_id = snapshot.value(SessionKey::SessionId);

    Request::new(&endpoints.consent_base)
        .method(Method::Post)
        .path(CONSENT_PATH)
        .form("country", CONSENT_COUNTRY)
        .form("ybarNamespace", "YAHOO")
        .form("previousStep", "")
        .form("tosId", "eu")
        .form("jurisdiction", "")
        .form("originalDoneUrl", challenge.to_string())
        .form(SessionKey::BrandBid.as_str(), snapshot.value(SessionKey::BrandBid))
        .form(SessionKey::SessionId.as_str(), session_id)
        .form("agree", "agree")
        .form("locale", CONSENT_LOCALE)
        .form("isSDK", "false")
        .form(SessionKey::CsrfToken.as_str(), snapshot.value(SessionKey::CsrfToken))
        .form("inline", "false")
        .form("namespace", "yahoo")
        .form("consentCollectionStep", CONSENT_STEP)
        .form("doneUrl", done_url(session_id))
        .form("startStep", CONSENT_STEP)
        .form("userType", "NON_REG")
}

fn done_url(session_id: &str) -> String {
    format!("{CONSENT_DONE_URL_PREFIX}{session_id}{CONSENT_DONE_URL_SUFFIX}")
}

/// `GET /v1/test/getcrumb`; the body is the crumb.
pub fn crumb(endpoints: &Endpoints) -> Request {
    Request::new(&endpoints.finance_base).path(CRUMB_PATH)
}

/// `GET /v7/finance/download/{symbol}` over the 30-year window ending at `now`.
///
/// The crumb is sent even when it is empty.
pub fn data(
    endpoints: &Endpoints,
    snapshot: &SessionSnapshot,
    symbol: &str,
    resolution: Resolution,
    now: DateTime<Utc>,
) -> Request {
    let (period1, period2) = period_bounds(now);

    Request::new(&endpoints.finance_base)
        .path(format!("{DOWNLOAD_PATH}{symbol}"))
        .query("interval", resolution.interval())
        .query("events", "history")
        .query("period1", period1.to_string())
        .query("period2", period2.to_string())
        .query(SessionKey::Crumb.as_str(), snapshot.value(SessionKey::Crumb))
}

/// `(period1, period2)` in Unix seconds: `now` minus 30 years, and `now`.
pub fn period_bounds(now: DateTime<Utc>) -> (i64, i64) {
    let period2 = now.timestamp();
    (period2 - LOOKBACK_SECS, period2)
}
