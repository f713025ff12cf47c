//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Host serving the HTML quote pages (challenge requests).
pub(crate) const DEFAULT_QUOTE_BASE: &str = "https://finance.yahoo.com/";

/// Host of the regional consent service.
pub(crate) const DEFAULT_CONSENT_BASE: &str = "https://guce.oath.com/";

/// Host serving the crumb and CSV download endpoints.
pub(crate) const DEFAULT_FINANCE_BASE: &str = "https://query1.finance.yahoo.com/";

pub(crate) const QUOTE_PATH: &str = "/quote/";
pub(crate) const CONSENT_PATH: &str = "/consent";
pub(crate) const CRUMB_PATH: &str = "/v1/test/getcrumb";
pub(crate) const DOWNLOAD_PATH: &str = "/v7/finance/download/";

/* -------- consent form literals; the consent service rejects any deviation -------- */

pub(crate) const CONSENT_COUNTRY: &str = "SE";
pub(crate) const CONSENT_LOCALE: &str = "sv-SE";
pub(crate) const CONSENT_STEP: &str = "EU_SINGLEPAGE";
pub(crate) const CONSENT_DONE_URL_PREFIX: &str = "https://guce.yahoo.com/copyConsent?sessionId=";
pub(crate) const CONSENT_DONE_URL_SUFFIX: &str = "&inline=false&lang=sv-SE";

/// Length of the download window: 30 Gregorian mean years (365.2425 days each).
pub(crate) const LOOKBACK_SECS: i64 = 30 * 31_556_952;
