//! Token extraction from handshake responses.
//!
//! The consent page carries its tokens in hidden form inputs. There is no
//! stable markup contract, so values are cut out between literal markers.

use crate::core::{Request, Response, ScrapeError, SessionKey};

pub(crate) const CSRF_TOKEN_MARKER: &str = "<input type=\"hidden\" name=\"csrfToken\" value=\"";
pub(crate) const BRAND_BID_MARKER: &str = "<input type=\"hidden\" name=\"brandBid\" value=\"";
pub(crate) const MARKER_END: &str = "\">";

/// The text between the first `open` and the next `close` after it.
///
/// # Errors
///
/// `MarkerNotFound` if `open` is absent, `Unterminated` if no `close` follows it.
pub fn extract_between<'a>(
    body: &'a str,
    token: &'static str,
    open: &'static str,
    close: &str,
) -> Result<&'a str, ScrapeError> {
    let begin = body
        .find(open)
        .map(|i| i + open.len())
        .ok_or(ScrapeError::MarkerNotFound { token, marker: open })?;
    let len = body[begin..]
        .find(close)
        .ok_or(ScrapeError::Unterminated { token })?;
    Ok(&body[begin..begin + len])
}

/// Tokens the consent request must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentTokens {
    /// Value of the hidden `csrfToken` input.
    pub csrf_token: String,
    /// Value of the hidden `brandBid` input.
    pub brand_bid: String,
}

impl ConsentTokens {
    /// Scrapes both hidden inputs out of a consent page.
    ///
    /// # Errors
    ///
    /// Fails on the first token whose markers are missing.
    pub fn from_body(body: &str) -> Result<Self, ScrapeError> {
        ConsentScrape::from_body(body).into_tokens()
    }
}

/// Each consent token scraped on its own, so one missing input does not
/// discard the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentScrape {
    /// Result of scraping the hidden `csrfToken` input.
    pub csrf_token: Result<String, ScrapeError>,
    /// Result of scraping the hidden `brandBid` input.
    pub brand_bid: Result<String, ScrapeError>,
}

impl ConsentScrape {
    /// Scrapes both hidden inputs out of a consent page, independently.
    pub fn from_body(body: &str) -> Self {
        Self {
            csrf_token: scrape_input(body, SessionKey::CsrfToken, CSRF_TOKEN_MARKER),
            brand_bid: scrape_input(body, SessionKey::BrandBid, BRAND_BID_MARKER),
        }
    }

    /// Both tokens, or the first error in form order (`csrfToken` before `brandBid`).
    ///
    /// # Errors
    ///
    /// The error of the first token that could not be scraped.
    pub fn into_tokens(self) -> Result<ConsentTokens, ScrapeError> {
        Ok(ConsentTokens {
            csrf_token: self.csrf_token?,
            brand_bid: self.brand_bid?,
        })
    }

    /// The session keys paired with their scrape results, in form order.
    pub fn into_entries(self) -> [(SessionKey, Result<String, ScrapeError>); 2] {
        [
            (SessionKey::CsrfToken, self.csrf_token),
            (SessionKey::BrandBid, self.brand_bid),
        ]
    }
}

fn scrape_input(body: &str, key: SessionKey, marker: &'static str) -> Result<String, ScrapeError> {
    extract_between(body, key.as_str(), marker, MARKER_END).map(str::to_string)
}

/// What a challenge response revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeScrape {
    /// `sessionId` from the query of the request finally serviced.
    pub session_id: Option<String>,
    /// Present exactly when the challenge was redirected to a consent wall.
    pub consent: Option<ConsentScrape>,
}

impl ChallengeScrape {
    /// True when the challenge was redirected to a consent wall.
    pub fn consent_required(&self) -> bool {
        self.consent.is_some()
    }
}

/// Reads the session id from the serviced request and, if `sent` was redirected,
/// the consent tokens from the body.
pub fn scrape_challenge(sent: &Request, response: &Response) -> ChallengeScrape {
    let serviced = response.final_request();
    let session_id = serviced
        .query_value(SessionKey::SessionId.as_str())
        .map(str::to_string);

    let consent = (serviced != sent).then(|| ConsentScrape::from_body(response.body_text()));

    ChallengeScrape {
        session_id,
        consent,
    }
}

/// The crumb endpoint answers with the bare token; the whole body is kept byte for byte.
pub fn scrape_crumb(response: &Response) -> String {
    response.body_text().to_string()
}
