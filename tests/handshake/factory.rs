use chrono::{TimeZone, Utc};
use url::Url;
use yfinance_session::handshake::factory;
use yfinance_session::{Endpoints, Method, Resolution, SessionSnapshot};

use crate::common;

fn endpoints() -> Endpoints {
    Endpoints {
        quote_base: Url::parse(common::QUOTE_BASE).unwrap(),
        consent_base: Url::parse(common::CONSENT_BASE).unwrap(),
        finance_base: Url::parse(common::FINANCE_BASE).unwrap(),
    }
}

fn warmed() -> SessionSnapshot {
    SessionSnapshot {
        session_id: Some(common::SESSION_ID.into()),
        csrf_token: Some(common::CSRF_TOKEN.into()),
        brand_bid: Some(common::BRAND_BID.into()),
        crumb: Some(common::CRUMB.into()),
    }
}

#[test]
fn interval_maps_each_resolution() {
    assert_eq!(Resolution::Day.interval(), "1d");
    assert_eq!(Resolution::Week.interval(), "1wk");
    assert_eq!(Resolution::Month.interval(), "1mo");
    for other in [Resolution::Hour, Resolution::Quarter, Resolution::Year] {
        assert_eq!(other.interval(), "1d", "{other} should fall back to daily");
    }
}

#[test]
fn resolution_parses_names_and_intervals() {
    assert_eq!("week".parse::<Resolution>().unwrap(), Resolution::Week);
    assert_eq!(" 1MO ".parse::<Resolution>().unwrap(), Resolution::Month);
    assert!("fortnight".parse::<Resolution>().is_err());
}

#[test]
fn period_window_is_thirty_mean_years() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let (p1, p2) = factory::period_bounds(now);
    assert_eq!(p2, now.timestamp());
    assert_eq!(p2 - p1, 946_708_560);
}

#[test]
fn data_request_carries_interval_events_period_and_crumb() {
    let now = Utc::now();
    let req = factory::data(&endpoints(), &warmed(), "AAPL", Resolution::Week, now);

    assert_eq!(req.http_method(), Method::Get);
    assert_eq!(req.host_str(), "query.test");
    assert_eq!(req.path_str(), "/v7/finance/download/AAPL");
    assert_eq!(common::query(&req, "interval"), "1wk");
    assert_eq!(common::query(&req, "events"), "history");
    assert_eq!(common::query(&req, "crumb"), common::CRUMB);

    let p1: i64 = common::query(&req, "period1").parse().unwrap();
    let p2: i64 = common::query(&req, "period2").parse().unwrap();
    assert_eq!(p2 - p1, 946_708_560);
    assert!((Utc::now().timestamp() - p2).abs() <= 5);

    let names: Vec<&str> = req.query_pairs().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["interval", "events", "period1", "period2", "crumb"]);
}

#[test]
fn data_request_sends_empty_crumb_when_none_known() {
    let req = factory::data(
        &endpoints(),
        &SessionSnapshot::default(),
        "MSFT",
        Resolution::Day,
        Utc::now(),
    );
    assert_eq!(req.query_value("crumb"), Some(""));
    assert!(req.to_string().contains("crumb="));
}

#[test]
fn challenge_and_crumb_requests_have_no_parameters() {
    let challenge = factory::challenge(&endpoints(), "AAPL");
    assert_eq!(challenge.to_string(), "https://finance.test/quote/AAPL");
    assert!(challenge.query_pairs().is_empty());

    let crumb = factory::crumb(&endpoints());
    assert_eq!(crumb.http_method(), Method::Get);
    assert_eq!(crumb.to_string(), "https://query.test/v1/test/getcrumb");
    assert!(crumb.query_pairs().is_empty());
}

#[test]
fn consent_request_reproduces_the_form_contract() {
    let challenge = factory::challenge(&endpoints(), "AAPL");
    let req = factory::consent(&endpoints(), &warmed(), &challenge);

    assert_eq!(req.http_method(), Method::Post);
    assert_eq!(req.to_string(), "https://consent.test/consent");

    let expected = [
        ("country", "SE"),
        ("ybarNamespace", "YAHOO"),
        ("previousStep", ""),
        ("tosId", "eu"),
        ("jurisdiction", ""),
        ("originalDoneUrl", "https://finance.test/quote/AAPL"),
        ("brandBid", common::BRAND_BID),
        ("sessionId", common::SESSION_ID),
        ("agree", "agree"),
        ("locale", "sv-SE"),
        ("isSDK", "false"),
        ("csrfToken", common::CSRF_TOKEN),
        ("inline", "false"),
        ("namespace", "yahoo"),
        ("consentCollectionStep", "EU_SINGLEPAGE"),
        (
            "doneUrl",
            "https://guce.yahoo.com/copyConsent?sessionId=sess-789&inline=false&lang=sv-SE",
        ),
        ("startStep", "EU_SINGLEPAGE"),
        ("userType", "NON_REG"),
    ];
    let actual: Vec<(&str, &str)> = req
        .form_pairs()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(actual, expected);
}
