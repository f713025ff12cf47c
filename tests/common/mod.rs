#![allow(dead_code)]

use std::sync::Mutex;

use httpmock::MockServer;
use url::Url;
use yfinance_session::{
    Method, Request, Response, Transport, YahooSession, YahooSessionBuilder, YfError,
};

pub const QUOTE_BASE: &str = "https://finance.test/";
pub const CONSENT_BASE: &str = "https://consent.test/";
pub const FINANCE_BASE: &str = "https://query.test/";

pub const SESSION_ID: &str = "sess-789";
pub const CSRF_TOKEN: &str = "csrf-123";
pub const BRAND_BID: &str = "bid-456";
pub const CRUMB: &str = "crumb-abc";

pub const CSV_BODY: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n\
2024-01-02,187.15,188.44,183.89,185.64,184.73,82488700\n";

pub fn setup_server() -> MockServer {
    #[cfg(feature = "tracing-subscriber")]
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    MockServer::start()
}

pub fn consent_page(csrf: &str, brand_bid: &str) -> String {
    format!(
        "<html><body><form method=\"post\" action=\"/consent\">\n\
         <input type=\"hidden\" name=\"csrfToken\" value=\"{csrf}\">\n\
         <input type=\"hidden\" name=\"brandBid\" value=\"{brand_bid}\">\n\
         <button type=\"submit\" name=\"agree\" value=\"agree\">OK</button>\n\
         </form></body></html>"
    )
}

pub fn consent_wall_url() -> Url {
    Url::parse(&format!(
        "{CONSENT_BASE}collectConsent?sessionId={SESSION_ID}&lang=sv-SE"
    ))
    .unwrap()
}

/// Builder pointed at the fake hosts used with [`ScriptedTransport`].
pub fn scripted_builder() -> YahooSessionBuilder {
    YahooSession::builder()
        .quote_base(Url::parse(QUOTE_BASE).unwrap())
        .consent_base(Url::parse(CONSENT_BASE).unwrap())
        .finance_base(Url::parse(FINANCE_BASE).unwrap())
}

pub fn scripted_session(transport: ScriptedTransport) -> YahooSession<ScriptedTransport> {
    scripted_builder().build_with_transport(transport).unwrap()
}

type Route = Box<dyn Fn(&Request) -> Result<Response, YfError> + Send + Sync>;

/// In-memory transport answering by request path and recording every request.
/// Unrouted paths answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<(String, Route)>,
    sent: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(
        mut self,
        path: &str,
        f: impl Fn(&Request) -> Result<Response, YfError> + Send + Sync + 'static,
    ) -> Self {
        self.routes.push((path.to_string(), Box::new(f)));
        self
    }

    /// Answers `status` with `body`, serviced without a redirect.
    pub fn respond(self, path: &str, status: u16, body: &str) -> Self {
        let body = body.to_string();
        self.route(path, move |req| Ok(Response::new(status, body.clone(), req.clone())))
    }

    pub fn ok(self, path: &str, body: &str) -> Self {
        self.respond(path, 200, body)
    }

    /// Answers with `body` as if the request had been redirected to `to`.
    pub fn redirect(self, path: &str, to: Url, body: &str) -> Self {
        let body = body.to_string();
        self.route(path, move |_| {
            Ok(Response::new(200, body.clone(), Request::from_url(Method::Get, &to)))
        })
    }

    /// Fails without any response, like a dropped connection.
    pub fn fail(self, path: &str) -> Self {
        self.route(path, |_| Err(YfError::Data("connection reset".into())))
    }

    /// The standard consent-wall handshake followed by a CSV download of `symbol`.
    pub fn consent_wall(symbol: &str) -> Self {
        Self::new()
            .redirect(
                &format!("/quote/{symbol}"),
                consent_wall_url(),
                &consent_page(CSRF_TOKEN, BRAND_BID),
            )
            .ok("/consent", "<html>thanks</html>")
            .ok("/v1/test/getcrumb", CRUMB)
            .ok(&format!("/v7/finance/download/{symbol}"), CSV_BODY)
    }

    pub fn sent(&self) -> Vec<Request> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_paths(&self) -> Vec<String> {
        self.sent()
            .iter()
            .map(|r| r.path_str().to_string())
            .collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.sent().iter().filter(|r| r.path_str() == path).count()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: &Request) -> Result<Response, YfError> {
        self.sent.lock().unwrap().push(request.clone());
        match self.routes.iter().find(|(p, _)| p == request.path_str()) {
            Some((_, f)) => f(request),
            None => Ok(Response::new(404, "not found", request.clone())),
        }
    }
}

pub fn query<'a>(req: &'a Request, name: &str) -> &'a str {
    req.query_value(name)
        .unwrap_or_else(|| panic!("missing query param {name} in {req}"))
}

pub fn form<'a>(req: &'a Request, name: &str) -> &'a str {
    req.form_value(name)
        .unwrap_or_else(|| panic!("missing form field {name} in {req}"))
}
