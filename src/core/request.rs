use std::fmt;

use url::Url;

use crate::core::YfError;

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    /// The method name as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single HTTP request, described independently of any client library.
///
/// Built fluently and then handed to a [`Transport`](crate::Transport) once.
/// Two requests are equal when method, origin, path, query and form all match;
/// the handshake relies on this to notice that a redirect took place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    origin: Url,
    path: String,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl Request {
    /// A `GET /` against the scheme, host and port of `origin`.
    pub fn new(origin: &Url) -> Self {
        let mut origin = origin.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        Self {
            method: Method::Get,
            origin,
            path: "/".to_string(),
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    /// Rebuilds the request a transport ended up servicing from its final URL.
    pub fn from_url(method: Method, url: &Url) -> Self {
        let mut req = Self::new(url).method(method).path(url.path());
        req.query = url.query_pairs().into_owned().collect();
        req
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Replaces the host, keeping scheme and port.
    ///
    /// # Errors
    ///
    /// Returns `YfError::Url` if `host` is not a valid host.
    pub fn host(mut self, host: &str) -> Result<Self, YfError> {
        self.origin.set_host(Some(host))?;
        Ok(self)
    }

    /// Sets the path; a leading `/` is added when missing.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends a form field, sent as an urlencoded body on `POST`.
    #[must_use]
    pub fn form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((name.into(), value.into()));
        self
    }

    /* -------- accessors -------- */

    /// The HTTP method.
    pub fn http_method(&self) -> Method {
        self.method
    }

    /// The host, without scheme or port.
    pub fn host_str(&self) -> &str {
        self.origin.host_str().unwrap_or_default()
    }

    /// The unencoded path, always starting with `/`.
    pub fn path_str(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Form fields in insertion order.
    pub fn form_pairs(&self) -> &[(String, String)] {
        &self.form
    }

    /// The first value of query parameter `name`.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The first value of form parameter `name`.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The full URL, query string included. Form fields are not part of it.
    pub fn url(&self) -> Url {
        let mut url = self.origin.clone();
        url.set_path(&self.path);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url().as_str())
    }
}

/// What a transport returns once the body has been read in full.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: String,
    final_request: Request,
}

impl Response {
    /// A response as read in full by a transport.
    pub fn new(status: u16, body: impl Into<String>, final_request: Request) -> Self {
        Self {
            status,
            body: body.into(),
            final_request,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for any 2xx status.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The whole body as text.
    pub fn body_text(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning its body.
    pub fn into_body(self) -> String {
        self.body
    }

    /// The request actually serviced, after any redirects.
    pub fn final_request(&self) -> &Request {
        &self.final_request
    }
}
