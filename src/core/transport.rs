//! The HTTP seam the handshake drives, and its reqwest implementation.

use std::future::Future;

use crate::core::{Method, Request, Response, YfError};

/// Performs one [`Request`], following redirects, and reads the body in full.
///
/// A non-2xx status is not an error here; it comes back as a [`Response`] whose
/// [`is_ok`](Response::is_ok) is false. Only failures that leave no response at
/// all (connection, TLS, body decoding) are returned as `Err`.
///
/// Cookies set along the way must be kept by the transport and replayed on
/// later requests; the handshake depends on that.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &Request) -> impl Future<Output = Result<Response, YfError>> + Send;
}

/// [`Transport`] backed by a cookie-keeping `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing client. It should have `cookie_store(true)` enabled.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: &Request) -> Result<Response, YfError> {
        let url = request.url();
        let builder = match request.http_method() {
            Method::Get => self.http.get(url.clone()),
            Method::Post => self.http.post(url.clone()).form(request.form_pairs()),
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let final_url = resp.url().clone();
        let body = resp.text().await?;

        // Only the final URL survives a redirect; the method is taken to be GET.
        let final_request = if final_url == url {
            request.clone()
        } else {
            Request::from_url(Method::Get, &final_url)
        };

        Ok(Response::new(status, body, final_request))
    }
}
