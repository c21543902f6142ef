//! Session Management
//!
//! The dashboard tracks logins with cookies, so the "session" is whatever the
//! transport's cookie jar currently holds. [`SessionStore`] owns the transport and
//! remembers whether a login has populated it; it carries no business logic.
//!
//! [`Transport`] is the seam between the scrape state machine and the network.
//! [`ReqwestTransport`] is the production implementation; tests substitute a
//! scripted one.

use crate::config::SmartOilConfig;
use crate::error::{ExporterError, Result};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How a form POST is dressed up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStyle {
    /// Plain `application/x-www-form-urlencoded` submission
    Form,
    /// Form submission with the headers a browser's XHR would send
    Ajax,
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Cookie-carrying HTTP transport
///
/// Implementations must keep cookies set by one response and send them on later
/// requests until [`Transport::clear_cookies`] is called.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        style: RequestStyle,
    ) -> Result<HttpResponse>;

    /// Drop every cookie, leaving the transport with no session.
    fn clear_cookies(&mut self) -> Result<()>;
}

/// Production transport backed by a `reqwest::Client` and an in-memory cookie jar
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Self::build_client(timeout)?,
            timeout,
        })
    }

    pub fn from_config(config: &SmartOilConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.request_timeout_seconds))
    }

    fn build_client(timeout: Duration) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .cookie_provider(Arc::new(Jar::default()))
            .timeout(timeout)
            .build()
            .map_err(ExporterError::from)
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        style: RequestStyle,
    ) -> Result<HttpResponse> {
        debug!("POST {} ({:?})", url, style);
        let mut request = self.client.post(url).form(form).build()?;
        if style == RequestStyle::Ajax {
            let headers = request.headers_mut();
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
            );
            headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        }
        let response = self.client.execute(request).await?;
        Self::read(response).await
    }

    fn clear_cookies(&mut self) -> Result<()> {
        // reqwest's Jar cannot be emptied in place, so swap in a client with a new one.
        self.client = Self::build_client(self.timeout)?;
        Ok(())
    }
}

/// Owner of the one live session
pub struct SessionStore<T: Transport> {
    transport: T,
    established: bool,
}

impl<T: Transport> SessionStore<T> {
    /// Wrap a transport that has no session yet.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            established: false,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True once a login has succeeded on the current cookie jar.
    pub fn is_established(&self) -> bool {
        self.established
    }

    pub(crate) fn mark_established(&mut self) {
        self.established = true;
    }

    /// Forget the current session so the next login starts from an empty jar.
    pub fn reset(&mut self) -> Result<()> {
        self.transport.clear_cookies()?;
        self.established = false;
        Ok(())
    }
}
