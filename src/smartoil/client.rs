//! Scrape Orchestrator
//!
//! Drives one scrape attempt against the dashboard. The session is never checked
//! up front; instead the tank list is requested straight away and a login happens
//! only when the answer looks like "logged out".
//!
//! ```text
//! Fetching ─► Decoding ─► CheckingAuth ─┬──────────────────────────────► Projecting ─► Done
//!                                       └─► ReAuthenticating ─► Retrying ─┘
//! ```
//!
//! Any phase can fail, which ends the cycle. At most one login happens per cycle:
//! if the retried request is still rejected the cycle fails instead of looping.

use crate::config::SmartOilConfig;
use crate::error::{ExporterError, Result};
use crate::smartoil::login::{login, Credentials};
use crate::smartoil::query::fetch_tanks;
use crate::smartoil::session::{HttpResponse, RequestStyle, SessionStore, Transport};
use crate::smartoil::types::{is_unauthenticated, TankDetails, TankListResponse};
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

/// Dashboard URLs derived from the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login_url: String,
    pub ajax_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login_url: format!("{}/login.php", base),
            ajax_url: format!("{}/ajax/main_ajax.php", base),
        }
    }
}

/// Step of the scrape state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapePhase {
    Fetching,
    Decoding,
    CheckingAuth,
    ReAuthenticating,
    Retrying,
    Projecting,
    Done,
}

impl fmt::Display for ScrapePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScrapePhase::Fetching => "fetching",
            ScrapePhase::Decoding => "decoding",
            ScrapePhase::CheckingAuth => "checking auth",
            ScrapePhase::ReAuthenticating => "re-authenticating",
            ScrapePhase::Retrying => "retrying",
            ScrapePhase::Projecting => "projecting",
            ScrapePhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// A scrape cycle that ended early
#[derive(Debug, Error)]
#[error("scrape failed while {phase}: {error}")]
pub struct ScrapeFailure {
    pub phase: ScrapePhase,
    #[source]
    pub error: ExporterError,
}

impl ScrapeFailure {
    fn at(phase: ScrapePhase) -> impl FnOnce(ExporterError) -> Self {
        move |error| Self { phase, error }
    }
}

/// Tanks from a successful cycle
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub tanks: Vec<TankDetails>,
    /// Whether a login was needed to get them
    pub reauthenticated: bool,
}

/// Client for the SmartOilGauge dashboard
///
/// Owns the session exclusively; callers drive it one cycle at a time through
/// [`SmartOilClient::scrape_tanks`].
pub struct SmartOilClient<T: Transport> {
    session: SessionStore<T>,
    credentials: Credentials,
    endpoints: Endpoints,
}

impl<T: Transport> SmartOilClient<T> {
    pub fn new(transport: T, credentials: Credentials, endpoints: Endpoints) -> Self {
        Self {
            session: SessionStore::new(transport),
            credentials,
            endpoints,
        }
    }

    pub fn session(&self) -> &SessionStore<T> {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run one scrape cycle and return the decoded tanks.
    ///
    /// # Errors
    ///
    /// Returns a [`ScrapeFailure`] naming the phase that failed when:
    /// - the tank request fails at the transport level
    /// - either response cannot be decoded
    /// - a required login fails
    /// - the final response is not a 200
    /// - the envelope's `result` is `"error"`
    pub async fn scrape_tanks(&mut self) -> std::result::Result<ScrapeOutcome, ScrapeFailure> {
        debug!("Scraping tank list");

        let first = fetch_tanks(&self.session, &self.endpoints.ajax_url, RequestStyle::Form)
            .await
            .map_err(ScrapeFailure::at(ScrapePhase::Fetching))?;
        let envelope = decode(&first).map_err(ScrapeFailure::at(ScrapePhase::Decoding))?;

        let unauthenticated = is_unauthenticated(first.status, &envelope);
        debug!(
            phase = %ScrapePhase::CheckingAuth,
            status = first.status,
            unauthenticated,
            "Checked tank list response"
        );

        let (response, envelope) = if unauthenticated {
            info!("Authentication required, logging in");
            self.reauthenticate()
                .await
                .map_err(ScrapeFailure::at(ScrapePhase::ReAuthenticating))?;

            let retry = fetch_tanks(&self.session, &self.endpoints.ajax_url, RequestStyle::Ajax)
                .await
                .map_err(ScrapeFailure::at(ScrapePhase::Retrying))?;
            let envelope = decode(&retry).map_err(ScrapeFailure::at(ScrapePhase::Retrying))?;
            (retry, envelope)
        } else {
            (first, envelope)
        };

        if response.status != 200 {
            let phase = if unauthenticated {
                ScrapePhase::Retrying
            } else {
                ScrapePhase::Decoding
            };
            return Err(ScrapeFailure {
                phase,
                error: ExporterError::UnexpectedStatus {
                    expected: 200,
                    actual: response.status,
                },
            });
        }

        if envelope.is_error() {
            error!("Failed to retrieve tank details: {}", response.body);
            let reason = if envelope.message.is_empty() {
                response.body.clone()
            } else {
                envelope.message.clone()
            };
            return Err(ScrapeFailure {
                phase: ScrapePhase::Projecting,
                error: ExporterError::RemoteError(reason),
            });
        }

        debug!(
            phase = %ScrapePhase::Done,
            tanks = envelope.tanks.len(),
            "Tank list scraped"
        );

        Ok(ScrapeOutcome {
            tanks: envelope.tanks,
            reauthenticated: unauthenticated,
        })
    }

    /// Throw away the old cookies and log in again.
    async fn reauthenticate(&mut self) -> Result<()> {
        self.session.reset()?;
        login(&mut self.session, &self.endpoints.login_url, &self.credentials).await
    }
}

impl SmartOilClient<crate::smartoil::session::ReqwestTransport> {
    /// Build a client talking to the real dashboard.
    pub fn from_config(config: &SmartOilConfig) -> Result<Self> {
        let transport = crate::smartoil::session::ReqwestTransport::from_config(config)?;
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        Ok(Self::new(
            transport,
            credentials,
            Endpoints::new(&config.base_url),
        ))
    }
}

fn decode(response: &HttpResponse) -> Result<TankListResponse> {
    serde_json::from_str(&response.body).map_err(ExporterError::Decode)
}
