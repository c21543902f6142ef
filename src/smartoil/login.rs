//! Login Flow
//!
//! The dashboard login is a classic HTML form guarded by a one-time nonce:
//!
//! 1. `GET /login.php` and pull `input[name="ccf_nonce"]` out of the page
//! 2. `POST /login.php` with `username`, `user_pass` and `ccf_nonce`
//!
//! A successful POST leaves the session cookies in the transport's jar; nothing is
//! returned to the caller.

use crate::error::{ExporterError, Result};
use crate::smartoil::session::{RequestStyle, SessionStore, Transport};
use scraper::{Html, Selector};
use secrecy::{ExposeSecret, SecretString};
use std::sync::LazyLock;
use tracing::{debug, info};

static NONCE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"input[name="ccf_nonce"]"#).expect("Invalid nonce selector")
});

/// Account credentials, fixed for the life of the process
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// Pull the anti-forgery nonce out of the login page markup.
pub fn extract_nonce(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    document
        .select(&NONCE_SELECTOR)
        .find_map(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or(ExporterError::MissingNonce)
}

/// Log in and leave the session cookies in `session`.
///
/// No retries happen here; the orchestrator decides when to call this.
pub async fn login<T: Transport>(
    session: &mut SessionStore<T>,
    login_url: &str,
    credentials: &Credentials,
) -> Result<()> {
    let page = session.transport().get(login_url).await?;
    if page.status != 200 {
        return Err(ExporterError::UnexpectedStatus {
            expected: 200,
            actual: page.status,
        });
    }

    let nonce = extract_nonce(&page.body)?;
    debug!("Found login nonce");

    let form = [
        ("username", credentials.username.as_str()),
        ("user_pass", credentials.password.expose_secret()),
        ("ccf_nonce", nonce.as_str()),
    ];
    let response = session
        .transport()
        .post_form(login_url, &form, RequestStyle::Form)
        .await?;

    if response.status >= 400 {
        return Err(ExporterError::LoginRejected {
            status: response.status,
        });
    }

    session.mark_established();
    info!("Successfully logged in to SmartOilGauge");
    Ok(())
}
