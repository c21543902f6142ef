pub mod client;
pub mod login;
pub mod query;
pub mod session;
pub mod types;

pub use client::{Endpoints, ScrapeFailure, ScrapeOutcome, ScrapePhase, SmartOilClient};
pub use login::Credentials;
pub use session::{HttpResponse, ReqwestTransport, RequestStyle, SessionStore, Transport};
