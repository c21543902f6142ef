//! Tank Query
//!
//! Issues the `get_tanks_list` AJAX action. The response is returned raw; deciding
//! whether it means "logged out" is the orchestrator's job.

use crate::error::Result;
use crate::smartoil::session::{HttpResponse, RequestStyle, SessionStore, Transport};

/// Form fields for the tank list action. `tank_id=0` asks for every tank.
pub const TANK_LIST_FORM: [(&str, &str); 2] = [("action", "get_tanks_list"), ("tank_id", "0")];

/// POST the tank list action with the session's cookies.
pub async fn fetch_tanks<T: Transport>(
    session: &SessionStore<T>,
    ajax_url: &str,
    style: RequestStyle,
) -> Result<HttpResponse> {
    session
        .transport()
        .post_form(ajax_url, &TANK_LIST_FORM, style)
        .await
}
