//! Redemption session HTTP handlers.
//!
//! ```text
//! GET    /session
//! DELETE /session
//! ```
//!
//! A returning visitor is greeted from the code stored in their session
//! cookie. The code is looked up again on every visit so the response always
//! reflects the store.

use actix_web::{HttpResponse, delete, get, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::CodeLookupOutcome;
use crate::domain::{AccessCode, Error, ProfileId, RedemptionContext};
use crate::inbound::http::ApiResult;
use crate::inbound::http::codes::{PartnerBody, ProfileBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::presentation::{Greeting, PartnerAssets, display_partner, greeting, partner_assets};

/// Partner branding resolved locally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct AssetsBody {
    /// Inline SVG logo; empty for unknown partners.
    pub logo: String,
}

impl From<PartnerAssets> for AssetsBody {
    fn from(value: PartnerAssets) -> Self {
        Self { logo: value.logo }
    }
}

/// Greeting lines for the welcome view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct GreetingBody {
    #[schema(example = "Welcome back, Ana")]
    pub title: String,
    #[schema(example = "Greetings from Terveystalo — Health first")]
    pub company: String,
}

impl From<Greeting> for GreetingBody {
    fn from(value: Greeting) -> Self {
        Self {
            title: value.title,
            company: value.company,
        }
    }
}

/// Response payload for `GET /session`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionResponseBody {
    /// A code was checked but no profile registered yet.
    NeedsRegistration { partner: PartnerBody },
    /// The visitor redeemed a code earlier.
    #[serde(rename = "ok")]
    Welcome {
        partner: PartnerBody,
        profile: Option<ProfileBody>,
        assets: AssetsBody,
        greeting: GreetingBody,
    },
}

fn no_redemption() -> Error {
    Error::not_found("No active redemption")
}

async fn welcome_view(
    state: &HttpState,
    code: &AccessCode,
    profile_id: ProfileId,
) -> ApiResult<Option<SessionResponseBody>> {
    let outcome = state.lookup.lookup_code(code.as_ref()).await?;
    let CodeLookupOutcome::AlreadyClaimed { partner, profile } = outcome else {
        debug!(code = %code, "session refers to a code that is no longer claimed");
        return Ok(None);
    };
    if profile.as_ref().is_some_and(|found| found.id != profile_id) {
        debug!(code = %code, "session refers to a different profile");
        return Ok(None);
    }

    let partner = display_partner(&partner);
    let text = greeting(&partner, profile.as_ref());
    let assets = partner_assets(&partner.name);
    Ok(Some(SessionResponseBody::Welcome {
        partner: partner.into(),
        profile: profile.map(ProfileBody::from),
        assets: assets.into(),
        greeting: text.into(),
    }))
}

/// Return the welcome view for the code held in the session.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Redemption progress", body = SessionResponseBody),
        (status = 404, description = "No active redemption", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionResponseBody>> {
    let body = match session.redemption()? {
        None => None,
        Some(RedemptionContext::Pending { partner, .. }) => {
            Some(SessionResponseBody::NeedsRegistration {
                partner: partner.into(),
            })
        }
        Some(RedemptionContext::Redeemed { code, profile_id }) => {
            welcome_view(&state, &code, profile_id).await?
        }
    };

    match body {
        Some(body) => Ok(web::Json(body)),
        None => {
            session.clear();
            Err(no_redemption())
        }
    }
}

/// Forget the redemption progress held in the session.
#[utoipa::path(
    delete,
    path = "/session",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "clearSession"
)]
#[delete("/session")]
pub async fn clear_session(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
#[path = "welcome_tests.rs"]
mod tests;
