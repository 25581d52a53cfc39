//! Access code HTTP handlers.
//!
//! ```text
//! POST /check-code
//! POST /register-with-code
//! ```
//!
//! Both handlers record the client's redemption progress in the session
//! cookie when the outcome moves it forward.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{ClaimCodeRequest, ClaimCodeResponse, CodeLookupOutcome};
use crate::domain::{AccessCode, Partner, Profile, RedemptionContext, RegistrationDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, coerce_text, parse_age};

const CODE: FieldName = FieldName::new("code");
const FIRST_NAME: FieldName = FieldName::new("firstName");
const SURNAME: FieldName = FieldName::new("surname");
const GENDER: FieldName = FieldName::new("gender");
const AGE: FieldName = FieldName::new("age");

/// Partner branding returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PartnerBody {
    #[schema(example = "Terveystalo")]
    pub name: String,
    #[schema(example = "Health first")]
    pub tagline: String,
    #[schema(example = "#005b8e")]
    pub accent: String,
}

impl From<Partner> for PartnerBody {
    fn from(value: Partner) -> Self {
        Self {
            name: value.name,
            tagline: value.tagline,
            accent: value.accent,
        }
    }
}

/// Profile registered against a code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub id: i64,
    pub first_name: String,
    pub surname: String,
    pub gender: String,
    #[schema(minimum = 18, maximum = 99)]
    pub age: i32,
}

impl From<Profile> for ProfileBody {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id.get(),
            first_name: value.first_name,
            surname: value.surname,
            gender: value.gender,
            age: value.age,
        }
    }
}

/// Request payload for `POST /check-code`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CheckCodeRequestBody {
    #[serde(default)]
    #[schema(value_type = String, example = "482913")]
    pub code: Option<Value>,
}

/// Response payload for `POST /check-code`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckCodeResponseBody {
    /// No such code was issued.
    Invalid,
    /// The code is waiting for registration details.
    NeedsRegistration { partner: PartnerBody },
    /// The code was redeemed earlier.
    #[serde(rename = "ok")]
    Claimed {
        partner: PartnerBody,
        profile: Option<ProfileBody>,
    },
}

impl From<CodeLookupOutcome> for CheckCodeResponseBody {
    fn from(value: CodeLookupOutcome) -> Self {
        match value {
            CodeLookupOutcome::Invalid => Self::Invalid,
            CodeLookupOutcome::NeedsRegistration { partner } => Self::NeedsRegistration {
                partner: partner.into(),
            },
            CodeLookupOutcome::AlreadyClaimed { partner, profile } => Self::Claimed {
                partner: partner.into(),
                profile: profile.map(ProfileBody::from),
            },
        }
    }
}

/// Request payload for `POST /register-with-code`.
///
/// Text fields accept any JSON scalar; `age` accepts an integer or a string
/// holding one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterWithCodeRequestBody {
    #[serde(default)]
    #[schema(value_type = String, example = "482913")]
    pub code: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "Ana")]
    pub first_name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "Lee")]
    pub surname: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "F")]
    pub gender: Option<Value>,
    #[serde(default)]
    #[schema(value_type = i64, minimum = 18, maximum = 99, example = 29)]
    pub age: Option<Value>,
}

/// Marker for successful responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OkStatus {
    /// The request succeeded.
    Ok,
}

/// Response payload for `POST /register-with-code`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RegisterWithCodeResponseBody {
    pub status: OkStatus,
    pub profile_id: i64,
    pub partner: PartnerBody,
}

impl From<ClaimCodeResponse> for RegisterWithCodeResponseBody {
    fn from(value: ClaimCodeResponse) -> Self {
        Self {
            status: OkStatus::Ok,
            profile_id: value.profile_id.get(),
            partner: value.partner.into(),
        }
    }
}

/// Check whether a code can be redeemed.
#[utoipa::path(
    post,
    path = "/check-code",
    request_body = CheckCodeRequestBody,
    responses(
        (status = 200, description = "Lookup outcome", body = CheckCodeResponseBody),
        (status = 400, description = "Malformed code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["codes"],
    operation_id = "checkCode"
)]
#[post("/check-code")]
pub async fn check_code(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckCodeRequestBody>,
) -> ApiResult<web::Json<CheckCodeResponseBody>> {
    let code = AccessCode::new(coerce_text(payload.code.as_ref(), CODE)?)?;
    let outcome = state.lookup.lookup_code(code.as_ref()).await?;

    if let Some(context) = RedemptionContext::from_lookup(code, &outcome) {
        session.set_redemption(&context)?;
    }

    Ok(web::Json(outcome.into()))
}

fn parse_claim_request(
    payload: RegisterWithCodeRequestBody,
) -> ApiResult<(AccessCode, ClaimCodeRequest)> {
    let code = AccessCode::new(coerce_text(payload.code.as_ref(), CODE)?)?;
    let registration = RegistrationDraft {
        first_name: coerce_text(payload.first_name.as_ref(), FIRST_NAME)?,
        surname: coerce_text(payload.surname.as_ref(), SURNAME)?,
        gender: coerce_text(payload.gender.as_ref(), GENDER)?,
        age: parse_age(payload.age.as_ref(), AGE)?,
    };
    let request = ClaimCodeRequest {
        code: code.as_ref().to_owned(),
        registration,
    };
    Ok((code, request))
}

/// Register a profile against a code.
#[utoipa::path(
    post,
    path = "/register-with-code",
    request_body = RegisterWithCodeRequestBody,
    responses(
        (status = 200, description = "Code redeemed", body = RegisterWithCodeResponseBody),
        (status = 400, description = "Invalid code or registration fields", body = ErrorSchema),
        (status = 404, description = "Code not found", body = ErrorSchema),
        (status = 409, description = "Code already used", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["codes"],
    operation_id = "registerWithCode"
)]
#[post("/register-with-code")]
pub async fn register_with_code(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterWithCodeRequestBody>,
) -> ApiResult<web::Json<RegisterWithCodeResponseBody>> {
    let (code, request) = parse_claim_request(payload.into_inner())?;
    let response = state.claim.claim_code(request).await?;

    session.set_redemption(&RedemptionContext::from_claim(code, &response))?;

    Ok(web::Json(response.into()))
}

#[cfg(test)]
#[path = "codes_tests.rs"]
mod tests;
