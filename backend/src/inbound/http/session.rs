//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! the [`RedemptionContext`] they thread between requests.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::Value;

use crate::domain::{Error, RedemptionContext};

pub(crate) const REDEMPTION_KEY: &str = "redemption";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the client's redemption progress in the session cookie.
    pub fn set_redemption(&self, context: &RedemptionContext) -> Result<(), Error> {
        self.0
            .insert(REDEMPTION_KEY, context)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the stored redemption progress, if any.
    ///
    /// Entries that no longer decode (for example a cookie written by an
    /// older release) are dropped and reported as absent.
    pub fn redemption(&self) -> Result<Option<RedemptionContext>, Error> {
        let raw = self
            .0
            .get::<Value>(REDEMPTION_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match serde_json::from_value(raw) {
            Ok(context) => Ok(Some(context)),
            Err(error) => {
                tracing::warn!("invalid redemption context in session cookie: {error}");
                self.0.remove(REDEMPTION_KEY);
                Ok(None)
            }
        }
    }

    /// Forget any redemption progress.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
