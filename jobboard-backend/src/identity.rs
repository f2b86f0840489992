use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

/// Header carrying the authenticated company id. It is set by the
/// authentication layer in front of this service and trusted as-is.
pub const COMPANY_ID_HEADER: &str = "x-company-id";

/// Identity of the company performing a request, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActingCompany(pub Option<String>);

impl ActingCompany {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Some(raw.into()))
    }

    pub fn raw(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// The id, if it is a syntactically valid store identifier.
    pub fn company_id(&self) -> Option<Uuid> {
        Uuid::parse_str(self.raw()).ok()
    }
}

impl<S> FromRequestParts<S> for ActingCompany
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(COMPANY_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string());
        Ok(Self(raw))
    }
}
