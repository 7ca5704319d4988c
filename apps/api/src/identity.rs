//! Caller identity, resolved by the upstream auth gateway and forwarded in
//! the `x-user-id` header. Handlers take it as an extractor and pass it
//! explicitly to every operation that checks ownership.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or(AppError::Unauthorized)?;
        Ok(Identity { user_id })
    }
}
