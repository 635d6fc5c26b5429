//! API handlers for Lectern REST endpoints

pub mod auth;
pub mod books;
pub mod borrowing_records;
pub mod health;
pub mod members;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::User, AppState};

/// Extractor for the authenticated principal behind a bearer token.
///
/// Validates the token and resolves the user row before the handler body
/// runs; a missing, invalid or expired token rejects the request with no
/// side effects.
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let user = state.services.auth.authorize(token).await?;

        Ok(AuthenticatedUser(user))
    }
}
