use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/token - Issue a bearer token for the configured API principal
pub async fn token(Json(body): Json<TokenRequest>) -> Result<Json<Value>, ApiError> {
    let security = &config::config().security;

    if security.api_username.is_empty()
        || body.username != security.api_username
        || body.password != security.api_password
    {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = generate_jwt(Claims::new(body.username)).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({ "token": token })))
}
