use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::{info, instrument};

use crate::{error::AppError, models::customer::AuthResponse, AppState};

/// Exchanges HTTP Basic credentials for an access token.
///
/// The password is the customer's date of birth as `DDMMYYYY`. The sentinel
/// admin customer is created first so a fresh store always has a login.
/// A birth date is not a secret: swap in a real credential store before exposing this.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, AppError> {
    state.customers.ensure_admin().await?;

    let (username, password) =
        basic_credentials(&headers).ok_or(AppError::LoginFail("Could not verify!"))?;

    let customer = state
        .customers
        .find_by_name(&username)
        .await?
        .ok_or(AppError::LoginFail("Could not verify."))?;

    if password != customer.password() {
        return Err(AppError::LoginFail("Could not verify.."));
    }

    let token = state.keys.issue(customer.id)?;
    info!(customer_id = customer.id, "Login successful");

    Ok(Json(AuthResponse { token }))
}

/// Username and password from an `Authorization: Basic` header. Both must be non-empty.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    if username.is_empty() || password.is_empty() {
        return None;
    }

    Some((username.to_string(), password.to_string()))
}
