use axum::{
    extract::{RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use crate::{error::AppError, models::customer::Customer, AppState};

pub const TOKEN_HEADER: &str = "x-access-token";

/// Identity asserted by the presented token. `None` when the token is valid
/// but its customer has since been deleted; handlers decide what that means.
#[derive(Debug, Clone)]
pub struct CurrentCustomer(pub Option<Customer>);

/// Token gate for protected routes.
/// Usage: `.route_layer(middleware::from_fn_with_state(state.clone(), token_required))`.
/// Every failure is reported as the same 401.
#[instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn token_required(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing {} header", TOKEN_HEADER);
            AppError::InvalidToken
        })?;

    let claims = state.keys.validate(token).map_err(|e| {
        warn!("Token validation failed: {}", e);
        AppError::InvalidToken
    })?;

    let customer = state.customers.get(claims.id).await.map_err(|e| {
        warn!("Could not resolve token identity: {}", e);
        AppError::InvalidToken
    })?;

    match &customer {
        Some(c) => debug!(customer_id = c.id, "Token accepted"),
        None => warn!(customer_id = claims.id, "Token accepted for a customer that no longer exists"),
    }

    req.extensions_mut().insert(CurrentCustomer(customer));
    Ok(next.run(req).await)
}

/// Every path parameter must be a non-negative integer, otherwise the URL is
/// unknown. Runs ahead of `token_required`, so bad URLs are 404 with or without a token.
pub async fn integer_segments(
    params: RawPathParams,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    for (key, value) in params.iter() {
        if !matches!(value.parse::<i64>(), Ok(n) if n >= 0) {
            debug!(param = key, value, "Path segment is not a non-negative integer");
            return Err(AppError::NotFound);
        }
    }
    Ok(next.run(req).await)
}
