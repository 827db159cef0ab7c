use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::{
    error::AppError,
    middleware::CurrentCustomer,
    models::customer::{CreateCustomer, Customer},
    AppState,
};

pub const DOES_NOT_EXIST: &str = "Customer does not exist in the database";
pub const DOB_FORMAT: &str = "%d-%m-%Y";

fn caller(current: &CurrentCustomer) -> Option<i64> {
    current.0.as_ref().map(|c| c.id)
}

#[instrument(skip_all)]
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.customers.list().await?;
    debug!(caller = ?caller(&current), count = customers.len(), "Listed customers");
    Ok(Json(customers))
}

#[instrument(skip_all)]
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
    payload: Result<Json<CreateCustomer>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload
        .map_err(|e| AppError::BadRequest(format!("Bad Request. Cause: {}", e.body_text())))?;

    let (Some(name), Some(dob)) = (payload.name, payload.dob) else {
        return Err(AppError::BadRequest(
            "Please enter both name and date of birth of the customer to add a new entry."
                .to_string(),
        ));
    };

    let dob = NaiveDate::parse_from_str(&dob, DOB_FORMAT).map_err(|_| {
        AppError::BadRequest("Please enter a valid date. Expected format : DD-MM-YYYY".to_string())
    })?;

    let id = state.customers.insert(&name, dob).await?;
    info!(caller = ?caller(&current), customer_id = id, "Customer added");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/customer/{id}"))],
        "Customer added!",
    )
        .into_response())
}

#[instrument(skip_all)]
pub async fn get_customer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    debug!(caller = ?caller(&current), customer_id = id, "Fetching customer");

    Ok(match state.customers.get(id).await? {
        Some(customer) => Json(customer).into_response(),
        None => DOES_NOT_EXIST.into_response(),
    })
}

#[instrument(skip_all)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {

    if !state.customers.delete(id).await? {
        return Ok(DOES_NOT_EXIST);
    }
    info!(caller = ?caller(&current), customer_id = id, "Customer deleted");
    Ok("Customer deleted")
}

/// Refreshes `updated_at`; nothing else about a customer is mutable.
#[instrument(skip_all)]
pub async fn touch_customer(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {

    if !state.customers.touch(id).await? {
        return Ok(DOES_NOT_EXIST);
    }
    debug!(caller = ?caller(&current), customer_id = id, "Customer touched");
    Ok("Time updated")
}

#[instrument(skip_all)]
pub async fn youngest_customers(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentCustomer>,
    Path(n): Path<i64>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.customers.youngest(n).await?;
    debug!(caller = ?caller(&current), n, count = customers.len(), "Listed youngest customers");
    Ok(Json(customers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1990-01-01")]
    #[case("01/01/1990")]
    #[case("31-02-1990")]
    #[case("1-1-90x")]
    #[case("")]
    fn test_rejects_other_date_formats(#[case] raw: &str) {
        assert!(NaiveDate::parse_from_str(raw, DOB_FORMAT).is_err());
    }

    #[test]
    fn test_accepts_dd_mm_yyyy() {
        assert_eq!(
            NaiveDate::parse_from_str("31-01-1990", DOB_FORMAT).unwrap(),
            NaiveDate::from_ymd_opt(1990, 1, 31).unwrap()
        );
    }
}
