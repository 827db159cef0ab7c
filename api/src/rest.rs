use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    handlers::{auth, customer},
    middleware::{integer_segments, token_required},
    AppState,
};

const COLLECTION_METHODS: &str = "Method not allowed. Supported methods : GET, to get all customers; POST, to add a new customer";
const ITEM_METHODS: &str = "Method not allowed. Supported methods : GET, to get customer by id; DELETE, to delete customer; PUT, to update timestamp";
const GET_ONLY: &str = "Method not allowed. Supported method : GET.";

async fn unknown_url() -> AppError {
    AppError::NotFound
}

async fn collection_not_allowed() -> AppError {
    AppError::MethodNotAllowed(COLLECTION_METHODS)
}

async fn item_not_allowed() -> AppError {
    AppError::MethodNotAllowed(ITEM_METHODS)
}

async fn get_only() -> AppError {
    AppError::MethodNotAllowed(GET_ONLY)
}

/// Full route table. Everything under `/customer` with well-formed ids sits
/// behind the token gate, including the 405 replies for unsupported verbs.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/customer",
            get(customer::list_customers)
                .post(customer::create_customer)
                .fallback(collection_not_allowed),
        )
        .route(
            "/customer/:id",
            get(customer::get_customer)
                .delete(customer::delete_customer)
                .put(customer::touch_customer)
                .fallback(item_not_allowed),
        )
        .route(
            "/customer/youngest/:n",
            get(customer::youngest_customers).fallback(get_only),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), token_required))
        // Added last, so it runs before the token gate.
        .route_layer(middleware::from_fn(integer_segments));

    Router::new()
        .route("/login", get(auth::login).fallback(get_only))
        .merge(protected)
        .fallback(unknown_url)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
