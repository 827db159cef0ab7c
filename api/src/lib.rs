pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rest;
pub mod store;
pub mod token;

use store::CustomerStore;
use token::TokenKeys;

pub use error::AppError;
pub use rest::router;

/// Everything a handler needs, built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerStore,
    pub keys: TokenKeys,
}
