use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub const LOGIN_REALM: &str = "Basic realm=\"Login required!\"";
pub const INVALID_TOKEN: &str = "Invalid Token";
pub const UNKNOWN_URL: &str = "This URL is incorrect. Please verify the same.";

#[derive(Debug)]
pub enum AppError {
    Sqlx(sqlx::Error),
    Jwt(jsonwebtoken::errors::Error),
    /// Any failure of the token gate. Deliberately carries no detail.
    InvalidToken,
    LoginFail(&'static str),
    BadRequest(String),
    MethodNotAllowed(&'static str),
    NotFound,
}

impl From<sqlx::Error> for AppError {
    fn from(inner: sqlx::Error) -> Self {
        AppError::Sqlx(inner)
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(inner: jsonwebtoken::errors::Error) -> Self {
        AppError::Jwt(inner)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Sqlx(e) => write!(f, "Bad Request. Cause: {e}"),
            AppError::Jwt(e) => write!(f, "Bad Request. Cause: {e}"),
            AppError::InvalidToken => f.write_str(INVALID_TOKEN),
            AppError::LoginFail(msg) | AppError::MethodNotAllowed(msg) => f.write_str(msg),
            AppError::BadRequest(msg) => f.write_str(msg),
            AppError::NotFound => f.write_str(UNKNOWN_URL),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Sqlx(_) | AppError::Jwt(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidToken | AppError::LoginFail(_) => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Sqlx(e) => tracing::error!("Database error: {}", e),
            AppError::Jwt(e) => tracing::error!("JWT error: {}", e),
            _ => {}
        }

        let body = self.to_string();
        if let AppError::LoginFail(_) = self {
            return (status, [(header::WWW_AUTHENTICATE, LOGIN_REALM)], body).into_response();
        }

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_login_fail_carries_challenge() {
        let response = AppError::LoginFail("Could not verify!").into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            LOGIN_REALM
        );
        assert_eq!(body_text(response).await, "Could not verify!");
    }

    #[tokio::test]
    async fn test_invalid_token_has_no_challenge() {
        let response = AppError::InvalidToken.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
        assert_eq!(body_text(response).await, INVALID_TOKEN);
    }

    #[tokio::test]
    async fn test_store_error_embeds_cause() {
        let response = AppError::from(sqlx::Error::RowNotFound).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_text(response).await;
        assert!(body.starts_with("Bad Request. Cause: "));
        assert!(body.contains("no rows returned"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MethodNotAllowed("nope").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
