use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use crate::models::customer::Claims;

/// Signing material and lifetime for access tokens. Built once at start-up.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: no grace period past `exp`.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn issue(&self, customer_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(customer_id, Utc::now())
    }

    #[instrument(skip(self))]
    pub fn issue_at(
        &self,
        customer_id: i64,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            id: customer_id,
            exp: (now + self.ttl).timestamp() as usize,
        };
        debug!(exp = claims.exp, "Issuing token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    #[instrument(skip_all)]
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                e
            })
    }
}
