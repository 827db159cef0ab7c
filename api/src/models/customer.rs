use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    /// The login password: date of birth as `DDMMYYYY`.
    pub fn password(&self) -> String {
        self.dob.format("%d%m%Y").to_string()
    }
}

/// Body of `POST /customer`. Fields are optional so a missing one can be
/// reported with its own message instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateCustomer {
    pub name: Option<String>,
    pub dob: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_ddmmyyyy() {
        let customer = Customer {
            id: 7,
            name: "jane".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 3, 9).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };

        assert_eq!(customer.password(), "09031990");
    }

    #[test]
    fn test_customer_json_shape() {
        let customer = Customer {
            id: 1,
            name: "jane".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 31).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "jane");
        assert_eq!(json["dob"], "1990-01-31");
        assert_eq!(json["updated_at"], "2024-05-01T10:00:00");
    }
}
