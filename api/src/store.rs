use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::{debug, instrument};

use crate::models::customer::Customer;

pub const ADMIN_ID: i64 = 0;
pub const ADMIN_NAME: &str = "admin";

pub fn admin_dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("2020-01-01 is a valid date")
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    dob DATE NOT NULL,
    updated_at DATETIME NOT NULL
)";

/// The customer table. Every method is a single autocommit statement.
#[derive(Clone)]
pub struct CustomerStore {
    pool: SqlitePool,
}

impl CustomerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Customer>, sqlx::Error> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Customer>, sqlx::Error> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// First customer registered under `name`; names are not unique.
    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, sqlx::Error> {
        sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a customer and returns the assigned id.
    #[instrument(skip(self))]
    pub async fn insert(&self, name: &str, dob: NaiveDate) -> Result<i64, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO customers (name, dob, updated_at) VALUES (?, ?, ?)")
                .bind(name)
                .bind(dob)
                .bind(Utc::now().naive_utc())
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_rowid();
        debug!(customer_id = id, "Customer inserted");
        Ok(id)
    }

    /// Returns false when no row had that id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sets `updated_at` to now. Returns false when no row had that id.
    #[instrument(skip(self))]
    pub async fn touch(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE customers SET updated_at = ? WHERE id = ?")
            .bind(Utc::now().naive_utc())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The `n` most recently born customers, youngest first.
    #[instrument(skip(self))]
    pub async fn youngest(&self, n: i64) -> Result<Vec<Customer>, sqlx::Error> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY dob DESC, id LIMIT ?")
            .bind(n)
            .fetch_all(&self.pool)
            .await
    }

    /// Makes sure the sentinel admin row exists. Safe to call on every login.
    #[instrument(skip(self))]
    pub async fn ensure_admin(&self) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO customers (id, name, dob, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(ADMIN_ID)
        .bind(ADMIN_NAME)
        .bind(admin_dob())
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            tracing::info!("Created sentinel admin customer");
        }
        Ok(())
    }
}
