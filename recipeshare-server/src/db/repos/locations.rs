//! Location lookup

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::{with_connection, DbError};

/// Location record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub street: String,
    pub city: String,
    pub province: String,
    pub location_type: String,
}

/// Location repository
pub struct LocationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LocationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All locations ordered by city, then street.
    pub async fn list(&self) -> Result<Vec<Location>, DbError> {
        with_connection(self.pool, |conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, Location>(
                    r#"
                    SELECT street, city, province, location_type
                    FROM locations
                    ORDER BY city, street
                    "#,
                )
                .fetch_all(&mut *conn)
                .await?;
                Ok::<_, DbError>(rows)
            })
        })
        .await
    }
}
