//! Pantry repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::{with_connection, DbError};

/// A pantry category assigned to a user
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Pantry {
    #[serde(rename = "UserID")]
    pub user_id: i64,
    #[serde(rename = "PantryID")]
    pub pantry_id: i64,
    #[serde(rename = "Category")]
    pub category: String,
}

/// Pantry repository
pub struct PantryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PantryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Pantries of one user.
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<Pantry>, DbError> {
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, Pantry>(
                    r#"
                    SELECT up.user_id, p.pantry_id, p.category
                    FROM user_pantries up
                    JOIN pantries p ON p.pantry_id = up.pantry_id
                    WHERE up.user_id = $1
                    ORDER BY up.user_id, p.pantry_id
                    "#,
                )
                .bind(user_id)
                .fetch_all(&mut *conn)
                .await?;
                Ok::<_, DbError>(rows)
            })
        })
        .await
    }
}
