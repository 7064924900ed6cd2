//! Like repository - recipes users have liked
//!
//! Only rows with `liked = TRUE` count; a row with `liked = FALSE`
//! records a withdrawn like.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::{with_connection, DbError};

/// A liked recipe with the user who liked it
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct LikedRecipe {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i64,
    #[serde(rename = "RecipeName")]
    pub recipe_name: String,
    #[serde(rename = "Cuisine")]
    pub cuisine: String,
    #[serde(rename = "UserID")]
    pub user_id: i64,
    #[serde(rename = "LikedBy")]
    pub liked_by: String,
}

/// Recipe summary with its creator
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RecipeSummary {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i64,
    #[serde(rename = "RecipeName")]
    pub recipe_name: String,
    #[serde(rename = "Cuisine")]
    pub cuisine: String,
    #[serde(rename = "CreatedBy")]
    pub created_by: String,
}

const LIKED_SQL: &str = r#"
    SELECT r.recipe_id, r.recipe_name, r.cuisine, u.user_id, u.user_name AS liked_by
    FROM recipe_likes l
    JOIN recipes r ON r.recipe_id = l.recipe_id
    JOIN users u ON u.user_id = l.user_id
    WHERE l.liked
      AND ($1::BIGINT IS NULL OR l.user_id = $1)
    ORDER BY r.recipe_id, u.user_id
"#;

/// Like repository
pub struct LikeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LikeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every (recipe, user) like.
    pub async fn liked(&self) -> Result<Vec<LikedRecipe>, DbError> {
        self.fetch_liked(None).await
    }

    /// Recipes liked by one user.
    pub async fn liked_by_user(&self, user_id: i64) -> Result<Vec<LikedRecipe>, DbError> {
        self.fetch_liked(Some(user_id)).await
    }

    async fn fetch_liked(&self, user_id: Option<i64>) -> Result<Vec<LikedRecipe>, DbError> {
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, LikedRecipe>(LIKED_SQL)
                    .bind(user_id)
                    .fetch_all(&mut *conn)
                    .await?;
                Ok::<_, DbError>(rows)
            })
        })
        .await
    }

    /// Recipes liked by every user (relational division).
    pub async fn liked_by_all(&self) -> Result<Vec<RecipeSummary>, DbError> {
        with_connection(self.pool, |conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, RecipeSummary>(
                    r#"
                    SELECT r.recipe_id, r.recipe_name, r.cuisine, c.user_name AS created_by
                    FROM recipes r
                    JOIN users c ON c.user_id = r.user_id
                    WHERE NOT EXISTS (
                        SELECT 1 FROM users u
                        WHERE NOT EXISTS (
                            SELECT 1 FROM recipe_likes l
                            WHERE l.user_id = u.user_id
                              AND l.recipe_id = r.recipe_id
                              AND l.liked
                        )
                    )
                    ORDER BY r.recipe_id
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
