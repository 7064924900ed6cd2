//! Recipe repository
//!
//! - list: allow-listed projection, optional images join, bound filters
//! - create: INSERT ... RETURNING the generated id
//! - delete: cascades likes, images and steps in one transaction

use sqlx::postgres::Postgres;
use sqlx::{PgPool, QueryBuilder};

use super::projection::{decode_row, push_projection, JsonRow};
use crate::db::{with_connection, DbError};
use crate::models::{NewRecipe, RecipeQuery, RecipeUpdate};

/// Build the list statement for `query`.
///
/// Only allow-listed expressions reach the SQL text; the id and cuisine
/// filters are bound parameters.
pub(crate) fn list_statement(query: &RecipeQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    push_projection(&mut builder, &query.columns);
    builder.push(
        " FROM recipes r \
         JOIN users u ON u.user_id = r.user_id \
         LEFT JOIN cuisine_levels cl ON cl.cuisine = r.cuisine",
    );

    if query.captionless {
        builder.push(" JOIN recipe_images i ON i.recipe_id = r.recipe_id");
    } else if query.include_images {
        builder.push(" LEFT JOIN recipe_images i ON i.recipe_id = r.recipe_id");
    }

    let mut has_where = false;
    let mut and_where = |builder: &mut QueryBuilder<'static, Postgres>| {
        builder.push(if has_where { " AND " } else { " WHERE " });
        has_where = true;
    };

    if let Some(id) = query.id {
        and_where(&mut builder);
        builder.push("r.recipe_id = ").push_bind(id);
    }
    if let Some(cuisine) = &query.cuisine {
        and_where(&mut builder);
        builder.push("r.cuisine = ").push_bind(cuisine.as_str().to_owned());
    }
    if query.captionless {
        and_where(&mut builder);
        builder.push("i.caption IS NULL");
    }

    builder.push(" ORDER BY r.recipe_id");
    if query.include_images {
        builder.push(", i.url");
    }
    builder
}

/// Recipe repository
pub struct RecipeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RecipeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List recipes ordered by id. No match is an empty `Vec`.
    pub async fn list(&self, query: &RecipeQuery) -> Result<Vec<JsonRow>, DbError> {
        let query = query.clone();
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let rows = list_statement(&query)
                    .build()
                    .fetch_all(&mut *conn)
                    .await?;
                let decoded = rows
                    .iter()
                    .map(|row| decode_row(row, &query.columns))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, DbError>(decoded)
            })
        })
        .await
    }

    /// All default columns of one recipe, including the creator's name.
    pub async fn get(&self, id: i64) -> Result<Vec<JsonRow>, DbError> {
        self.list(&RecipeQuery::by_id(id)).await
    }

    /// Insert a recipe, returning the generated id.
    pub async fn create(&self, recipe: NewRecipe) -> Result<i64, DbError> {
        let id = with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO recipes (recipe_name, cuisine, cooking_time, user_id)
                    VALUES ($1, $2, $3::interval, $4)
                    RETURNING recipe_id
                    "#,
                )
                .bind(recipe.name.as_str())
                .bind(recipe.cuisine.as_str())
                .bind(recipe.cooking_time.to_string())
                .bind(recipe.user_id)
                .fetch_one(&mut *conn)
                .await?;
                Ok::<_, DbError>(id)
            })
        })
        .await?;

        tracing::info!(recipe_id = id, "recipe created");
        Ok(id)
    }

    /// Apply a partial update. Returns affected rows (0 when absent).
    pub async fn update(&self, id: i64, update: RecipeUpdate) -> Result<u64, DbError> {
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let result = sqlx::query(
                    r#"
                    UPDATE recipes SET
                        recipe_name = COALESCE($1, recipe_name),
                        cuisine = COALESCE($2, cuisine),
                        cooking_time = COALESCE($3::interval, cooking_time)
                    WHERE recipe_id = $4
                    "#,
                )
                .bind(update.name.as_ref().map(|n| n.as_str().to_owned()))
                .bind(update.cuisine.as_ref().map(|c| c.as_str().to_owned()))
                .bind(update.cooking_time.map(|t| t.to_string()))
                .bind(id)
                .execute(&mut *conn)
                .await?;
                Ok::<_, DbError>(result.rows_affected())
            })
        })
        .await
    }

    /// Delete a recipe with its likes, images and steps (atomic).
    ///
    /// Returns the number of recipe rows removed: 1, or 0 if the recipe
    /// did not exist (including a repeated delete).
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let deleted = with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let mut tx = sqlx::Connection::begin(&mut *conn).await?;

                for statement in [
                    "DELETE FROM recipe_likes WHERE recipe_id = $1",
                    "DELETE FROM recipe_images WHERE recipe_id = $1",
                    "DELETE FROM recipe_steps WHERE recipe_id = $1",
                ] {
                    sqlx::query(statement).bind(id).execute(&mut *tx).await?;
                }

                let result = sqlx::query("DELETE FROM recipes WHERE recipe_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                tx.commit().await?;
                Ok::<_, DbError>(result.rows_affected())
            })
        })
        .await?;

        if deleted > 0 {
            tracing::info!(recipe_id = id, "recipe deleted");
        }
        Ok(deleted)
    }
}
