//! Schema creation for the recipe-sharing tables
//!
//! Every statement is idempotent, so running migrations against an
//! already-initialized database is a no-op.

use sqlx::PgPool;

use super::{with_connection, DbError};

/// Default rank tiers: (name, points threshold)
pub const DEFAULT_RANKS: &[(&str, i64)] = &[
    ("Novice", 0),
    ("Home Cook", 100),
    ("Sous Chef", 500),
    ("Head Chef", 1000),
];

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        user_name TEXT NOT NULL UNIQUE,
        points BIGINT NOT NULL DEFAULT 0 CHECK (points >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_ranks (
        rank_name TEXT PRIMARY KEY,
        points BIGINT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cuisine_levels (
        cuisine TEXT PRIMARY KEY,
        level TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recipes (
        recipe_id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
        recipe_name TEXT NOT NULL,
        cuisine TEXT NOT NULL,
        cooking_time INTERVAL NOT NULL,
        user_id BIGINT NOT NULL REFERENCES users(user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recipe_steps (
        recipe_id BIGINT NOT NULL REFERENCES recipes(recipe_id),
        step_number INTEGER NOT NULL CHECK (step_number >= 1),
        instruction TEXT NOT NULL,
        PRIMARY KEY (recipe_id, step_number)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recipe_images (
        recipe_id BIGINT NOT NULL REFERENCES recipes(recipe_id),
        url TEXT NOT NULL,
        caption TEXT,
        PRIMARY KEY (recipe_id, url)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS recipe_likes (
        user_id BIGINT NOT NULL REFERENCES users(user_id),
        recipe_id BIGINT NOT NULL REFERENCES recipes(recipe_id),
        liked BOOLEAN NOT NULL DEFAULT TRUE,
        PRIMARY KEY (user_id, recipe_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pantries (
        pantry_id BIGINT PRIMARY KEY,
        category TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_pantries (
        user_id BIGINT NOT NULL REFERENCES users(user_id),
        pantry_id BIGINT NOT NULL REFERENCES pantries(pantry_id),
        PRIMARY KEY (user_id, pantry_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS locations (
        street TEXT NOT NULL,
        city TEXT NOT NULL,
        province TEXT NOT NULL,
        location_type TEXT NOT NULL,
        PRIMARY KEY (street, city)
    )
    "#,
];

/// Create all tables and seed the rank tiers.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running recipeshare migrations...");

    with_connection(pool, |conn| {
        Box::pin(async move {
            let mut tx = sqlx::Connection::begin(&mut *conn).await?;

            for statement in SCHEMA {
                sqlx::query(*statement).execute(&mut *tx).await?;
            }

            for (name, points) in DEFAULT_RANKS {
                sqlx::query(
                    "INSERT INTO user_ranks (rank_name, points) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(*name)
                .bind(*points)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok::<_, DbError>(())
        })
    })
    .await?;

    tracing::info!(tables = SCHEMA.len(), "migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_thresholds_are_distinct_and_ascending() {
        let points: Vec<i64> = DEFAULT_RANKS.iter().map(|(_, p)| *p).collect();
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(points[0], 0, "every user must fall in some tier");
    }

    #[test]
    fn schema_is_idempotent_ddl() {
        for statement in SCHEMA {
            assert!(statement.contains("IF NOT EXISTS"));
        }
    }
}
