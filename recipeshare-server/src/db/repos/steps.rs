//! Step repository
//!
//! Steps are numbered from 1 within a recipe. New steps are appended
//! after the current last step inside one transaction, with the recipe
//! row locked, so numbering stays contiguous under concurrent requests.

use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::db::{with_connection, DbError};
use crate::models::StepList;

/// Step record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Step {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i64,
    #[serde(rename = "StepNumber")]
    pub step_number: i32,
    #[serde(rename = "Instruction")]
    pub instruction: String,
}

/// Insert one step row on an open connection or transaction.
pub async fn insert_step(
    conn: &mut PgConnection,
    step_number: i32,
    instruction: &str,
    recipe_id: i64,
) -> Result<Step, DbError> {
    let step = sqlx::query_as::<_, Step>(
        r#"
        INSERT INTO recipe_steps (recipe_id, step_number, instruction)
        VALUES ($1, $2, $3)
        RETURNING recipe_id, step_number, instruction
        "#,
    )
    .bind(recipe_id)
    .bind(step_number)
    .bind(instruction)
    .fetch_one(conn)
    .await?;
    Ok(step)
}

/// Step repository
pub struct StepRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> StepRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Steps of one recipe, in step order.
    pub async fn list(&self, recipe_id: i64) -> Result<Vec<Step>, DbError> {
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let steps = sqlx::query_as::<_, Step>(
                    r#"
                    SELECT recipe_id, step_number, instruction
                    FROM recipe_steps
                    WHERE recipe_id = $1
                    ORDER BY step_number
                    "#,
                )
                .bind(recipe_id)
                .fetch_all(&mut *conn)
                .await?;
                Ok::<_, DbError>(steps)
            })
        })
        .await
    }

    /// Append `steps` to a recipe atomically.
    ///
    /// Either every step is inserted or none is. A missing recipe is
    /// `DbError::NotFound`.
    pub async fn insert_all(&self, recipe_id: i64, steps: &StepList) -> Result<Vec<Step>, DbError> {
        let instructions: Vec<String> = steps.iter().map(|s| s.as_str().to_owned()).collect();

        let inserted = with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let mut tx = sqlx::Connection::begin(&mut *conn).await?;

                // Lock the recipe so concurrent appends serialize on it
                let exists: Option<i64> = sqlx::query_scalar(
                    "SELECT recipe_id FROM recipes WHERE recipe_id = $1 FOR UPDATE",
                )
                .bind(recipe_id)
                .fetch_optional(&mut *tx)
                .await?;

                if exists.is_none() {
                    return Err(DbError::not_found("recipe", recipe_id));
                }

                let last: i32 = sqlx::query_scalar(
                    "SELECT COALESCE(MAX(step_number), 0) FROM recipe_steps WHERE recipe_id = $1",
                )
                .bind(recipe_id)
                .fetch_one(&mut *tx)
                .await?;

                let mut inserted = Vec::with_capacity(instructions.len());
                for (offset, instruction) in (1..).zip(&instructions) {
                    let step = insert_step(&mut tx, last + offset, instruction, recipe_id).await?;
                    inserted.push(step);
                }

                tx.commit().await?;
                Ok::<_, DbError>(inserted)
            })
        })
        .await?;

        tracing::info!(recipe_id, count = inserted.len(), "steps inserted");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, RecipeRepo, UserRepo};
    use crate::models::{NewRecipe, UserName};
    use crate::AppConfig;

    #[test]
    fn step_serializes_with_public_names() {
        let step = Step {
            recipe_id: 1,
            step_number: 2,
            instruction: "Stir".into(),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"RecipeID": 1, "StepNumber": 2, "Instruction": "Stir"})
        );
    }

    // Integration tests - run with DB_* variables set
    // cargo test -p recipeshare-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn steps_round_trip_in_order() {
        let config = AppConfig::from_env().expect("config");
        let pool = create_pool(&config.database, &config.pool);
        migrations::run(&pool).await.expect("migrations");

        let user = UserRepo::new(&pool)
            .create(UserName::new(&format!("steps-{}", std::process::id())).unwrap())
            .await
            .expect("user");
        let recipe = RecipeRepo::new(&pool)
            .create(NewRecipe::new("Toast", "British", "00:05:00", user).unwrap())
            .await
            .expect("recipe");

        let repo = StepRepo::new(&pool);
        repo.insert_all(recipe, &StepList::new(&["A", "B", "C"]).unwrap())
            .await
            .expect("insert");

        let steps = repo.list(recipe).await.expect("list");
        let numbers: Vec<i32> = steps.iter().map(|s| s.step_number).collect();
        let texts: Vec<&str> = steps.iter().map(|s| s.instruction.as_str()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(texts, vec!["A", "B", "C"]);

        // Appending continues the numbering
        repo.insert_all(recipe, &StepList::new(&["D"]).unwrap())
            .await
            .expect("append");
        let steps = repo.list(recipe).await.expect("list");
        assert_eq!(steps.last().map(|s| s.step_number), Some(4));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_recipe_inserts_nothing() {
        let config = AppConfig::from_env().expect("config");
        let pool = create_pool(&config.database, &config.pool);
        migrations::run(&pool).await.expect("migrations");

        let repo = StepRepo::new(&pool);
        let err = repo
            .insert_all(i64::MAX, &StepList::new(&["A"]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert!(repo.list(i64::MAX).await.expect("list").is_empty());
    }
}
