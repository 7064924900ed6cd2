//! User repository
//!
//! A user's rank is the tier with the greatest points threshold not above
//! the user's points. Thresholds are unique, so at most one tier matches;
//! points equal to a threshold select that tier.

use sqlx::postgres::Postgres;
use sqlx::{PgPool, QueryBuilder};

use super::projection::{decode_row, push_projection, JsonRow};
use crate::db::{with_connection, DbError};
use crate::models::{UserColumn, UserName};

/// Build the user statement, optionally restricted to one id.
pub(crate) fn user_statement(
    columns: &[UserColumn],
    id: Option<i64>,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT ");
    push_projection(&mut builder, columns);
    builder.push(
        " FROM users u \
         LEFT JOIN user_ranks rk ON rk.points = ( \
             SELECT MAX(t.points) FROM user_ranks t WHERE t.points <= u.points \
         )",
    );
    if let Some(id) = id {
        builder.push(" WHERE u.user_id = ").push_bind(id);
    }
    builder.push(" ORDER BY u.user_id");
    builder
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// One user with rank.
    pub async fn get(&self, id: i64, columns: &[UserColumn]) -> Result<JsonRow, DbError> {
        let columns = columns.to_vec();
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let row = user_statement(&columns, Some(id))
                    .build()
                    .fetch_optional(&mut *conn)
                    .await?
                    .ok_or_else(|| DbError::not_found("user", id))?;
                Ok::<_, DbError>(decode_row(&row, &columns)?)
            })
        })
        .await
    }

    /// All users with rank, ordered by id.
    pub async fn list(&self, columns: &[UserColumn]) -> Result<Vec<JsonRow>, DbError> {
        let columns = columns.to_vec();
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let rows = user_statement(&columns, None)
                    .build()
                    .fetch_all(&mut *conn)
                    .await?;
                let decoded = rows
                    .iter()
                    .map(|row| decode_row(row, &columns))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, DbError>(decoded)
            })
        })
        .await
    }

    /// Insert a user with zero points, returning the generated id.
    pub async fn create(&self, name: UserName) -> Result<i64, DbError> {
        let id = with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO users (user_name) VALUES ($1) RETURNING user_id",
                )
                .bind(name.as_str())
                .fetch_one(&mut *conn)
                .await?;
                Ok::<_, DbError>(id)
            })
        })
        .await?;

        tracing::info!(user_id = id, "user created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};
    use crate::AppConfig;

    #[test]
    fn single_user_statement_binds_id() {
        let sql = user_statement(UserColumn::DEFAULT, Some(3)).sql().to_owned();
        assert!(sql.contains("WHERE u.user_id = $1"));
        assert!(sql.contains("MAX(t.points)"));
        assert!(sql.contains("t.points <= u.points"));
    }

    #[test]
    fn list_statement_has_no_filter() {
        let sql = user_statement(&[UserColumn::UserName], None).sql().to_owned();
        assert!(sql.starts_with(r#"SELECT u.user_name AS "UserName" FROM users u"#));
        assert!(!sql.contains("WHERE u.user_id"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn rank_boundaries() {
        let config = AppConfig::from_env().expect("config");
        let pool = create_pool(&config.database, &config.pool);
        migrations::run(&pool).await.expect("migrations");

        let repo = UserRepo::new(&pool);
        let tag = std::process::id();
        let cases = [
            (0, "Novice"),
            (99, "Novice"),
            (100, "Home Cook"),
            (999, "Sous Chef"),
            (1000, "Head Chef"),
        ];

        for (points, expected) in cases {
            let id = repo
                .create(UserName::new(&format!("rank-{tag}-{points}")).unwrap())
                .await
                .expect("create");
            sqlx::query("UPDATE users SET points = $1 WHERE user_id = $2")
                .bind(points as i64)
                .bind(id)
                .execute(&pool)
                .await
                .expect("points");

            let row = repo.get(id, UserColumn::DEFAULT).await.expect("get");
            assert_eq!(row["Rank"], expected, "points = {points}");
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_user_is_not_found() {
        let config = AppConfig::from_env().expect("config");
        let pool = create_pool(&config.database, &config.pool);
        migrations::run(&pool).await.expect("migrations");

        let err = UserRepo::new(&pool)
            .get(i64::MAX, UserColumn::DEFAULT)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "user", .. }));
    }
}
