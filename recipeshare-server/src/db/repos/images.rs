//! Recipe image repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::{with_connection, DbError};

/// Image record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Image {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i64,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Caption")]
    pub caption: Option<String>,
}

/// Image repository
pub struct ImageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ImageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Images of one recipe ordered by URL, optionally only uncaptioned ones.
    pub async fn list(&self, recipe_id: i64, captionless: bool) -> Result<Vec<Image>, DbError> {
        with_connection(self.pool, move |conn| {
            Box::pin(async move {
                let images = sqlx::query_as::<_, Image>(
                    r#"
                    SELECT recipe_id, url, caption
                    FROM recipe_images
                    WHERE recipe_id = $1
                      AND (NOT $2 OR caption IS NULL)
                    ORDER BY url
                    "#,
                )
                .bind(recipe_id)
                .bind(captionless)
                .fetch_all(&mut *conn)
                .await?;
                Ok::<_, DbError>(images)
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations, RecipeRepo, UserRepo};
    use crate::models::{NewRecipe, UserName};
    use crate::AppConfig;

    #[test]
    fn missing_caption_serializes_as_null() {
        let image = Image {
            recipe_id: 4,
            url: "https://img.example/1.jpg".into(),
            caption: None,
        };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["URL"], "https://img.example/1.jpg");
        assert!(json["Caption"].is_null());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn captionless_keeps_only_uncaptioned() {
        let config = AppConfig::from_env().expect("config");
        let pool = create_pool(&config.database, &config.pool);
        migrations::run(&pool).await.expect("migrations");

        let user = UserRepo::new(&pool)
            .create(UserName::new(&format!("photographer-{}", std::process::id())).unwrap())
            .await
            .expect("user");
        let recipe = RecipeRepo::new(&pool)
            .create(NewRecipe::new("Tacos", "Mexican", "00:20:00", user).unwrap())
            .await
            .expect("recipe");

        for (url, caption) in [("b.jpg", Some("plated")), ("a.jpg", None)] {
            sqlx::query("INSERT INTO recipe_images (recipe_id, url, caption) VALUES ($1, $2, $3)")
                .bind(recipe)
                .bind(url)
                .bind(caption)
                .execute(&pool)
                .await
                .expect("image");
        }

        let repo = ImageRepo::new(&pool);
        let all = repo.list(recipe, false).await.expect("all");
        let urls: Vec<&str> = all.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["a.jpg", "b.jpg"]);

        let bare = repo.list(recipe, true).await.expect("captionless");
        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].url, "a.jpg");
        assert!(bare[0].caption.is_none());
    }
}
