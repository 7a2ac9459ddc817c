use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Category;

/// Get all categories
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
        FROM categories
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Get a single category by ID
pub async fn find_by_id(pool: &PgPool, category_id: Uuid) -> Result<Option<Category>, sqlx::Error> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
        FROM categories
        WHERE id = $1
        "#,
    )
    .bind(category_id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}
