use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Post;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    post_title: &str,
    post_desc: &str,
    post_author: &str,
    category_id: Option<Uuid>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (post_title, post_desc, post_author, category_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, post_title, post_desc, post_author, category_id, likes, created_at
        "#,
    )
    .bind(post_title)
    .bind(post_desc)
    .bind(post_author)
    .bind(category_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Get a single post by ID
pub async fn get_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, post_title, post_desc, post_author, category_id, likes, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List all posts, newest first
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, post_title, post_desc, post_author, category_id, likes, created_at
        FROM posts
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List posts by one author, newest first
pub async fn list_posts_by_author(
    pool: &PgPool,
    post_author: &str,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, post_title, post_desc, post_author, category_id, likes, created_at
        FROM posts
        WHERE post_author = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(post_author)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Delete a post, returning the deleted row. Comments cascade inside the
/// same statement's transaction.
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        DELETE FROM posts
        WHERE id = $1
        RETURNING id, post_title, post_desc, post_author, category_id, likes, created_at
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Overwrite a post's description
pub async fn update_desc(
    pool: &PgPool,
    post_id: Uuid,
    post_desc: &str,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET post_desc = $1
        WHERE id = $2
        RETURNING id, post_title, post_desc, post_author, category_id, likes, created_at
        "#,
    )
    .bind(post_desc)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Increment the like counter by one. Atomic at the row level; the counter
/// never decrements.
pub async fn increment_likes(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes = likes + 1
        WHERE id = $1
        RETURNING id, post_title, post_desc, post_author, category_id, likes, created_at
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}
