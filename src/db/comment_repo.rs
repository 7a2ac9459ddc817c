use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Comment;

/// Append a comment to a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_text: &str,
    comment_author: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, comment_text, comment_author)
        VALUES ($1, $2, $3)
        RETURNING id, post_id, comment_text, comment_author, created_at
        "#,
    )
    .bind(post_id)
    .bind(comment_text)
    .bind(comment_author)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get all comments for a post, in insertion order
pub async fn get_comments_by_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, comment_text, comment_author, created_at
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Get a single comment, constrained to its post
pub async fn get_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, comment_text, comment_author, created_at
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Replace a comment's text
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    comment_text: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE comments
        SET comment_text = $1
        WHERE id = $2
        "#,
    )
    .bind(comment_text)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a comment from its post
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(())
}
