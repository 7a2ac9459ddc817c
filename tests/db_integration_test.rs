//! End-to-end tests against a live Postgres.
//!
//! Ignored by default; run with a scratch database:
//!
//! ```text
//! DATABASE_URL=postgresql://localhost/hobbyhub_test cargo test -- --ignored
//! ```

use std::time::Duration;

use async_graphql::Request;
use chrono::DateTime;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use hobbyhub::config::JwtConfig;
use hobbyhub::schema::{build_schema, AppSchema};
use hobbyhub::security::Identity;
use hobbyhub::AppState;

async fn test_schema() -> AppSchema {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a scratch database");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    build_schema(AppState {
        pool,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            expiry_secs: 3600,
        },
    })
}

async fn exec(schema: &AppSchema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    serde_json::to_value(&response).expect("response serializes")
}

async fn exec_as(schema: &AppSchema, identity: &Identity, query: &str) -> serde_json::Value {
    let response = schema
        .execute(Request::new(query).data(identity.clone()))
        .await;
    serde_json::to_value(&response).expect("response serializes")
}

fn first_error_code(response: &serde_json::Value) -> String {
    response["errors"][0]["extensions"]["code"]
        .as_str()
        .unwrap_or_else(|| panic!("expected an error in {}", response))
        .to_string()
}

/// Register a fresh user and return the caller identity the token would carry.
async fn register(schema: &AppSchema) -> Identity {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("u_{}", &suffix[..12]);
    let email = format!("{}@example.com", username);

    let query = format!(
        r#"mutation {{ addUser(username: "{username}", email: "{email}", password: "password01234") {{ token user {{ _id username email }} }} }}"#
    );
    let response = exec(schema, &query).await;
    let user = &response["data"]["addUser"]["user"];

    Identity {
        id: Uuid::parse_str(user["_id"].as_str().expect("user _id")).expect("uuid id"),
        username: user["username"].as_str().expect("username").to_string(),
        email: user["email"].as_str().expect("email").to_string(),
    }
}

async fn create_post(schema: &AppSchema, author: &Identity, desc: &str) -> String {
    let query = format!(
        r#"mutation {{ addPost(postTitle: "A post", postDesc: "{desc}") {{ _id }} }}"#
    );
    let response = exec_as(schema, author, &query).await;
    response["data"]["addPost"]["_id"]
        .as_str()
        .unwrap_or_else(|| panic!("addPost failed: {}", response))
        .to_string()
}

async fn post_likes(schema: &AppSchema, post_id: &str) -> i64 {
    let query = format!(r#"{{ post(postId: "{post_id}") {{ likes }} }}"#);
    exec(schema, &query).await["data"]["post"]["likes"]
        .as_i64()
        .expect("likes")
}

#[tokio::test]
#[ignore]
async fn posts_query_returns_newest_first() {
    let schema = test_schema().await;
    let author = register(&schema).await;

    for i in 0..3 {
        create_post(&schema, &author, &format!("post number {} body text", i)).await;
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let query = format!(
        r#"{{ posts(username: "{}") {{ createdAt }} }}"#,
        author.username
    );
    let response = exec(&schema, &query).await;
    let posts = response["data"]["posts"].as_array().expect("posts array");
    assert_eq!(posts.len(), 3);

    let timestamps: Vec<_> = posts
        .iter()
        .map(|p| {
            DateTime::parse_from_rfc3339(p["createdAt"].as_str().expect("createdAt"))
                .expect("rfc3339 timestamp")
        })
        .collect();

    for pair in timestamps.windows(2) {
        assert!(pair[0] > pair[1], "posts not in descending creation order");
    }
}

#[tokio::test]
#[ignore]
async fn self_like_never_mutates_and_others_increment_by_one() {
    let schema = test_schema().await;
    let author = register(&schema).await;
    let liker = register(&schema).await;

    let post_id = create_post(&schema, &author, "a likeable post body").await;

    // Author cannot like their own post, repeatedly or otherwise.
    for _ in 0..2 {
        let query = format!(r#"mutation {{ likePost(postId: "{post_id}") {{ likes }} }}"#);
        let response = exec_as(&schema, &author, &query).await;
        assert_eq!(
            response["errors"][0]["message"],
            "You can't like your own post!"
        );
    }
    assert_eq!(post_likes(&schema, &post_id).await, 0);

    // Any other authenticated user increments by exactly 1.
    let query = format!(r#"mutation {{ likePost(postId: "{post_id}") {{ likes }} }}"#);
    let response = exec_as(&schema, &liker, &query).await;
    assert_eq!(response["data"]["likePost"]["likes"], 1);
    assert_eq!(post_likes(&schema, &post_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn add_comment_round_trips_through_single_post_query() {
    let schema = test_schema().await;
    let author = register(&schema).await;
    let commenter = register(&schema).await;

    let post_id = create_post(&schema, &author, "a post worth commenting on").await;

    let query = format!(
        r#"mutation {{ addComment(postId: "{post_id}", commentText: "nice hobby!") {{ _id }} }}"#
    );
    let response = exec_as(&schema, &commenter, &query).await;
    assert!(response["errors"].is_null(), "addComment failed: {}", response);

    let query = format!(
        r#"{{ post(postId: "{post_id}") {{ comments {{ commentText commentAuthor }} }} }}"#
    );
    let response = exec(&schema, &query).await;
    let comments = response["data"]["post"]["comments"]
        .as_array()
        .expect("comments array");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["commentText"], "nice hobby!");
    assert_eq!(comments[0]["commentAuthor"], commenter.username.as_str());
}

#[tokio::test]
#[ignore]
async fn remove_post_is_owner_only() {
    let schema = test_schema().await;
    let author = register(&schema).await;
    let intruder = register(&schema).await;

    let post_id = create_post(&schema, &author, "a post someone else wants gone").await;

    let remove = format!(r#"mutation {{ removePost(postId: "{post_id}") {{ _id }} }}"#);

    let response = exec_as(&schema, &intruder, &remove).await;
    assert_eq!(first_error_code(&response), "FORBIDDEN");

    // Store unchanged
    let query = format!(r#"{{ post(postId: "{post_id}") {{ _id }} }}"#);
    assert!(!exec(&schema, &query).await["data"]["post"].is_null());

    // The author can delete, and the deleted document comes back.
    let response = exec_as(&schema, &author, &remove).await;
    assert_eq!(response["data"]["removePost"]["_id"], post_id.as_str());

    let response = exec(&schema, &query).await;
    assert!(response["data"]["post"].is_null());

    // Deleting again is a clean not-found, not a crash on a missing row.
    let response = exec_as(&schema, &author, &remove).await;
    assert_eq!(first_error_code(&response), "NOT_FOUND");
}

#[tokio::test]
#[ignore]
async fn comment_mutations_are_owner_only() {
    let schema = test_schema().await;
    let author = register(&schema).await;
    let commenter = register(&schema).await;

    let post_id = create_post(&schema, &author, "a post with a guarded comment").await;

    let query = format!(
        r#"mutation {{ addComment(postId: "{post_id}", commentText: "original text") {{ comments {{ _id }} }} }}"#
    );
    let response = exec_as(&schema, &commenter, &query).await;
    let comment_id = response["data"]["addComment"]["comments"][0]["_id"]
        .as_str()
        .expect("comment id")
        .to_string();

    // The post's author does not own the comment.
    let update = format!(
        r#"mutation {{ updateComment(postId: "{post_id}", commentId: "{comment_id}", commentText: "hijacked") {{ _id }} }}"#
    );
    let response = exec_as(&schema, &author, &update).await;
    assert_eq!(first_error_code(&response), "FORBIDDEN");

    let remove = format!(
        r#"mutation {{ removeComment(postId: "{post_id}", commentId: "{comment_id}") {{ _id }} }}"#
    );
    let response = exec_as(&schema, &author, &remove).await;
    assert_eq!(first_error_code(&response), "FORBIDDEN");

    // Unchanged after both denials.
    let query = format!(r#"{{ post(postId: "{post_id}") {{ comments {{ commentText }} }} }}"#);
    let response = exec(&schema, &query).await;
    assert_eq!(response["data"]["post"]["comments"][0]["commentText"], "original text");

    // The comment's author may edit and remove it.
    let update = format!(
        r#"mutation {{ updateComment(postId: "{post_id}", commentId: "{comment_id}", commentText: "edited text") {{ comments {{ commentText }} }} }}"#
    );
    let response = exec_as(&schema, &commenter, &update).await;
    assert_eq!(
        response["data"]["updateComment"]["comments"][0]["commentText"],
        "edited text"
    );

    let response = exec_as(&schema, &commenter, &remove).await;
    assert!(response["errors"].is_null());

    let response = exec(&schema, &query).await;
    assert_eq!(response["data"]["post"]["comments"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn edit_post_is_owner_only() {
    // Editing was historically open to any authenticated caller; ownership
    // is enforced here.
    let schema = test_schema().await;
    let author = register(&schema).await;
    let intruder = register(&schema).await;

    let post_id = create_post(&schema, &author, "the original description").await;

    let edit = |desc: &str| {
        format!(r#"mutation {{ editPost(postId: "{post_id}", postDesc: "{desc}") {{ postDesc }} }}"#)
    };

    let response = exec_as(&schema, &intruder, &edit("an overwritten description")).await;
    assert_eq!(first_error_code(&response), "FORBIDDEN");

    let query = format!(r#"{{ post(postId: "{post_id}") {{ postDesc }} }}"#);
    let response = exec(&schema, &query).await;
    assert_eq!(response["data"]["post"]["postDesc"], "the original description");

    let response = exec_as(&schema, &author, &edit("the amended description")).await;
    assert_eq!(response["data"]["editPost"]["postDesc"], "the amended description");
}

#[tokio::test]
#[ignore]
async fn update_post_returns_post_unchanged() {
    let schema = test_schema().await;
    let author = register(&schema).await;
    let intruder = register(&schema).await;

    let post_id = create_post(&schema, &author, "an immutable update target").await;

    let query = format!(r#"mutation {{ updatePost(postId: "{post_id}") {{ postDesc likes }} }}"#);

    let response = exec_as(&schema, &intruder, &query).await;
    assert_eq!(first_error_code(&response), "FORBIDDEN");

    let response = exec_as(&schema, &author, &query).await;
    assert_eq!(response["data"]["updatePost"]["postDesc"], "an immutable update target");
    assert_eq!(response["data"]["updatePost"]["likes"], 0);
}

#[tokio::test]
#[ignore]
async fn update_password_requires_matching_email() {
    let schema = test_schema().await;
    let user = register(&schema).await;

    let wrong = format!(
        r#"mutation {{ updatePassword(userId: "{}", email: "someone-else@example.com", password: "newSecret1") {{ _id }} }}"#,
        user.id
    );
    let response = exec_as(&schema, &user, &wrong).await;
    assert_eq!(first_error_code(&response), "NOT_FOUND");

    // Old password still valid after the failed attempt.
    let login = format!(
        r#"mutation {{ login(email: "{}", password: "password01234") {{ token }} }}"#,
        user.email
    );
    let response = exec(&schema, &login).await;
    assert!(response["data"]["login"]["token"].is_string());

    let right = format!(
        r#"mutation {{ updatePassword(userId: "{}", email: "{}", password: "newSecret1") {{ _id }} }}"#,
        user.id, user.email
    );
    let response = exec_as(&schema, &user, &right).await;
    assert!(response["errors"].is_null(), "updatePassword failed: {}", response);

    let login = format!(
        r#"mutation {{ login(email: "{}", password: "newSecret1") {{ token }} }}"#,
        user.email
    );
    let response = exec(&schema, &login).await;
    assert!(response["data"]["login"]["token"].is_string());
}

#[tokio::test]
#[ignore]
async fn login_rejects_wrong_password_and_unknown_email() {
    let schema = test_schema().await;
    let user = register(&schema).await;

    let query = format!(
        r#"mutation {{ login(email: "{}", password: "wrong-password") {{ token }} }}"#,
        user.email
    );
    let response = exec(&schema, &query).await;
    assert_eq!(response["errors"][0]["message"], "Could not authenticate user.");

    let query = r#"mutation { login(email: "nobody@example.com", password: "whatever1") { token } }"#;
    let response = exec(&schema, query).await;
    assert_eq!(response["errors"][0]["message"], "Could not authenticate user.");
}
