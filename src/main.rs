use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpRequest, HttpServer};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::prelude::*;

use hobbyhub::config::JwtConfig;
use hobbyhub::schema::{build_schema, AppSchema};
use hobbyhub::security::{decode_token, Identity};
use hobbyhub::{AppState, Config};

/// Decode the caller's identity from the Authorization header, if any.
///
/// A missing or invalid token yields an anonymous request; registration and
/// login must run unauthenticated, so rejection happens per-resolver, not at
/// the transport.
fn identity_from_request(req: &HttpRequest, jwt: &JwtConfig) -> Option<Identity> {
    let auth_header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;

    match decode_token(token, &jwt.secret) {
        Ok(claims) => Some(claims.into()),
        Err(_) => {
            tracing::debug!("request carried an invalid or expired token");
            None
        }
    }
}

async fn graphql_handler(
    schema: web::Data<AppSchema>,
    jwt: web::Data<JwtConfig>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(identity) = identity_from_request(&http_req, jwt.get_ref()) {
        request = request.data(identity);
    }
    schema.execute(request).await.into()
}

async fn health_handler() -> &'static str {
    "ok"
}

/// SDL endpoint for schema introspection and client code generation.
async fn schema_handler(schema: web::Data<AppSchema>) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/plain")
        .body(schema.sdl())
}

async fn playground_handler() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/html")
        .body(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Hobbyhub GraphiQL</title>
    <link rel="stylesheet" href="https://unpkg.com/graphiql/graphiql.min.css" />
</head>
<body style="margin: 0;">
    <div id="graphiql" style="height: 100vh;"></div>
    <script crossorigin src="https://unpkg.com/react/umd/react.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/react-dom/umd/react-dom.production.min.js"></script>
    <script crossorigin src="https://unpkg.com/graphiql/graphiql.min.js"></script>
    <script>
        ReactDOM.render(
            React.createElement(GraphiQL, { fetcher: GraphiQL.createFetcher({ url: '/graphql' }) }),
            document.getElementById('graphiql'),
        );
    </script>
</body>
</html>"#,
        )
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hobbyhub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hobbyhub service...");

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    let state = AppState {
        pool,
        jwt: config.jwt.clone(),
    };
    let schema = build_schema(state);

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    info!("GraphQL API listening on http://{}/graphql", bind_addr);

    let jwt = config.jwt.clone();
    let allowed_origins: Vec<String> = config
        .cors
        .allowed_origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(jwt.clone()))
            .route("/graphql", web::post().to(graphql_handler))
            .route("/graphql/schema", web::get().to(schema_handler))
            .route("/playground", web::get().to(playground_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
