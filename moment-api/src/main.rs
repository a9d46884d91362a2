use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use moment_api::config::AppConfig;
use moment_api::{routes, AppState};
use moment_shared::clients::db::create_pool;
use moment_shared::clients::images::ImageStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    moment_shared::middleware::init_tracing("moment-api");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url);
    let images = ImageStore::new(&config.image_root);

    let state = Arc::new(AppState { db, config, images });

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/registry", post(routes::register::register))
        .route("/api/login", post(routes::login::login))
        .route("/api/user", get(routes::me::get_user))
        .route("/api/users/search", get(routes::search::search_users))
        .route("/api/users/:user_id/status", put(routes::status::update_status))
        .route("/api/posts", post(routes::posts::create_post))
        .route("/api/users/:user_id/post", get(routes::posts::get_today_post))
        .route("/api/friends", post(routes::friends::add_friend))
        .route("/api/friends/:user_id", get(routes::friends::get_mutual_friends))
        .route("/api/friends/:user_id/posts", get(routes::posts::get_friends_posts))
        .route("/api/comments", post(routes::comments::add_comment))
        .route("/api/posts/:post_id/comments", get(routes::comments::get_post_comments))
        .route("/api/likes", post(routes::likes::like_post))
        .route("/api/likes/:post_id/:user_id", delete(routes::likes::unlike_post))
        .route("/api/posts/:post_id/likes/count", get(routes::likes::get_likes_count))
        .route("/api/upload/:user_id", post(routes::images::upload_image)
            .layer(DefaultBodyLimit::max(10 * 1024 * 1024)))
        .route("/images/*path", get(routes::images::get_image))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "moment-api starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
