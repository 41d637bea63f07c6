use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;
use crate::state::AppState;

/// The `/api` routes, without middleware.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route("/users/:id", get(handler::get_user).put(handler::update_user))
        .route("/users/:id/followers", get(handler::list_followers))
        .route("/users/:id/following", get(handler::list_following))
        .route("/users/:id/follow", post(handler::toggle_follow))
        .route("/posts", get(handler::list_posts).post(handler::create_post))
        .route("/posts/:id/like", post(handler::toggle_like))
        .route(
            "/posts/:id/comments",
            get(handler::list_comments).post(handler::create_comment),
        )
}

/// Build the full application router: API, middleware, and static client.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let mut app = Router::new().nest("/api", api_routes());

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
