//! 路由配置

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::app::users::handler::{self, AppState};
use crate::core::middleware::log_requests;

/// 构建应用路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::api_info))
        .route(
            "/users",
            get(handler::list_users).post(handler::create_user),
        )
        .route(
            "/users/{id}",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        )
        .fallback(handler::endpoint_not_found)
        .method_not_allowed_fallback(handler::method_not_allowed)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
