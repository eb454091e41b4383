use crate::handlers;
use crate::state::AppState;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

pub fn router(state: AppState) -> Router {
    // Any origin may call the API; pre-flights echo whatever headers were
    // requested.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_action))
        .route("/user", post(handlers::create_user))
        .route("/user/:id", get(handlers::get_user))
        .layer(cors)
        .with_state(state)
}
