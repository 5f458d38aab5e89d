use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

use super::views;

pub const STATIC_PREFIX: &str = "/static";

pub fn router(state: Arc<AppState>) -> Router {
    let public_dir = state.config.assets.resolve_public_dir();
    Router::new()
        .merge(views::router())
        .nest_service(STATIC_PREFIX, ServeDir::new(public_dir))
        .with_state(state)
}
