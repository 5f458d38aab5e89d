use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, response::Response, routing::get};

use super::{Page, render_page};
use crate::{auth::Session, error::AppError, state::AppState};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    page: Page,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<Arc<AppState>>, session: Session) -> Result<Response, AppError> {
    render_page(&state, session, |page| IndexTemplate { page })
}
