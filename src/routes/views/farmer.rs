use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use serde::Deserialize;

use super::{Page, redirect_with_error, render_page};
use crate::{
    auth::{FarmerRole, Flash, Role, RoleGuard},
    db::entities::{farmer, produce},
    error::AppError,
    routes::forms::ProduceForm,
    services::ServiceContext,
    state::AppState,
};

pub const ADD_PRODUCE_PATH: &str = "/farmer/add-produce";
pub const VIEW_PRODUCE_PATH: &str = "/farmer/view-produce";

const PRODUCE_ADDED: &str = "Produce added successfully";

#[derive(Template)]
#[template(path = "farmer/add_produce.html")]
struct AddProduceTemplate {
    page: Page,
    today: String,
}

#[derive(Template)]
#[template(path = "farmer/view_produce.html")]
struct ViewProduceTemplate {
    page: Page,
    profile: farmer::Model,
    produce: Vec<produce::Model>,
    page_no: u64,
    has_next: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProduceListQuery {
    page: Option<u64>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(ADD_PRODUCE_PATH, get(add_produce_form).post(add_produce))
        .route(VIEW_PRODUCE_PATH, get(view_produce))
}

async fn add_produce_form(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<FarmerRole>,
) -> Result<Response, AppError> {
    let today = chrono::Local::now().date_naive().to_string();
    render_page(&state, guard.session, |page| AddProduceTemplate { page, today })
}

async fn add_produce(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<FarmerRole>,
    Form(form): Form<ProduceForm>,
) -> Result<Response, AppError> {
    let new_produce = match form.into_new_produce() {
        Ok(new_produce) => new_produce,
        Err(err) => return redirect_with_error(&state, guard.session, err, ADD_PRODUCE_PATH),
    };

    match ServiceContext::from_state(&state)
        .farmer()
        .add_produce(&guard.user_id, new_produce)
        .await
    {
        Ok(_) => state.sessions.redirect(
            &guard.session.with_flash(Flash::success(PRODUCE_ADDED)),
            VIEW_PRODUCE_PATH,
        ),
        // Without a profile there is nothing to attach the produce to.
        Err(err @ AppError::NotFound(_)) => {
            tracing::warn!(user_id = %guard.user_id, "produce rejected: no farmer profile");
            redirect_with_error(&state, guard.session, err, Role::Farmer.dashboard_path())
        }
        Err(err) => redirect_with_error(&state, guard.session, err, ADD_PRODUCE_PATH),
    }
}

async fn view_produce(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<FarmerRole>,
    Query(query): Query<ProduceListQuery>,
) -> Result<Response, AppError> {
    let page_no = query.page.unwrap_or(1);
    match ServiceContext::from_state(&state)
        .farmer()
        .list_produce(&guard.user_id, page_no)
        .await
    {
        Ok((profile, listing)) => render_page(&state, guard.session, |page| {
            ViewProduceTemplate {
                page,
                profile,
                produce: listing.data,
                page_no: listing.page,
                has_next: listing.has_next,
            }
        }),
        Err(err) => {
            redirect_with_error(&state, guard.session, err, Role::Farmer.dashboard_path())
        }
    }
}
