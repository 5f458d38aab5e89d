use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, response::Response, routing::get};
use uuid::Uuid;

use super::{Page, render_page};
use crate::{
    auth::{
        FarmerRole, Flash, LogisticsOperatorRole, RetailerRole, Role, RoleGuard, Session,
        WarehouseManagerRole, guards::LOGIN_PATH,
    },
    db::entities::{farmer, user},
    error::AppError,
    services::ServiceContext,
    state::AppState,
};

const ACCOUNT_GONE: &str = "Your account could not be found. Please log in again.";

#[derive(Template)]
#[template(path = "farmer/dashboard.html")]
struct FarmerDashboard {
    page: Page,
    name: String,
    profile: Option<farmer::Model>,
    produce_count: u64,
}

#[derive(Template)]
#[template(path = "retailer/dashboard.html")]
struct RetailerDashboard {
    page: Page,
    name: String,
}

#[derive(Template)]
#[template(path = "warehouse/dashboard.html")]
struct WarehouseDashboard {
    page: Page,
    name: String,
}

#[derive(Template)]
#[template(path = "logistics/dashboard.html")]
struct LogisticsDashboard {
    page: Page,
    name: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(Role::Farmer.dashboard_path(), get(farmer_dashboard))
        .route(Role::Retailer.dashboard_path(), get(retailer_dashboard))
        .route(
            Role::WarehouseManager.dashboard_path(),
            get(warehouse_dashboard),
        )
        .route(
            Role::LogisticsOperator.dashboard_path(),
            get(logistics_dashboard),
        )
}

/// Outcome of resolving the signed-in user behind a guarded request.
pub(crate) enum CurrentUser {
    Found(user::Model),
    /// The session points at a deleted account; the response clears it.
    Gone(Response),
}

pub(crate) async fn current_user(
    state: &AppState,
    user_id: &Uuid,
) -> Result<CurrentUser, AppError> {
    match ServiceContext::from_state(state)
        .account()
        .find_user(user_id)
        .await?
    {
        Some(user) => Ok(CurrentUser::Found(user)),
        None => {
            tracing::warn!(%user_id, "session refers to a missing user");
            let session = Session::default().with_flash(Flash::error(ACCOUNT_GONE));
            Ok(CurrentUser::Gone(state.sessions.redirect(&session, LOGIN_PATH)?))
        }
    }
}

async fn farmer_dashboard(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<FarmerRole>,
) -> Result<Response, AppError> {
    let user = match current_user(&state, &guard.user_id).await? {
        CurrentUser::Found(user) => user,
        CurrentUser::Gone(response) => return Ok(response),
    };

    let farmers = ServiceContext::from_state(&state).farmer();
    let profile = farmers.profile_for_user(&user.id).await?;
    let produce_count = match profile.as_ref() {
        Some(profile) => farmers.produce_count(&profile.id).await?,
        None => 0,
    };

    render_page(&state, guard.session, |page| FarmerDashboard {
        page,
        name: user.name,
        profile,
        produce_count,
    })
}

async fn retailer_dashboard(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<RetailerRole>,
) -> Result<Response, AppError> {
    match current_user(&state, &guard.user_id).await? {
        CurrentUser::Found(user) => render_page(&state, guard.session, |page| {
            RetailerDashboard {
                page,
                name: user.name,
            }
        }),
        CurrentUser::Gone(response) => Ok(response),
    }
}

async fn warehouse_dashboard(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<WarehouseManagerRole>,
) -> Result<Response, AppError> {
    match current_user(&state, &guard.user_id).await? {
        CurrentUser::Found(user) => render_page(&state, guard.session, |page| {
            WarehouseDashboard {
                page,
                name: user.name,
            }
        }),
        CurrentUser::Gone(response) => Ok(response),
    }
}

async fn logistics_dashboard(
    State(state): State<Arc<AppState>>,
    guard: RoleGuard<LogisticsOperatorRole>,
) -> Result<Response, AppError> {
    match current_user(&state, &guard.user_id).await? {
        CurrentUser::Found(user) => render_page(&state, guard.session, |page| {
            LogisticsDashboard {
                page,
                name: user.name,
            }
        }),
        CurrentUser::Gone(response) => Ok(response),
    }
}
