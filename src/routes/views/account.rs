use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use super::{Page, redirect_with_error, render_page};
use crate::{
    auth::{Flash, Role, Session, guards::LOGIN_PATH},
    error::AppError,
    routes::forms::{LoginForm, RegisterForm},
    services::{Authenticated, ServiceContext},
    state::AppState,
};

pub const REGISTER_PATH: &str = "/register";
pub const LOGOUT_PATH: &str = "/logout";

const REGISTERED: &str = "Registration successful. Please log in.";

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    page: Page,
    roles: &'static [Role],
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    page: Page,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(REGISTER_PATH, get(register_form).post(register))
        .route(LOGIN_PATH, get(login_form).post(login))
        .route(LOGOUT_PATH, get(logout))
}

async fn register_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, AppError> {
    render_page(&state, session, |page| RegisterTemplate {
        page,
        roles: &Role::ALL,
    })
}

async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match create_account(&state, form).await {
        Ok(()) => state
            .sessions
            .redirect(&session.with_flash(Flash::success(REGISTERED)), LOGIN_PATH),
        Err(err) => redirect_with_error(&state, session, err, REGISTER_PATH),
    }
}

async fn create_account(state: &AppState, form: RegisterForm) -> Result<(), AppError> {
    let registration = form.into_registration()?;
    ServiceContext::from_state(state)
        .account()
        .register(registration)
        .await
        .map(|_| ())
}

async fn login_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Response, AppError> {
    render_page(&state, session, |page| LoginTemplate { page })
}

async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match authenticate(&state, &form).await {
        // A fresh session replaces whatever the visitor carried before.
        Ok(Authenticated { user, role }) => state
            .sessions
            .redirect(&Session::for_user(user.id, role), role.dashboard_path()),
        Err(err) => redirect_with_error(&state, session, err, LOGIN_PATH),
    }
}

async fn authenticate(state: &AppState, form: &LoginForm) -> Result<Authenticated, AppError> {
    let (email, password) = form.credentials()?;
    ServiceContext::from_state(state)
        .account()
        .authenticate(&email, password)
        .await
}

async fn logout(State(state): State<Arc<AppState>>, session: Session) -> impl IntoResponse {
    if let Some((user_id, _)) = session.user() {
        tracing::info!(%user_id, "user logged out");
    }
    (state.sessions.clear(), Redirect::to(LOGIN_PATH))
}
