use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    auth::{Flash, Role, Session},
    error::AppError,
    state::AppState,
};

pub mod account;
pub mod dashboards;
pub mod farmer;
pub mod public;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(public::router())
        .merge(account::router())
        .merge(dashboards::router())
        .merge(farmer::router())
}

/// Layout data shared by every page: the pending flash notice and, for a
/// signed-in visitor, their role for the navigation bar.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub flash: Option<Flash>,
    pub role: Option<Role>,
}

impl Page {
    fn from_session(session: &mut Session) -> Self {
        Self {
            flash: session.take_flash(),
            role: session.user().map(|(_, role)| role),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    page: Page,
    status_code: u16,
    reason: &'a str,
    message: &'a str,
}

pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|err| AppError::internal(format!("template rendering failed: {err}")))
}

/// Renders a page, consuming the session's flash. The cookie is only
/// rewritten when a flash was actually shown.
pub(crate) fn render_page<T, F>(
    state: &AppState,
    mut session: Session,
    build: F,
) -> Result<Response, AppError>
where
    T: Template,
    F: FnOnce(Page) -> T,
{
    let page = Page::from_session(&mut session);
    let consumed = page.flash.is_some();
    let html = render(&build(page))?;

    if consumed {
        Ok((state.sessions.cookie(&session)?, html).into_response())
    } else {
        Ok(html.into_response())
    }
}

/// Turns a user-facing error into a flash notice on `to`. Anything else
/// propagates and becomes an error page.
pub(crate) fn redirect_with_error(
    state: &AppState,
    session: Session,
    err: AppError,
    to: &str,
) -> Result<Response, AppError> {
    if !err.is_user_facing() {
        return Err(err);
    }
    tracing::debug!(error = %err, redirect = to, "rejected form submission");
    state
        .sessions
        .redirect(&session.with_flash(Flash::error(err.message())), to)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let template = ErrorTemplate {
        page: Page::default(),
        status_code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
    };
    template.render().unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to render error page");
        format!("{} {}", status.as_u16(), message)
    })
}
