use std::{marker::PhantomData, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use super::{Flash, RequiredRole, Session};
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";

/// Admits a request only when the session belongs to a user with role `R`.
/// Anyone else is sent to the login page with a flash message.
pub struct RoleGuard<R: RequiredRole> {
    pub user_id: Uuid,
    pub session: Session,
    _marker: PhantomData<fn() -> R>,
}

impl<R> FromRequestParts<Arc<AppState>> for RoleGuard<R>
where
    R: RequiredRole,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let mut session = state.sessions.read(&parts.headers);
        let required = R::required();

        match session.user() {
            Some((user_id, role)) if role == required => Ok(Self {
                user_id,
                session,
                _marker: PhantomData,
            }),
            current => {
                if let Some((user_id, role)) = current {
                    tracing::warn!(
                        %user_id,
                        role = role.as_str(),
                        required = required.as_str(),
                        path = %parts.uri.path(),
                        "role mismatch"
                    );
                }
                session.set_flash(Flash::error(format!(
                    "Please log in as a {required} to continue"
                )));
                Err(state
                    .sessions
                    .redirect(&session, LOGIN_PATH)
                    .unwrap_or_else(IntoResponse::into_response))
            }
        }
    }
}
