#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
    response::Response,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tower::ServiceExt;
use uuid::Uuid;

use agri_supply::{
    db::{
        dao::DaoContext,
        entities::{farmer, produce, user},
    },
    routes::router,
    state::AppState,
    test_helpers::sqlite_state,
};

pub const PASSWORD: &str = "harvest-2026";

/// Drives the router like a browser: remembers the session cookie between
/// requests and never follows redirects on its own.
pub struct Browser {
    pub state: Arc<AppState>,
    cookie: Option<String>,
}

impl Browser {
    pub async fn new() -> Self {
        Self::with_state(sqlite_state().await)
    }

    pub fn with_state(state: Arc<AppState>) -> Self {
        Self {
            state,
            cookie: None,
        }
    }

    /// Same database, separate cookie jar.
    pub fn fresh_visitor(&self) -> Self {
        Self::with_state(self.state.clone())
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn get(&mut self, path: &str) -> Response {
        let request = self.request("GET", path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.send(request).await
    }

    /// Follows a single redirect and returns the rendered page body.
    pub async fn follow(&mut self, response: Response) -> String {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let target = location(&response).to_string();
        let page = self.get(&target).await;
        assert_eq!(page.status(), StatusCode::OK, "GET {target}");
        body_text(page).await
    }

    pub async fn register(&mut self, name: &str, email: &str, role: &str) -> Response {
        self.post_form(
            "/register",
            &[
                ("name", name),
                ("email", email),
                ("password", PASSWORD),
                ("role", role),
            ],
        )
        .await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Response {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match self.cookie.as_deref() {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Response {
        let response = router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .trim()
                .to_string();
            self.cookie = if pair.ends_with('=') { None } else { Some(pair) };
        }
        response
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn user_id(state: &AppState, email: &str) -> Uuid {
    DaoContext::new(&state.db)
        .user()
        .find_by_email(email)
        .await
        .unwrap()
        .expect("user should exist")
        .id
}

pub async fn user_count(state: &AppState) -> u64 {
    user::Entity::find().count(&state.db).await.unwrap()
}

pub async fn profile_count(state: &AppState, user_id: Uuid) -> u64 {
    farmer::Entity::find()
        .filter(farmer::Column::UserId.eq(user_id))
        .count(&state.db)
        .await
        .unwrap()
}

pub async fn produce_count(state: &AppState) -> u64 {
    produce::Entity::find().count(&state.db).await.unwrap()
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
