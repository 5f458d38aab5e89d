use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header, request::Parts},
    response::{IntoResponse, IntoResponseParts, Redirect, Response, ResponseParts},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;
use crate::{config::SessionConfig, error::AppError, state::AppState};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot notice shown on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash flash-success",
            FlashKind::Error => "flash flash-error",
        }
    }
}

/// Cookie-backed session: the signed-in user and a pending flash message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl Session {
    pub fn for_user(user_id: Uuid, role: Role) -> Self {
        Self {
            uid: Some(user_id),
            role: Some(role),
            flash: None,
        }
    }

    pub fn user(&self) -> Option<(Uuid, Role)> {
        Some((self.uid?, self.role?))
    }

    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.role.is_none() && self.flash.is_none()
    }

    pub fn set_flash(&mut self, flash: Flash) {
        self.flash = Some(flash);
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.set_flash(flash);
        self
    }

    pub fn take_flash(&mut self) -> Option<Flash> {
        self.flash.take()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    session: Session,
    iat: usize,
    exp: usize,
}

/// `Set-Cookie` header carrying an updated (or cleared) session.
#[derive(Debug, Clone)]
pub struct SessionCookie(HeaderValue);

impl IntoResponseParts for SessionCookie {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.headers_mut().append(header::SET_COOKIE, self.0);
        Ok(res)
    }
}

#[derive(Clone)]
pub struct SessionKeys {
    enc: EncodingKey,
    dec: DecodingKey,
    cookie_name: String,
    ttl_secs: u64,
    secure: bool,
}

impl SessionKeys {
    pub fn from_config(cfg: &SessionConfig) -> Self {
        let secret = cfg.secret.as_bytes();
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
            cookie_name: cfg.cookie_name.clone(),
            ttl_secs: cfg.ttl_secs,
            secure: cfg.secure_cookie,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn encode(&self, session: &Session) -> Result<String, AppError> {
        let iat = now_unix();
        let claims = SessionClaims {
            session: session.clone(),
            iat,
            exp: iat.saturating_add(self.ttl_secs as usize),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.enc)
            .map_err(|err| AppError::internal(format!("Session encoding failed: {err}")))
    }

    /// Returns `None` for tokens that are malformed, tampered with or expired.
    pub fn decode(&self, token: &str) -> Option<Session> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<SessionClaims>(token, &self.dec, &validation) {
            Ok(data) => Some(data.claims.session),
            Err(err) => {
                tracing::debug!(error = %err, "discarding invalid session cookie");
                None
            }
        }
    }

    pub fn read(&self, headers: &HeaderMap) -> Session {
        cookie_value(headers, &self.cookie_name)
            .filter(|value| !value.is_empty())
            .and_then(|token| self.decode(token))
            .unwrap_or_default()
    }

    /// Cookie that stores `session`; an empty session clears the cookie.
    pub fn cookie(&self, session: &Session) -> Result<SessionCookie, AppError> {
        if session.is_empty() {
            return Ok(self.clear());
        }

        let token = self.encode(session)?;
        let value = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            self.cookie_name,
            token,
            self.ttl_secs,
            if self.secure { "; Secure" } else { "" }
        );
        HeaderValue::from_str(&value)
            .map(SessionCookie)
            .map_err(|err| AppError::internal(format!("Invalid session cookie: {err}")))
    }

    pub fn clear(&self) -> SessionCookie {
        let value = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            self.cookie_name,
            if self.secure { "; Secure" } else { "" }
        );
        SessionCookie(
            HeaderValue::from_str(&value)
                .unwrap_or_else(|_| HeaderValue::from_static("session=; Path=/; Max-Age=0")),
        )
    }

    /// 303 redirect to `to` that also persists `session`.
    pub fn redirect(&self, session: &Session, to: &str) -> Result<Response, AppError> {
        Ok((self.cookie(session)?, Redirect::to(to)).into_response())
    }
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.sessions.read(&parts.headers))
    }
}

fn now_unix() -> usize {
    chrono::Utc::now().timestamp().max(0) as usize
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}
