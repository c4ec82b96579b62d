use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::{IntoResponse, Redirect},
    Form,
};
use axum_sessions::extractors::{ReadableSession, WritableSession};
use serde::{Deserialize, Serialize};

use crate::templates::{self, models::Flash};

use super::AppState;

/// The account stored in the session after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
}

/// Extractor for handlers that require a login. Anonymous requests are
/// redirected to the login page instead of reaching the handler.
pub struct AuthUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = ReadableSession::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;
        session
            .get::<SessionUser>("user")
            .map(AuthUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Like [`AuthUser`] but for pages that only display the login state.
pub struct MaybeUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = ReadableSession::from_request_parts(parts, state).await?;
        Ok(Self(session.get::<SessionUser>("user")))
    }
}

pub async fn handle_loginpage(session: ReadableSession) -> impl IntoResponse {
    if session.get::<SessionUser>("user").is_some() {
        Err(Redirect::to("/"))
    } else {
        Ok(templates::Login::default())
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    user: String,
    pass: String,
}

pub async fn handle_login(
    State(state): State<AppState>,
    mut session: WritableSession,
    Form(login_form): Form<LoginForm>,
) -> impl IntoResponse {
    let Some(account) = state.cfg.account(&login_form.user) else {
        return templates::Login {
            flash: Flash::Error("Invalid login".into()),
            ..Default::default()
        }
        .into_response();
    };
    if account.password != login_form.pass {
        return templates::Login {
            flash: Flash::Error("Invalid password".into()),
            ..Default::default()
        }
        .into_response();
    }
    session
        .insert(
            "user",
            SessionUser {
                name: account.name.clone(),
                email: account.email.clone(),
            },
        )
        .unwrap();
    Redirect::to("/").into_response()
}

pub async fn handle_logout(mut session: WritableSession) -> impl IntoResponse {
    session.destroy();
    Redirect::to("/")
}
