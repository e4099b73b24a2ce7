//! Operator login.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use warden_control::ServerControl;

use crate::state::GatewayState;

/// Login form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// The operator password.
    pub password: String,
}

/// Login handler.
///
/// Verifies the submitted password against the configured hash. Both
/// outcomes redirect back to the root so a failed attempt is not
/// distinguishable from the response alone; only success carries a
/// session cookie.
pub async fn login<C>(
    State(state): State<Arc<GatewayState<C>>>,
    Form(form): Form<LoginForm>,
) -> Response
where
    C: ServerControl + 'static,
{
    let redirect = Redirect::to("/");

    if !state.sessions.verify_password(&form.password) {
        tracing::warn!("Rejected login attempt");
        return redirect.into_response();
    }

    let Some(cookie) = state.sessions.issue_cookie() else {
        return redirect.into_response();
    };

    tracing::info!("Operator logged in");

    let mut response = redirect.into_response();
    if let Ok(value) = cookie.parse() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
