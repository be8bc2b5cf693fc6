//! bearer token verification -> AuthCtx into extensions
//!
//! Order is fixed: token verification, then principal resolution, then the
//! downstream handler. The first failure is answered with `401 unauthorized`
//! and nothing further runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::services::auth::extract_credential;
use crate::services::responder::FailureReport;
use crate::state::AppState;

/// Response header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "user-id";

/// Put the authentication pipeline in front of every route of `router`.
///
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // from_fn cannot see router state; hand it over explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let credential = extract_credential(req.headers());

    let authenticated = match state.auth.authenticate(credential) {
        Ok(authenticated) => authenticated,
        Err(rejection) => {
            tracing::warn!(
                stage = ?rejection.stage,
                error = %rejection.cause,
                "authentication rejected"
            );
            return state
                .responder
                .render(&FailureReport::from(rejection.condition()));
        }
    };

    // A principal attached earlier in this request stays in place.
    let user_id = match req.extensions().get::<AuthCtx>() {
        Some(existing) => existing.user_id,
        None => {
            req.extensions_mut()
                .insert(AuthCtx::new(authenticated.user_id));
            authenticated.user_id
        }
    };

    tracing::Span::current().record("user_id", user_id);
    tracing::debug!(
        user_id,
        token_user_id = authenticated.user_id,
        exp = authenticated.expires_at,
        "authenticated"
    );

    let mut res = next.run(req).await;
    res.headers_mut().insert(
        HeaderName::from_static(USER_ID_HEADER),
        HeaderValue::from(user_id),
    );
    res
}
