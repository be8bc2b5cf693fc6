//! Re-render failure responses with the configured error responder.
//!
//! `AppError` renders itself with the built-in catalog and tags the response
//! with its `FailureReport`. This layer swaps in the configured locale while
//! keeping the status and any headers set on the way out (e.g. `User-ID`).

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, header},
    middleware,
    response::Response,
};

use crate::services::responder::{ErrorResponder, FailureReport};

pub fn apply(router: Router, responder: ErrorResponder) -> Router {
    router.layer(middleware::map_response_with_state(responder, render_failure))
}

async fn render_failure(State(responder): State<ErrorResponder>, mut res: Response) -> Response {
    let Some(report) = res.extensions_mut().remove::<FailureReport>() else {
        return res;
    };

    let (rendered, body) = responder.render(&report).into_parts();
    let (mut parts, _) = res.into_parts();

    parts.status = rendered.status;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Response::from_parts(parts, body)
}
