/*
 * Responsibility
 * - v1 URL layout
 * - everything under /api/v1 sits behind the access middleware
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new().route("/me", get(me));

    access::apply(router, state)
}
