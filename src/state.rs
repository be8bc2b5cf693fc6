/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Everything inside is immutable after startup; Clone is cheap (Arc inside)
 */
use crate::services::{auth::AuthPipeline, responder::ErrorResponder};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: AuthPipeline,
    pub responder: ErrorResponder,
}

impl AppState {
    pub fn new(auth: AuthPipeline, responder: ErrorResponder) -> Self {
        Self { auth, responder }
    }
}
