/*
 * Responsibility
 * - AppError: what handlers and extractors return on failure
 * - IntoResponse via the error responder (status + {error, localized_error})
 * - Responses are tagged with their FailureReport so the router-level layer
 *   can re-render them with the configured locale
 */
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::FailureCondition;
use crate::services::responder::{ErrorResponder, FailureReport};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Condition(#[from] FailureCondition),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Condition(FailureCondition::Unauthorized)
    }
}

impl From<&AppError> for FailureReport {
    fn from(e: &AppError) -> Self {
        match e {
            AppError::Condition(condition) => (*condition).into(),
            // A condition wrapped by anyhow along the way is still a known condition.
            AppError::Other(err) => match err.downcast_ref::<FailureCondition>() {
                Some(condition) => (*condition).into(),
                None => FailureReport::unknown(err.to_string()),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = FailureReport::from(&self);
        if report.condition().is_none() {
            tracing::error!(error = ?self, "unmapped error");
        }

        let mut res = ErrorResponder::builtin().render(&report);
        res.extensions_mut().insert(report);
        res
    }
}
