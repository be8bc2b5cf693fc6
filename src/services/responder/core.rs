use std::io::Write;
use std::sync::{Arc, LazyLock};

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::ErrorCatalog;
use crate::domain::FailureCondition;

static BUILTIN: LazyLock<ErrorResponder> = LazyLock::new(ErrorResponder::default);

/// Body written for every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub localized_error: String,
}

/// What the responder needs to know about a failure.
///
/// `condition` is `None` for errors outside the taxonomy; their raw text is kept
/// verbatim in the `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    condition: Option<FailureCondition>,
    raw: String,
}

impl FailureReport {
    pub fn unknown(raw: impl Into<String>) -> Self {
        Self {
            condition: None,
            raw: raw.into(),
        }
    }

    pub fn condition(&self) -> Option<FailureCondition> {
        self.condition
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl From<FailureCondition> for FailureReport {
    fn from(condition: FailureCondition) -> Self {
        Self {
            condition: Some(condition),
            raw: condition.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RespondError {
    #[error("cannot encode error response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("cannot write response: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Clone, Debug, Default)]
pub struct ErrorResponder {
    catalog: Arc<ErrorCatalog>,
}

impl ErrorResponder {
    pub fn new(catalog: ErrorCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Responder over the built-in default catalog.
    pub fn builtin() -> &'static ErrorResponder {
        &BUILTIN
    }

    pub fn envelope(&self, report: &FailureReport) -> (StatusCode, ErrorEnvelope) {
        let entry = self.catalog.lookup(report.condition);
        (
            entry.status,
            ErrorEnvelope {
                error: report.raw.clone(),
                localized_error: entry.message.clone(),
            },
        )
    }

    /// Write the JSON body for `report` to `out` in a single write and return the status.
    ///
    /// A failed write is returned as-is; callers log it and never map it again.
    pub fn respond<W: Write>(
        &self,
        out: &mut W,
        report: &FailureReport,
    ) -> Result<StatusCode, RespondError> {
        let (status, envelope) = self.envelope(report);
        let body = serde_json::to_vec(&envelope)?;
        out.write_all(&body)?;
        out.flush()?;
        Ok(status)
    }

    /// Complete HTTP response: status, `content-type: application/json` and the body.
    pub fn render(&self, report: &FailureReport) -> Response {
        let mut body = Vec::with_capacity(128);
        match self.respond(&mut body, report) {
            Ok(status) => (
                status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, raw = report.raw(), "error response not written");
                self.catalog.lookup(report.condition).status.into_response()
            }
        }
    }
}
