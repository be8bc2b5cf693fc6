/*
 * Responsibility
 * - Ordered authentication chain: verify token -> resolve principal
 * - Each stage either continues with what it produced or halts the request
 * - Only `Unauthorized` ever leaves this chain
 */
use std::sync::Arc;

use axum::http::{HeaderMap, header};
use thiserror::Error;

use super::claims::ClaimError;
use super::principal;
use super::verifier::{TokenVerifier, VerifyError};
use crate::domain::FailureCondition;

const BEARER: &str = "bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    VerifyToken,
    ResolvePrincipal,
}

#[derive(Debug, Error)]
pub enum RejectionCause {
    #[error(transparent)]
    Token(#[from] VerifyError),
    #[error(transparent)]
    Principal(#[from] ClaimError),
}

/// Terminal failure of the chain, tagged with the stage that halted it.
#[derive(Debug, Error)]
#[error("{stage:?} halted: {cause}")]
pub struct Rejection {
    pub stage: Stage,
    pub cause: RejectionCause,
}

impl Rejection {
    fn at(stage: Stage, cause: impl Into<RejectionCause>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }

    /// What the client sees; verification detail is never surfaced.
    pub fn condition(&self) -> FailureCondition {
        FailureCondition::Unauthorized
    }
}

/// What a successful run of the chain produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated {
    pub user_id: u64,
    /// `exp` of the verified token, if it carried one.
    pub expires_at: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct AuthPipeline {
    verifier: Arc<TokenVerifier>,
}

impl AuthPipeline {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    /// Run both stages in order.
    pub fn authenticate(&self, credential: &str) -> Result<Authenticated, Rejection> {
        let claims = self
            .verifier
            .verify(credential)
            .map_err(|e| Rejection::at(Stage::VerifyToken, e))?;

        let user_id =
            principal::resolve(&claims).map_err(|e| Rejection::at(Stage::ResolvePrincipal, e))?;

        Ok(Authenticated {
            user_id,
            expires_at: claims.get_integer("exp").ok(),
        })
    }
}

/// Credential from the `Authorization` header.
///
/// Accepts `Bearer <token>` (scheme is case-insensitive) or the bare token.
/// A missing or non-ASCII header yields the empty credential, which never verifies.
pub fn extract_credential(headers: &HeaderMap) -> &str {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return "";
    };

    let value = value.trim();
    match value.split_once(char::is_whitespace) {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case(BEARER) => token.trim(),
        _ if value.eq_ignore_ascii_case(BEARER) => "",
        _ => value,
    }
}
