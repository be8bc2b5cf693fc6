#![allow(dead_code)]

use std::time::Duration;

use auth_gate::{
    middleware,
    middleware::auth::access,
    services::{
        auth::{AuthPipeline, TokenVerifier, VerifierSettings},
        responder::{ErrorCatalog, ErrorResponder, Locale},
    },
    state::AppState,
};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

pub const SECRET: &[u8] = b"integration-test-secret";

pub fn state(locale: Locale) -> AppState {
    let verifier = TokenVerifier::new(&VerifierSettings {
        key: SECRET.to_vec(),
        algorithm: Algorithm::HS256,
        issuer: None,
        audience: None,
        require_exp: false,
        leeway_seconds: 0,
    })
    .unwrap();

    AppState::new(
        AuthPipeline::new(verifier),
        ErrorResponder::new(ErrorCatalog::for_locale(locale)),
    )
}

/// The production router.
pub fn app(locale: Locale) -> Router {
    auth_gate::app::build_router(state(locale), Duration::from_secs(5))
}

/// `protected` behind the access middleware, wrapped like the production router.
pub fn app_with(locale: Locale, protected: Router<AppState>) -> Router {
    let state = state(locale);
    let responder = state.responder.clone();

    let router = access::apply(protected, state.clone()).with_state(state);
    let router = middleware::errors::apply(router, responder);
    middleware::http::apply(router, Duration::from_secs(5))
}

pub fn sign_with(claims: &Value, secret: &[u8]) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

pub fn sign(claims: &Value) -> String {
    sign_with(claims, SECRET)
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
