/// Factory: build `AuthPipeline` from application `Config`.
use crate::config::Config;
use crate::services::auth::verifier::{SettingsError, TokenVerifier, VerifierSettings};
use crate::services::auth::AuthPipeline;

pub fn build_auth_pipeline(config: &Config) -> Result<AuthPipeline, SettingsError> {
    let verifier = TokenVerifier::new(&VerifierSettings {
        key: config.jwt_key.clone(),
        algorithm: config.jwt_algorithm,
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
        require_exp: config.jwt_require_exp,
        leeway_seconds: config.jwt_leeway_seconds,
    })?;

    Ok(AuthPipeline::new(verifier))
}
