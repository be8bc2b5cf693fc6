use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use super::claims::Claims;

// Every variant ends up as `Unauthorized` at the HTTP boundary; the detail is for logs.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("empty credential")]
    EmptyCredential,
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Upper bound for clock-skew leeway. Expiry checks subtract it from the current time.
pub const MAX_LEEWAY_SECONDS: u64 = 6 * 60 * 60;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid {algorithm:?} verification key: {source}")]
    InvalidKey {
        algorithm: Algorithm,
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    #[error("leeway of {0}s exceeds {MAX_LEEWAY_SECONDS}s")]
    Leeway(u64),
}

/// Settings for [`TokenVerifier`].
///
/// `key` is the shared secret for HS* algorithms and a PEM public key otherwise.
pub struct VerifierSettings {
    pub key: Vec<u8>,
    pub algorithm: Algorithm,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub require_exp: bool,
    pub leeway_seconds: u64,
}

/// Signature + expiry check for bearer credentials.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(settings: &VerifierSettings) -> Result<Self, SettingsError> {
        if settings.leeway_seconds > MAX_LEEWAY_SECONDS {
            return Err(SettingsError::Leeway(settings.leeway_seconds));
        }

        let algorithm = settings.algorithm;
        let key = settings.key.as_slice();
        let invalid = |source| SettingsError::InvalidKey { algorithm, source };

        let decoding_key = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => DecodingKey::from_secret(key),
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(key).map_err(invalid)?,
            Algorithm::EdDSA => DecodingKey::from_ed_pem(key).map_err(invalid)?,
            // RS* / PS*
            _ => DecodingKey::from_rsa_pem(key).map_err(invalid)?,
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = settings.leeway_seconds;
        // `exp` is checked whenever present; only its presence is optional.
        validation.validate_exp = true;
        if !settings.require_exp {
            validation.required_spec_claims.clear();
        }
        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &settings.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify a credential (scheme prefix already stripped) and return its claims.
    pub fn verify(&self, credential: &str) -> Result<Claims, VerifyError> {
        if credential.is_empty() {
            return Err(VerifyError::EmptyCredential);
        }

        let data = jsonwebtoken::decode::<Claims>(credential, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
