/*
 * Responsibility
 * - Load settings from the environment (.env is honored via dotenvy)
 * - Validate them; anything missing or malformed aborts startup
 * - Parsing runs over a lookup function so it does not depend on the process env
 */
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use thiserror::Error;
use url::Url;

use crate::services::auth::verifier::MAX_LEEWAY_SECONDS;
use crate::services::responder::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("cannot read {key} from {path}: {source}")]
    Unreadable {
        key: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // HS* shared secret or PEM public key; never logged
    pub jwt_key: Vec<u8>,
    pub jwt_algorithm: Algorithm,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    pub jwt_require_exp: bool,
    pub jwt_leeway_seconds: u64,

    pub error_locale: Locale,
    pub error_messages_path: Option<PathBuf>,

    pub push_service_endpoint: Option<Url>,

    pub request_timeout: Duration,
}
/// Lookup over a string source; blank values count as unset.
struct Source<F> {
    get: F,
}

impl<F: Fn(&str) -> Option<String>> Source<F> {
    fn var(&self, key: &'static str) -> Option<String> {
        (self.get)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.var(key)
            .map(|v| v.parse::<T>().map_err(|_| ConfigError::Invalid(key)))
            .transpose()
    }

    fn flag(&self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        self.var(key)
            .map(|v| match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::Invalid(key)),
            })
            .transpose()
    }

    // JWT_KEY_PATH wins over the inline JWT_KEY.
    fn jwt_key(&self) -> Result<Vec<u8>, ConfigError> {
        if let Some(path) = self.var("JWT_KEY_PATH") {
            let path = PathBuf::from(path);
            return std::fs::read(&path).map_err(|source| ConfigError::Unreadable {
                key: "JWT_KEY_PATH",
                path,
                source,
            });
        }

        self.var("JWT_KEY")
            .map(|v| v.replace("\\n", "\n").into_bytes())
            .ok_or(ConfigError::Missing("JWT_KEY or JWT_KEY_PATH"))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key -> value source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let src = Source { get };

        let addr = src
            .parse::<SocketAddr>("ADDRESS")?
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let app_env = src
            .var("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        let jwt_key = src.jwt_key()?;
        let jwt_algorithm = src
            .parse::<Algorithm>("JWT_ALGORITHM")?
            .unwrap_or(Algorithm::HS256);
        let jwt_issuer = src.var("JWT_ISSUER");
        let jwt_audience = src.var("JWT_AUDIENCE");
        let jwt_require_exp = src.flag("JWT_REQUIRE_EXP")?.unwrap_or(false);
        let jwt_leeway_seconds = match src.parse::<u64>("JWT_LEEWAY_SECONDS")? {
            Some(s) if s > MAX_LEEWAY_SECONDS => {
                return Err(ConfigError::Invalid("JWT_LEEWAY_SECONDS"));
            }
            Some(s) => s,
            None => 60,
        };

        let error_locale = src.parse::<Locale>("ERROR_LOCALE")?.unwrap_or_default();
        let error_messages_path = src.var("ERROR_MESSAGES_PATH").map(PathBuf::from);

        let push_service_endpoint = src.parse::<Url>("PUSH_SERVICE_ENDPOINT")?;

        let request_timeout = Duration::from_secs(
            src.parse::<u64>("REQUEST_TIMEOUT_SECONDS")?
                .filter(|s| *s > 0)
                .unwrap_or(30),
        );

        Ok(Self {
            addr,
            app_env,
            jwt_key,
            jwt_algorithm,
            jwt_issuer,
            jwt_audience,
            jwt_require_exp,
            jwt_leeway_seconds,
            error_locale,
            error_messages_path,
            push_service_endpoint,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_only_a_key() {
        let config = load(&[("JWT_KEY", "secret")]).unwrap();

        assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.jwt_key, b"secret");
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert!(!config.jwt_require_exp);
        assert_eq!(config.jwt_leeway_seconds, 60);
        assert_eq!(config.error_locale, Locale::Ru);
        assert!(config.push_service_endpoint.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_key_is_reported() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing(_))));
        assert!(matches!(
            load(&[("JWT_KEY", "   ")]),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn inline_key_unescapes_newlines() {
        let config = load(&[("JWT_KEY", "-----BEGIN KEY-----\\nAAAA\\n-----END KEY-----")]).unwrap();
        assert_eq!(config.jwt_key, b"-----BEGIN KEY-----\nAAAA\n-----END KEY-----");
    }

    #[test]
    fn key_path_wins_over_inline_key() {
        let path = std::env::temp_dir().join(format!("auth-gate-key-{}.pem", std::process::id()));
        std::fs::write(&path, b"from-file").unwrap();

        let config = load(&[
            ("JWT_KEY_PATH", path.to_str().unwrap()),
            ("JWT_KEY", "inline"),
        ]);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().jwt_key, b"from-file");
    }

    #[test]
    fn unreadable_key_path_is_reported() {
        let err = load(&[
            ("JWT_KEY_PATH", "/nonexistent/auth-gate/key.pem"),
            ("JWT_KEY", "inline"),
        ])
        .err()
        .unwrap();

        assert!(matches!(err, ConfigError::Unreadable { key: "JWT_KEY_PATH", .. }));
    }

    #[test]
    fn boolean_spellings() {
        for value in ["1", "true", "YES", "On"] {
            let config = load(&[("JWT_KEY", "k"), ("JWT_REQUIRE_EXP", value)]).unwrap();
            assert!(config.jwt_require_exp, "{value}");
        }
        for value in ["0", "false", "No", "OFF"] {
            let config = load(&[("JWT_KEY", "k"), ("JWT_REQUIRE_EXP", value)]).unwrap();
            assert!(!config.jwt_require_exp, "{value}");
        }
        assert!(matches!(
            load(&[("JWT_KEY", "k"), ("JWT_REQUIRE_EXP", "maybe")]),
            Err(ConfigError::Invalid("JWT_REQUIRE_EXP"))
        ));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = load(&[("JWT_KEY", "k"), ("REQUEST_TIMEOUT_SECONDS", "0")]).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let config = load(&[("JWT_KEY", "k"), ("REQUEST_TIMEOUT_SECONDS", "5")]).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_values_are_invalid() {
        for (key, value) in [
            ("JWT_ALGORITHM", "HS999"),
            ("PUSH_SERVICE_ENDPOINT", "not a url"),
            ("ADDRESS", "localhost"),
            ("ERROR_LOCALE", "de"),
            ("JWT_LEEWAY_SECONDS", "-5"),
        ] {
            let err = load(&[("JWT_KEY", "k"), (key, value)]).err().unwrap();
            assert!(matches!(err, ConfigError::Invalid(k) if k == key), "{key}={value}");
        }
    }

    #[test]
    fn leeway_is_bounded() {
        let max = MAX_LEEWAY_SECONDS.to_string();
        let config = load(&[("JWT_KEY", "k"), ("JWT_LEEWAY_SECONDS", max.as_str())]).unwrap();
        assert_eq!(config.jwt_leeway_seconds, MAX_LEEWAY_SECONDS);

        for value in [(MAX_LEEWAY_SECONDS + 1).to_string(), u64::MAX.to_string()] {
            assert!(matches!(
                load(&[("JWT_KEY", "k"), ("JWT_LEEWAY_SECONDS", value.as_str())]),
                Err(ConfigError::Invalid("JWT_LEEWAY_SECONDS"))
            ));
        }
    }

    #[test]
    fn explicit_values_are_used() {
        let config = load(&[
            ("JWT_KEY", "k"),
            ("ADDRESS", "127.0.0.1:8080"),
            ("APP_ENV", "prod"),
            ("JWT_ALGORITHM", "ES256"),
            ("JWT_ISSUER", "https://issuer.test"),
            ("ERROR_LOCALE", "en"),
            ("PUSH_SERVICE_ENDPOINT", "http://push.internal:8080/send"),
        ])
        .unwrap();

        assert_eq!(config.addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert!(config.app_env.is_production());
        assert_eq!(config.jwt_algorithm, Algorithm::ES256);
        assert_eq!(config.jwt_issuer.as_deref(), Some("https://issuer.test"));
        assert_eq!(config.error_locale, Locale::En);
        assert_eq!(
            config.push_service_endpoint.map(String::from).as_deref(),
            Some("http://push.internal:8080/send")
        );
    }
}
