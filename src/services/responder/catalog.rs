/*
 * Responsibility
 * - FailureCondition -> {status, localized message} lookup table
 * - Built once at startup; explicit fallback entry for unmapped conditions
 * - Locale resources: built-in ru/en plus optional JSON message overrides
 */
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::FailureCondition;

/// Override key addressing the fallback entry.
pub const FALLBACK_KEY: &str = "fallback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ru,
    En,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
    #[error("cannot read error messages from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid error messages file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown failure condition code in error messages: {0}")]
    UnknownCode(String),
}

impl FromStr for Locale {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" | "ru-ru" => Ok(Self::Ru),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            other => Err(CatalogError::UnknownLocale(other.to_string())),
        }
    }
}

// (condition, status, ru, en). Conditions absent here resolve to the fallback.
const MAPPINGS: &[(FailureCondition, StatusCode, &str, &str)] = &[
    (
        FailureCondition::InternalDatabase,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Внутренняя ошибка базы данных!",
        "Internal database error!",
    ),
    (
        FailureCondition::InternalOpenApi,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Возникла ошибка при запросе к банковским системам!",
        "Request to banking systems failed!",
    ),
    (
        FailureCondition::SqlNoRows,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Нет данных!",
        "No data!",
    ),
    (
        FailureCondition::Unauthorized,
        StatusCode::UNAUTHORIZED,
        "Вы не авторизованы!",
        "You are not authorized!",
    ),
    (
        FailureCondition::InvalidInputData,
        StatusCode::BAD_REQUEST,
        "Неверный запрос!",
        "Invalid request!",
    ),
    (
        FailureCondition::PaymentsLessThanAmount,
        StatusCode::BAD_REQUEST,
        "Сумма платежей меньше суммы кредита!",
        "Total payments are less than the loan amount!",
    ),
    (
        FailureCondition::TooHighPayment,
        StatusCode::BAD_REQUEST,
        "Слишком большой платеж!",
        "Payment is too high!",
    ),
    (
        FailureCondition::AmountLessThanPayment,
        StatusCode::BAD_REQUEST,
        "Ежемесячный платеж превышает сумму кредита!",
        "Monthly payment exceeds the loan amount!",
    ),
    (
        FailureCondition::ValidationFailed,
        StatusCode::BAD_REQUEST,
        "Запрос не прошёл валидацию!",
        "Request failed validation!",
    ),
    (
        FailureCondition::NoUser,
        StatusCode::UNAUTHORIZED,
        "Вы не авторизованы!",
        "You are not authorized!",
    ),
    (
        FailureCondition::UnconfirmedEmail,
        StatusCode::BAD_REQUEST,
        "Необходимо подтвердить почту!",
        "Email confirmation required!",
    ),
    (
        FailureCondition::InvalidSmsCode,
        StatusCode::BAD_REQUEST,
        "Неверный код!",
        "Invalid code!",
    ),
    (
        FailureCondition::DuplicateRequest,
        StatusCode::BAD_REQUEST,
        "Дублирование запроса!",
        "Duplicate request!",
    ),
    (
        FailureCondition::NoFcmToken,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Нет токена!",
        "No push token!",
    ),
    (
        FailureCondition::IncorrectOs,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Нет информации об ос устройства!",
        "No information about the device OS!",
    ),
    (
        FailureCondition::PushFailed,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Не получилось отправить уведомление!",
        "Failed to send the notification!",
    ),
    (
        FailureCondition::InternalPushService,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Ошибка на стороне push-сервиса!",
        "Push service error!",
    ),
    (
        FailureCondition::InternalIntegration,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Внутренняя ошибка интеграции!",
        "Internal integration error!",
    ),
    (
        FailureCondition::NotFound,
        StatusCode::NOT_FOUND,
        "Не нашлось!",
        "Not found!",
    ),
    (
        FailureCondition::InvalidEmailCode,
        StatusCode::BAD_REQUEST,
        "Неверный код",
        "Invalid code",
    ),
    (
        FailureCondition::InvalidCode,
        StatusCode::BAD_REQUEST,
        "Неверный код",
        "Invalid code",
    ),
];

const FALLBACK: (StatusCode, &str, &str) = (
    StatusCode::INTERNAL_SERVER_ERROR,
    "Внутренняя ошибка!",
    "Internal error!",
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ErrorCatalog {
    entries: HashMap<FailureCondition, CatalogEntry>,
    fallback: CatalogEntry,
}

impl ErrorCatalog {
    pub fn for_locale(locale: Locale) -> Self {
        let pick = |ru: &str, en: &str| match locale {
            Locale::Ru => ru.to_string(),
            Locale::En => en.to_string(),
        };

        let entries = MAPPINGS
            .iter()
            .map(|(condition, status, ru, en)| {
                (
                    *condition,
                    CatalogEntry {
                        status: *status,
                        message: pick(ru, en),
                    },
                )
            })
            .collect();

        let (status, ru, en) = FALLBACK;
        Self {
            entries,
            fallback: CatalogEntry {
                status,
                message: pick(ru, en),
            },
        }
    }

    /// Built-in locale, then message overrides from `overrides_path` if given.
    pub fn load(locale: Locale, overrides_path: Option<&Path>) -> Result<Self, CatalogError> {
        let catalog = Self::for_locale(locale);
        let Some(path) = overrides_path else {
            return Ok(catalog);
        };

        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: HashMap<String, String> = serde_json::from_str(&raw)?;

        catalog.with_overrides(overrides)
    }

    /// Replace messages by condition code (or [`FALLBACK_KEY`]). Statuses never change.
    pub fn with_overrides(
        mut self,
        overrides: HashMap<String, String>,
    ) -> Result<Self, CatalogError> {
        for (code, message) in overrides {
            if code == FALLBACK_KEY {
                self.fallback.message = message;
                continue;
            }

            let condition =
                FailureCondition::from_code(&code).ok_or(CatalogError::UnknownCode(code))?;
            match self.entries.get_mut(&condition) {
                Some(entry) => entry.message = message,
                None => {
                    let status = self.fallback.status;
                    self.entries
                        .insert(condition, CatalogEntry { status, message });
                }
            }
        }

        Ok(self)
    }

    /// Total lookup; `None` stands for an error outside the taxonomy.
    pub fn lookup(&self, condition: Option<FailureCondition>) -> &CatalogEntry {
        condition
            .and_then(|c| self.entries.get(&c))
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &CatalogEntry {
        &self.fallback
    }
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_matches_categories() {
        let catalog = ErrorCatalog::for_locale(Locale::En);

        let status = |c| catalog.lookup(Some(c)).status;
        assert_eq!(status(FailureCondition::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status(FailureCondition::NoUser), StatusCode::UNAUTHORIZED);
        assert_eq!(status(FailureCondition::InvalidInputData), StatusCode::BAD_REQUEST);
        assert_eq!(status(FailureCondition::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status(FailureCondition::InvalidCode), StatusCode::BAD_REQUEST);
        assert_eq!(status(FailureCondition::DuplicateRequest), StatusCode::BAD_REQUEST);
        assert_eq!(status(FailureCondition::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(FailureCondition::InternalDatabase),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(FailureCondition::InternalPushService),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unmapped_conditions_use_fallback() {
        let catalog = ErrorCatalog::for_locale(Locale::Ru);

        for condition in [
            FailureCondition::InternalSecurity,
            FailureCondition::NoClientId,
            FailureCondition::DeleteFile,
        ] {
            assert_eq!(catalog.lookup(Some(condition)), catalog.fallback());
        }
        assert_eq!(catalog.lookup(None).status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(catalog.lookup(None).message, "Внутренняя ошибка!");
    }

    #[test]
    fn overrides_replace_messages_only() {
        let overrides = HashMap::from([
            ("not_found".to_string(), "Nothing here".to_string()),
            ("delete_file".to_string(), "Could not delete".to_string()),
            (FALLBACK_KEY.to_string(), "Oops".to_string()),
        ]);
        let catalog = ErrorCatalog::for_locale(Locale::En)
            .with_overrides(overrides)
            .unwrap();

        let not_found = catalog.lookup(Some(FailureCondition::NotFound));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "Nothing here");

        let delete = catalog.lookup(Some(FailureCondition::DeleteFile));
        assert_eq!(delete.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(delete.message, "Could not delete");

        assert_eq!(catalog.lookup(None).message, "Oops");
    }

    #[test]
    fn unknown_override_code_is_rejected() {
        let overrides = HashMap::from([("bogus".to_string(), "x".to_string())]);
        let err = ErrorCatalog::default().with_overrides(overrides).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCode(code) if code == "bogus"));
    }

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("RU".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }
}
