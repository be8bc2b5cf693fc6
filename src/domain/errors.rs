/*
 * Responsibility
 * - Closed vocabulary of failure conditions shared by every layer
 * - Raw description (Display) is the stable machine-readable `error` text
 * - `code()` is the stable key used by locale resources
 */
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    InternalInfrastructure,
    Authentication,
    InputValidation,
    NotFound,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCondition {
    // Internal infrastructure
    #[error("internal database error")]
    InternalDatabase,
    #[error("sql no rows")]
    SqlNoRows,
    #[error("no client_id error")]
    NoClientId,
    #[error("no fcm_token error")]
    NoFcmToken,
    #[error("os != android and os != ios")]
    IncorrectOs,
    #[error("push failed")]
    PushFailed,
    #[error("sms sending failed")]
    SmsSending,
    #[error("internal security error")]
    InternalSecurity,
    #[error("unsupported key type")]
    SecurityUnsupportedKeyType,
    #[error("internal integration error")]
    InternalIntegration,
    #[error("internal push service error")]
    InternalPushService,
    #[error("internal openapi error")]
    InternalOpenApi,
    #[error("this bureau report is currenty unavailable")]
    UnavailableBureauReport,
    #[error("dosent delete file")]
    DeleteFile,
    #[error("dosent create file")]
    CreateFile,

    // Authentication
    #[error("unauthorized")]
    Unauthorized,
    #[error("no user error")]
    NoUser,
    #[error("unconfirmed email")]
    UnconfirmedEmail,

    // Input validation
    #[error("invalid input data")]
    InvalidInputData,
    #[error("payments less than amount")]
    PaymentsLessThanAmount,
    #[error("too high payment")]
    TooHighPayment,
    #[error("amount less than payment")]
    AmountLessThanPayment,
    #[error("validation failed")]
    ValidationFailed,
    #[error("invalid sms code")]
    InvalidSmsCode,
    #[error("invalid email code")]
    InvalidEmailCode,
    // Same raw text as `InvalidSmsCode`; clients historically match on it.
    #[error("invalid sms code")]
    InvalidCode,
    #[error("duplicate request")]
    DuplicateRequest,

    #[error("not found")]
    NotFound,
}

impl FailureCondition {
    pub const ALL: [FailureCondition; 28] = [
        Self::InternalDatabase,
        Self::SqlNoRows,
        Self::NoClientId,
        Self::NoFcmToken,
        Self::IncorrectOs,
        Self::PushFailed,
        Self::SmsSending,
        Self::InternalSecurity,
        Self::SecurityUnsupportedKeyType,
        Self::InternalIntegration,
        Self::InternalPushService,
        Self::InternalOpenApi,
        Self::UnavailableBureauReport,
        Self::DeleteFile,
        Self::CreateFile,
        Self::Unauthorized,
        Self::NoUser,
        Self::UnconfirmedEmail,
        Self::InvalidInputData,
        Self::PaymentsLessThanAmount,
        Self::TooHighPayment,
        Self::AmountLessThanPayment,
        Self::ValidationFailed,
        Self::InvalidSmsCode,
        Self::InvalidEmailCode,
        Self::InvalidCode,
        Self::DuplicateRequest,
        Self::NotFound,
    ];

    pub fn category(&self) -> Category {
        match self {
            Self::InternalDatabase
            | Self::SqlNoRows
            | Self::NoClientId
            | Self::NoFcmToken
            | Self::IncorrectOs
            | Self::PushFailed
            | Self::SmsSending
            | Self::InternalSecurity
            | Self::SecurityUnsupportedKeyType
            | Self::InternalIntegration
            | Self::InternalPushService
            | Self::InternalOpenApi
            | Self::UnavailableBureauReport
            | Self::DeleteFile
            | Self::CreateFile => Category::InternalInfrastructure,
            Self::Unauthorized | Self::NoUser | Self::UnconfirmedEmail => Category::Authentication,
            Self::InvalidInputData
            | Self::PaymentsLessThanAmount
            | Self::TooHighPayment
            | Self::AmountLessThanPayment
            | Self::ValidationFailed
            | Self::InvalidSmsCode
            | Self::InvalidEmailCode
            | Self::InvalidCode
            | Self::DuplicateRequest => Category::InputValidation,
            Self::NotFound => Category::NotFound,
        }
    }

    /// Stable snake_case key, unique per variant (unlike the raw text).
    pub fn code(&self) -> &'static str {
        match self {
            Self::InternalDatabase => "internal_database",
            Self::SqlNoRows => "sql_no_rows",
            Self::NoClientId => "no_client_id",
            Self::NoFcmToken => "no_fcm_token",
            Self::IncorrectOs => "incorrect_os",
            Self::PushFailed => "push_failed",
            Self::SmsSending => "sms_sending",
            Self::InternalSecurity => "internal_security",
            Self::SecurityUnsupportedKeyType => "security_unsupported_key_type",
            Self::InternalIntegration => "internal_integration",
            Self::InternalPushService => "internal_push_service",
            Self::InternalOpenApi => "internal_open_api",
            Self::UnavailableBureauReport => "unavailable_bureau_report",
            Self::DeleteFile => "delete_file",
            Self::CreateFile => "create_file",
            Self::Unauthorized => "unauthorized",
            Self::NoUser => "no_user",
            Self::UnconfirmedEmail => "unconfirmed_email",
            Self::InvalidInputData => "invalid_input_data",
            Self::PaymentsLessThanAmount => "payments_less_than_amount",
            Self::TooHighPayment => "too_high_payment",
            Self::AmountLessThanPayment => "amount_less_than_payment",
            Self::ValidationFailed => "validation_failed",
            Self::InvalidSmsCode => "invalid_sms_code",
            Self::InvalidEmailCode => "invalid_email_code",
            Self::InvalidCode => "invalid_code",
            Self::DuplicateRequest => "duplicate_request",
            Self::NotFound => "not_found",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}
