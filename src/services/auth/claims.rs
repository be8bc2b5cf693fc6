use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a claim could not be read. Logged only; never surfaced to clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("'{0}' claim is missing")]
    Missing(&'static str),
    #[error("'{claim}' claim is not a {expected}")]
    WrongType {
        claim: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' claim cannot be parsed")]
    Unparsable(&'static str),
}

/// Claim set of a verified token. Read-only once decoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    fn get(&self, name: &'static str) -> Result<&Value, ClaimError> {
        self.0.get(name).ok_or(ClaimError::Missing(name))
    }

    pub fn get_str(&self, name: &'static str) -> Result<&str, ClaimError> {
        self.get(name)?.as_str().ok_or(ClaimError::WrongType {
            claim: name,
            expected: "string",
        })
    }

    pub fn get_integer(&self, name: &'static str) -> Result<i64, ClaimError> {
        match self.get(name)? {
            Value::Number(n) => n.as_i64().ok_or(ClaimError::Unparsable(name)),
            _ => Err(ClaimError::WrongType {
                claim: name,
                expected: "integer",
            }),
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
