//! Subject claim -> numeric user id.

use super::claims::{ClaimError, Claims};

pub const SUBJECT_CLAIM: &str = "sub";

/// Resolve the principal from a verified claim set.
///
/// `sub` must be present, a JSON string, and a non-negative integer. The three
/// failures stay distinct for logging; callers collapse them to `Unauthorized`.
pub fn resolve(claims: &Claims) -> Result<u64, ClaimError> {
    let sub = claims.get_str(SUBJECT_CLAIM)?;
    sub.parse::<u64>()
        .map_err(|_| ClaimError::Unparsable(SUBJECT_CLAIM))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn resolve_json(value: Value) -> Result<u64, ClaimError> {
        resolve(&serde_json::from_value(value).unwrap())
    }

    #[test]
    fn numeric_string_subject_resolves() {
        assert_eq!(resolve_json(json!({"sub": "42"})), Ok(42));
        assert_eq!(resolve_json(json!({"sub": "0"})), Ok(0));
    }

    #[test]
    fn missing_subject() {
        assert_eq!(
            resolve_json(json!({"name": "x"})),
            Err(ClaimError::Missing("sub"))
        );
    }

    #[test]
    fn non_string_subject() {
        for sub in [json!(true), json!(42), json!(null), json!(["42"])] {
            assert!(matches!(
                resolve_json(json!({ "sub": sub })),
                Err(ClaimError::WrongType { claim: "sub", .. })
            ));
        }
    }

    #[test]
    fn unparsable_subject() {
        for sub in ["abc", "", "-1", "4.2", "18446744073709551616"] {
            assert_eq!(
                resolve_json(json!({ "sub": sub })),
                Err(ClaimError::Unparsable("sub"))
            );
        }
    }
}
