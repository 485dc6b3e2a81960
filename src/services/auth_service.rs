use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::error::AppError;

const SESSION_TTL_DAYS: i64 = 30;

/// Claims carried by a session token. The payload is caller-supplied and
/// embedded verbatim; only the registered claims are typed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub jti: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn get_token_secret() -> Result<String, AppError> {
    std::env::var("TOKEN_SECRET")
        .map_err(|_| AppError::Configuration("TOKEN_SECRET not configured".to_string()))
}

/// Signs the supplied payload into a 30-day session token. The payload is
/// not validated - any caller-controlled fields become claims verbatim.
/// `iat`, `exp` and `jti` are always server-stamped.
pub fn issue_session_token(payload: Map<String, Value>) -> Result<String, AppError> {
    let secret = get_token_secret()?;

    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize;

    let mut claims = payload;
    claims.insert("iat".to_string(), Value::from(iat));
    claims.insert("exp".to_string(), Value::from(exp));
    claims.insert("jti".to_string(), Value::from(Uuid::new_v4().to_string()));

    encode(
        &Header::default(),
        &Value::Object(claims),
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Configuration(format!("Failed to sign session token: {}", e)))
}

/// Validates signature and expiry, returning the decoded claims. Every
/// failure mode collapses into the same unauthorized signal.
pub fn verify_session_token(token: &str) -> Result<SessionClaims, AppError> {
    let secret = get_token_secret()
        .map_err(|_| AppError::Unauthorized("unauthorized access".to_string()))?;

    let validation = Validation::new(Algorithm::HS256);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("unauthorized access".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every test pins the same value so parallel tests cannot race
    fn set_test_secret() {
        std::env::set_var("TOKEN_SECRET", "test-secret");
    }

    fn payload(email: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("email".to_string(), Value::from(email));
        map.insert("name".to_string(), Value::from("Test Student"));
        map
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        set_test_secret();

        let token = issue_session_token(payload("student@music.school")).unwrap();
        let claims = verify_session_token(&token).unwrap();

        assert_eq!(claims.email.as_deref(), Some("student@music.school"));
        assert_eq!(
            claims.extra.get("name"),
            Some(&Value::from("Test Student"))
        );
        assert!(claims.jti.is_some());
    }

    #[test]
    fn test_expiry_is_thirty_days_out() {
        set_test_secret();

        let token = issue_session_token(Map::new()).unwrap();
        let claims = verify_session_token(&token).unwrap();

        let now = Utc::now().timestamp() as usize;
        let twenty_nine_days = 29 * 24 * 60 * 60;
        let thirty_one_days = 31 * 24 * 60 * 60;
        assert!(claims.exp > now + twenty_nine_days);
        assert!(claims.exp < now + thirty_one_days);
    }

    #[test]
    fn test_caller_cannot_choose_expiry() {
        set_test_secret();

        let mut map = Map::new();
        map.insert("exp".to_string(), Value::from(0));
        let token = issue_session_token(map).unwrap();

        // The server-stamped expiry wins, so the token still verifies
        let claims = verify_session_token(&token).unwrap();
        assert!(claims.exp > Utc::now().timestamp() as usize);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        set_test_secret();

        assert!(verify_session_token("not-a-token").is_err());
        assert!(verify_session_token("").is_err());
    }

    #[test]
    fn test_wrong_signature_is_rejected() {
        set_test_secret();

        let forged = encode(
            &Header::default(),
            &serde_json::json!({
                "email": "attacker@music.school",
                "exp": (Utc::now() + Duration::days(30)).timestamp()
            }),
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();

        assert!(verify_session_token(&forged).is_err());
    }
}
