use crate::config::TokenConfig;
use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claim value identifying a token usable for request authentication.
const ACCESS_TOKEN_TYPE: &str = "access";

/// Represents the claims encoded within an access token.
///
/// `sub` and `email` are non-optional on purpose: a token missing either
/// claim fails deserialization inside `decode`, which collapses into the
/// single invalid outcome like every other verification failure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id, as a string.
    pub sub: String,
    /// Email of the subject at issuance time.
    pub email: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
    /// Purpose tag; only "access" tokens authenticate requests.
    #[serde(rename = "type")]
    pub token_type: String,
}

/// Issues a signed access token for the given user.
///
/// The token embeds `{sub, email, exp = now + ttl, type = "access"}` and is
/// signed with the secret and algorithm from `TokenConfig`.
///
/// # Returns
/// The encoded token string, or `AppError::Internal` if signing fails.
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    config: &TokenConfig,
) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::minutes(config.access_ttl_minutes))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration,
        token_type: ACCESS_TOKEN_TYPE.to_string(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Verifies an access token string and decodes its claims.
///
/// Checks, in one pass: signature and structural validity, expiry, presence
/// of `sub` and `email`, and the `type == "access"` tag. Every failure mode
/// collapses to `None` — callers cannot tell which check failed, so the
/// verifier leaks nothing about token structure.
pub fn verify_access_token(token: &str, config: &TokenConfig) -> Option<Claims> {
    let mut validation = Validation::new(config.algorithm);
    // No clock leeway: a token is invalid the instant its expiry passes.
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()?;

    if data.claims.token_type != ACCESS_TOKEN_TYPE {
        return None;
    }

    Some(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn test_config() -> TokenConfig {
        TokenConfig {
            secret: "unit-test-secret".to_string(),
            algorithm: Algorithm::HS256,
            access_ttl_minutes: 30,
        }
    }

    #[test]
    fn test_token_issue_and_verify() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = issue_access_token(user_id, "test@example.com", &config).unwrap();
        let claims = verify_access_token(&token, &config).expect("freshly issued token is valid");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let config = test_config();
        let expired = TokenConfig {
            access_ttl_minutes: -5,
            ..test_config()
        };

        let token = issue_access_token(Uuid::new_v4(), "test@example.com", &expired).unwrap();
        assert!(
            verify_access_token(&token, &config).is_none(),
            "Token past its expiry must not verify"
        );
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let config = test_config();
        let token = issue_access_token(Uuid::new_v4(), "test@example.com", &config).unwrap();

        // Flip one character of the payload segment
        let mut chars: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(verify_access_token(&tampered, &config).is_none());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let config = test_config();
        let other = TokenConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let token = issue_access_token(Uuid::new_v4(), "test@example.com", &config).unwrap();
        assert!(verify_access_token(&token, &other).is_none());
    }

    #[test]
    fn test_wrong_type_tag_is_invalid() {
        let config = test_config();
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(30))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            exp: expiration,
            token_type: "refresh".to_string(),
        };
        let token = encode(
            &Header::new(config.algorithm),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_access_token(&token, &config).is_none());
    }

    #[test]
    fn test_missing_claims_are_invalid() {
        let config = test_config();
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(30))
            .expect("valid timestamp")
            .timestamp() as usize;

        // Well-signed token without sub/email/type
        #[derive(Serialize)]
        struct BareClaims {
            exp: usize,
        }
        let token = encode(
            &Header::new(config.algorithm),
            &BareClaims { exp: expiration },
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_access_token(&token, &config).is_none());
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let config = test_config();
        assert!(verify_access_token("not-a-jwt", &config).is_none());
        assert!(verify_access_token("", &config).is_none());
    }
}
