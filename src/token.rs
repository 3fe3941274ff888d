use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const TOKEN_TTL_HOURS: i64 = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(rename = "userType")]
    pub user_type: String,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
}

/// Signs and verifies the bearer tokens this API hands out. Constructed
/// once at startup and shared through the application state.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: &str, audience: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        }
    }

    /// Produce a signed token carrying the caller's email and role,
    /// expiring ten hours from now.
    pub fn issue(&self, email: &str, user_type: &str) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            email: email.to_string(),
            user_type: user_type.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// Rejects a bad signature, an issuer or audience mismatch, a blank
    /// email claim, and an expiry at or before now.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|_| AppError::Unauthorized)?;

        if data.claims.email.trim().is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", "test-svc", "test-svc")
    }

    #[test]
    fn issued_token_embeds_submitted_claims() {
        let tokens = issuer();
        let token = tokens.issue("diner@example.com", "client").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.email, "diner@example.com");
        assert_eq!(claims.user_type, "client");
    }

    #[test]
    fn issued_token_expires_ten_hours_from_now() {
        let tokens = issuer();
        let token = tokens.issue("diner@example.com", "client").unwrap();
        let claims = tokens.verify(&token).unwrap();
        let expected = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
        assert!(claims.exp.abs_diff(expected) <= 5);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let other = TokenIssuer::new("other-secret", "test-svc", "test-svc");
        let token = other.issue("diner@example.com", "client").unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_issuer_mismatch() {
        let other = TokenIssuer::new("test-secret", "elsewhere", "test-svc");
        let token = other.issue("diner@example.com", "client").unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_audience_mismatch() {
        let other = TokenIssuer::new("test-secret", "test-svc", "elsewhere");
        let token = other.issue("diner@example.com", "client").unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_blank_email_claim() {
        let tokens = issuer();
        let token = tokens.issue("  ", "client").unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(issuer().verify("not-a-token").is_err());
    }
}
