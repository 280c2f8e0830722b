use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// Claims carried in back-office access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    email: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates HS256 access tokens for the admin back office
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: i64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_expiry_secs: config.token_expiry.as_secs() as i64,
            leeway_secs: config.jwt_leeway.as_secs(),
        }
    }

    /// Sign a token for an authenticated user
    pub fn issue_token(&self, user: &AuthenticatedUser) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + self.token_expiry_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate a bearer token and recover the authenticated user.
    ///
    /// Only HS256 tokens with the `admin` role are accepted.
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Invalid subject claim".to_string()))?;

        let user = AuthenticatedUser {
            id,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        };

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(expiry_secs: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-0123456789abcdef!!".to_string(),
            token_expiry: Duration::from_secs(expiry_secs),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            name: "Admin".to_string(),
            email: "admin@vitrina.test".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn issue_then_validate_roundtrip() {
        let service = TokenService::new(config(3600));
        let user = admin();

        let token = service.issue_token(&user).unwrap();
        let validated = service.validate_token(&token).unwrap();

        assert_eq!(validated.id, user.id);
        assert_eq!(validated.email, user.email);
        assert_eq!(validated.role, "admin");
    }

    #[test]
    fn rejects_expired_token() {
        let service = TokenService::new(config(3600));
        let user = admin();

        // Sign with an expiry in the past by using a negative-lifetime service
        let expired = TokenService {
            encoding_key: EncodingKey::from_secret(b"unit-test-secret-0123456789abcdef!!"),
            decoding_key: DecodingKey::from_secret(b"unit-test-secret-0123456789abcdef!!"),
            token_expiry_secs: -120,
            leeway_secs: 0,
        };
        let token = expired.issue_token(&user).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn rejects_non_admin_role() {
        let service = TokenService::new(config(3600));
        let mut user = admin();
        user.role = "customer".to_string();

        let token = service.issue_token(&user).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let service = TokenService::new(config(3600));

        let other = TokenService::new(AuthConfig {
            jwt_secret: "another-secret-entirely-9876543210!!".to_string(),
            token_expiry: Duration::from_secs(3600),
            jwt_leeway: Duration::from_secs(0),
        });
        let token = other.issue_token(&admin()).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn rejects_garbage_token() {
        let service = TokenService::new(config(3600));

        assert!(service.validate_token("not.a.jwt").is_err());
        assert!(service.validate_token("").is_err());
    }
}
