use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use contracts::system::users::UserRole;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use super::AuthSettings;

/// Generate JWT access token (HS256)
pub fn generate_access_token(
    settings: &AuthSettings,
    user_id: &str,
    username: &str,
    role: UserRole,
) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(settings.token_lifetime_hours)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp,
        iat,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok(token)
}

/// Validate JWT token and extract claims
pub fn validate_token(settings: &AuthSettings, token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Generate a cryptographically secure JWT secret (256 bits)
pub fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret: &str) -> AuthSettings {
        AuthSettings {
            jwt_secret: secret.to_string(),
            token_lifetime_hours: 1,
            emergency_admin: false,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let s = settings("secret-a");
        let token = generate_access_token(&s, "u1", "ana", UserRole::Supervisor).unwrap();
        let claims = validate_token(&s, &token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.role, UserRole::Supervisor);
        assert!(!claims.is_admin());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = generate_access_token(&settings("a"), "u1", "ana", UserRole::Admin).unwrap();
        assert!(validate_token(&settings("b"), &token).is_err());
    }

    #[test]
    fn test_generated_secrets_differ() {
        let a = generate_jwt_secret();
        assert_eq!(a.len(), 44);
        assert_ne!(a, generate_jwt_secret());
    }
}
