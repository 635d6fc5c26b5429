//! Authentication service: password hashing, registration, login, tokens

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user
    pub async fn register(&self, user: RegisterUser) -> AppResult<User> {
        user.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&user.email).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(&user.password)?;

        self.repository
            .users
            .create(&user.username, &user.email, &password_hash)
            .await
    }

    /// Authenticate by email and password, returning a signed token.
    ///
    /// Unknown email and wrong password produce the same error message, so
    /// responses cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(password, &user.password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;

        Ok((token, user))
    }

    /// Create a signed token for a user
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.token_lifetime_minutes as i64 * 60);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> AppResult<UserClaims> {
        decode_claims(token, &self.config.jwt_secret)
    }

    /// Validate a token and resolve the principal behind it
    pub async fn authorize(&self, token: &str) -> AppResult<User> {
        let claims = self.validate_token(token)?;
        self.repository.users.get_by_id(claims.user_id).await
    }
}

/// Hash a password using Argon2 with a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against an Argon2 digest
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Decode and verify token claims, keeping expiry distinguishable from
/// signature or payload failures
pub fn decode_claims(token: &str, secret: &str) -> AppResult<UserClaims> {
    UserClaims::from_token(token, secret).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Authentication("Token has expired".to_string()),
        _ => AppError::Authentication("Invalid token".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims_with_exp(exp: i64) -> UserClaims {
        UserClaims {
            sub: "reader".to_string(),
            user_id: 42,
            exp,
            iat: Utc::now().timestamp(),
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same input").unwrap();
        let second = hash_password("same input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_token_round_trip() {
        let claims = claims_with_exp(Utc::now().timestamp() + 600);
        let token = claims.create_token(SECRET).unwrap();

        let decoded = decode_claims(&token, SECRET).unwrap();
        assert_eq!(decoded.user_id, 42);
        assert_eq!(decoded.sub, "reader");
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        // Past the default validation leeway
        let claims = claims_with_exp(Utc::now().timestamp() - 600);
        let token = claims.create_token(SECRET).unwrap();

        match decode_claims(&token, SECRET) {
            Err(AppError::Authentication(msg)) => assert_eq!(msg, "Token has expired"),
            other => panic!("expected expired authentication error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let claims = claims_with_exp(Utc::now().timestamp() + 600);
        let token = claims.create_token(SECRET).unwrap();

        match decode_claims(&token, "another-secret") {
            Err(AppError::Authentication(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expected invalid token error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        match decode_claims("not-a-token", SECRET) {
            Err(AppError::Authentication(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expected invalid token error, got {:?}", other),
        }
    }
}
