/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issues and verifies the stateless tokens the facade authenticates with.
/// The token subject is the username, which every scoped storage
/// operation receives explicitly.
#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    access_token_expiration: Duration,
    refresh_token_expiration: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    pub token_type: TokenType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl AuthService {
    pub fn new(secret: String, access_expiration_hours: u64, refresh_expiration_days: u64) -> Self {
        Self {
            secret,
            access_token_expiration: Duration::hours(access_expiration_hours as i64),
            refresh_token_expiration: Duration::days(refresh_expiration_days as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, username: &str) -> Result<String> {
        self.create_token(username, TokenType::Access, self.access_token_expiration)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, username: &str) -> Result<String> {
        self.create_token(username, TokenType::Refresh, self.refresh_token_expiration)
    }

    /// Verify an access token and return its subject
    pub fn verify_access_token(&self, token: &str) -> Result<String> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(claims.sub)
    }

    /// Verify a refresh token and return its subject
    pub fn verify_refresh_token(&self, token: &str) -> Result<String> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(ServerError::Auth("Invalid token type".to_string()));
        }
        Ok(claims.sub)
    }

    fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    fn create_token(
        &self,
        username: &str,
        token_type: TokenType,
        expiration: Duration,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + expiration;

        let claims = Claims {
            sub: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies_and_rejects() {
        let auth = AuthService::new("secret".to_string(), 24, 30);

        let hash = auth.hash_password("correct horse").unwrap();
        assert!(auth.verify_password("correct horse", &hash).unwrap());
        assert!(!auth.verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn tokens_round_trip_to_their_subject() {
        let auth = AuthService::new("secret".to_string(), 24, 30);

        let access = auth.create_access_token("alice").unwrap();
        assert_eq!(auth.verify_access_token(&access).unwrap(), "alice");

        let refresh = auth.create_refresh_token("alice").unwrap();
        assert_eq!(auth.verify_refresh_token(&refresh).unwrap(), "alice");
    }

    #[test]
    fn token_types_are_not_interchangeable() {
        let auth = AuthService::new("secret".to_string(), 24, 30);

        let access = auth.create_access_token("alice").unwrap();
        assert!(auth.verify_refresh_token(&access).is_err());

        let refresh = auth.create_refresh_token("alice").unwrap();
        assert!(auth.verify_access_token(&refresh).is_err());
    }
}
