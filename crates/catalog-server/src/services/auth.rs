//! Authentication service
//!
//! Issues and verifies the bearer tokens that become the caller identity
//! handed to the access guard. User records live in process memory;
//! token verification is stateless (HS256 JWT).

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use catalog_types::{AuthResponse, Identity, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

const TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("email already registered")]
    EmailTaken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("auth internal error: {0}")]
    Internal(String),
}

pub struct AuthService {
    users: RwLock<UserTable>,
    jwt_secret: String,
}

struct UserTable {
    records: Vec<UserRecord>,
    next_id: i64,
}

struct UserRecord {
    id: i64,
    email: String,
    password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i64,
    email: String,
    exp: i64,
    iat: i64,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            users: RwLock::new(UserTable {
                records: Vec::new(),
                next_id: 1,
            }),
            jwt_secret,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(format!("failed to hash password: {}", e)))?
            .to_string();

        let user = {
            let mut table = self.users.write().await;
            if table
                .records
                .iter()
                .any(|r| r.email.eq_ignore_ascii_case(email))
            {
                return Err(AuthError::EmailTaken);
            }

            let id = table.next_id;
            table.next_id += 1;
            table.records.push(UserRecord {
                id,
                email: email.to_string(),
                password_hash,
            });

            User {
                id,
                email: email.to_string(),
            }
        };

        let token = self.issue_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let user = {
            let table = self.users.read().await;
            let record = table
                .records
                .iter()
                .find(|r| r.email.eq_ignore_ascii_case(email))
                .ok_or(AuthError::InvalidCredentials)?;

            let parsed_hash = PasswordHash::new(&record.password_hash)
                .map_err(|e| AuthError::Internal(format!("invalid password hash: {}", e)))?;
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .map_err(|_| AuthError::InvalidCredentials)?;

            User {
                id: record.id,
                email: record.email.clone(),
            }
        };

        let token = self.issue_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// Verify a bearer token and return the identity it carries.
    pub fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(Identity {
            user_id: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("failed to sign token: {}", e)))
    }
}
