//! Authentication service - customer registration, login and tokens.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service owns duplicate-email checks and JWT issuing/verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, DEFAULT_GENDER, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{CreateCustomer, Customer, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::NewCustomer;
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub email: String,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new customer and log them straight in.
    async fn register(&self, data: CreateCustomer) -> AppResult<(Customer, TokenResponse)>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String)
        -> AppResult<(Customer, TokenResponse)>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a customer (shared helper to avoid duplication)
fn generate_token(customer: &Customer, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: customer.id,
        email: customer.email.clone(),
        is_admin: customer.is_admin,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, data: CreateCustomer) -> AppResult<(Customer, TokenResponse)> {
        // Email format is validated by the handler's ValidatedJson extractor
        if self
            .uow
            .customers()
            .find_by_email(&data.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&data.password)?.into_string();
        let customer = self
            .uow
            .customers()
            .create(NewCustomer {
                name: data.name,
                email: data.email,
                password_hash,
                gender: data.gender.unwrap_or_else(|| DEFAULT_GENDER.to_string()),
                profile: data.profile,
                is_admin: false,
            })
            .await?;

        let token = generate_token(&customer, &self.config)?;
        Ok((customer, token))
    }

    async fn login(
        &self,
        email: String,
        password: String,
    ) -> AppResult<(Customer, TokenResponse)> {
        let customer_result = self.uow.customers().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if the customer
        // doesn't exist to prevent timing attacks that could enumerate
        // valid emails. The dummy hash always fails verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, customer_exists) = match &customer_result {
            Some(customer) => (customer.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !customer_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified customer_exists is true
        let customer = customer_result.unwrap();
        let token = generate_token(&customer, &self.config)?;
        Ok((customer, token))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
