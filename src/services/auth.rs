//! Authentication service: password hashing, JWT sessions, login, and registration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::user::{RegisterUser, User, UserRole};

/// Maximum failed login attempts before account lockout.
const MAX_FAILED_ATTEMPTS: i32 = 3;

/// Lockout duration in minutes after exceeding max failed attempts.
const LOCKOUT_DURATION_MINUTES: i32 = 30;

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token pair returned on successful login.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn sign(claims: &Claims, key: &EncodingKey) -> Result<String, AppError> {
    jsonwebtoken::encode(&Header::default(), claims, key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Issue an access + refresh token pair for `user`.
pub fn generate_tokens(
    user: &User,
    jwt_secret: &str,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
) -> Result<TokenPair, AppError> {
    let now = Utc::now();
    let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());

    let claims = |token_type: &str, expiry_secs: i64| Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        token_type: token_type.to_string(),
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    Ok(TokenPair {
        access_token: sign(&claims(ACCESS_TOKEN, access_expiry_secs), &encoding_key)?,
        refresh_token: sign(&claims(REFRESH_TOKEN, refresh_expiry_secs), &encoding_key)?,
        token_type: "Bearer".to_string(),
        expires_in: access_expiry_secs,
    })
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    jsonwebtoken::decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Register a customer account. Staff accounts are provisioned out of band.
pub async fn register(pool: &PgPool, input: &RegisterUser) -> Result<User, AppError> {
    let password_hash = hash_password(&input.password)?;

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(input.email.trim().to_lowercase())
    .bind(&password_hash)
    .bind(input.name.trim())
    .bind(UserRole::User)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Email already registered".to_string())
        }
        _ => AppError::Database(e),
    })
}

/// Authenticate by email and password, returning a token pair.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    config: &AppConfig,
) -> Result<TokenPair, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Unauthorized);
        }
    }

    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    if !verify_password(password, &user.password_hash)? {
        record_failed_attempt(pool, user.id).await?;
        return Err(AppError::Unauthorized);
    }

    sqlx::query(
        "UPDATE users SET failed_login_attempts = 0, locked_until = NULL, last_login = NOW(), \
         updated_at = NOW() WHERE id = $1",
    )
    .bind(user.id)
    .execute(pool)
    .await?;

    tracing::info!(user_id = %user.id, role = ?user.role, "User logged in");

    generate_tokens(
        &user,
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
        config.jwt_refresh_token_expiry_secs,
    )
}

/// Bump the failure counter atomically. A lock that has already expired starts
/// a fresh count, so every lockout needs three new failures.
async fn record_failed_attempt(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    let (attempts, locked_until): (i32, Option<DateTime<Utc>>) = sqlx::query_as(
        r#"
        UPDATE users
        SET failed_login_attempts = CASE
                WHEN locked_until IS NOT NULL AND locked_until <= NOW() THEN 1
                ELSE failed_login_attempts + 1
            END,
            locked_until = CASE
                WHEN locked_until IS NOT NULL AND locked_until <= NOW() THEN NULL
                WHEN failed_login_attempts + 1 >= $2 THEN NOW() + make_interval(mins => $3)
                ELSE locked_until
            END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING failed_login_attempts, locked_until
        "#,
    )
    .bind(user_id)
    .bind(MAX_FAILED_ATTEMPTS)
    .bind(LOCKOUT_DURATION_MINUTES)
    .fetch_one(pool)
    .await?;

    if locked_until.is_some() {
        tracing::warn!(user_id = %user_id, attempts, "Account locked after failed logins");
    }
    Ok(())
}

/// Exchange a valid refresh token for a new token pair.
pub async fn refresh_token(
    pool: &PgPool,
    refresh_token_str: &str,
    config: &AppConfig,
) -> Result<TokenPair, AppError> {
    let claims = validate_token(refresh_token_str, &config.jwt_secret)?;

    if claims.token_type != REFRESH_TOKEN {
        return Err(AppError::Unauthorized);
    }

    let user_id: Uuid = claims.sub.parse().map_err(|_| AppError::Unauthorized)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = true")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    generate_tokens(
        &user,
        &config.jwt_secret,
        config.jwt_access_token_expiry_secs,
        config.jwt_refresh_token_expiry_secs,
    )
}

/// Find a user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
