//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Register, UpdateUser, User, UserClaims},
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

    /// Authenticate by email and password, returning a JWT token and the user
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid email or password".to_string())
            })?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::Authentication(
                "Account is inactive. Please contact admin.".to_string(),
            ));
        }

        self.repository
            .users
            .update_last_login(user.id, Utc::now())
            .await?;

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    /// Register a new account
    pub async fn register(&self, data: Register) -> AppResult<User> {
        if self.repository.users.email_exists(&data.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        if self
            .repository
            .users
            .university_id_exists(&data.university_id)
            .await?
        {
            return Err(AppError::Conflict(
                "University ID already exists".to_string(),
            ));
        }

        let password_hash = self.hash_password(&data.password)?;
        let create = CreateUser {
            first_name: data.first_name,
            last_name: data.last_name,
            university_id: data.university_id,
            role: data.role,
            email: data.email,
            password: data.password,
            phone_number: data.phone_number,
            department: data.department,
        };
        self.repository.users.create(&create, &password_hash).await
    }

    /// List active users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_active().await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a user (staff-entered)
    pub async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        if self.repository.users.email_exists(&data.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        if self
            .repository
            .users
            .university_id_exists(&data.university_id)
            .await?
        {
            return Err(AppError::Conflict(
                "University ID already exists".to_string(),
            ));
        }

        let password_hash = self.hash_password(&data.password)?;
        self.repository.users.create(&data, &password_hash).await
    }

    /// Update a user (partial)
    pub async fn update_user(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        self.repository.users.update(id, &data).await
    }

    /// Deactivate a user account (soft delete)
    pub async fn deactivate_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.deactivate(id).await
    }

    /// Hash a password with argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verify a password against the stored argon2 hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Build a signed JWT for the user
    fn create_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}
