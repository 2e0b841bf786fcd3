//! Core business logic for registration, login, and token verification.
//!
//! Orchestrates the repository, the password hasher, and the token codec.
//! Emails are lowercased here, at the boundary, so every store access sees
//! the normalized form.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, PasswordHash, Version,
};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, Claims, LoginInput, NewIdentity, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    /// Argon2 time cost; `None` uses the library default.
    pub hash_time_cost: Option<u32>,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl_days: 7, hash_time_cost: None }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new identity and issue its first session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let mut cfg = AuthConfig::new("doc-secret");
    /// cfg.hash_time_cost = Some(1);
    /// let svc = AuthService::new(repo, cfg);
    /// let input = RegisterInput {
    ///     name: "Ana".into(),
    ///     email: "Ana@X.com".into(),
    ///     password: "longenough1".into(),
    ///     confirm_password: "longenough1".into(),
    ///     fitness_level: "beginner".into(),
    /// };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "ana@x.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let RegisterInput { name, email, password, confirm_password, fitness_level } = input;
        if name.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || confirm_password.is_empty()
            || fitness_level.trim().is_empty()
        {
            return Err(AuthError::Validation("all fields are required".into()));
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if password.len() < 8 {
            return Err(AuthError::WeakPassword);
        }
        let email = email.trim().to_lowercase();

        // Fast path only: the store's unique key decides races.
        if self.repo.find_by_email(&email).await?.is_some() {
            debug!("email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hash_password(password).await?;
        let identity = self
            .repo
            .create(NewIdentity {
                name: name.trim().to_string(),
                email,
                password_hash,
                fitness_level: fitness_level.trim().to_string(),
            })
            .await?;

        let token = token::issue(&self.cfg.jwt_secret, identity.id, &identity.email, self.cfg.token_ttl_days)?;
        info!(user_id = %identity.id, "user_registered");
        Ok(AuthSession { user: identity.into(), token })
    }

    /// Authenticate by email and password, issuing a fresh session token.
    ///
    /// A missing identity and a wrong password both yield
    /// [`AuthError::InvalidCredentials`] so callers cannot tell which
    /// field was wrong.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let mut cfg = AuthConfig::new("doc-secret");
    /// cfg.hash_time_cost = Some(1);
    /// let svc = AuthService::new(repo, cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput {
    ///     name: "N".into(), email: "u@e.com".into(),
    ///     password: "Passw0rd".into(), confirm_password: "Passw0rd".into(),
    ///     fitness_level: "advanced".into(),
    /// }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let LoginInput { email, password } = input;
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }
        let email = email.trim().to_lowercase();

        let identity = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, identity.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = token::issue(&self.cfg.jwt_secret, identity.id, &identity.email, self.cfg.token_ttl_days)?;
        info!(user_id = %identity.id, "user_logged_in");
        Ok(AuthSession { user: identity.into(), token })
    }

    /// Validate a bearer token and expose its claims to the caller.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        token::verify(&self.cfg.jwt_secret, token)
    }

    fn hasher(&self) -> Result<Argon2<'static>, AuthError> {
        let params = match self.cfg.hash_time_cost {
            Some(t) => Params::new(Params::DEFAULT_M_COST, t, Params::DEFAULT_P_COST, None)
                .map_err(|e| AuthError::Hash(e.to_string()))?,
            None => Params::default(),
        };
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    // Hashing is deliberately slow; keep it off the async workers so it
    // never stalls the request-accept loop.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let argon = self.hasher()?;
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| AuthError::Hash(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
    }

    async fn verify_password(&self, password: String, password_hash: String) -> Result<bool, AuthError> {
        let argon = self.hasher()?;
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
            Ok(argon.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| AuthError::Hash(e.to_string()))?
    }
}
