//! Login flow for username/password authentication.

use std::sync::{Arc, LazyLock};

use tracing::{info, instrument, warn};

use crate::auth::hashing;
use crate::auth::jwt::TokenService;
use crate::auth::user::User;
use crate::errors::{AuthErrorType, Error, Result};
use crate::storage::repositories::UserRepository;

/// Pre-computed dummy hash for timing-safe user enumeration prevention.
/// When an unknown username is submitted, we still run Argon2 verification
/// against this hash so the response time matches real verification.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hashing::hash_password("dummy_startup_value")
        .unwrap_or_else(|_| "$argon2id$v=19$m=768,t=1,p=1$dW5rbm93bg$dW5rbm93bg".to_string())
});

/// The message surfaced for both unknown usernames and wrong passwords.
/// A single string so the response never reveals which one it was.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Successful login result: the freshly issued token plus the user record
/// it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Service for handling username/password authentication.
///
/// Each login call is independent: re-login issues a fresh token and
/// previously issued tokens stay valid until their own expiry.
#[derive(Clone)]
pub struct LoginService {
    user_repository: Arc<dyn UserRepository>,
    token_service: Arc<TokenService>,
}

impl LoginService {
    pub fn new(user_repository: Arc<dyn UserRepository>, token_service: Arc<TokenService>) -> Self {
        Self { user_repository, token_service }
    }

    /// Authenticate a user with username and password, returning a signed
    /// token on success.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` when the user does not exist or the password
    ///   does not match (identical message for both)
    /// - `AccountDisabled` when the credentials matched but the account is
    ///   disabled
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let user = match self.user_repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                // Prevent timing-based user enumeration: perform dummy hash
                // verification so response time matches real verification.
                if let Err(e) = hashing::verify_password(password, &DUMMY_HASH) {
                    warn!(error = %e, "dummy hash verification failed unexpectedly");
                }
                warn!(username, "login attempt for non-existent user");
                return Err(Error::auth(INVALID_CREDENTIALS, AuthErrorType::InvalidCredentials));
            }
        };

        let password_matches = hashing::verify_password(password, &user.password_hash)?;
        if !password_matches {
            warn!(username = %user.username, "login attempt with incorrect password");
            return Err(Error::auth(INVALID_CREDENTIALS, AuthErrorType::InvalidCredentials));
        }

        if !user.enabled {
            warn!(username = %user.username, "login attempt for disabled account");
            return Err(Error::auth("Account disabled", AuthErrorType::AccountDisabled));
        }

        let token = self.token_service.issue(&user.username, &user.roles, &user.full_name)?;

        info!(username = %user.username, "user logged in successfully");
        Ok(LoginOutcome { token, user })
    }
}
