//! Default account seeding.
//!
//! Runs at startup and creates the stock dashboard accounts when they do
//! not exist yet. Existing accounts are never touched, so password or role
//! changes survive restarts.

use tracing::info;

use crate::auth::hashing;
use crate::auth::models::Role;
use crate::auth::user::NewUser;
use crate::errors::Result;
use crate::storage::repositories::UserRepository;

/// Ensure the default `admin` and `lecteur` accounts exist.
pub async fn ensure_default_users(repository: &dyn UserRepository) -> Result<()> {
    seed_user(repository, "admin", "password", "Admin User", vec![Role::Admin, Role::Lecteur])
        .await?;
    seed_user(repository, "lecteur", "password", "Lecteur User", vec![Role::Lecteur]).await?;
    Ok(())
}

async fn seed_user(
    repository: &dyn UserRepository,
    username: &str,
    password: &str,
    full_name: &str,
    roles: Vec<Role>,
) -> Result<()> {
    if repository.exists_by_username(username).await? {
        return Ok(());
    }

    let password_hash = hashing::hash_password(password)?;
    repository
        .create_user(NewUser {
            username: username.to_string(),
            password_hash,
            full_name: full_name.to_string(),
            roles,
            enabled: true,
        })
        .await?;

    info!(username, "seeded default account");
    Ok(())
}
