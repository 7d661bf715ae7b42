use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::database::models::account::RESERVED_ADMIN_ID;
use crate::database::models::role::{ADMIN_ROLE_ID, USER_ROLE_ID};
use crate::database::models::{Account, AccountSummary, NewAccount, Profile, Review};
use crate::database::prelude::*;
use crate::database::StoreError;
use crate::types::{ListQuery, RoleKind};

use super::error::{ServiceError, ServiceResult};
use super::validation::{ensure_email, provided, require};
use super::{listing, messages};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangePasswordInput {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountUpdateInput {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteAccountInput {
    pub password: Option<String>,
}

/// The only account fields echoed back by auth endpoints
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublicUser {
    pub username: String,
    pub email: String,
}

impl From<&Account> for PublicUser {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
        }
    }
}

pub struct AccountService {
    store: Arc<dyn Store>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Self-service registration; the account always gets the `user` role
    pub async fn register(&self, input: RegisterInput) -> ServiceResult<Account> {
        self.create_with_role(input, USER_ROLE_ID).await
    }

    /// Creates another administrator; the caller has already passed the admin gate
    pub async fn register_admin(&self, input: RegisterInput) -> ServiceResult<Account> {
        self.create_with_role(input, ADMIN_ROLE_ID).await
    }

    async fn create_with_role(&self, input: RegisterInput, role_id: i64) -> ServiceResult<Account> {
        let username = provided(&input.username);
        let email = provided(&input.email);
        let password = input.password.as_deref().filter(|p| !p.is_empty());
        require(&[
            ("username", username.is_some()),
            ("email", email.is_some()),
            ("password", password.is_some()),
        ])?;
        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(ServiceError::validation(messages::required(&["username", "email", "password"])));
        };
        ensure_email(email)?;

        if self.store.find_account_by_username(username).await?.is_some() {
            return Err(ServiceError::conflict("username"));
        }
        if self.store.find_account_by_email(email).await?.is_some() {
            return Err(ServiceError::conflict("email"));
        }
        if self.store.find_role(role_id).await?.is_none() {
            return Err(ServiceError::Internal(format!("role {} is not seeded", role_id)));
        }

        let account = self
            .store
            .create_account(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                role_id,
            })
            .await?;

        info!(account_id = account.id, role_id, "Account registered");
        Ok(account)
    }

    /// Checks a username-or-email plus password pair.
    ///
    /// Every failure is the same `InvalidCredentials`, so callers cannot tell
    /// which half was wrong.
    pub async fn authenticate(&self, input: LoginInput) -> ServiceResult<Account> {
        let password = input.password.as_deref().filter(|p| !p.is_empty());
        let username = provided(&input.username);
        let email = provided(&input.email);
        if password.is_none() || (username.is_none() && email.is_none()) {
            return Err(ServiceError::validation(messages::required(&["username or email", "password"])));
        }

        let account = match (username, email) {
            (Some(username), _) => self.store.find_account_by_username(username).await?,
            (None, Some(email)) => self.store.find_account_by_email(email).await?,
            (None, None) => None,
        };
        let Some(account) = account else {
            warn!("Login rejected: unknown account");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password.unwrap_or_default(), &account.password)? {
            warn!(account_id = account.id, "Login rejected: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }
        Ok(account)
    }

    /// Account behind a still-valid refresh token; gone accounts cannot refresh
    pub async fn active_account(&self, account_id: i64) -> ServiceResult<Account> {
        self.store
            .find_account(account_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("account no longer exists".to_string()))
    }

    pub async fn change_password(&self, account_id: i64, input: ChangePasswordInput) -> ServiceResult<()> {
        let current = input.current_password.as_deref().filter(|p| !p.is_empty());
        let new = input.new_password.as_deref().filter(|p| !p.is_empty());
        let (Some(current), Some(new)) = (current, new) else {
            return Err(ServiceError::validation(messages::required(&[
                "current_password",
                "new_password",
            ])));
        };

        let account = self.find(account_id).await?;
        if !verify_password(current, &account.password)? {
            return Err(ServiceError::validation("current password is incorrect"));
        }

        self.store.update_password(account_id, &hash_password(new)?).await?;
        info!(account_id, "Password changed");
        Ok(())
    }

    /// Partial update of username/email; blank fields keep the stored value
    pub async fn update(&self, account_id: i64, input: AccountUpdateInput) -> ServiceResult<Account> {
        let mut account = self.find(account_id).await?;

        if let Some(username) = provided(&input.username) {
            if username != account.username {
                if self.store.find_account_by_username(username).await?.is_some() {
                    return Err(ServiceError::conflict("username"));
                }
                account.username = username.to_string();
            }
        }
        if let Some(email) = provided(&input.email) {
            ensure_email(email)?;
            if email != account.email {
                if self.store.find_account_by_email(email).await?.is_some() {
                    return Err(ServiceError::conflict("email"));
                }
                account.email = email.to_string();
            }
        }

        Ok(self.store.update_account(&account).await?)
    }

    /// Deletes the caller's own account after re-checking the password
    pub async fn delete_own(&self, account_id: i64, input: DeleteAccountInput) -> ServiceResult<()> {
        let account = self.find(account_id).await?;
        ensure_deletable(account.id)?;

        let Some(password) = input.password.as_deref().filter(|p| !p.is_empty()) else {
            return Err(ServiceError::validation(messages::required(&["password"])));
        };
        if !verify_password(password, &account.password)? {
            return Err(ServiceError::validation("password is incorrect"));
        }

        self.remove(account.id).await
    }

    /// Administrative delete of any account except the reserved admin
    pub async fn delete_by_id(&self, account_id: i64) -> ServiceResult<()> {
        ensure_deletable(account_id)?;
        self.remove(account_id).await
    }

    async fn remove(&self, account_id: i64) -> ServiceResult<()> {
        if !self.store.delete_account(account_id).await? {
            return Err(ServiceError::not_found("user"));
        }
        info!(account_id, "Account deleted");
        Ok(())
    }

    pub async fn list(&self, admins: bool, query: &ListQuery) -> ServiceResult<Vec<AccountSummary>> {
        let rows = self.store.list_accounts(admins, query).await?;
        listing(rows, query, entity(admins))
    }

    /// Account by id, restricted to members (`admins = false`) or admins
    pub async fn get(&self, account_id: i64, admins: bool) -> ServiceResult<AccountSummary> {
        let account = self.find_in_tier(account_id, admins).await?;
        Ok(AccountSummary::from(&account))
    }

    pub async fn profile_of(&self, account_id: i64, admins: bool) -> ServiceResult<Profile> {
        let account = self.find_in_tier(account_id, admins).await?;
        self.store
            .find_profile_by_account(account.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("profile"))
    }

    pub async fn reviews_of(&self, account_id: i64, admins: bool) -> ServiceResult<Vec<Review>> {
        let account = self.find_in_tier(account_id, admins).await?;
        Ok(self.store.list_account_reviews(account.id).await?)
    }

    pub async fn role_name(&self, account_id: i64) -> ServiceResult<String> {
        self.store
            .find_identity(account_id)
            .await?
            .map(|identity| identity.role_name)
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    async fn find(&self, account_id: i64) -> ServiceResult<Account> {
        self.store
            .find_account(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    async fn find_in_tier(&self, account_id: i64, admins: bool) -> ServiceResult<Account> {
        let not_found = || ServiceError::not_found(entity(admins));
        let identity = self.store.find_identity(account_id).await?.ok_or_else(not_found)?;
        let is_admin = RoleKind::from_name(&identity.role_name) == RoleKind::Admin;
        if is_admin != admins {
            return Err(not_found());
        }
        match self.store.find_account(account_id).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) | Err(StoreError::NotFound) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}

fn entity(admins: bool) -> &'static str {
    if admins {
        "admin"
    } else {
        "user"
    }
}

fn ensure_deletable(account_id: i64) -> ServiceResult<()> {
    if account_id == RESERVED_ADMIN_ID {
        warn!(account_id, "Refused to delete reserved admin account");
        return Err(ServiceError::forbidden("this admin account cannot be deleted"));
    }
    Ok(())
}
