//! Baseline roles and accounts every deployment starts with.

use thiserror::Error;
use tracing::{info, warn};

use super::models::role::{ADMIN_ROLE_ID, USER_ROLE_ID};
use super::models::NewAccount;
use super::prelude::*;
use super::StoreError;
use crate::auth::password::{hash_password, PasswordError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

struct SeedAccount {
    username: &'static str,
    email: &'static str,
    password: &'static str,
    role: &'static str,
}

const SEED_ROLES: [(&str, i64); 2] = [("user", USER_ROLE_ID), ("admin", ADMIN_ROLE_ID)];

const SEED_ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount {
        username: "user",
        email: "user@gmail.com",
        password: "user123",
        role: "user",
    },
    SeedAccount {
        username: "admin",
        email: "admin@gmail.com",
        password: "admin",
        role: "admin",
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub accounts_created: usize,
}

/// Inserts whatever seed rows are missing; safe to run on every start.
///
/// On an empty database the rows receive ids 1 and 2, which the reserved-id
/// rules rely on.
pub async fn seed(store: &dyn Store) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for (name, expected_id) in SEED_ROLES {
        let role = match store.find_role_by_name(name).await? {
            Some(role) => role,
            None => {
                report.roles_created += 1;
                store.create_role(name).await?
            }
        };
        if role.id != expected_id {
            warn!(role = name, id = role.id, expected_id, "Seed role has unexpected id");
        }
    }

    for seed in &SEED_ACCOUNTS {
        if store.find_account_by_username(seed.username).await?.is_some() {
            continue;
        }
        let role = store
            .find_role_by_name(seed.role)
            .await?
            .ok_or(StoreError::NotFound)?;
        store
            .create_account(NewAccount {
                username: seed.username.to_string(),
                email: seed.email.to_string(),
                password_hash: hash_password(seed.password)?,
                role_id: role.id,
            })
            .await?;
        report.accounts_created += 1;
    }

    info!(
        roles_created = report.roles_created,
        accounts_created = report.accounts_created,
        "Seed data ensured"
    );
    Ok(report)
}
