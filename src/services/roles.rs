use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::database::models::{AccountSummary, Role};
use crate::database::prelude::*;
use crate::database::StoreError;
use crate::types::ListQuery;

use super::error::{ServiceError, ServiceResult};
use super::validation::{provided, require};
use super::listing;

#[derive(Debug, Default, Deserialize)]
pub struct RoleInput {
    pub name: Option<String>,
}

pub struct RoleService {
    store: Arc<dyn Store>,
}

impl RoleService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &ListQuery) -> ServiceResult<Vec<Role>> {
        let rows = self.store.list_roles(query).await?;
        listing(rows, query, "roles")
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Role> {
        self.store
            .find_role(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("role"))
    }

    pub async fn create(&self, input: RoleInput) -> ServiceResult<Role> {
        let name = provided(&input.name);
        require(&[("name", name.is_some())])?;
        let name = name.unwrap_or_default();

        if self.store.find_role_by_name(name).await?.is_some() {
            return Err(ServiceError::conflict("role"));
        }
        let role = self.store.create_role(name).await?;
        info!(role_id = role.id, name = %role.name, "Role created");
        Ok(role)
    }

    pub async fn update(&self, id: i64, input: RoleInput) -> ServiceResult<Role> {
        ensure_mutable(id)?;
        let mut role = self.get(id).await?;

        if let Some(name) = provided(&input.name) {
            let taken = self.store.find_role_by_name(name).await?;
            if taken.is_some_and(|other| other.id != role.id) {
                return Err(ServiceError::conflict("role"));
            }
            role.name = name.to_string();
        }
        Ok(self.store.update_role(&role).await?)
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        ensure_mutable(id)?;
        let role = self.get(id).await?;

        match self.store.delete_role(id).await {
            Ok(true) => {
                info!(role_id = id, "Role deleted");
                Ok(())
            }
            Ok(false) => Err(ServiceError::not_found("role")),
            Err(StoreError::ForeignKeyViolation(_)) => Err(ServiceError::InUse(format!(
                "role {} cannot be deleted because it is still assigned to users",
                role.name
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn accounts(&self, id: i64) -> ServiceResult<Vec<AccountSummary>> {
        let role = self.get(id).await?;
        Ok(self.store.list_role_accounts(role.id).await?)
    }
}

fn ensure_mutable(id: i64) -> ServiceResult<()> {
    if Role::is_reserved(id) {
        return Err(ServiceError::validation(
            "the user and admin roles cannot be modified or deleted",
        ));
    }
    Ok(())
}
