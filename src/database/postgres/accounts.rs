use async_trait::async_trait;

use super::PgStore;
use crate::database::models::{Account, AccountIdentity, AccountSummary, NewAccount, Role};
use crate::database::{AccountRepository, RoleRepository, StoreError, StoreResult};
use crate::types::ListQuery;

const ACCOUNT_COLUMNS: &str = "id, username, email, password, role_id, created_at, updated_at";
const ROLE_COLUMNS: &str = "id, name, created_at, updated_at";

#[async_trait]
impl AccountRepository for PgStore {
    async fn create_account(&self, new: NewAccount) -> StoreResult<Account> {
        let sql = format!(
            "INSERT INTO users (username, email, password, role_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(&new.username)
            .bind(&new.email)
            .bind(&new.password_hash)
            .bind(new.role_id)
            .fetch_one(self.pool())
            .await?;
        Ok(account)
    }

    async fn find_account(&self, id: i64) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", ACCOUNT_COLUMNS);
        Ok(sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", ACCOUNT_COLUMNS);
        Ok(sqlx::query_as::<_, Account>(&sql)
            .bind(username)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", ACCOUNT_COLUMNS);
        Ok(sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_identity(&self, id: i64) -> StoreResult<Option<AccountIdentity>> {
        Ok(sqlx::query_as::<_, AccountIdentity>(
            "SELECT u.id, u.username, r.name AS role_name FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?)
    }

    async fn list_accounts(&self, admins: bool, query: &ListQuery) -> StoreResult<Vec<AccountSummary>> {
        let sql = format!(
            r#"
            SELECT u.id, u.username, u.email, u.created_at, u.updated_at
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE (LOWER(r.name) = 'admin') = $1
              AND (u.username ILIKE $2 OR u.email ILIKE $2)
            ORDER BY u.id {}
            "#,
            query.order_sql()
        );
        Ok(sqlx::query_as::<_, AccountSummary>(&sql)
            .bind(admins)
            .bind(query.like_pattern())
            .fetch_all(self.pool())
            .await?)
    }

    async fn update_account(&self, account: &Account) -> StoreResult<Account> {
        let sql = format!(
            "UPDATE users SET username = $2, email = $3, updated_at = NOW() WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(account.id)
            .bind(&account.username)
            .bind(&account.email)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_account(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RoleRepository for PgStore {
    async fn list_roles(&self, query: &ListQuery) -> StoreResult<Vec<Role>> {
        let sql = format!(
            "SELECT {} FROM roles WHERE name ILIKE $1 ORDER BY id {}",
            ROLE_COLUMNS,
            query.order_sql()
        );
        Ok(sqlx::query_as::<_, Role>(&sql)
            .bind(query.like_pattern())
            .fetch_all(self.pool())
            .await?)
    }

    async fn find_role(&self, id: i64) -> StoreResult<Option<Role>> {
        let sql = format!("SELECT {} FROM roles WHERE id = $1", ROLE_COLUMNS);
        Ok(sqlx::query_as::<_, Role>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let sql = format!("SELECT {} FROM roles WHERE LOWER(name) = LOWER($1)", ROLE_COLUMNS);
        Ok(sqlx::query_as::<_, Role>(&sql)
            .bind(name)
            .fetch_optional(self.pool())
            .await?)
    }

    async fn create_role(&self, name: &str) -> StoreResult<Role> {
        let sql = format!("INSERT INTO roles (name) VALUES ($1) RETURNING {}", ROLE_COLUMNS);
        Ok(sqlx::query_as::<_, Role>(&sql)
            .bind(name)
            .fetch_one(self.pool())
            .await?)
    }

    async fn update_role(&self, role: &Role) -> StoreResult<Role> {
        let sql = format!(
            "UPDATE roles SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            ROLE_COLUMNS
        );
        sqlx::query_as::<_, Role>(&sql)
            .bind(role.id)
            .bind(&role.name)
            .fetch_optional(self.pool())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_role(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_role_accounts(&self, role_id: i64) -> StoreResult<Vec<AccountSummary>> {
        Ok(sqlx::query_as::<_, AccountSummary>(
            "SELECT id, username, email, created_at, updated_at FROM users WHERE role_id = $1 ORDER BY id",
        )
        .bind(role_id)
        .fetch_all(self.pool())
        .await?)
    }
}
