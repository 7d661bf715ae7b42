//! Storage collaborators.
//!
//! Every service talks to a `dyn Store`. `PgStore` is the production backend;
//! `MemoryStore` mirrors the same constraints in-process for tests and demos.

pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ListQuery;
use models::*;

pub use manager::DatabaseManager;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by a store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// Carries the violated constraint name
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                match db_err.kind() {
                    ErrorKind::UniqueViolation => StoreError::UniqueViolation(constraint),
                    ErrorKind::ForeignKeyViolation => StoreError::ForeignKeyViolation(constraint),
                    _ => StoreError::Backend(err.to_string()),
                }
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Brings every repository trait into scope for `dyn Store` callers
pub mod prelude {
    pub use super::{
        AccountRepository, BrandRepository, CommentRepository, DashboardRepository, PhoneRepository,
        ProfileRepository, ReviewRepository, RoleRepository, SpecificationRepository, Store,
    };
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_account(&self, new: NewAccount) -> StoreResult<Account>;
    async fn find_account(&self, id: i64) -> StoreResult<Option<Account>>;
    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>>;
    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>>;
    /// Resolves an account id to its username and role name in one lookup
    async fn find_identity(&self, id: i64) -> StoreResult<Option<AccountIdentity>>;
    /// Lists accounts whose role is (`admins = true`) or is not the admin role
    async fn list_accounts(&self, admins: bool, query: &ListQuery) -> StoreResult<Vec<AccountSummary>>;
    /// Persists username and email of `account`
    async fn update_account(&self, account: &Account) -> StoreResult<Account>;
    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()>;
    /// Returns false when nothing was deleted
    async fn delete_account(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn list_roles(&self, query: &ListQuery) -> StoreResult<Vec<Role>>;
    async fn find_role(&self, id: i64) -> StoreResult<Option<Role>>;
    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>>;
    async fn create_role(&self, name: &str) -> StoreResult<Role>;
    async fn update_role(&self, role: &Role) -> StoreResult<Role>;
    async fn delete_role(&self, id: i64) -> StoreResult<bool>;
    async fn list_role_accounts(&self, role_id: i64) -> StoreResult<Vec<AccountSummary>>;
}

#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn list_brands(&self, query: &ListQuery) -> StoreResult<Vec<Brand>>;
    async fn find_brand(&self, id: i64) -> StoreResult<Option<Brand>>;
    async fn find_brand_by_name(&self, name: &str) -> StoreResult<Option<Brand>>;
    async fn create_brand(&self, new: NewBrand) -> StoreResult<Brand>;
    async fn update_brand(&self, brand: &Brand) -> StoreResult<Brand>;
    /// Fails with `ForeignKeyViolation` while phones reference the brand
    async fn delete_brand(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait PhoneRepository: Send + Sync {
    async fn list_phones(&self, query: &ListQuery) -> StoreResult<Vec<PhoneSummary>>;
    async fn list_brand_phones(&self, brand_id: i64) -> StoreResult<Vec<PhoneSummary>>;
    async fn find_phone(&self, id: i64) -> StoreResult<Option<Phone>>;
    async fn find_phone_summary(&self, id: i64) -> StoreResult<Option<PhoneSummary>>;
    async fn create_phone(&self, new: NewPhone) -> StoreResult<Phone>;
    async fn update_phone(&self, phone: &Phone) -> StoreResult<Phone>;
    /// Cascades to the specification, reviews and their comments
    async fn delete_phone(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait SpecificationRepository: Send + Sync {
    async fn find_specification(&self, phone_id: i64) -> StoreResult<Option<Specification>>;
    async fn create_specification(&self, new: NewSpecification) -> StoreResult<Specification>;
    async fn update_specification(&self, spec: &Specification) -> StoreResult<Specification>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_review(&self, id: i64) -> StoreResult<Option<Review>>;
    async fn find_review_by_author(&self, user_id: i64, phone_id: i64) -> StoreResult<Option<Review>>;
    async fn create_review(&self, new: NewReview) -> StoreResult<Review>;
    async fn update_review(&self, review: &Review) -> StoreResult<Review>;
    async fn delete_review(&self, id: i64) -> StoreResult<bool>;
    async fn list_phone_reviews(&self, phone_id: i64) -> StoreResult<Vec<PhoneReview>>;
    async fn list_account_reviews(&self, user_id: i64) -> StoreResult<Vec<Review>>;
    async fn list_reviews(&self) -> StoreResult<Vec<ReviewListing>>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>>;
    async fn create_comment(&self, new: NewComment) -> StoreResult<Comment>;
    async fn update_comment(&self, comment: &Comment) -> StoreResult<Comment>;
    async fn delete_comment(&self, id: i64) -> StoreResult<bool>;
    async fn list_review_comments(&self, review_id: i64) -> StoreResult<Vec<CommentWithAuthor>>;
    async fn list_comments(&self) -> StoreResult<Vec<Comment>>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_profile_by_account(&self, user_id: i64) -> StoreResult<Option<Profile>>;
    async fn create_profile(&self, new: NewProfile) -> StoreResult<Profile>;
    async fn update_profile(&self, profile: &Profile) -> StoreResult<Profile>;
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn count_all(&self) -> StoreResult<DashboardCounts>;
}

/// The full storage surface the services depend on
#[async_trait]
pub trait Store:
    AccountRepository
    + RoleRepository
    + BrandRepository
    + PhoneRepository
    + SpecificationRepository
    + ReviewRepository
    + CommentRepository
    + ProfileRepository
    + DashboardRepository
{
    /// Cheap liveness probe used by `/health`
    async fn ping(&self) -> StoreResult<()>;
}
