//! Business rules for every entity.
//!
//! Each service holds the shared store handle and enforces the uniqueness,
//! ownership and referential rules before touching storage. The storage
//! constraints stay authoritative; the pre-checks only produce friendlier
//! messages.

pub mod accounts;
pub mod brands;
pub mod comments;
pub mod dashboard;
pub mod error;
pub mod messages;
pub mod phones;
pub mod profiles;
pub mod reviews;
pub mod roles;
pub mod specifications;
pub mod validation;

pub use accounts::AccountService;
pub use brands::BrandService;
pub use comments::CommentService;
pub use dashboard::DashboardService;
pub use error::{ServiceError, ServiceResult};
pub use phones::PhoneService;
pub use profiles::ProfileService;
pub use reviews::ReviewService;
pub use roles::RoleService;
pub use specifications::SpecificationService;

use crate::database::prelude::*;
use crate::types::{ListQuery, RoleKind, Tier};

/// A filtered listing that matches nothing is reported as an empty result
/// rather than an empty success.
pub fn listing<T>(rows: Vec<T>, query: &ListQuery, entity: &str) -> ServiceResult<Vec<T>> {
    if rows.is_empty() && query.filtered {
        return Err(ServiceError::EmptyResult(messages::not_found(entity)));
    }
    Ok(rows)
}

pub(crate) async fn caller_is_admin(store: &dyn Store, account_id: i64) -> ServiceResult<bool> {
    let identity = store.find_identity(account_id).await?;
    Ok(identity
        .map(|i| RoleKind::from_name(&i.role_name).satisfies(Tier::Admin))
        .unwrap_or(false))
}
