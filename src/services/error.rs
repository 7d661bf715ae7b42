use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::auth::TokenError;
use crate::database::StoreError;

use super::messages;

/// Domain-level failures raised by the services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// A filtered listing matched nothing
    #[error("{0}")]
    EmptyResult(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// Delete refused because other rows still reference the record
    #[error("{0}")]
    InUse(String),

    #[error("wrong credentials")]
    InvalidCredentials,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn not_found(entity: &str) -> Self {
        ServiceError::NotFound(messages::not_found(entity))
    }

    pub fn conflict(entity: &str) -> Self {
        ServiceError::Conflict(messages::already_exists(entity))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ServiceError::Forbidden(message.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ServiceError::NotFound(messages::not_found("data")),
            StoreError::UniqueViolation(constraint) => {
                ServiceError::Conflict(messages::already_exists(entity_for_constraint(&constraint)))
            }
            StoreError::ForeignKeyViolation(constraint) => ServiceError::InUse(format!(
                "{} is still referenced by other data",
                entity_for_constraint(&constraint)
            )),
            StoreError::Backend(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Generation(_) | TokenError::InvalidSecret | TokenError::InvalidLifespan(_) => {
                ServiceError::Internal(err.to_string())
            }
            other => ServiceError::Unauthorized(other.to_string()),
        }
    }
}

/// Maps a storage constraint name back to the field it protects
fn entity_for_constraint(constraint: &str) -> &'static str {
    match constraint {
        "users_username_key" => "username",
        "users_email_key" => "email",
        "roles_name_key" => "role",
        "brands_name_key" => "brand",
        "reviews_user_phone_key" => "review",
        "profiles_user_id_key" => "profile",
        "specifications_phone_id_key" => "specification",
        c if c.starts_with("phones_brand") => "brand",
        c if c.starts_with("users_role") => "role",
        c if c.starts_with("reviews_phone") || c.starts_with("specifications_phone") => "phone",
        c if c.starts_with("comments_review") => "review",
        _ => "data",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violations_name_the_field() {
        let err = ServiceError::from(StoreError::UniqueViolation("users_email_key".into()));
        assert!(matches!(&err, ServiceError::Conflict(m) if m.starts_with("email already exists")));
    }

    #[test]
    fn foreign_key_violations_become_in_use() {
        let err = ServiceError::from(StoreError::ForeignKeyViolation("phones_brand_id_fkey".into()));
        assert!(matches!(err, ServiceError::InUse(_)));
    }

    #[test]
    fn token_failures_are_unauthorized_except_signing() {
        assert!(matches!(ServiceError::from(TokenError::Expired), ServiceError::Unauthorized(_)));
        assert!(matches!(
            ServiceError::from(TokenError::Generation("boom".into())),
            ServiceError::Internal(_)
        ));
    }
}
