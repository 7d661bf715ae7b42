//! Field validation shared by the services.

use url::Url;
use validator::ValidateEmail;

use super::error::ServiceError;
use super::messages;

/// Absolute http(s) URL whose host contains a dot
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| host.contains('.'))
        }
        Err(_) => false,
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    candidate.validate_email()
}

pub fn ensure_url(field: &str, value: &str) -> Result<(), ServiceError> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(ServiceError::validation(messages::valid_url(field)))
    }
}

pub fn ensure_email(value: &str) -> Result<(), ServiceError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ServiceError::validation("email must be a valid email address"))
    }
}

/// Fails with one message naming every field whose `present` flag is false
pub fn require(fields: &[(&str, bool)]) -> Result<(), ServiceError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::validation(messages::required(&missing)))
    }
}

/// A string field counts as supplied only when it is present and non-blank
pub fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A numeric field counts as supplied only when it is present and non-zero
pub fn provided_num<T: Copy + Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}
