pub mod auth;
pub mod extract;
pub mod response;
pub mod validate_user;

pub use auth::{authenticate, AuthUser};
pub use extract::{IdPath, ValidJson};
pub use response::{ApiResponse, ApiResult};
pub use validate_user::{require_admin, ValidatedAccount};
