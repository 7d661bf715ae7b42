// handlers/protected/mod.rs - Protected handlers (access token required)
//
// Security Level: valid access token
// Middleware: authenticate, which inserts `AuthUser`; the caller id always
// comes from the token, never from the request body.

pub mod accounts; // /users (own account), /users/role, /profiles
pub mod auth; // PUT /auth/change-password, POST /auth/logout
pub mod content; // reviews and comments written by the caller
