// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Security Level: valid access token whose account resolves to the admin role
// Middleware: authenticate → require_admin (inserts `ValidatedAccount`)

pub mod accounts; // DELETE /users/:id, /admins/*
pub mod catalog; // brand, phone and specification writes
pub mod dashboard; // GET /dashboard/all-count-data
pub mod moderation; // GET /reviews, GET /comments, DELETE /comments/:id/admin
pub mod roles; // /roles/*
