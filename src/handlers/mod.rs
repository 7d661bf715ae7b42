// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (access token) → Elevated (access token + admin role)
//
// Each tier only declares handlers; the gates are attached per route group in `routes`.
pub mod public; // Tier 1: catalog reads, registration, login
pub mod protected; // Tier 2: the caller's own account, reviews and comments
pub mod elevated; // Tier 3: roles, catalog writes, moderation, dashboard
