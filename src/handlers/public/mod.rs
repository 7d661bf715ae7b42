// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: none beyond tracing and CORS

pub mod accounts; // GET /users, /users/:id[/profile|/reviews]
pub mod auth; // POST /auth/register, /auth/login, /auth/refresh
pub mod catalog; // GET /brands/*, /phones/*
pub mod content; // GET /reviews/:id/comments
pub mod system; // GET /, /health
