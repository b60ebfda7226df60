//! Route handlers for the database-backed responder
//!
//! - health: server and database liveness
//! - users: `users` table pass-through
//! - fallback: plaintext banner for everything else

pub mod fallback;
pub mod health;
pub mod users;

pub use fallback::{default_response, DEFAULT_BODY};
pub use health::HealthResponse;
