//! Database layer - connection pool, liveness check, and the users query
//!
//! The pool is the only shared resource; every query checks a connection
//! out and returns it on completion.

pub mod pool;
pub mod status;
pub mod users;

pub use pool::create_pool;
pub use status::{check_db_status, DbStatus};
pub use users::{fetch_users, row_to_json, ColumnKind, UserRow, USERS_QUERY};
