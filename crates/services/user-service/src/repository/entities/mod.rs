//! Row shapes returned by the stored procedures.
//!
//! These are database-specific records separate from domain models.

pub mod user;

pub use user::UserRecord;
