//! Repository layer for data access.
//!
//! Two interchangeable variants implement [`UserRepository`]: a volatile
//! in-memory store and a database store driven by stored procedures. The
//! orchestrator cannot tell them apart; both report the same error kinds for
//! the same situations.

pub mod entities;
mod memory;
mod procedure;
mod user_repository;

pub use memory::{InMemoryUserStore, UserTable};
pub use procedure::{ProcedureDriver, ProcedureName, ProcedureSet, ProcedureUserStore};
pub use user_repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use procedure::MockProcedureDriver;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
