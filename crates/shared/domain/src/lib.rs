//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! validation primitives, the user value objects, the authorization policy
//! and the bootstrap account seeds.

pub mod authorization;
pub mod bootstrap;
pub mod constants;
pub mod error;
pub mod preconditions;
pub mod user;

pub use authorization::{AuthorizationPolicy, Operation};
pub use bootstrap::{AccountSeed, BootstrapSeeds, DefaultAccounts};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{CreateUser, UpdateUser, User, UserInput, UserUpdateInput};
