//! User repository contract.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{BootstrapSeeds, DefaultAccounts, User, UserInput, UserUpdateInput};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every store bootstraps the two default accounts when it is constructed,
/// so [`default_administrator`](Self::default_administrator) and
/// [`default_user`](Self::default_user) are always available.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user under `id`. Fails with `Conflict` if `id` is taken.
    async fn create(&self, id: Uuid, input: UserInput) -> AppResult<User>;

    /// Fetch a user. Fails with `NotFound` if absent.
    async fn get(&self, id: Uuid) -> AppResult<User>;

    /// Replace name, phone and email of a stored user.
    ///
    /// Identifier and administrator flag are left untouched.
    async fn update(&self, id: Uuid, input: UserUpdateInput) -> AppResult<()>;

    /// Remove a user. Fails with `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Get-or-create both seed accounts, keyed on their fixed identifiers.
    ///
    /// Idempotent: running it against a store that already holds the
    /// accounts returns them without creating duplicates.
    async fn bootstrap_defaults(&self, seeds: &BootstrapSeeds) -> AppResult<DefaultAccounts>;

    /// Administrator account resolved when the store was opened
    fn default_administrator(&self) -> &User;

    /// Ordinary account resolved when the store was opened
    fn default_user(&self) -> &User;
}
