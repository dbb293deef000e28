//! Volatile in-process user store.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{AccountSeed, BootstrapSeeds, DefaultAccounts, User, UserInput, UserUpdateInput};

use super::UserRepository;

/// Shared backing collection for in-memory stores.
///
/// Cloning shares the same rows, which lets several stores be opened over
/// one table the way several processes would open one database. The rows
/// themselves are only reachable through a store.
#[derive(Clone, Default)]
pub struct UserTable {
    rows: Arc<RwLock<Vec<User>>>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory implementation of [`UserRepository`].
///
/// Every operation holds the table lock for its whole read-modify-write, so
/// concurrent readers never observe a half-applied change.
pub struct InMemoryUserStore {
    table: UserTable,
    defaults: DefaultAccounts,
}

impl InMemoryUserStore {
    /// Open a store over a fresh, empty table.
    pub fn new(seeds: &BootstrapSeeds) -> Self {
        Self::with_table(UserTable::new(), seeds)
    }

    /// Open a store over an existing table, bootstrapping the default accounts.
    pub fn with_table(table: UserTable, seeds: &BootstrapSeeds) -> Self {
        let defaults = Self::seed(&table, seeds);
        tracing::info!(
            administrator = %defaults.administrator.id(),
            user = %defaults.user.id(),
            "In-memory user store opened"
        );

        Self { table, defaults }
    }

    fn seed(table: &UserTable, seeds: &BootstrapSeeds) -> DefaultAccounts {
        let mut rows = table.rows.write();

        DefaultAccounts {
            administrator: get_or_insert(&mut rows, &seeds.administrator),
            user: get_or_insert(&mut rows, &seeds.user),
        }
    }
}

fn position(rows: &[User], id: Uuid) -> Option<usize> {
    rows.iter().position(|user| user.id() == id)
}

fn get_or_insert(rows: &mut Vec<User>, seed: &AccountSeed) -> User {
    if let Some(index) = position(rows, seed.id) {
        return rows[index].clone();
    }

    let user = User::new(seed.id, seed.input.clone());
    rows.push(user.clone());
    user
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, id: Uuid, input: UserInput) -> AppResult<User> {
        let mut rows = self.table.rows.write();
        if position(&rows, id).is_some() {
            return Err(AppError::conflict("User"));
        }

        let user = User::new(id, input);
        rows.push(user.clone());
        Ok(user)
    }

    async fn get(&self, id: Uuid) -> AppResult<User> {
        let rows = self.table.rows.read();
        position(&rows, id).map(|index| rows[index].clone()).ok_or_not_found()
    }

    async fn update(&self, id: Uuid, input: UserUpdateInput) -> AppResult<()> {
        let mut rows = self.table.rows.write();
        let index = position(&rows, id).ok_or_not_found()?;

        rows[index] = rows[index].with_update(input);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.table.rows.write();
        let index = position(&rows, id).ok_or_not_found()?;

        rows.remove(index);
        Ok(())
    }

    async fn bootstrap_defaults(&self, seeds: &BootstrapSeeds) -> AppResult<DefaultAccounts> {
        Ok(Self::seed(&self.table, seeds))
    }

    fn default_administrator(&self) -> &User {
        &self.defaults.administrator
    }

    fn default_user(&self) -> &User {
        &self.defaults.user
    }
}
