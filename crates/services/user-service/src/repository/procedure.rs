//! User store backed by named stored procedures.
//!
//! The store does not talk to a database itself. It holds a
//! [`ProcedureDriver`] and maps each repository operation onto one procedure
//! invocation, translating driver outcomes into the same error kinds the
//! in-memory store reports.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt, ProcedureConfig};
use domain::preconditions::{require_matches, PROCEDURE_NAME_PATTERN};
use domain::{AccountSeed, BootstrapSeeds, DefaultAccounts, DomainResult, User, UserInput, UserUpdateInput};

use super::entities::UserRecord;
use super::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stored procedure identifier that passed syntactic validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureName(String);

impl ProcedureName {
    /// Accepts `^[a-zA-Z][a-zA-Z0-9_]*$` only, so a name can be spliced into
    /// a call statement without quoting.
    pub fn parse(name: &str) -> DomainResult<Self> {
        require_matches(name, &PROCEDURE_NAME_PATTERN, "procedure name")?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcedureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four procedures a [`ProcedureUserStore`] invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureSet {
    pub create: ProcedureName,
    pub get: ProcedureName,
    pub update: ProcedureName,
    pub delete: ProcedureName,
}

impl ProcedureSet {
    /// Validate every configured name.
    pub fn from_config(config: &ProcedureConfig) -> DomainResult<Self> {
        Ok(Self {
            create: ProcedureName::parse(&config.create)?,
            get: ProcedureName::parse(&config.get)?,
            update: ProcedureName::parse(&config.update)?,
            delete: ProcedureName::parse(&config.delete)?,
        })
    }
}

/// Invokes stored procedures on some backing database.
///
/// Each call is independently scoped: whatever connection it needs is
/// acquired for that call and released before it returns, on success and
/// failure alike. A unique-key violation must be reported as
/// `AppError::Conflict`; other infrastructure failures as persistence errors.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProcedureDriver: Send + Sync {
    /// Invoke a procedure that yields at most one user row.
    async fn query(
        &self,
        procedure: &ProcedureName,
        id: Uuid,
        payload: Option<String>,
    ) -> AppResult<Option<UserRecord>>;

    /// Invoke a procedure for its effect and return the number of rows it changed.
    async fn execute(
        &self,
        procedure: &ProcedureName,
        id: Uuid,
        payload: Option<String>,
    ) -> AppResult<u64>;
}

fn encode<T: Serialize>(payload: &T) -> AppResult<String> {
    serde_json::to_string(payload)
        .map_err(|e| AppError::persistence(format!("payload encoding failed: {}", e)))
}

/// Driver plus validated procedure names; the raw operations.
struct ProcedureCalls<D> {
    driver: D,
    procedures: ProcedureSet,
}

impl<D: ProcedureDriver> ProcedureCalls<D> {
    async fn create(&self, id: Uuid, input: &UserInput) -> AppResult<User> {
        let affected = self
            .driver
            .execute(&self.procedures.create, id, Some(encode(input)?))
            .await?;
        if affected == 0 {
            return Err(AppError::conflict("User"));
        }

        // Not transactional: a concurrent delete here surfaces as NotFound.
        self.get(id).await
    }

    async fn get(&self, id: Uuid) -> AppResult<User> {
        let record = self
            .driver
            .query(&self.procedures.get, id, None)
            .await?
            .ok_or_not_found()?;

        Ok(User::try_from(record)?)
    }

    async fn update(&self, id: Uuid, input: &UserUpdateInput) -> AppResult<()> {
        let affected = self
            .driver
            .execute(&self.procedures.update, id, Some(encode(input)?))
            .await?;

        if affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let affected = self.driver.execute(&self.procedures.delete, id, None).await?;

        if affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn get_or_create(&self, seed: &AccountSeed) -> AppResult<User> {
        match self.get(seed.id).await {
            Err(AppError::NotFound) => {}
            found => return found,
        }

        match self.create(seed.id, &seed.input).await {
            // Someone else created it between our read and write
            Err(AppError::Conflict(_)) => self.get(seed.id).await,
            created => created,
        }
    }

    async fn bootstrap(&self, seeds: &BootstrapSeeds) -> AppResult<DefaultAccounts> {
        Ok(DefaultAccounts {
            administrator: self.get_or_create(&seeds.administrator).await?,
            user: self.get_or_create(&seeds.user).await?,
        })
    }
}

/// Stored-procedure implementation of [`UserRepository`].
pub struct ProcedureUserStore<D> {
    calls: ProcedureCalls<D>,
    defaults: DefaultAccounts,
}

impl<D: ProcedureDriver> ProcedureUserStore<D> {
    /// Open the store, bootstrapping the default accounts through `driver`.
    pub async fn open(driver: D, procedures: ProcedureSet, seeds: &BootstrapSeeds) -> AppResult<Self> {
        let calls = ProcedureCalls { driver, procedures };
        let defaults = calls.bootstrap(seeds).await?;
        tracing::info!(
            administrator = %defaults.administrator.id(),
            user = %defaults.user.id(),
            "Procedure user store opened"
        );

        Ok(Self { calls, defaults })
    }
}

#[async_trait]
impl<D: ProcedureDriver> UserRepository for ProcedureUserStore<D> {
    async fn create(&self, id: Uuid, input: UserInput) -> AppResult<User> {
        self.calls.create(id, &input).await
    }

    async fn get(&self, id: Uuid) -> AppResult<User> {
        self.calls.get(id).await
    }

    async fn update(&self, id: Uuid, input: UserUpdateInput) -> AppResult<()> {
        self.calls.update(id, &input).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.calls.delete(id).await
    }

    async fn bootstrap_defaults(&self, seeds: &BootstrapSeeds) -> AppResult<DefaultAccounts> {
        self.calls.bootstrap(seeds).await
    }

    fn default_administrator(&self) -> &User {
        &self.defaults.administrator
    }

    fn default_user(&self) -> &User {
        &self.defaults.user
    }
}
