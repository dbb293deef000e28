//! Seeds for the two well-known accounts every store must contain.

use uuid::Uuid;

use crate::constants::{
    DEFAULT_ADMINISTRATOR_EMAIL, DEFAULT_ADMINISTRATOR_ID, DEFAULT_ADMINISTRATOR_NAME,
    DEFAULT_ADMINISTRATOR_PHONE, DEFAULT_USER_EMAIL, DEFAULT_USER_ID, DEFAULT_USER_NAME,
    DEFAULT_USER_PHONE,
};
use crate::error::DomainResult;
use crate::user::{User, UserInput};

/// A fixed identifier and the payload to create it with if missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSeed {
    pub id: Uuid,
    pub input: UserInput,
}

impl AccountSeed {
    pub fn new(id: Uuid, input: UserInput) -> Self {
        Self { id, input }
    }
}

/// The administrator and ordinary-user seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSeeds {
    pub administrator: AccountSeed,
    pub user: AccountSeed,
}

impl BootstrapSeeds {
    /// Seeds built from the well-known constants.
    pub fn standard() -> DomainResult<Self> {
        let administrator = UserInput::with_administrator(
            Some(DEFAULT_ADMINISTRATOR_NAME.to_string()),
            Some(DEFAULT_ADMINISTRATOR_PHONE.to_string()),
            Some(DEFAULT_ADMINISTRATOR_EMAIL.to_string()),
            true,
        )?;
        let user = UserInput::new(
            Some(DEFAULT_USER_NAME.to_string()),
            Some(DEFAULT_USER_PHONE.to_string()),
            Some(DEFAULT_USER_EMAIL.to_string()),
        )?;

        Ok(Self {
            administrator: AccountSeed::new(DEFAULT_ADMINISTRATOR_ID, administrator),
            user: AccountSeed::new(DEFAULT_USER_ID, user),
        })
    }
}

/// Accounts resolved by bootstrapping a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAccounts {
    pub administrator: User,
    pub user: User,
}
