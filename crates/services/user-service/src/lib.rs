//! User Service Library
//!
//! User management core: validated payloads, an authorization policy that
//! separates the requester from the target, and CRUD orchestration over a
//! pluggable repository (in-memory, or stored procedures through SeaORM).

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;
use domain::BootstrapSeeds;

use crate::config::{StorageKind, UserServiceConfig};
use crate::infra::{Database, SeaOrmProcedureDriver};
use crate::repository::{InMemoryUserStore, ProcedureSet, ProcedureUserStore, UserRepository};

/// Open the repository variant selected by `config`, bootstrapping the
/// default accounts.
pub async fn open_repository(
    config: &UserServiceConfig,
    seeds: &BootstrapSeeds,
) -> AppResult<Arc<dyn UserRepository>> {
    let repo: Arc<dyn UserRepository> = match config.storage {
        StorageKind::Memory => Arc::new(InMemoryUserStore::new(seeds)),
        StorageKind::Procedures => {
            // Names are checked before any connection is made
            let procedures = ProcedureSet::from_config(&config.procedures)?;
            let db = Database::connect(&config.database).await?;
            let driver = SeaOrmProcedureDriver::new(db.into_connection());

            Arc::new(ProcedureUserStore::open(driver, procedures, seeds).await?)
        }
    };

    Ok(repo)
}
