//! User service - Handles user-related business logic.
//!
//! Every operation follows the same sequence: the payload is already valid
//! by construction, the requester is resolved, the policy is consulted, and
//! only then is the repository touched. The first error encountered is
//! returned unchanged; nothing is retried or recovered.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{AuthorizationPolicy, Operation, User, UserInput, UserUpdateInput};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user on behalf of an administrator, under a fresh identifier
    async fn create_user(&self, requester_id: Uuid, input: UserInput) -> AppResult<User>;

    /// Get a user (self, or anyone for administrators)
    async fn get_user(&self, requester_id: Uuid, target_id: Uuid) -> AppResult<User>;

    /// Replace a user's name, phone and email
    async fn update_user(
        &self,
        requester_id: Uuid,
        target_id: Uuid,
        input: UserUpdateInput,
    ) -> AppResult<()>;

    /// Delete a user
    async fn delete_user(&self, requester_id: Uuid, target_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Resolve the requester and check the policy for `operation` on `target_id`.
    ///
    /// A requester that does not exist is `Unauthorized`, which takes
    /// precedence over any judgement about the target.
    async fn authorize(&self, requester_id: Uuid, target_id: Uuid, operation: Operation) -> AppResult<()> {
        let requester = match self.repo.get(requester_id).await {
            Ok(user) => user,
            Err(AppError::NotFound) => {
                tracing::warn!(%requester_id, %operation, "Unknown requester");
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        AuthorizationPolicy::authorize(&requester, target_id, operation).map_err(|e| {
            tracing::warn!(%requester_id, %target_id, %operation, "Operation denied");
            AppError::from(e)
        })
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, requester_id: Uuid, input: UserInput) -> AppResult<User> {
        let id = Uuid::new_v4();
        self.authorize(requester_id, id, Operation::Create).await?;

        let user = self.repo.create(id, input).await?;
        tracing::info!(%requester_id, id = %user.id(), "User created");
        Ok(user)
    }

    async fn get_user(&self, requester_id: Uuid, target_id: Uuid) -> AppResult<User> {
        self.authorize(requester_id, target_id, Operation::Read).await?;

        tracing::debug!(%requester_id, %target_id, "Fetching user");
        self.repo.get(target_id).await
    }

    async fn update_user(
        &self,
        requester_id: Uuid,
        target_id: Uuid,
        input: UserUpdateInput,
    ) -> AppResult<()> {
        self.authorize(requester_id, target_id, Operation::Update).await?;

        self.repo.update(target_id, input).await?;
        tracing::info!(%requester_id, %target_id, "User updated");
        Ok(())
    }

    async fn delete_user(&self, requester_id: Uuid, target_id: Uuid) -> AppResult<()> {
        self.authorize(requester_id, target_id, Operation::Delete).await?;

        self.repo.delete(target_id).await?;
        tracing::info!(%requester_id, %target_id, "User deleted");
        Ok(())
    }
}
