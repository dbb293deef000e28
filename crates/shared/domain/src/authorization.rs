//! Authorization policy for user operations.
//!
//! The policy only decides. Resolving the requester to a [`User`] is the
//! caller's job, and a requester that cannot be resolved is reported as
//! [`DomainError::Unauthorized`] there, never through this module.

use std::fmt;

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::User;

/// Operation a requester attempts on a target user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Stateless allow/deny decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Decide whether `requester` may perform `operation` on `target_id`.
    ///
    /// Administrators may do anything. Everyone else may read, update and
    /// delete their own record only, and may never create.
    pub fn authorize(requester: &User, target_id: Uuid, operation: Operation) -> DomainResult<()> {
        if requester.is_admin() {
            return Ok(());
        }

        match operation {
            Operation::Create => Err(DomainError::Forbidden),
            Operation::Read | Operation::Update | Operation::Delete
                if requester.id() == target_id =>
            {
                Ok(())
            }
            Operation::Read | Operation::Update | Operation::Delete => Err(DomainError::Forbidden),
        }
    }
}
