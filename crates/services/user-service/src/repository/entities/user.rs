//! User row as returned by the `get` procedure.

use sea_orm::FromQueryResult;
use uuid::Uuid;

use domain::{DomainError, User, UserInput};

#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub administrator: bool,
}

/// Convert a stored row to a domain entity.
///
/// Rows go through full validation, so a corrupted row surfaces as a
/// validation error instead of producing an invalid `User`.
impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let input = UserInput::with_administrator(
            Some(record.name),
            Some(record.phone),
            Some(record.email),
            record.administrator,
        )?;

        Ok(User::new(record.id, input))
    }
}
