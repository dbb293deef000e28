//! User domain entity and the payloads used to create and update it.
//!
//! Construction is the validation gate: every constructor either returns a
//! fully valid instance or a [`DomainError::Validation`]. No setters exist,
//! so an instance in hand is always valid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::preconditions::{
    require_matches, require_non_null, require_true, EMAIL_PATTERN, PHONE_PATTERN,
};

/// Validated name/phone/email triple shared by every payload type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Contact {
    name: String,
    phone: String,
    email: String,
}

impl Contact {
    /// Checks run in a fixed order so the first reported error is predictable.
    fn validate(
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Self> {
        let name = require_non_null(name, "name")?;
        require_true(!name.is_empty(), "name must not be empty")?;
        let phone = require_non_null(phone, "phone")?;
        let email = require_non_null(email, "email")?;
        require_matches(&phone, &PHONE_PATTERN, "phone")?;
        require_matches(&email, &EMAIL_PATTERN, "email")?;

        Ok(Self { name, phone, email })
    }
}

/// Create payload. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInput {
    #[serde(flatten)]
    contact: Contact,
    administrator: bool,
}

impl UserInput {
    /// Validate an ordinary (non-administrator) create payload.
    pub fn new(
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Self> {
        Self::with_administrator(name, phone, email, false)
    }

    /// Validate a create payload with an explicit administrator flag.
    ///
    /// Reserved for bootstrap seeds and for rows read back from storage;
    /// untrusted input goes through [`CreateUser`], which has no such flag.
    pub fn with_administrator(
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        administrator: bool,
    ) -> DomainResult<Self> {
        Ok(Self {
            contact: Contact::validate(name, phone, email)?,
            administrator,
        })
    }

    pub fn name(&self) -> &str {
        &self.contact.name
    }

    pub fn phone(&self) -> &str {
        &self.contact.phone
    }

    pub fn email(&self) -> &str {
        &self.contact.email
    }

    pub fn is_admin(&self) -> bool {
        self.administrator
    }
}

/// Update payload. The administrator flag cannot be changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdateInput {
    #[serde(flatten)]
    contact: Contact,
}

impl UserUpdateInput {
    pub fn new(
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            contact: Contact::validate(name, phone, email)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.contact.name
    }

    pub fn phone(&self) -> &str {
        &self.contact.phone
    }

    pub fn email(&self) -> &str {
        &self.contact.email
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: Uuid,
    #[serde(flatten)]
    contact: Contact,
    administrator: bool,
}

impl User {
    /// Build an entity from a validated payload under the given identifier.
    pub fn new(id: Uuid, input: UserInput) -> Self {
        Self {
            id,
            contact: input.contact,
            administrator: input.administrator,
        }
    }

    /// State of this user after applying `update`.
    ///
    /// Identifier and administrator flag are carried over unchanged.
    pub fn with_update(&self, update: UserUpdateInput) -> Self {
        Self {
            id: self.id,
            contact: update.contact,
            administrator: self.administrator,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.contact.name
    }

    pub fn phone(&self) -> &str {
        &self.contact.phone
    }

    pub fn email(&self) -> &str {
        &self.contact.email
    }

    /// Check if user has administrator privileges
    pub fn is_admin(&self) -> bool {
        self.administrator
    }
}

/// User creation draft, as decoded from untrusted input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<CreateUser> for UserInput {
    type Error = crate::DomainError;

    fn try_from(draft: CreateUser) -> DomainResult<Self> {
        UserInput::new(draft.name, draft.phone, draft.email)
    }
}

/// User update draft, as decoded from untrusted input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<UpdateUser> for UserUpdateInput {
    type Error = crate::DomainError;

    fn try_from(draft: UpdateUser) -> DomainResult<Self> {
        UserUpdateInput::new(draft.name, draft.phone, draft.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainError;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_valid_input() {
        let input = UserInput::new(some("Ramsay"), some("9876543456"), some("abc@def.com")).unwrap();

        assert_eq!(input.name(), "Ramsay");
        assert_eq!(input.phone(), "9876543456");
        assert_eq!(input.email(), "abc@def.com");
        assert!(!input.is_admin());
    }

    #[test]
    fn test_invalid_phone_rejected() {
        for phone in ["789789728", "78978972a4", ""] {
            let result = UserInput::new(some("Ramsay"), some(phone), some("abc@def.com"));
            assert!(matches!(result, Err(DomainError::Validation(_))), "{phone}");
        }
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = UserInput::new(some("Ramsay"), some("9876543456"), some("abc@"));
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = UserInput::new(some("Ramsay"), some("9876543456"), some("abc@de.com"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_field_rejected_regardless_of_others() {
        assert!(UserInput::new(None, some("9876543456"), some("abc@def.com")).is_err());
        assert!(UserInput::new(some("Ramsay"), None, some("abc@def.com")).is_err());
        assert!(UserInput::new(some("Ramsay"), some("9876543456"), None).is_err());
        assert!(UserUpdateInput::new(None, some("bad"), some("bad")).is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = UserInput::new(some(""), some("9876543456"), some("abc@def.com"));
        assert_eq!(
            result,
            Err(DomainError::validation("name must not be empty"))
        );

        // Only emptiness is checked; whitespace is kept as given
        let spaced = UserInput::new(some("  "), some("9876543456"), some("abc@def.com")).unwrap();
        assert_eq!(spaced.name(), "  ");
    }

    #[test]
    fn test_check_order() {
        // Missing name wins over everything else
        assert_eq!(
            UserInput::new(None, None, some("bad")),
            Err(DomainError::validation("name is required"))
        );
        // Missing email is reported before a malformed phone
        assert_eq!(
            UserInput::new(some("Ramsay"), some("bad"), None),
            Err(DomainError::validation("email is required"))
        );
        // Phone format is reported before email format
        assert_eq!(
            UserInput::new(some("Ramsay"), some("bad"), some("bad")),
            Err(DomainError::validation("phone has an invalid format"))
        );
    }

    #[test]
    fn test_user_update_keeps_id_and_role() {
        let input =
            UserInput::with_administrator(some("Root"), some("0000000000"), some("root@ex.com"), true)
                .unwrap();
        let id = Uuid::new_v4();
        let user = User::new(id, input);

        let update =
            UserUpdateInput::new(some("Abc"), some("7583929275"), some("rewr@afsa.com")).unwrap();
        let updated = user.with_update(update);

        assert_eq!(updated.id(), id);
        assert!(updated.is_admin());
        assert_eq!(updated.name(), "Abc");
        assert_eq!(updated.phone(), "7583929275");
        assert_eq!(updated.email(), "rewr@afsa.com");
    }

    #[test]
    fn test_draft_conversion() {
        let draft = CreateUser {
            name: some("Ramsay"),
            phone: some("9876543456"),
            email: some("abc@def.com"),
        };
        let input = UserInput::try_from(draft).unwrap();
        assert!(!input.is_admin());

        assert!(UserUpdateInput::try_from(UpdateUser::default()).is_err());
    }

    #[test]
    fn test_payload_serialization_shape() {
        let input = UserInput::new(some("Ramsay"), some("9876543456"), some("abc@def.com")).unwrap();
        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["name"], "Ramsay");
        assert_eq!(json["phone"], "9876543456");
        assert_eq!(json["email"], "abc@def.com");
        assert_eq!(json["administrator"], false);
    }
}
