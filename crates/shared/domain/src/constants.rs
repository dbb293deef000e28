//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use uuid::Uuid;

// =============================================================================
// Validation
// =============================================================================

/// Phone numbers are exactly ten ASCII digits
pub const PHONE_REGEX: &str = r"^[0-9]{10}$";

/// `local@domain.tld` with a 1-64 char local part and a lowercase TLD
pub const EMAIL_REGEX: &str = r"^[A-Za-z0-9._%+-]{1,64}@(?:[A-Za-z0-9-]+\.)+[a-z]{2,}$";

/// Stored procedure identifiers accepted from configuration
pub const PROCEDURE_NAME_REGEX: &str = r"^[a-zA-Z][a-zA-Z0-9_]*$";

// =============================================================================
// Bootstrap Accounts
// =============================================================================

/// Fixed identifier of the default administrator account
pub const DEFAULT_ADMINISTRATOR_ID: Uuid = Uuid::from_u128(1);

/// Fixed identifier of the default ordinary account
pub const DEFAULT_USER_ID: Uuid = Uuid::from_u128(2);

pub const DEFAULT_ADMINISTRATOR_NAME: &str = "Administrator";
pub const DEFAULT_ADMINISTRATOR_PHONE: &str = "0000000000";
pub const DEFAULT_ADMINISTRATOR_EMAIL: &str = "admin@example.com";

pub const DEFAULT_USER_NAME: &str = "Default User";
pub const DEFAULT_USER_PHONE: &str = "0000000001";
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";
