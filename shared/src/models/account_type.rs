//! Legacy Account Type
//!
//! Before discount groups were admin-configurable, every user carried one of
//! three fixed account types. Callers that still pass these tags are mapped
//! onto the discount group carrying the matching German display name.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Legacy account type tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Student,
    Teacher,
    /// Users without a stored account type are treated as external visitors
    #[default]
    External,
}

impl AccountType {
    pub const ALL: [AccountType; 3] = [
        AccountType::Student,
        AccountType::Teacher,
        AccountType::External,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Student => "Student",
            AccountType::Teacher => "Teacher",
            AccountType::External => "External",
        }
    }

    /// Discount group name this account type resolves to
    pub fn group_name(&self) -> &'static str {
        match self {
            AccountType::Student => "Schüler",
            AccountType::Teacher => "Lehrer",
            AccountType::External => "Externe",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for a tag that is not one of the legacy account types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    /// Tags are matched exactly, as they were stored in user metadata
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(AccountType::Student),
            "Teacher" => Ok(AccountType::Teacher),
            "External" => Ok(AccountType::External),
            other => Err(UnknownAccountType(other.to_string())),
        }
    }
}

/// Translate a raw account-type tag into a discount group name.
///
/// Unknown tags are returned unchanged so callers may pass a group name
/// directly.
pub fn group_name_for_account_type(tag: &str) -> &str {
    match tag.parse::<AccountType>() {
        Ok(account_type) => account_type.group_name(),
        Err(_) => tag,
    }
}
