//! Authorization scope of the acting user
//!
//! The permission service returns a raw payload once per session; the
//! engine resolves it into a [`Principal`] sum type so permission checks
//! are total functions with no runtime type-guards.

use serde::{Deserialize, Serialize};

/// Raw permission payload as delivered by the permission service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPermissions {
    #[serde(default)]
    pub is_employee_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_employee: Option<String>,
}

/// Resolved authorization scope
///
/// `EmployeeScoped` users may only touch their own activities; `Privileged`
/// users (managers, HR) may touch any. A payload that cannot be resolved
/// (employee-only without an employee id) yields no principal, and every
/// check on a missing principal fails closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Principal {
    Privileged,
    EmployeeScoped { employee: String },
}

/// Which filter controls the UI should expose for a principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterVisibility {
    /// Whether the employee selector is shown and editable at all
    pub employee_selector_enabled: bool,
    /// Employee forced into the selector when it is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_employee: Option<String>,
}
