//! Permission resolution and edit checks
//!
//! The permission service delivers one raw payload per session. It is
//! resolved here into a [`Principal`] once, and every later check is a
//! total function: malformed or missing input always resolves to the most
//! restrictive outcome instead of an error.

use timegrid_domain::{FilterVisibility, Principal, RawPermissions};

/// Resolve a raw permission payload into a principal
///
/// Fails closed: an employee-only payload without an associated employee
/// id yields `None`, and every permission check on `None` denies.
pub fn resolve_principal(raw: &RawPermissions) -> Option<Principal> {
    if raw.is_employee_only {
        let employee = raw.current_employee.as_deref()?.trim();
        if employee.is_empty() {
            return None;
        }
        Some(Principal::EmployeeScoped { employee: employee.to_string() })
    } else {
        Some(Principal::Privileged)
    }
}

/// Whether the principal may mutate activities owned by `activity_owner`
pub fn can_edit(principal: Option<&Principal>, activity_owner: &str) -> bool {
    match principal {
        None => false,
        Some(Principal::Privileged) => true,
        Some(Principal::EmployeeScoped { employee }) => {
            !activity_owner.is_empty() && activity_owner == employee
        }
    }
}

/// Filter controls visible to the principal
///
/// Employee-scoped users never see the employee selector; it is disabled
/// with their own id forced as the default. Privileged users get an
/// enabled selector with no forced default. A missing principal gets the
/// restrictive shape.
pub fn visible_filters(principal: Option<&Principal>) -> FilterVisibility {
    match principal {
        Some(Principal::Privileged) => {
            FilterVisibility { employee_selector_enabled: true, default_employee: None }
        }
        Some(Principal::EmployeeScoped { employee }) => FilterVisibility {
            employee_selector_enabled: false,
            default_employee: Some(employee.clone()),
        },
        None => FilterVisibility { employee_selector_enabled: false, default_employee: None },
    }
}
