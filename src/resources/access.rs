//! Privacy rule shared by kinds that carry an `is_private` flag.

use crate::model::AccessControl;
use reconcile_framework::ValidationErrors;

/// Resolves the effective access control from the privacy flag.
///
/// | `is_private` | `access_control` | result                         |
/// |--------------|------------------|--------------------------------|
/// | `false`      | `None`           | `None` (public)                |
/// | `false`      | `Some(_)`        | error on both attributes       |
/// | `true`       | `None`           | owner-only, every list empty   |
/// | `true`       | `Some(ac)`       | `Some(ac)` unchanged           |
pub fn resolve_access_control(
    is_private: bool,
    access_control: Option<AccessControl>,
) -> Result<Option<AccessControl>, ValidationErrors> {
    match (is_private, access_control) {
        (false, None) => Ok(None),
        (false, Some(_)) => {
            let mut errors = ValidationErrors::new();
            errors.push(
                "is_private",
                "is_private must be true when access_control is specified",
            );
            errors.push(
                "access_control",
                "access_control cannot be specified when is_private is false",
            );
            Err(errors)
        }
        (true, None) => Ok(Some(AccessControl::private())),
        (true, Some(access_control)) => Ok(Some(access_control)),
    }
}
