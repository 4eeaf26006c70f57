use serde::{Deserialize, Serialize};

/// Group and user identities granted one kind of access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessList {
    #[serde(default)]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub user_ids: Vec<String>,
}

/// Read/write grants of a resource.
///
/// Carried as `Option<AccessControl>`: `None` (JSON `null`) means the resource is public,
/// `Some` restricts it to the listed groups and users. `Some` with empty lists is visible to
/// its owner only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    #[serde(default)]
    pub read: AccessList,
    #[serde(default)]
    pub write: AccessList,
}

impl AccessControl {
    /// Owner-only access: every list empty.
    pub fn private() -> Self {
        Self::default()
    }

    pub fn is_owner_only(&self) -> bool {
        *self == Self::private()
    }
}
