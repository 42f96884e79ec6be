//! Permission and role-permission models

use serde::{Deserialize, Serialize};

/// Permission entity, identified by its capability name (e.g. `view_home`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One role→permission link, with the permission expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePermission {
    pub id: i64,
    pub role_id: i64,
    pub permission_id: i64,
    #[serde(default)]
    pub permission: Option<Permission>,
}

impl RolePermission {
    /// Name of the linked permission, if the backend expanded it
    pub fn permission_name(&self) -> Option<&str> {
        self.permission.as_ref().map(|p| p.name.as_str())
    }
}

/// Full-replace payload for `PUT /role-permissions/role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissionReplace {
    pub role_id: i64,
    /// Complete set of permission ids; anything not listed is revoked
    pub permission_id: Vec<i64>,
}
