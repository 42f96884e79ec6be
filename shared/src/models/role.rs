//! Role Model

use serde::{Deserialize, Serialize};

/// Role entity (RBAC role)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create/update role payload
///
/// The backend replaces both fields on update, so a single payload serves
/// both verbs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpsert {
    pub name: String,
    pub description: String,
}
