//! Roles and permission assignment

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{Permission, Role, RolePermission, RolePermissionReplace, RoleUpsert};

use super::{refuse, required};
use crate::list::ListSource;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone)]
pub struct RolesApi<H> {
    http: H,
}

/// Trimmed create/update payload; both fields are mandatory
fn upsert(name: &str, description: &str) -> ClientResult<RoleUpsert> {
    Ok(RoleUpsert {
        name: required(name, "Please enter role name")?,
        description: required(description, "Please enter role description")?,
    })
}

impl<H: HttpClient> RolesApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Role>> {
        self.http.get("/roles").await
    }

    /// Role by exact name, from a fresh list
    pub async fn find_by_name(&self, name: &str) -> ClientResult<Role> {
        let name = required(name, "Select a role")?;
        self.list()
            .await?
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| refuse("Selected role not found"))
    }

    pub async fn create(&self, name: &str, description: &str) -> ClientResult<Role> {
        let req = upsert(name, description)?;
        self.http.post("/roles", &req).await
    }

    pub async fn update(&self, id: i64, name: &str, description: &str) -> ClientResult<Role> {
        let req = upsert(name, description)?;
        self.http.put(&format!("/roles/{id}"), &req).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Value> {
        tracing::info!(role_id = id, "Deleting role");
        self.http.delete(&format!("/roles/{id}")).await
    }

    /// Every permission the backend knows
    pub async fn permissions(&self) -> ClientResult<Vec<Permission>> {
        self.http.get("/permissions").await
    }

    pub async fn role_permissions(&self, role_id: i64) -> ClientResult<Vec<RolePermission>> {
        self.http
            .get(&format!("/role-permissions/role/{role_id}"))
            .await
    }

    /// Full replace: the role ends up with exactly `permission_ids`
    pub async fn replace_role_permissions(
        &self,
        role_id: i64,
        permission_ids: Vec<i64>,
    ) -> ClientResult<Vec<RolePermission>> {
        tracing::info!(role_id, count = permission_ids.len(), "Replacing role permissions");
        let req = RolePermissionReplace {
            role_id,
            permission_id: permission_ids,
        };
        self.http.put("/role-permissions/role", &req).await
    }
}

#[async_trait]
impl<H: HttpClient> ListSource for RolesApi<H> {
    type Item = Role;

    async fn fetch(&self) -> ClientResult<Vec<Role>> {
        self.list().await
    }
}
