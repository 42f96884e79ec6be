//! Role permission editor state
//!
//! Groups `/permissions` by menu, derives which boxes are ticked for a role,
//! and turns ticked boxes back into the id list of the full-replace PUT.

use std::collections::{BTreeMap, BTreeSet};

use shared::models::{Permission, RolePermission};

use super::Menu;

/// One tickable permission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEntry {
    /// Action key within the menu (`view`, `edit`, `role_setting`...)
    pub key: String,
    pub id: i64,
    pub label: String,
}

/// Ticked action keys per menu
pub type CheckedState = BTreeMap<Menu, BTreeSet<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    menus: BTreeMap<Menu, Vec<MatrixEntry>>,
}

impl PermissionMatrix {
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        let mut menus: BTreeMap<Menu, Vec<MatrixEntry>> =
            Menu::ALL.iter().map(|m| (*m, Vec::new())).collect();
        for permission in permissions {
            let Some((menu, key)) = Menu::classify(&permission.name) else {
                continue;
            };
            let label = match menu {
                Menu::Setting => title_case(&key.replacen('_', " ", 1)),
                _ => capitalize(&key),
            };
            menus.entry(menu).or_default().push(MatrixEntry {
                key,
                id: permission.id,
                label,
            });
        }
        Self { menus }
    }

    pub fn entries(&self, menu: Menu) -> &[MatrixEntry] {
        self.menus.get(&menu).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ticked state for a role's current grants
    pub fn checked_from_grants(grants: &[RolePermission]) -> CheckedState {
        let mut checked = CheckedState::new();
        for name in grants.iter().filter_map(RolePermission::permission_name) {
            if let Some((menu, key)) = Menu::classify(name) {
                checked.entry(menu).or_default().insert(key);
            }
        }
        checked
    }

    /// Ticked state from capability names
    pub fn checked_from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> CheckedState {
        let mut checked = CheckedState::new();
        for (menu, key) in names.into_iter().filter_map(Menu::classify) {
            checked.entry(menu).or_default().insert(key);
        }
        checked
    }

    /// Permission ids for the ticked boxes; unknown keys are ignored
    pub fn permission_ids(&self, checked: &CheckedState) -> Vec<i64> {
        let mut ids = Vec::new();
        for (menu, keys) in checked {
            let entries = self.entries(*menu);
            for key in keys {
                if let Some(entry) = entries.iter().find(|e| &e.key == key) {
                    ids.push(entry.id);
                }
            }
        }
        ids
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}
