//! Client-side authorization
//!
//! [`AccessControl`] is built from the permission grants cached at login and
//! answers "may this view render" by capability name. It is a presence check
//! only: evaluated once per mount, never revalidated against the server.
//! A missing or malformed cache means no capabilities (deny by default).

mod matrix;

pub use matrix::{CheckedState, MatrixEntry, PermissionMatrix};

use std::collections::BTreeSet;
use std::fmt;

use shared::models::RolePermission;

use crate::storage::{Storage, keys};
use crate::{ClientError, ClientResult};

/// Capability names known to the console
pub mod capability {
    pub const VIEW_HOME: &str = "view_home";
    pub const VIEW_DASHBOARD: &str = "view_dashboard";
    pub const USER_SETTING: &str = "user_setting";
    pub const ROLE_SETTING: &str = "role_setting";
    pub const VIEW_CATEGORY: &str = "view_category";
    pub const ADD_CATEGORY: &str = "add_category";
    pub const EDIT_CATEGORY: &str = "edit_category";
    pub const DELETE_CATEGORY: &str = "delete_category";
    pub const VIEW_PROFILE: &str = "view_profile";
    pub const EDIT_PROFILE: &str = "edit_profile";
}

/// Menu a permission belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Menu {
    Home,
    Dashboard,
    Category,
    Profile,
    Setting,
}

impl Menu {
    pub const ALL: [Menu; 5] = [
        Menu::Home,
        Menu::Dashboard,
        Menu::Category,
        Menu::Profile,
        Menu::Setting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Menu::Home => "home",
            Menu::Dashboard => "dashboard",
            Menu::Category => "category",
            Menu::Profile => "profile",
            Menu::Setting => "setting",
        }
    }

    /// Split a permission name into its menu and action key
    ///
    /// `edit_category` → (Category, "edit"), `role_setting` → (Setting,
    /// "role_setting"), `view_dashboard` → (Dashboard, "view"). Names that fit
    /// no menu yield `None`.
    pub fn classify(permission: &str) -> Option<(Menu, String)> {
        for (suffix, menu) in [
            ("_home", Menu::Home),
            ("_category", Menu::Category),
            ("_profile", Menu::Profile),
        ] {
            if permission.contains(suffix) {
                return Some((menu, permission.replacen(suffix, "", 1)));
            }
        }
        match permission {
            "role_setting" | "user_setting" => Some((Menu::Setting, permission.to_string())),
            "view_dashboard" => Some((Menu::Dashboard, "view".to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named capability and the menu it gates
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Grant {
    pub name: String,
    pub menu: Option<Menu>,
}

/// Destinations a gate can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    AccessDenied,
}

/// Outcome of a mount-time check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Render,
    Redirect(Route),
}

/// Sections of the settings view the current user may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsSections {
    pub users: bool,
    pub roles: bool,
}

/// Capability set derived from cached grants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControl {
    names: BTreeSet<String>,
}

impl AccessControl {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// From role-permission links; links without an expanded permission are skipped
    pub fn from_grants(grants: &[RolePermission]) -> Self {
        Self::new(
            grants
                .iter()
                .filter_map(|g| g.permission_name().map(str::to_string)),
        )
    }

    /// From the permission cache in storage
    pub fn from_storage(storage: &dyn Storage) -> Self {
        let Some(raw) = storage.get(keys::USER_PERMISSIONS) else {
            return Self::default();
        };
        match serde_json::from_str::<Vec<RolePermission>>(&raw) {
            Ok(grants) => Self::from_grants(&grants),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed permission cache, denying everything");
                Self::default()
            }
        }
    }

    pub fn can(&self, capability: &str) -> bool {
        self.names.contains(capability)
    }

    pub fn gate(&self, capability: &str) -> Gate {
        if self.can(capability) {
            Gate::Render
        } else {
            Gate::Redirect(Route::AccessDenied)
        }
    }

    /// Like [`gate`](Self::gate) but as an error for `?` use
    pub fn require(&self, capability: &str) -> ClientResult<()> {
        match self.gate(capability) {
            Gate::Render => Ok(()),
            Gate::Redirect(_) => {
                tracing::warn!(capability, "Access denied");
                Err(ClientError::AccessDenied(capability.to_string()))
            }
        }
    }

    /// Settings view: login first, then `view_home`, then per-section grants
    pub fn settings(&self, has_session: bool) -> Result<SettingsSections, Route> {
        if !has_session {
            return Err(Route::Login);
        }
        if !self.can(capability::VIEW_HOME) {
            return Err(Route::AccessDenied);
        }
        Ok(SettingsSections {
            users: self.can(capability::USER_SETTING),
            roles: self.can(capability::ROLE_SETTING),
        })
    }

    /// Every granted capability with its menu
    pub fn grants(&self) -> Vec<Grant> {
        self.names
            .iter()
            .map(|name| Grant {
                name: name.clone(),
                menu: Menu::classify(name).map(|(menu, _)| menu),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
