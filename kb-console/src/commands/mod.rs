//! Console views
//!
//! Each command is one "mount" of a view: the permission gate is checked once
//! up front, then the view talks to the API and prints.

mod article;
mod auth;
mod category;
mod prefs;
mod profile;
mod role;
mod user;
mod view;

use kb_client::access::{SettingsSections, capability};
use kb_client::{ClientError, ClientResult, KbClient, Route};

use crate::cli::Command;

/// Shared by every view
pub struct Console {
    pub client: KbClient,
    /// Raw JSON instead of tables
    pub json: bool,
}

impl Console {
    /// A session plus `capability`, or an error naming what is missing
    pub fn mount(&self, capability: &str) -> ClientResult<()> {
        self.client.require_session()?;
        self.client.access().require(capability)
    }

    /// Sections of the settings view: login first, then `view_home`
    pub fn settings_sections(&self) -> ClientResult<SettingsSections> {
        match self
            .client
            .access()
            .settings(self.client.session().is_logged_in())
        {
            Ok(sections) => Ok(sections),
            Err(Route::Login) => Err(ClientError::Unauthorized),
            Err(Route::AccessDenied) => Err(ClientError::AccessDenied(capability::VIEW_HOME.into())),
        }
    }

    /// The settings view, narrowed to one of its sections
    pub fn mount_settings(
        &self,
        capability: &str,
        section: fn(&SettingsSections) -> bool,
    ) -> ClientResult<()> {
        if section(&self.settings_sections()?) {
            Ok(())
        } else {
            tracing::warn!(capability, "Settings section hidden");
            Err(ClientError::AccessDenied(capability.to_string()))
        }
    }
}

pub async fn run(console: &Console, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => auth::login(console, &username, &password).await,
        Command::Logout => auth::logout(console).await,
        Command::Whoami => auth::whoami(console),
        Command::Refresh => auth::refresh(console).await,
        Command::ChangePassword {
            username,
            old,
            new,
            confirm,
        } => auth::change_password(console, &username, &old, &new, &confirm).await,
        Command::Dashboard => view::dashboard(console),
        Command::Settings => view::settings(console),
        Command::Category(cmd) => category::run(console, cmd).await,
        Command::User(cmd) => user::run(console, cmd).await,
        Command::Role(cmd) => role::run(console, cmd).await,
        Command::Profile(cmd) => profile::run(console, cmd).await,
        Command::Article(cmd) => article::run(console, cmd).await,
        Command::Prefs(cmd) => prefs::run(console, cmd),
        Command::Icons { search } => view::icons(search.as_deref()),
    }
}
