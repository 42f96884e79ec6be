//! Application context: theme and language
//!
//! Both values are persisted in storage and broadcast over `watch` channels,
//! so any number of views can follow changes without polling.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::watch;

use crate::ClientResult;
use crate::storage::{Storage, keys};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    Th,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Th => "th",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "th" => Ok(Language::Th),
            "en" => Ok(Language::En),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current preferences plus their change channels
#[derive(Debug, Clone)]
pub struct AppContext {
    storage: Arc<dyn Storage>,
    theme: Arc<watch::Sender<Theme>>,
    language: Arc<watch::Sender<Language>>,
}

impl AppContext {
    /// Load both preferences; unknown stored values fall back to the defaults
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let theme = read_pref(storage.as_ref(), keys::THEME);
        let language = read_pref(storage.as_ref(), keys::LANGUAGE);
        Self {
            storage,
            theme: Arc::new(watch::Sender::new(theme)),
            language: Arc::new(watch::Sender::new(language)),
        }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    pub fn set_theme(&self, theme: Theme) -> ClientResult<()> {
        self.storage.set(keys::THEME, theme.as_str())?;
        self.theme.send_replace(theme);
        tracing::debug!(%theme, "Theme changed");
        Ok(())
    }

    pub fn set_language(&self, language: Language) -> ClientResult<()> {
        self.storage.set(keys::LANGUAGE, language.as_str())?;
        self.language.send_replace(language);
        tracing::debug!(%language, "Language changed");
        Ok(())
    }

    pub fn subscribe_theme(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }

    pub fn subscribe_language(&self) -> watch::Receiver<Language> {
        self.language.subscribe()
    }
}

fn read_pref<T: FromStr + Default>(storage: &dyn Storage, key: &str) -> T {
    storage
        .get(key)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}
