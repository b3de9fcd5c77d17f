//! Form binders and view dispatch
//!
//! Each page declares which view it is (`<body data-view="...">`);
//! [`Page::init`] applies the stored theme and builds that view's binder.

pub mod profile;
pub mod settings;

pub use profile::{ProfileBinder, ProfileMode};
pub use settings::{Checkbox, NumberInput, SettingsBinder, SettingsControls};

use crate::persistence::Persistence;
use crate::storage::KeyValueStore;
use crate::theme::ThemeTarget;

/// Page identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Profile,
    Settings,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Profile => "profile",
            View::Settings => "settings",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "profile" => Some(View::Profile),
            "settings" | "preferences" => Some(View::Settings),
            _ => None,
        }
    }
}

/// The binder running on the current page
#[derive(Debug)]
pub enum Page<S, T> {
    Profile(ProfileBinder<S, T>),
    Settings(SettingsBinder<S, T>),
}

impl<S: KeyValueStore, T: ThemeTarget> Page<S, T> {
    /// Apply the stored theme, then bind `view` (if any)
    pub fn init(view: Option<View>, persistence: Persistence<S, T>) -> Option<Self> {
        persistence.apply_stored_theme();

        let Some(view) = view else {
            log::info!("No view declared, theme only");
            return None;
        };

        log::info!("Binding {} view", view.as_str());
        Some(match view {
            View::Profile => Page::Profile(ProfileBinder::new(persistence)),
            View::Settings => Page::Settings(SettingsBinder::new(persistence)),
        })
    }

    pub fn view(&self) -> View {
        match self {
            Page::Profile(_) => View::Profile,
            Page::Settings(_) => View::Settings,
        }
    }
}
