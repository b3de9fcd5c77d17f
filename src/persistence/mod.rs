//! Record persistence
//!
//! Loads and saves the two records (profile, preferences) as JSON text in a
//! key-value store:
//! - Missing, corrupt or non-object records load as defaults, never as errors
//! - A bad field in an otherwise readable record falls back on its own
//! - Saves overwrite the whole record
//! - Saving preferences re-applies the theme

pub mod fields;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::consts::{PREFS_KEY, USER_KEY};
use crate::error::AppError;
use crate::preferences::Preferences;
use crate::profile::UserProfile;
use crate::storage::KeyValueStore;
use crate::theme::{ThemeTarget, apply_theme};

/// Persistence layer over an injected store and theme target
#[derive(Debug)]
pub struct Persistence<S, T> {
    store: S,
    theme: T,
}

impl<S: KeyValueStore, T: ThemeTarget> Persistence<S, T> {
    pub fn new(store: S, theme: T) -> Self {
        Self { store, theme }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn theme(&self) -> &T {
        &self.theme
    }

    /// Load the user profile (default when absent or unreadable)
    pub fn load_user(&self) -> UserProfile {
        self.load_record(USER_KEY)
    }

    /// Overwrite the stored user profile
    pub fn save_user(&self, user: &UserProfile) -> Result<(), AppError> {
        self.save_record(USER_KEY, user)?;
        log::info!("Profile saved");
        Ok(())
    }

    /// Load preferences (default when absent or unreadable)
    pub fn load_prefs(&self) -> Preferences {
        self.load_record(PREFS_KEY)
    }

    /// Overwrite the stored preferences and apply their theme.
    ///
    /// The theme is applied even when the write fails, so after return the
    /// page always shows `prefs.dark_mode`.
    pub fn save_prefs(&self, prefs: &Preferences) -> Result<(), AppError> {
        let result = self.save_record(PREFS_KEY, prefs);
        apply_theme(&self.theme, prefs.dark_mode);
        result?;
        log::info!("Preferences saved");
        Ok(())
    }

    /// Apply the theme from the stored preferences (page startup)
    pub fn apply_stored_theme(&self) {
        apply_theme(&self.theme, self.load_prefs().dark_mode);
    }

    fn load_record<R: DeserializeOwned + Default>(&self, key: &str) -> R {
        let Some(json) = self.store.get(key) else {
            log::debug!("No '{}' record, using defaults", key);
            return R::default();
        };

        let value = match serde_json::from_str::<Value>(&json) {
            Ok(value) if value.is_object() => value,
            Ok(_) => {
                log::warn!("'{}' record is not an object, using defaults", key);
                return R::default();
            }
            Err(err) => {
                log::warn!("Unreadable '{}' record ({}), using defaults", key, err);
                return R::default();
            }
        };

        match serde_json::from_value(value) {
            Ok(record) => {
                log::debug!("Loaded '{}' record", key);
                record
            }
            Err(err) => {
                log::warn!("Unreadable '{}' record ({}), using defaults", key, err);
                R::default()
            }
        }
    }

    fn save_record<R: Serialize>(&self, key: &str, record: &R) -> Result<(), AppError> {
        let json = serde_json::to_string(record)?;
        self.store.set(key, &json)
    }
}
