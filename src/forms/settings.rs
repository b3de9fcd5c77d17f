//! Settings form
//!
//! Controls are initialized from stored preferences with the falsy
//! fallback. Two checkboxes gate other controls:
//! - analytics off disables performance metrics, user behavior, retention
//! - rate limiting off disables requests per minute
//!
//! Disabled controls keep their values and are still saved.

use std::time::Duration;

use crate::consts::{SAVED_MESSAGE, SAVED_MESSAGE_CLEAR_MS};
use crate::error::AppError;
use crate::persistence::Persistence;
use crate::preferences::{Preferences, coerce_number};
use crate::storage::KeyValueStore;
use crate::theme::ThemeTarget;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkbox {
    pub checked: bool,
    pub disabled: bool,
}

impl Checkbox {
    fn new(checked: bool) -> Self {
        Self {
            checked,
            disabled: false,
        }
    }
}

/// Numeric input; holds raw text until coerced on save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberInput {
    pub value: String,
    pub disabled: bool,
}

impl NumberInput {
    fn new(value: i64) -> Self {
        Self {
            value: value.to_string(),
            disabled: false,
        }
    }
}

/// State of every control in the settings form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsControls {
    pub dark_mode: Checkbox,
    pub email_notif: Checkbox,
    pub items_per_page: NumberInput,

    pub rate_limit_enabled: Checkbox,
    pub requests_per_minute: NumberInput,
    pub max_connections: NumberInput,

    pub analytics_enabled: Checkbox,
    pub performance_metrics: Checkbox,
    pub user_behavior: Checkbox,
    pub data_retention: NumberInput,
}

impl SettingsControls {
    /// Controls for `prefs`, zero numbers shown as defaults, dependencies applied
    pub fn from_prefs(prefs: &Preferences) -> Self {
        let prefs = prefs.clone().with_falsy_fallback();
        let mut controls = Self {
            dark_mode: Checkbox::new(prefs.dark_mode),
            email_notif: Checkbox::new(prefs.email_notif),
            items_per_page: NumberInput::new(prefs.items_per_page),

            rate_limit_enabled: Checkbox::new(prefs.rate_limit_enabled),
            requests_per_minute: NumberInput::new(prefs.requests_per_minute),
            max_connections: NumberInput::new(prefs.max_connections),

            analytics_enabled: Checkbox::new(prefs.analytics_enabled),
            performance_metrics: Checkbox::new(prefs.performance_metrics),
            user_behavior: Checkbox::new(prefs.user_behavior),
            data_retention: NumberInput::new(prefs.data_retention),
        };
        controls.update_dependents();
        controls
    }

    /// Re-evaluate both dependency rules
    pub fn update_dependents(&mut self) {
        self.update_analytics_dependents();
        self.update_rate_limit_dependents();
    }

    pub fn update_analytics_dependents(&mut self) {
        let disabled = !self.analytics_enabled.checked;
        self.performance_metrics.disabled = disabled;
        self.user_behavior.disabled = disabled;
        self.data_retention.disabled = disabled;
    }

    pub fn update_rate_limit_dependents(&mut self) {
        self.requests_per_minute.disabled = !self.rate_limit_enabled.checked;
    }

    /// Read every control (disabled ones included) into a full record
    pub fn to_prefs(&self) -> Preferences {
        let defaults = Preferences::default();
        Preferences {
            dark_mode: self.dark_mode.checked,
            email_notif: self.email_notif.checked,
            items_per_page: coerce_number(&self.items_per_page.value, defaults.items_per_page),

            rate_limit_enabled: self.rate_limit_enabled.checked,
            requests_per_minute: coerce_number(
                &self.requests_per_minute.value,
                defaults.requests_per_minute,
            ),
            max_connections: coerce_number(&self.max_connections.value, defaults.max_connections),

            analytics_enabled: self.analytics_enabled.checked,
            performance_metrics: self.performance_metrics.checked,
            user_behavior: self.user_behavior.checked,
            data_retention: coerce_number(&self.data_retention.value, defaults.data_retention),
        }
    }
}

/// Binds stored preferences to the settings form
#[derive(Debug)]
pub struct SettingsBinder<S, T> {
    persistence: Persistence<S, T>,
    controls: SettingsControls,
    message: String,
}

impl<S: KeyValueStore, T: ThemeTarget> SettingsBinder<S, T> {
    /// Load stored preferences into the controls
    pub fn new(persistence: Persistence<S, T>) -> Self {
        let controls = SettingsControls::from_prefs(&persistence.load_prefs());
        Self {
            persistence,
            controls,
            message: String::new(),
        }
    }

    pub fn controls(&self) -> &SettingsControls {
        &self.controls
    }

    /// Mutable controls (the page syncs user input here before saving)
    pub fn controls_mut(&mut self) -> &mut SettingsControls {
        &mut self.controls
    }

    pub fn persistence(&self) -> &Persistence<S, T> {
        &self.persistence
    }

    /// Confirmation message, empty when none is showing
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_analytics_enabled(&mut self, enabled: bool) {
        self.controls.analytics_enabled.checked = enabled;
        self.controls.update_analytics_dependents();
    }

    pub fn set_rate_limit_enabled(&mut self, enabled: bool) {
        self.controls.rate_limit_enabled.checked = enabled;
        self.controls.update_rate_limit_dependents();
    }

    /// Save the controls as a new preferences record.
    ///
    /// Shows the confirmation message and returns how long to wait before
    /// calling [`clear_message`](Self::clear_message). The theme follows
    /// the saved `dark_mode` regardless of the write result.
    pub fn save(&mut self) -> Result<Duration, AppError> {
        let prefs = self.controls.to_prefs();
        self.persistence.save_prefs(&prefs)?;
        self.message = SAVED_MESSAGE.to_string();
        Ok(Duration::from_millis(SAVED_MESSAGE_CLEAR_MS))
    }

    /// Hide the confirmation message
    pub fn clear_message(&mut self) {
        self.message.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PREFS_KEY;
    use crate::storage::MemoryStore;
    use crate::theme::ThemeFlag;
    use std::rc::Rc;

    fn binder(store: Rc<MemoryStore>) -> SettingsBinder<Rc<MemoryStore>, ThemeFlag> {
        SettingsBinder::new(Persistence::new(store, ThemeFlag::new()))
    }

    #[test]
    fn test_load_defaults_into_controls() {
        let b = binder(Rc::new(MemoryStore::new()));
        let c = b.controls();
        assert!(!c.dark_mode.checked);
        assert!(c.email_notif.checked);
        assert_eq!(c.items_per_page.value, "10");
        assert_eq!(c.requests_per_minute.value, "120");
        assert_eq!(c.max_connections.value, "50");
        assert_eq!(c.data_retention.value, "90");
        assert!(!c.requests_per_minute.disabled);
        assert!(!c.performance_metrics.disabled);
    }

    #[test]
    fn test_stored_zero_loads_as_default() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(PREFS_KEY, r#"{"itemsPerPage":0,"dataRetention":0,"maxConnections":7}"#)
            .unwrap();
        let b = binder(store);
        assert_eq!(b.controls().items_per_page.value, "10");
        assert_eq!(b.controls().data_retention.value, "90");
        assert_eq!(b.controls().max_connections.value, "7");
    }

    #[test]
    fn test_stored_empty_or_null_loads_as_default() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(
                PREFS_KEY,
                r#"{"darkMode":true,"itemsPerPage":"","requestsPerMinute":null,"maxConnections":7,"dataRetention":30}"#,
            )
            .unwrap();
        let c = binder(store).controls().clone();
        assert_eq!(c.items_per_page.value, "10");
        assert_eq!(c.requests_per_minute.value, "120");
        assert_eq!(c.max_connections.value, "7");
        assert_eq!(c.data_retention.value, "30");
        assert!(c.dark_mode.checked);
    }

    #[test]
    fn test_dependencies_applied_on_load() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(PREFS_KEY, r#"{"analyticsEnabled":false,"rateLimitEnabled":false}"#)
            .unwrap();
        let c = binder(store).controls().clone();
        assert!(c.performance_metrics.disabled);
        assert!(c.user_behavior.disabled);
        assert!(c.data_retention.disabled);
        assert!(c.requests_per_minute.disabled);
        assert!(!c.max_connections.disabled);
        assert!(!c.items_per_page.disabled);
    }

    #[test]
    fn test_analytics_toggle_disables_exactly_dependents() {
        let mut b = binder(Rc::new(MemoryStore::new()));
        let before = b.controls().clone();

        b.set_analytics_enabled(false);
        let c = b.controls();
        assert!(c.performance_metrics.disabled);
        assert!(c.user_behavior.disabled);
        assert!(c.data_retention.disabled);
        assert!(!c.dark_mode.disabled);
        assert!(!c.email_notif.disabled);
        assert!(!c.items_per_page.disabled);
        assert!(!c.rate_limit_enabled.disabled);
        assert!(!c.requests_per_minute.disabled);
        assert!(!c.max_connections.disabled);
        assert!(!c.analytics_enabled.disabled);
        // Values untouched
        assert_eq!(c.performance_metrics.checked, before.performance_metrics.checked);
        assert_eq!(c.user_behavior.checked, before.user_behavior.checked);
        assert_eq!(c.data_retention.value, before.data_retention.value);

        b.set_analytics_enabled(true);
        assert_eq!(*b.controls(), before);
    }

    #[test]
    fn test_rate_limit_toggle() {
        let mut b = binder(Rc::new(MemoryStore::new()));
        b.set_rate_limit_enabled(false);
        assert!(b.controls().requests_per_minute.disabled);
        assert_eq!(b.controls().requests_per_minute.value, "120");
        b.set_rate_limit_enabled(true);
        assert!(!b.controls().requests_per_minute.disabled);
    }

    #[test]
    fn test_disabled_values_still_saved() {
        let store = Rc::new(MemoryStore::new());
        let mut b = binder(store.clone());
        b.controls_mut().data_retention.value = "30".to_string();
        b.controls_mut().user_behavior.checked = true;
        b.set_analytics_enabled(false);
        b.save().unwrap();

        let prefs = b.persistence().load_prefs();
        assert!(!prefs.analytics_enabled);
        assert!(prefs.user_behavior);
        assert_eq!(prefs.data_retention, 30);
    }

    #[test]
    fn test_save_coerces_numbers() {
        let mut b = binder(Rc::new(MemoryStore::new()));
        {
            let c = b.controls_mut();
            c.items_per_page.value = String::new();
            c.requests_per_minute.value = "0".to_string();
            c.max_connections.value = "lots".to_string();
            c.data_retention.value = "45".to_string();
        }
        b.save().unwrap();

        let prefs = b.persistence().load_prefs();
        assert_eq!(prefs.items_per_page, 10);
        assert_eq!(prefs.requests_per_minute, 120);
        assert_eq!(prefs.max_connections, 50);
        assert_eq!(prefs.data_retention, 45);
    }

    #[test]
    fn test_save_applies_theme_and_shows_message() {
        let mut b = binder(Rc::new(MemoryStore::new()));
        b.controls_mut().dark_mode.checked = true;
        let delay = b.save().unwrap();
        assert!(b.persistence().theme().is_dark());
        assert_eq!(b.message(), "Settings saved successfully!");
        assert_eq!(delay, Duration::from_millis(1500));

        // Unchanged value still re-applies the theme
        let applied = b.persistence().theme().times_applied();
        b.save().unwrap();
        assert_eq!(b.persistence().theme().times_applied(), applied + 1);
        assert!(b.persistence().theme().is_dark());

        b.clear_message();
        b.clear_message();
        assert_eq!(b.message(), "");
    }
}
