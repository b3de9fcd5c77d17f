//! Application preferences
//!
//! Persisted separately from the profile in LocalStorage under `gdg_prefs`.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persistence::fields::{flag, number};

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredPreferences")]
pub struct Preferences {
    // === General ===
    /// Dark theme
    pub dark_mode: bool,
    /// Email notifications
    pub email_notif: bool,
    /// Rows per page in listings
    pub items_per_page: i64,

    // === Rate limiting ===
    pub rate_limit_enabled: bool,
    /// Only meaningful while rate limiting is enabled
    pub requests_per_minute: i64,
    pub max_connections: i64,

    // === Analytics ===
    pub analytics_enabled: bool,
    pub performance_metrics: bool,
    pub user_behavior: bool,
    /// Days to keep analytics data
    pub data_retention: i64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            // General
            dark_mode: false,
            email_notif: true,
            items_per_page: 10,

            // Rate limiting
            rate_limit_enabled: true,
            requests_per_minute: 120,
            max_connections: 50,

            // Analytics - on, but no behavior tracking
            analytics_enabled: true,
            performance_metrics: true,
            user_behavior: false,
            data_retention: 90,
        }
    }
}

/// Preferences as found in storage, each field read leniently
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredPreferences {
    dark_mode: Option<Value>,
    email_notif: Option<Value>,
    items_per_page: Option<Value>,
    rate_limit_enabled: Option<Value>,
    requests_per_minute: Option<Value>,
    max_connections: Option<Value>,
    analytics_enabled: Option<Value>,
    performance_metrics: Option<Value>,
    user_behavior: Option<Value>,
    data_retention: Option<Value>,
}

impl From<StoredPreferences> for Preferences {
    fn from(stored: StoredPreferences) -> Self {
        let d = Self::default();
        Self {
            dark_mode: flag(stored.dark_mode, d.dark_mode),
            email_notif: flag(stored.email_notif, d.email_notif),
            items_per_page: number(stored.items_per_page, d.items_per_page),
            rate_limit_enabled: flag(stored.rate_limit_enabled, d.rate_limit_enabled),
            requests_per_minute: number(stored.requests_per_minute, d.requests_per_minute),
            max_connections: number(stored.max_connections, d.max_connections),
            analytics_enabled: flag(stored.analytics_enabled, d.analytics_enabled),
            performance_metrics: flag(stored.performance_metrics, d.performance_metrics),
            user_behavior: flag(stored.user_behavior, d.user_behavior),
            data_retention: number(stored.data_retention, d.data_retention),
        }
    }
}

impl Preferences {
    /// Replace zero numeric fields with their defaults.
    ///
    /// Zero is treated as "unset", so a stored 0 never survives a load into
    /// the settings form.
    pub fn with_falsy_fallback(mut self) -> Self {
        let defaults = Self::default();
        self.items_per_page = or_default(self.items_per_page, defaults.items_per_page);
        self.requests_per_minute =
            or_default(self.requests_per_minute, defaults.requests_per_minute);
        self.max_connections = or_default(self.max_connections, defaults.max_connections);
        self.data_retention = or_default(self.data_retention, defaults.data_retention);
        self
    }
}

fn or_default(value: i64, default: i64) -> i64 {
    if value == 0 { default } else { value }
}

/// Coerce a numeric form input, falling back to `default` when the input
/// is empty, not a number, or zero.
///
/// Fractions are truncated toward zero; a fraction that truncates to zero
/// falls back as well.
pub fn coerce_number(input: &str, default: i64) -> i64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => or_default(value.trunc() as i64, default),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert!(!prefs.dark_mode);
        assert!(prefs.email_notif);
        assert_eq!(prefs.items_per_page, 10);
        assert_eq!(prefs.requests_per_minute, 120);
        assert_eq!(prefs.max_connections, 50);
        assert!(!prefs.user_behavior);
        assert_eq!(prefs.data_retention, 90);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(json["darkMode"], false);
        assert_eq!(json["itemsPerPage"], 10);
        assert_eq!(json["requestsPerMinute"], 120);
        assert_eq!(json["dataRetention"], 90);
    }

    #[test]
    fn test_falsy_fallback_replaces_zero_only() {
        let prefs = Preferences {
            items_per_page: 0,
            requests_per_minute: 0,
            max_connections: -3,
            data_retention: 30,
            ..Preferences::default()
        }
        .with_falsy_fallback();
        assert_eq!(prefs.items_per_page, 10);
        assert_eq!(prefs.requests_per_minute, 120);
        assert_eq!(prefs.max_connections, -3);
        assert_eq!(prefs.data_retention, 30);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("25", 10), 25);
        assert_eq!(coerce_number("  25 ", 10), 25);
        assert_eq!(coerce_number("", 10), 10);
        assert_eq!(coerce_number("0", 10), 10);
        assert_eq!(coerce_number("abc", 10), 10);
        assert_eq!(coerce_number("NaN", 10), 10);
        assert_eq!(coerce_number("inf", 10), 10);
        assert_eq!(coerce_number("12.9", 10), 12);
        assert_eq!(coerce_number("0.4", 10), 10);
        assert_eq!(coerce_number("-5", 10), -5);
        assert_eq!(coerce_number("1e3", 10), 1000);
    }

    #[test]
    fn test_bad_field_falls_back_alone() {
        for bad in ["null", "\"\"", "\"many\"", "true"] {
            let json = format!(r#"{{"darkMode":true,"itemsPerPage":{},"dataRetention":30}}"#, bad);
            let prefs: Preferences = serde_json::from_str(&json).unwrap();
            assert!(prefs.dark_mode, "{}", bad);
            assert_eq!(prefs.items_per_page, 10, "{}", bad);
            assert_eq!(prefs.data_retention, 30, "{}", bad);
        }

        let prefs: Preferences =
            serde_json::from_str(r#"{"darkMode":true,"itemsPerPage":12.5}"#).unwrap();
        assert!(prefs.dark_mode);
        assert_eq!(prefs.items_per_page, 12);
    }

    proptest! {
        #[test]
        fn prop_coerce_nonzero_integers_roundtrip(n in any::<i32>().prop_filter("nonzero", |n| *n != 0)) {
            prop_assert_eq!(coerce_number(&n.to_string(), 10), i64::from(n));
        }
    }
}
