//! Light/dark theme marker
//!
//! The whole theme is one class on the document body; stylesheets key off it.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::DARK_CLASS;

/// Something that can show or hide the dark marker
pub trait ThemeTarget {
    fn set_dark_mode(&self, enabled: bool);
}

impl<T: ThemeTarget + ?Sized> ThemeTarget for &T {
    fn set_dark_mode(&self, enabled: bool) {
        (**self).set_dark_mode(enabled)
    }
}

impl<T: ThemeTarget + ?Sized> ThemeTarget for Rc<T> {
    fn set_dark_mode(&self, enabled: bool) {
        (**self).set_dark_mode(enabled)
    }
}

/// Apply the theme. Idempotent, safe to call redundantly.
pub fn apply_theme(target: &impl ThemeTarget, is_dark: bool) {
    target.set_dark_mode(is_dark);
    log::debug!("Theme applied ({})", if is_dark { DARK_CLASS } else { "light" });
}

/// In-memory theme flag (native runs and tests)
#[derive(Debug, Default)]
pub struct ThemeFlag {
    dark: Cell<bool>,
    applied: Cell<u32>,
}

impl ThemeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }

    /// How many times the theme has been applied
    pub fn times_applied(&self) -> u32 {
        self.applied.get()
    }
}

impl ThemeTarget for ThemeFlag {
    fn set_dark_mode(&self, enabled: bool) {
        self.dark.set(enabled);
        self.applied.set(self.applied.get() + 1);
    }
}

/// `dark` class on `<body>` (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BodyClassTheme {
    body: web_sys::HtmlElement,
}

#[cfg(target_arch = "wasm32")]
impl BodyClassTheme {
    pub fn new(body: web_sys::HtmlElement) -> Self {
        Self { body }
    }
}

#[cfg(target_arch = "wasm32")]
impl ThemeTarget for BodyClassTheme {
    fn set_dark_mode(&self, enabled: bool) {
        if let Err(err) = self
            .body
            .class_list()
            .toggle_with_force(DARK_CLASS, enabled)
        {
            log::warn!("Failed to toggle theme class: {:?}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_theme_is_idempotent() {
        let flag = ThemeFlag::new();
        apply_theme(&flag, true);
        apply_theme(&flag, true);
        assert!(flag.is_dark());
        assert_eq!(flag.times_applied(), 2);

        apply_theme(&flag, false);
        assert!(!flag.is_dark());
    }
}
