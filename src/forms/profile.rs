//! Profile card and edit form
//!
//! Starts in `Viewing`. Edit opens the form pre-filled from the current
//! profile; cancel discards, save commits and persists.

use crate::error::AppError;
use crate::persistence::Persistence;
use crate::profile::{ProfileDisplay, ProfileInputs, UserProfile};
use crate::storage::KeyValueStore;
use crate::theme::ThemeTarget;

/// Edit state of the profile card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileMode {
    #[default]
    Viewing,
    Editing,
}

/// Binds the stored profile to the profile card
#[derive(Debug)]
pub struct ProfileBinder<S, T> {
    persistence: Persistence<S, T>,
    user: UserProfile,
    mode: ProfileMode,
}

impl<S: KeyValueStore, T: ThemeTarget> ProfileBinder<S, T> {
    /// Load the stored profile
    pub fn new(persistence: Persistence<S, T>) -> Self {
        let user = persistence.load_user();
        Self {
            persistence,
            user,
            mode: ProfileMode::Viewing,
        }
    }

    pub fn mode(&self) -> ProfileMode {
        self.mode
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn persistence(&self) -> &Persistence<S, T> {
        &self.persistence
    }

    /// Current card contents
    pub fn display(&self) -> ProfileDisplay {
        ProfileDisplay::from(&self.user)
    }

    /// Open the edit form, returning its initial values
    pub fn begin_edit(&mut self) -> ProfileInputs {
        self.mode = ProfileMode::Editing;
        ProfileInputs::from(&self.user)
    }

    /// Close the edit form without saving
    pub fn cancel(&mut self) {
        self.mode = ProfileMode::Viewing;
    }

    /// Apply the form inputs, persist, and close the form.
    ///
    /// Ignored while `Viewing`. The in-memory profile is updated and the
    /// form closed even if the write fails; the error is returned.
    pub fn commit(&mut self, inputs: &ProfileInputs) -> Result<ProfileDisplay, AppError> {
        if self.mode != ProfileMode::Editing {
            log::debug!("Profile commit ignored (not editing)");
            return Ok(self.display());
        }

        self.user.apply_inputs(inputs);
        self.mode = ProfileMode::Viewing;
        self.persistence.save_user(&self.user)?;
        Ok(self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::USER_KEY;
    use crate::profile::AVATAR_PLACEHOLDER;
    use crate::storage::MemoryStore;
    use crate::theme::ThemeFlag;
    use std::rc::Rc;

    fn binder(store: Rc<MemoryStore>) -> ProfileBinder<Rc<MemoryStore>, ThemeFlag> {
        ProfileBinder::new(Persistence::new(store, ThemeFlag::new()))
    }

    #[test]
    fn test_initial_display_uses_defaults() {
        let b = binder(Rc::new(MemoryStore::new()));
        assert_eq!(b.mode(), ProfileMode::Viewing);
        let display = b.display();
        assert_eq!(display.name, "Jane Doe");
        assert_eq!(display.email, "jane@example.com");
        assert_eq!(display.bio, "API developer");
        assert_eq!(display.avatar_src, AVATAR_PLACEHOLDER);
    }

    #[test]
    fn test_begin_edit_prefills_inputs() {
        let mut b = binder(Rc::new(MemoryStore::new()));
        let inputs = b.begin_edit();
        assert_eq!(b.mode(), ProfileMode::Editing);
        assert_eq!(inputs.name, "Jane Doe");
        assert_eq!(inputs.avatar, "");
    }

    #[test]
    fn test_cancel_discards_without_saving() {
        let store = Rc::new(MemoryStore::new());
        let mut b = binder(store.clone());
        b.begin_edit();
        b.cancel();
        assert_eq!(b.mode(), ProfileMode::Viewing);
        assert!(store.get(USER_KEY).is_none());
    }

    #[test]
    fn test_commit_persists_and_returns_to_viewing() {
        let store = Rc::new(MemoryStore::new());
        let mut b = binder(store.clone());
        let mut inputs = b.begin_edit();
        inputs.name = "Ada".to_string();
        inputs.avatar = "https://example.com/a.png".to_string();

        let display = b.commit(&inputs).unwrap();
        assert_eq!(b.mode(), ProfileMode::Viewing);
        assert_eq!(display.name, "Ada");
        assert_eq!(display.avatar_src, "https://example.com/a.png");

        // A fresh binder sees the saved profile
        let reloaded = binder(store);
        assert_eq!(reloaded.user().name, "Ada");
        assert_eq!(reloaded.user().bio, "API developer");
    }

    #[test]
    fn test_commit_empty_inputs() {
        let mut b = binder(Rc::new(MemoryStore::new()));
        b.begin_edit();
        let display = b.commit(&ProfileInputs::default()).unwrap();
        assert_eq!(display.name, "Jane Doe");
        assert_eq!(display.email, "jane@example.com");
        assert_eq!(display.bio, "");
        assert_eq!(display.avatar_src, AVATAR_PLACEHOLDER);
    }

    #[test]
    fn test_commit_while_viewing_is_ignored() {
        let store = Rc::new(MemoryStore::new());
        let mut b = binder(store.clone());
        let inputs = ProfileInputs {
            name: "Ada".to_string(),
            ..ProfileInputs::default()
        };
        let display = b.commit(&inputs).unwrap();
        assert_eq!(display.name, "Jane Doe");
        assert!(store.is_empty());
    }
}
