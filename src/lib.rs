//! GDG Settings - browser profile and preferences editor
//!
//! Core modules:
//! - `storage`: Key-value backends (LocalStorage, in-memory)
//! - `persistence`: Record load/save with default fallback
//! - `theme`: Dark mode marker
//! - `profile` / `preferences`: The two persisted records
//! - `forms`: Profile and settings binders, view dispatch

pub mod error;
pub mod forms;
pub mod persistence;
pub mod preferences;
pub mod profile;
pub mod storage;
pub mod theme;

pub use error::AppError;
pub use forms::{Page, ProfileBinder, SettingsBinder, View};
pub use persistence::Persistence;
pub use preferences::Preferences;
pub use profile::UserProfile;
pub use storage::{KeyValueStore, MemoryStore};
pub use theme::{ThemeFlag, ThemeTarget};

/// Configuration constants
pub mod consts {
    /// Storage key of the user profile record
    pub const USER_KEY: &str = "gdg_user";
    /// Storage key of the preferences record
    pub const PREFS_KEY: &str = "gdg_prefs";

    /// Confirmation shown after saving settings
    pub const SAVED_MESSAGE: &str = "Settings saved successfully!";
    /// Delay before the confirmation clears (ms)
    pub const SAVED_MESSAGE_CLEAR_MS: u64 = 1500;

    /// Body class for the dark theme
    pub const DARK_CLASS: &str = "dark";
    /// Class hiding the profile edit form
    pub const HIDDEN_CLASS: &str = "hidden";
    /// Body attribute naming the page's view
    pub const VIEW_ATTRIBUTE: &str = "data-view";
}
