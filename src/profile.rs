//! User profile record
//!
//! Persisted in LocalStorage under `gdg_user`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persistence::fields::text;

/// Inline SVG shown when the profile has no avatar
pub const AVATAR_PLACEHOLDER: &str = "data:image/svg+xml;utf8,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"80\" height=\"80\"><rect width=\"100%\" height=\"100%\" fill=\"%23ddd\"/><text x=\"50%\" y=\"50%\" dominant-baseline=\"middle\" text-anchor=\"middle\" font-size=\"18\" fill=\"%23777\">Avatar</text></svg>";

/// User profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredProfile")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub bio: String,
    /// Image URI, empty for none
    pub avatar: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            bio: "API developer".to_string(),
            avatar: String::new(),
        }
    }
}

/// Profile as found in storage; non-string fields fall back one by one
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredProfile {
    name: Option<Value>,
    email: Option<Value>,
    bio: Option<Value>,
    avatar: Option<Value>,
}

impl From<StoredProfile> for UserProfile {
    fn from(stored: StoredProfile) -> Self {
        let d = Self::default();
        Self {
            name: text(stored.name, &d.name),
            email: text(stored.email, &d.email),
            bio: text(stored.bio, &d.bio),
            avatar: text(stored.avatar, &d.avatar),
        }
    }
}

impl UserProfile {
    /// Image source to render (placeholder when no avatar is set)
    pub fn avatar_src(&self) -> &str {
        if self.avatar.is_empty() {
            AVATAR_PLACEHOLDER
        } else {
            &self.avatar
        }
    }

    /// Apply edit-form inputs.
    ///
    /// Empty name, email and avatar inputs keep the current value. Bio is
    /// always replaced, so an empty bio input clears it.
    pub fn apply_inputs(&mut self, inputs: &ProfileInputs) {
        if !inputs.name.is_empty() {
            self.name = inputs.name.clone();
        }
        if !inputs.email.is_empty() {
            self.email = inputs.email.clone();
        }
        self.bio = inputs.bio.clone();
        if !inputs.avatar.is_empty() {
            self.avatar = inputs.avatar.clone();
        }
    }
}

/// Raw values of the profile edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInputs {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
}

impl From<&UserProfile> for ProfileInputs {
    fn from(user: &UserProfile) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// What the profile card shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDisplay {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar_src: String,
}

impl From<&UserProfile> for ProfileDisplay {
    fn from(user: &UserProfile) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_src: user.avatar_src().to_string(),
        }
    }
}
