use serde::{Deserialize, Serialize};

use crate::keys::ProfileKey;

/// Tee shirt size collected with the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeeShirtSize {
    #[default]
    NotSpecified,
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

/// A user profile record.
///
/// Exactly one profile exists per externally issued user id; the id and
/// the email are fixed at creation, only `display_name` and
/// `tee_shirt_size` are mutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    user_id: String,
    display_name: String,
    main_email: String,
    tee_shirt_size: TeeShirtSize,
}

impl Profile {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        main_email: impl Into<String>,
        tee_shirt_size: TeeShirtSize,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            main_email: main_email.into(),
            tee_shirt_size,
        }
    }

    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(&self.user_id)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn main_email(&self) -> &str {
        &self.main_email
    }

    pub fn tee_shirt_size(&self) -> TeeShirtSize {
        self.tee_shirt_size
    }

    /// Overwrites the two mutable fields. Email and user id stay fixed.
    pub fn update(&mut self, display_name: impl Into<String>, tee_shirt_size: TeeShirtSize) {
        self.display_name = display_name.into();
        self.tee_shirt_size = tee_shirt_size;
    }
}

/// Caller-supplied profile fields.
///
/// Both fields are optional: absent fields default on first creation and
/// keep their stored value on update (see the facade's `save_profile`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub tee_shirt_size: Option<TeeShirtSize>,
}

/// Derives a display name from the local part of an email address.
///
/// `alice@example.com` becomes `alice`; an address without `@` is used
/// as-is.
pub fn default_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_defaults_to_email_local_part() {
        assert_eq!(default_display_name("alice@example.com"), "alice");
        assert_eq!(default_display_name("bare-name"), "bare-name");
    }

    #[test]
    fn update_leaves_identity_untouched() {
        let mut profile = Profile::new("u-1", "alice", "alice@example.com", TeeShirtSize::M);
        profile.update("Alice Liddell", TeeShirtSize::L);
        assert_eq!(profile.user_id(), "u-1");
        assert_eq!(profile.main_email(), "alice@example.com");
        assert_eq!(profile.display_name(), "Alice Liddell");
        assert_eq!(profile.tee_shirt_size(), TeeShirtSize::L);
    }
}
