//! Profile page state: loaded profile, edit form and inline banner.

use zenkai_domain::{Notification, ProfileForm, UserProfile};

/// Banner text after a successful save.
pub const PROFILE_SAVED: &str = "Profile updated successfully!";
/// Banner text after a failed save.
pub const PROFILE_SAVE_FAILED: &str = "Failed to update profile. Please try again.";

/// The profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// Last profile the backend returned.
    pub profile: Option<UserProfile>,
    /// Form contents.
    pub form: ProfileForm,
    /// True while the form is open.
    pub editing: bool,
    /// Inline success or error message.
    pub banner: Option<Notification>,
}

impl ProfileState {
    /// Installs a fetched profile and seeds the form from it.
    pub fn loaded(&mut self, profile: UserProfile) {
        self.form = ProfileForm::from_profile(&profile);
        self.profile = Some(profile);
        self.editing = false;
    }

    /// Opens the form.
    pub fn begin_edit(&mut self) {
        self.editing = true;
        self.banner = None;
    }

    /// Changes the given form fields.
    pub fn update_form(&mut self, username: Option<String>, bio: Option<String>) {
        if let Some(username) = username {
            self.form.username = username;
        }
        if let Some(bio) = bio {
            self.form.bio = bio;
        }
    }

    /// Closes the form and restores it from the loaded profile.
    pub fn cancel(&mut self) {
        self.form = self
            .profile
            .as_ref()
            .map(ProfileForm::from_profile)
            .unwrap_or_default();
        self.editing = false;
        self.banner = None;
    }

    /// Records a successful save.
    pub fn saved(&mut self, profile: UserProfile) {
        self.loaded(profile);
        self.banner = Some(Notification::success(PROFILE_SAVED));
    }

    /// Records a failed save; the form stays open.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.banner = Some(Notification::error(message));
    }
}
