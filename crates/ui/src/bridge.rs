//! UI Bridge Module
//!
//! Defines the communication protocol between a front end and the async
//! controller: the front end sends `UiCommand`s and renders `UiUpdate`s.

use chrono::NaiveDate;
use zenkai_application::GateView;
use zenkai_domain::{
    Catalog, Notification, PhotoUpload, Pose, PublicProfile, Registration,
    SessionIdentity, TimeRange, UserProfile, WorkoutForm,
};

use crate::state::{ProfileState, ProgressState, VaultState};

/// Commands sent from the front end to the controller.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Open a route, e.g. `/progress` or `/login?verified=true`.
    Navigate { path: String },

    /// Re-check the session with the backend.
    CheckAuth,

    // --- Account ---
    /// Submit the login form.
    Login { email: String, password: String },

    /// Request a password reset link.
    ForgotPassword { email: String },

    /// Build the Google authorization URL.
    GoogleSignIn,

    /// Submit the registration form.
    Register(Registration),

    /// Sign out.
    Logout,

    /// Fetch the identity behind the current session.
    WhoAmI,

    /// Landing page call to action.
    GetStarted,

    // --- Admin catalog ---
    /// Create a muscle group.
    AddMuscleGroup { name: String },

    /// Rename a muscle group.
    RenameMuscleGroup { old: String, new: String },

    /// Delete a muscle group.
    DeleteMuscleGroup { name: String },

    /// Add an exercise to a group.
    AddExercise { group: String, exercise: String },

    /// Remove an exercise from a group.
    DeleteExercise { group: String, exercise: String },

    // --- Progress ---
    /// Log a workout.
    LogWorkout(WorkoutForm),

    /// Log a body-weight entry.
    LogWeight { value: String },

    /// Delete a logged workout.
    DeleteWorkout { id: String },

    /// Change the weight chart window.
    SetTimeRange(TimeRange),

    // --- Profile ---
    /// Open the profile form.
    EditProfile,

    /// Edit profile form fields; `None` leaves a field as it is.
    UpdateProfileForm {
        username: Option<String>,
        bio: Option<String>,
    },

    /// Close the form without saving.
    CancelEdit,

    /// Save the form, uploading a new picture first if one is given.
    SaveProfile { picture: Option<PhotoUpload> },

    // --- Transformation vault ---
    /// Upload a progress photo.
    UploadTransformation {
        photo: Option<PhotoUpload>,
        pose: Option<Pose>,
        date: NaiveDate,
    },

    /// Save the record of the last photo whose record failed to save.
    RetryTransformation,

    /// Resolve a signed URL for a stored image.
    ResolveImage { object_name: String },

    /// Refetch the gallery.
    RefreshGallery,
}

/// Updates sent from the controller to the front end.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Auth view for the mounted page.
    Auth(GateView),

    /// A route was mounted.
    Navigated { path: String },

    /// Show a toast.
    Notify(Notification),

    /// Request started or finished.
    Busy(bool),

    /// Admin catalog changed.
    Catalog(Catalog),

    /// Progress page changed.
    Progress(Box<ProgressState>),

    /// Profile page changed.
    Profile(Box<ProfileState>),

    /// Home page summary.
    Home(Box<UserProfile>),

    /// Public profile loaded.
    PublicProfile(Box<PublicProfile>),

    /// Vault page changed.
    Vault(Box<VaultState>),

    /// A signed image URL was resolved.
    ImageUrl { object_name: String, url: String },

    /// Identity behind the session.
    Identity(SessionIdentity),

    /// Where to send the browser for Google sign-in.
    GoogleUrl(String),
}
