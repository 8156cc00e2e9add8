//! Page flows driven through the controller against a fake backend.

#![allow(clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

mod common;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use zenkai_application::{GateState, LOGIN_REQUIRED_MESSAGE};
use zenkai_domain::{
    AuthStatus, ClientConfig, GoogleOAuthConfig, HttpMethod, Notification, PhotoUpload, Pose,
    Registration, RequestBody, TimeRange, WorkoutForm,
};
use zenkai_ui::state::{PROFILE_SAVE_FAILED, PROFILE_SAVED, UPLOAD_MISSING_INPUT, UPLOAD_SUCCEEDED};
use zenkai_ui::{ACCOUNT_VERIFIED, REGISTRATION_SENT, UiCommand, UiUpdate};

use common::{FakeBackend, Harness, PASSWORD, navigations, notifications};

fn go(path: &str) -> UiCommand {
    UiCommand::Navigate {
        path: path.to_string(),
    }
}

fn profile_json() -> serde_json::Value {
    json!({
        "username": "goku",
        "bio": "saiyan",
        "profilePictureUrl": "https://cdn.test/goku.png",
        "powerLevel": 3
    })
}

fn photo() -> PhotoUpload {
    PhotoUpload {
        file_name: "obj.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

async fn signed_in_on(path: &str, backend: std::sync::Arc<FakeBackend>) -> Harness {
    let mut harness = Harness::start(backend).await;
    harness.controller.handle(go(path)).await;
    assert_eq!(harness.route().as_deref(), Some(path));
    harness.drain();
    harness
}

// --- Gate and auth flows ---

#[tokio::test]
async fn test_protected_page_sends_anonymous_visitor_to_login_once() {
    let mut harness = Harness::start(FakeBackend::new()).await;
    assert_eq!(harness.controller.store().status(), AuthStatus::Unauthenticated);
    harness.drain();

    harness.controller.handle(go("/progress")).await;

    let updates = harness.drain();
    assert_eq!(navigations(&updates), vec!["/progress", "/login"]);
    assert_eq!(
        notifications(&updates),
        vec![Notification::info(LOGIN_REQUIRED_MESSAGE)]
    );
    assert_eq!(harness.route().as_deref(), Some("/login"));
    assert_eq!(harness.backend.count(HttpMethod::Get, "/api/workoutLogs"), 0);
}

#[tokio::test]
async fn test_login_then_lands_on_home() {
    let backend = FakeBackend::new();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    let mut harness = Harness::start(backend).await;
    harness.controller.handle(go("/login")).await;
    harness.drain();

    harness
        .controller
        .handle(UiCommand::Login {
            email: "goku@capsule.corp".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    let updates = harness.drain();
    assert_eq!(
        notifications(&updates),
        vec![Notification::success("Login successful")]
    );
    assert_eq!(harness.route().as_deref(), Some("/home"));
    assert_eq!(harness.controller.store().status(), AuthStatus::Authenticated);
    assert!(updates.iter().any(
        |u| matches!(u, UiUpdate::Home(profile) if profile.username == "goku")
    ));
}

#[tokio::test]
async fn test_rejected_login_stays_on_page() {
    let mut harness = Harness::start(FakeBackend::new()).await;
    harness.controller.handle(go("/login")).await;
    harness.drain();

    harness
        .controller
        .handle(UiCommand::Login {
            email: "goku@capsule.corp".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    let updates = harness.drain();
    assert_eq!(
        notifications(&updates),
        vec![Notification::error("Invalid email or password")]
    );
    assert_eq!(harness.route().as_deref(), Some("/login"));
    assert_eq!(harness.controller.store().status(), AuthStatus::Unauthenticated);
    assert_eq!(harness.backend.count(HttpMethod::Get, "/auth/me"), 1);
}

#[tokio::test]
async fn test_blank_login_is_rejected_locally() {
    let mut harness = Harness::start(FakeBackend::new()).await;
    harness.controller.handle(go("/login")).await;
    harness.drain();

    harness
        .controller
        .handle(UiCommand::Login {
            email: " ".to_string(),
            password: String::new(),
        })
        .await;

    assert_eq!(
        notifications(&harness.drain()),
        vec![Notification::error("Please enter your email and password")]
    );
    assert_eq!(harness.backend.count(HttpMethod::Post, "/auth/login"), 0);
}

#[tokio::test]
async fn test_logout_goes_to_landing_without_login_prompt() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    let mut harness = signed_in_on("/profile", backend).await;

    harness.controller.handle(UiCommand::Logout).await;

    let updates = harness.drain();
    assert_eq!(harness.route().as_deref(), Some("/"));
    assert_eq!(
        notifications(&updates),
        vec![Notification::success("Successfully logged out")]
    );
    let snapshot = harness.controller.store().snapshot();
    assert_eq!(snapshot.status, AuthStatus::Unauthenticated);
    assert!(snapshot.is_logout);

    harness.controller.handle(go("/transformation-vault")).await;
    let updates = harness.drain();
    assert_eq!(harness.route().as_deref(), Some("/login"));
    assert!(notifications(&updates).is_empty());
}

#[tokio::test]
async fn test_login_page_forwards_signed_in_user_and_confirms_verification() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    let mut harness = Harness::start(backend).await;

    harness.controller.handle(go("/login?verified=true")).await;

    let updates = harness.drain();
    assert_eq!(navigations(&updates), vec!["/login", "/home"]);
    assert_eq!(
        notifications(&updates),
        vec![Notification::success(ACCOUNT_VERIFIED)]
    );
}

#[tokio::test]
async fn test_register_page_redirects_signed_in_user_silently() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    let mut harness = Harness::start(backend).await;

    harness.controller.handle(go("/register")).await;

    let updates = harness.drain();
    assert_eq!(harness.route().as_deref(), Some("/home"));
    assert!(notifications(&updates).is_empty());
}

#[tokio::test]
async fn test_landing_page_observes_without_redirect() {
    let mut harness = Harness::start(FakeBackend::signed_in()).await;
    harness.controller.handle(go("/")).await;

    let updates = harness.drain();
    assert_eq!(harness.route().as_deref(), Some("/"));
    assert_eq!(harness.controller.gate_state(), Some(GateState::Rendering));
    assert!(updates.iter().any(|u| matches!(
        u,
        UiUpdate::Auth(view) if view.is_authenticated == Some(true)
    )));
}

#[tokio::test]
async fn test_get_started_depends_on_session() {
    let mut harness = Harness::start(FakeBackend::new()).await;
    harness.controller.handle(go("/")).await;
    harness.controller.handle(UiCommand::GetStarted).await;
    assert_eq!(harness.route().as_deref(), Some("/login"));

    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    let mut harness = Harness::start(backend).await;
    harness.controller.handle(go("/")).await;
    harness.controller.handle(UiCommand::GetStarted).await;
    assert_eq!(harness.route().as_deref(), Some("/home"));
}

#[tokio::test]
async fn test_unreachable_backend_on_start_is_reported() {
    let backend = FakeBackend::new();
    backend.break_route("/auth/me");
    let mut harness = Harness::start(backend).await;

    assert_eq!(harness.controller.store().status(), AuthStatus::Unauthenticated);
    assert_eq!(
        notifications(&harness.drain()),
        vec![Notification::error("Failed to check authentication")]
    );
}

#[tokio::test]
async fn test_expired_session_bounces_to_login() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/api/workouts", &json!([]));
    let mut harness = signed_in_on("/admin", backend).await;

    harness.backend.set_session(false);
    harness
        .controller
        .handle(UiCommand::AddMuscleGroup {
            name: "Legs".to_string(),
        })
        .await;

    let updates = harness.drain();
    assert_eq!(harness.route().as_deref(), Some("/login"));
    assert_eq!(
        notifications(&updates),
        vec![
            Notification::error("Failed to add muscle group"),
            Notification::info(LOGIN_REQUIRED_MESSAGE),
        ]
    );
}

#[tokio::test]
async fn test_unknown_route_keeps_current_page() {
    let mut harness = Harness::start(FakeBackend::new()).await;
    harness.controller.handle(go("/")).await;
    harness.drain();

    harness.controller.handle(go("/nowhere")).await;

    assert_eq!(harness.route().as_deref(), Some("/"));
    assert_eq!(
        notifications(&harness.drain()),
        vec![Notification::error("Page not found: /nowhere")]
    );
}

// --- Account forms ---

#[tokio::test]
async fn test_registration_and_password_reset() {
    let backend = FakeBackend::new();
    backend.on(HttpMethod::Post, "/api/register", 200, "User registered");
    backend.on(HttpMethod::Post, "/auth/forgot-password", 200, "");
    let mut harness = Harness::start(backend).await;
    harness.controller.handle(go("/register")).await;
    harness.drain();

    harness
        .controller
        .handle(UiCommand::Register(Registration {
            first_name: "Son".to_string(),
            last_name: "Goku".to_string(),
            email: "goku@capsule.corp".to_string(),
            password: PASSWORD.to_string(),
            confirm_password: PASSWORD.to_string(),
            agree_terms: true,
        }))
        .await;
    harness
        .controller
        .handle(UiCommand::ForgotPassword {
            email: "goku@capsule.corp".to_string(),
        })
        .await;

    assert_eq!(
        notifications(&harness.drain()),
        vec![
            Notification::info(REGISTRATION_SENT),
            Notification::success("Password reset email sent"),
        ]
    );
    let reset = harness
        .backend
        .last(HttpMethod::Post, "/auth/forgot-password")
        .unwrap();
    assert_eq!(
        reset.query,
        vec![("email".to_string(), "goku@capsule.corp".to_string())]
    );
}

#[tokio::test]
async fn test_google_sign_in_url() {
    let mut harness = Harness::start(FakeBackend::new()).await;
    harness.controller.handle(UiCommand::GoogleSignIn).await;
    assert_eq!(
        notifications(&harness.drain()),
        vec![Notification::error("Google sign-in is not configured")]
    );

    let config = ClientConfig {
        google: Some(GoogleOAuthConfig {
            client_id: "abc".to_string(),
            redirect_uri: "http://localhost:8080/login/oauth2/code/google".to_string(),
        }),
        ..ClientConfig::default()
    };
    let mut harness = Harness::with_config(FakeBackend::new(), &config).await;
    harness.controller.handle(UiCommand::GoogleSignIn).await;
    let url = harness
        .drain()
        .into_iter()
        .find_map(|u| match u {
            UiUpdate::GoogleUrl(url) => Some(url),
            _ => None,
        })
        .unwrap();
    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?client_id=abc"));
    assert!(url.contains("prompt=consent"));
}

#[tokio::test]
async fn test_who_am_i() {
    let mut harness = Harness::start(FakeBackend::signed_in()).await;
    harness.controller.handle(UiCommand::WhoAmI).await;
    let identity = harness
        .drain()
        .into_iter()
        .find_map(|u| match u {
            UiUpdate::Identity(identity) => Some(identity),
            _ => None,
        })
        .unwrap();
    assert_eq!(identity.email, "goku@capsule.corp");
    assert!(identity.is_admin());
}

// --- Admin catalog ---

#[tokio::test]
async fn test_admin_catalog_mutations_apply_responses() {
    let backend = FakeBackend::signed_in();
    backend.on_json(
        HttpMethod::Get,
        "/api/workouts",
        &json!([
            {"id": 1, "name": "Chest", "exercises": ["Bench Press"]},
            {"id": 2, "name": "Back", "exercises": []}
        ]),
    );
    let mut harness = signed_in_on("/admin", backend).await;
    assert!(harness.controller.catalog_state().loaded);

    let backend = harness.backend.clone();
    backend.on_json(
        HttpMethod::Post,
        "/api/workouts",
        &json!({"id": 3, "name": "Legs", "exercises": []}),
    );
    harness
        .controller
        .handle(UiCommand::AddMuscleGroup {
            name: " Legs ".to_string(),
        })
        .await;

    backend.on_json(
        HttpMethod::Put,
        "/api/workouts/Back",
        &json!({"id": 2, "name": "Lats", "exercises": []}),
    );
    harness
        .controller
        .handle(UiCommand::RenameMuscleGroup {
            old: "Back".to_string(),
            new: "Lats".to_string(),
        })
        .await;
    harness
        .controller
        .handle(UiCommand::RenameMuscleGroup {
            old: "Chest".to_string(),
            new: "  ".to_string(),
        })
        .await;
    assert_eq!(backend.count(HttpMethod::Put, "/api/workouts/Chest"), 0);

    backend.on_json(
        HttpMethod::Post,
        "/api/workouts/Chest/exercises",
        &json!({"id": 1, "name": "Chest", "exercises": ["Bench Press", "Dips"]}),
    );
    harness
        .controller
        .handle(UiCommand::AddExercise {
            group: "Chest".to_string(),
            exercise: "Dips".to_string(),
        })
        .await;

    backend.on_json(
        HttpMethod::Delete,
        "/api/workouts/Chest/exercises/bench press",
        &json!({"id": 1, "name": "Chest", "exercises": ["Dips"]}),
    );
    harness
        .controller
        .handle(UiCommand::DeleteExercise {
            group: "Chest".to_string(),
            exercise: "bench press".to_string(),
        })
        .await;

    backend.on(HttpMethod::Delete, "/api/workouts/Legs", 200, "");
    harness
        .controller
        .handle(UiCommand::DeleteMuscleGroup {
            name: "Legs".to_string(),
        })
        .await;

    let catalog = &harness.controller.catalog_state().catalog;
    assert_eq!(catalog.group_names().collect::<Vec<_>>(), vec!["Chest", "Lats"]);
    assert_eq!(catalog.exercises("Chest").unwrap(), ["Dips"]);
    assert!(notifications(&harness.drain()).is_empty());
}

#[tokio::test]
async fn test_admin_conflict_shows_server_message() {
    let backend = FakeBackend::signed_in();
    backend.on_json(
        HttpMethod::Get,
        "/api/workouts",
        &json!([{"id": 1, "name": "Chest", "exercises": []}]),
    );
    backend.on(HttpMethod::Post, "/api/workouts", 409, "Muscle group already exists");
    let mut harness = signed_in_on("/admin", backend).await;

    harness
        .controller
        .handle(UiCommand::AddMuscleGroup {
            name: "Chest".to_string(),
        })
        .await;

    assert_eq!(
        notifications(&harness.drain()),
        vec![Notification::error("Muscle group already exists")]
    );
    assert_eq!(harness.controller.catalog_state().catalog.len(), 1);
    assert_eq!(harness.route().as_deref(), Some("/admin"));
}

// --- Progress ---

#[tokio::test]
async fn test_progress_page_logs_and_charts() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/api/workoutLogs", &json!([]));
    backend.on_json(
        HttpMethod::Get,
        "/api/weightLogs",
        &json!([
            {"id": "a", "weight": 84.0, "date": "2025-03-01T08:00:00Z"},
            {"id": "b", "weight": 82.0, "date": "2025-03-18T08:00:00Z"}
        ]),
    );
    backend.on(HttpMethod::Post, "/api/weightLogs", 200, "");
    backend.on(HttpMethod::Post, "/api/workoutLogs", 200, "");
    let mut harness = signed_in_on("/progress", backend).await;

    let state = harness.controller.progress_state();
    assert_eq!(state.catalog.len(), 6, "catalog falls back to defaults");
    assert_eq!(state.series.values, vec![82.0]);

    harness
        .controller
        .handle(UiCommand::SetTimeRange(TimeRange::Month))
        .await;
    harness
        .controller
        .handle(UiCommand::LogWeight {
            value: "81.5".to_string(),
        })
        .await;
    let state = harness.controller.progress_state();
    assert_eq!(state.series.values, vec![84.0, 82.0, 81.5]);
    assert_eq!(state.latest_weight(), Some(81.5));

    harness
        .controller
        .handle(UiCommand::LogWeight {
            value: "-1".to_string(),
        })
        .await;
    assert_eq!(harness.backend.count(HttpMethod::Post, "/api/weightLogs"), 1);

    harness
        .controller
        .handle(UiCommand::LogWorkout(WorkoutForm {
            muscle_group: "Chest".to_string(),
            exercise: "Bench Press".to_string(),
            sets: "3".to_string(),
            reps: "10".to_string(),
            weight: "80".to_string(),
            notes: String::new(),
        }))
        .await;
    let id = harness.controller.progress_state().workouts[0].id.clone();
    let path = format!("/api/workoutLogs/{id}");
    harness.backend.on(HttpMethod::Delete, &path, 200, "");
    harness
        .controller
        .handle(UiCommand::DeleteWorkout { id })
        .await;
    assert!(harness.controller.progress_state().workouts.is_empty());
    assert_eq!(harness.backend.count(HttpMethod::Delete, &path), 1);
}

#[tokio::test]
async fn test_commands_for_other_pages_are_ignored() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    let mut harness = signed_in_on("/home", backend).await;

    harness
        .controller
        .handle(UiCommand::LogWeight {
            value: "80".to_string(),
        })
        .await;

    assert_eq!(harness.backend.count(HttpMethod::Post, "/api/weightLogs"), 0);
}

// --- Profile ---

#[tokio::test]
async fn test_profile_edit_save_and_cancel() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    backend.on_json(
        HttpMethod::Put,
        "/auth/profile",
        &json!({
            "username": "kakarot",
            "bio": "raised on earth",
            "profilePictureUrl": "https://cdn.test/goku.png"
        }),
    );
    let mut harness = signed_in_on("/profile", backend).await;

    harness.controller.handle(UiCommand::EditProfile).await;
    harness
        .controller
        .handle(UiCommand::UpdateProfileForm {
            username: Some("kakarot".to_string()),
            bio: Some("raised on earth".to_string()),
        })
        .await;
    harness
        .controller
        .handle(UiCommand::SaveProfile { picture: None })
        .await;

    let state = harness.controller.profile_state();
    assert!(!state.editing);
    assert_eq!(state.banner, Some(Notification::success(PROFILE_SAVED)));
    assert_eq!(state.profile.as_ref().unwrap().username, "kakarot");
    let put = harness.backend.last(HttpMethod::Put, "/auth/profile").unwrap();
    assert_eq!(
        put.body,
        RequestBody::Json(json!({
            "username": "kakarot",
            "bio": "raised on earth",
            "profilePictureUrl": "https://cdn.test/goku.png"
        }))
    );

    harness.controller.handle(UiCommand::EditProfile).await;
    harness
        .controller
        .handle(UiCommand::UpdateProfileForm {
            username: Some("scratch".to_string()),
            bio: None,
        })
        .await;
    harness.controller.handle(UiCommand::CancelEdit).await;
    assert_eq!(harness.controller.profile_state().form.username, "kakarot");
}

#[tokio::test]
async fn test_profile_save_failure_keeps_form_open() {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/auth/profile", &profile_json());
    backend.on(HttpMethod::Put, "/auth/profile", 500, "boom");
    let mut harness = signed_in_on("/profile", backend).await;

    harness.controller.handle(UiCommand::EditProfile).await;
    harness
        .controller
        .handle(UiCommand::SaveProfile { picture: None })
        .await;

    let state = harness.controller.profile_state();
    assert!(state.editing);
    assert_eq!(state.banner, Some(Notification::error(PROFILE_SAVE_FAILED)));
    let updates = harness.drain();
    assert!(updates.iter().any(|u| matches!(u, UiUpdate::Busy(true))));
    assert!(updates.iter().any(|u| matches!(u, UiUpdate::Busy(false))));
}

#[tokio::test]
async fn test_public_profile_needs_no_session() {
    let backend = FakeBackend::new();
    backend.on_json(
        HttpMethod::Get,
        "/api/public/profile/vegeta",
        &json!({"username": "vegeta", "powerLevel": 9001}),
    );
    let mut harness = Harness::start(backend).await;

    harness.controller.handle(go("/public/profile/vegeta")).await;

    assert_eq!(harness.controller.gate_state(), None);
    let profile = harness
        .drain()
        .into_iter()
        .find_map(|u| match u {
            UiUpdate::PublicProfile(profile) => Some(profile),
            _ => None,
        })
        .unwrap();
    assert_eq!(profile.power_level, 9001);
    let request = harness
        .backend
        .last(HttpMethod::Get, "/api/public/profile/vegeta")
        .unwrap();
    assert!(!request.with_credentials);
}

// --- Transformation vault ---

const STORAGE: &str = "https://storage.test/bucket/obj.jpg";

fn vault_backend() -> std::sync::Arc<FakeBackend> {
    let backend = FakeBackend::signed_in();
    backend.on_json(HttpMethod::Get, "/api/transformation", &json!([]));
    backend.on_json(
        HttpMethod::Post,
        "/api/transformation/upload-url",
        &json!({
            "uploadUrl": format!("{STORAGE}?X-Goog-Signature=abc"),
            "objectName": "transformations/7/obj.jpg"
        }),
    );
    backend
}

#[tokio::test]
async fn test_upload_requires_photo_and_pose() {
    let mut harness = signed_in_on("/transformation-vault", vault_backend()).await;

    harness
        .controller
        .handle(UiCommand::UploadTransformation {
            photo: Some(photo()),
            pose: None,
            date: march(21),
        })
        .await;

    assert_eq!(
        harness.controller.vault_state().banner,
        Some(Notification::error(UPLOAD_MISSING_INPUT))
    );
    assert_eq!(
        harness
            .backend
            .count(HttpMethod::Post, "/api/transformation/upload-url"),
        0
    );
}

#[tokio::test]
async fn test_storage_failure_saves_nothing() {
    let backend = vault_backend();
    backend.on(HttpMethod::Put, STORAGE, 500, "");
    let mut harness = signed_in_on("/transformation-vault", backend).await;

    harness
        .controller
        .handle(UiCommand::UploadTransformation {
            photo: Some(photo()),
            pose: Some(Pose::SideChest),
            date: march(21),
        })
        .await;

    let state = harness.controller.vault_state();
    let banner = state.banner.as_ref().unwrap();
    assert!(banner.message.starts_with("Upload failed while uploading to storage"));
    assert_eq!(state.pending, None);
    assert_eq!(harness.backend.count(HttpMethod::Post, "/api/transformation"), 0);
}

#[tokio::test]
async fn test_failed_record_can_be_saved_again_without_reupload() {
    let backend = vault_backend();
    backend.on(HttpMethod::Put, STORAGE, 200, "");
    backend.on(HttpMethod::Post, "/api/transformation", 500, "");
    let mut harness = signed_in_on("/transformation-vault", backend).await;

    harness
        .controller
        .handle(UiCommand::UploadTransformation {
            photo: Some(photo()),
            pose: Some(Pose::SideChest),
            date: march(21),
        })
        .await;
    let pending = harness.controller.vault_state().pending.clone().unwrap();
    assert_eq!(pending.record.image_key, "transformations/7/obj.jpg");

    let backend = harness.backend.clone();
    backend.on(HttpMethod::Post, "/api/transformation", 201, "");
    backend.on_json(
        HttpMethod::Get,
        "/api/transformation",
        &json!([{
            "id": 1,
            "gcsObjectName": "transformations/7/obj.jpg",
            "dateTaken": "2025-03-21",
            "pose": "SIDE_CHEST"
        }]),
    );
    harness.controller.handle(UiCommand::RetryTransformation).await;

    let state = harness.controller.vault_state();
    assert_eq!(state.pending, None);
    assert_eq!(state.banner, Some(Notification::success(UPLOAD_SUCCEEDED)));
    assert_eq!(state.gallery.get(Pose::SideChest).len(), 1);
    assert_eq!(backend.count(HttpMethod::Put, STORAGE), 1);
    assert_eq!(backend.count(HttpMethod::Post, "/api/transformation"), 2);
}

#[tokio::test]
async fn test_signed_urls_are_cached_per_mount() {
    let backend = vault_backend();
    backend.on_json(
        HttpMethod::Get,
        "/api/transformation/image-url",
        &json!({"signedUrl": "https://signed.test/1"}),
    );
    let mut harness = signed_in_on("/transformation-vault", backend).await;

    for _ in 0..2 {
        harness
            .controller
            .handle(UiCommand::ResolveImage {
                object_name: "transformations/7/obj.jpg".to_string(),
            })
            .await;
    }

    let resolved: Vec<String> = harness
        .drain()
        .into_iter()
        .filter_map(|u| match u {
            UiUpdate::ImageUrl { url, .. } => Some(url),
            _ => None,
        })
        .collect();
    assert_eq!(resolved, vec!["https://signed.test/1", "https://signed.test/1"]);
    assert_eq!(
        harness
            .backend
            .count(HttpMethod::Get, "/api/transformation/image-url"),
        1
    );

    harness.controller.handle(go("/transformation-vault")).await;
    assert!(harness.controller.vault_state().urls.is_empty());
}
