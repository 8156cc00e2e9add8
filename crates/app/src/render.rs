//! Plain-text rendering of page updates.

use std::fmt::Write;

use zenkai_domain::Catalog;
use zenkai_ui::{ProfileState, ProgressState, UiUpdate, VaultState};

/// Renders an update as output lines; `None` for updates with nothing to show.
#[must_use]
pub fn render(update: &UiUpdate) -> Option<String> {
    let text = match update {
        UiUpdate::Auth(view) => match view.is_authenticated {
            None => "session: checking".to_string(),
            Some(true) => "session: signed in".to_string(),
            Some(false) => "session: signed out".to_string(),
        },
        UiUpdate::Navigated { path } => format!("page: {path}"),
        UiUpdate::Notify(notification) => notification.to_string(),
        UiUpdate::Busy(_) => return None,
        UiUpdate::Catalog(catalog) => catalog_lines(catalog),
        UiUpdate::Progress(state) => progress_lines(state),
        UiUpdate::Profile(state) => profile_lines(state)?,
        UiUpdate::Home(profile) => format!(
            "Welcome back, {}! Power level {} with {} workouts completed.",
            profile.username,
            profile.display_level(),
            profile.completed_workouts
        ),
        UiUpdate::PublicProfile(profile) => {
            let level = profile.power_level.max(1);
            let mut out = format!("{} (power level {level})", profile.username);
            if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
                let _ = write!(out, "\n  {bio}");
            }
            out
        }
        UiUpdate::Vault(state) => vault_lines(state),
        UiUpdate::ImageUrl { object_name, url } => format!("{object_name}: {url}"),
        UiUpdate::Identity(identity) => {
            format!("{} [{}]", identity.email, identity.roles.join(", "))
        }
        UiUpdate::GoogleUrl(url) => url.clone(),
    };
    Some(text)
}

fn catalog_lines(catalog: &Catalog) -> String {
    let mut out = format!("{} muscle groups", catalog.len());
    for group in catalog.group_names() {
        let exercises = catalog.exercises(group).unwrap_or_default().join(", ");
        let _ = write!(out, "\n  {group}: {exercises}");
    }
    out
}

fn progress_lines(state: &ProgressState) -> String {
    let mut out = format!("{} workouts logged", state.workouts.len());
    for log in &state.workouts {
        let _ = write!(
            out,
            "\n  [{}] {} {} - {}x{} @ {} kg",
            log.id,
            log.date.format("%Y-%m-%d"),
            log.exercise,
            log.sets,
            log.reps,
            log.weight
        );
    }
    let _ = write!(out, "\nweight ({:?}):", state.range);
    for (label, value) in state.series.labels.iter().zip(&state.series.values) {
        let _ = write!(out, " {label}={value}");
    }
    if let Some(change) = state.series.change() {
        let _ = write!(out, " (change {change:+.1} kg)");
    }
    out
}

fn profile_lines(state: &ProfileState) -> Option<String> {
    let mut out = String::new();
    if let Some(profile) = &state.profile {
        let _ = write!(
            out,
            "{} (power level {})\n  bio: {}",
            profile.username,
            profile.display_level(),
            profile.bio.as_deref().unwrap_or("")
        );
        if let Some(url) = &profile.profile_picture_url {
            let _ = write!(out, "\n  picture: {url}");
        }
    }
    if let Some(banner) = &state.banner {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&banner.to_string());
    }
    (!out.is_empty()).then_some(out)
}

fn vault_lines(state: &VaultState) -> String {
    let mut out = format!("{} progress photos", state.gallery.total());
    for (pose, photos) in state.gallery.iter() {
        let _ = write!(out, "\n  {pose}:");
        for photo in photos {
            let _ = write!(out, " {} ({})", photo.gcs_object_name, photo.date_taken);
        }
    }
    if let Some(banner) = &state.banner {
        let _ = write!(out, "\n{banner}");
    }
    if let Some(pending) = &state.pending {
        let _ = write!(out, "\n  not yet saved: {}", pending.record.image_key);
    }
    out
}
