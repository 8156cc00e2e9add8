//! Page controller.
//!
//! Owns the auth store, the mounted page and its view-model. Commands from
//! the front end run one at a time; every navigation the gate, the store or
//! a page issues is mounted before the next command is read.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::{info, warn};
use zenkai_application::{
    ApiClient, ApplicationError, AuthStore, Clock, GateState, GateView, LoadPublicProfile, Login,
    ManageCatalog, ManageProfile, Navigator, Notifier, RedirectGate, Register,
    RequestPasswordReset, TrackProgress, TransformationVault,
};
use zenkai_domain::{
    AuthStatus, ClientConfig, GoogleOAuthConfig, LoginCredentials, Notification, PhotoUpload,
    Pose, ProfileForm, Registration, TimeRange, WorkoutForm,
};
use zenkai_infrastructure::google_authorization_url;

use crate::bridge::{UiCommand, UiUpdate};
use crate::channels::{ChannelNotifier, NavigationQueue};
use crate::router::{HOME_PATH, LOGIN_PATH, Route};
use crate::state::{
    CatalogState, PROFILE_SAVE_FAILED, ProfileState, ProgressState, UPLOAD_MISSING_INPUT,
    VaultState,
};

/// Redirects followed after one command before giving up.
pub const MAX_REDIRECTS: usize = 8;

/// Toast shown on the login page after email verification.
pub const ACCOUNT_VERIFIED: &str = "Your account has been verified";
/// Toast shown after a successful registration.
pub const REGISTRATION_SENT: &str =
    "Registration successful! Please check your email or spam to verify your account.";

/// Runs commands against the backend and publishes page updates.
pub struct Controller {
    store: AuthStore,
    navigation: Arc<NavigationQueue>,
    notifier: Arc<ChannelNotifier>,
    update_tx: mpsc::UnboundedSender<UiUpdate>,
    clock: Arc<dyn Clock>,
    google: Option<GoogleOAuthConfig>,

    login: Login,
    register: Register,
    password_reset: RequestPasswordReset,
    catalog: ManageCatalog,
    progress: TrackProgress,
    profile: ManageProfile,
    public_profile: LoadPublicProfile,
    vault: TransformationVault,

    route: Option<Route>,
    gate: Option<RedirectGate>,
    catalog_state: CatalogState,
    progress_state: ProgressState,
    profile_state: ProfileState,
    vault_state: VaultState,
}

impl Controller {
    /// Creates the controller and runs the initial session check.
    pub async fn start(
        client: Arc<dyn ApiClient>,
        clock: Arc<dyn Clock>,
        config: &ClientConfig,
        update_tx: mpsc::UnboundedSender<UiUpdate>,
    ) -> Self {
        let navigation = Arc::new(NavigationQueue::new());
        let notifier = Arc::new(ChannelNotifier::new(update_tx.clone()));
        let navigator: Arc<dyn Navigator> = navigation.clone();
        let toasts: Arc<dyn Notifier> = notifier.clone();
        let store = AuthStore::init(
            client.clone(),
            navigator,
            toasts,
            config.landing_route.clone(),
        )
        .await;

        Self {
            login: Login::new(client.clone(), store.clone()),
            register: Register::new(client.clone()),
            password_reset: RequestPasswordReset::new(client.clone()),
            catalog: ManageCatalog::new(client.clone()),
            progress: TrackProgress::new(client.clone(), clock.clone()),
            profile: ManageProfile::new(client.clone()),
            public_profile: LoadPublicProfile::new(client.clone()),
            vault: TransformationVault::new(client),
            store,
            navigation,
            notifier,
            update_tx,
            clock,
            google: config.google.clone(),
            route: None,
            gate: None,
            catalog_state: CatalogState::default(),
            progress_state: ProgressState::default(),
            profile_state: ProfileState::default(),
            vault_state: VaultState::default(),
        }
    }

    /// The shared auth store.
    #[must_use]
    pub const fn store(&self) -> &AuthStore {
        &self.store
    }

    /// The mounted route.
    #[must_use]
    pub const fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Gate state of the mounted page; `None` for ungated pages.
    #[must_use]
    pub fn gate_state(&self) -> Option<GateState> {
        self.gate.as_ref().map(RedirectGate::state)
    }

    /// Admin catalog view-model.
    #[must_use]
    pub const fn catalog_state(&self) -> &CatalogState {
        &self.catalog_state
    }

    /// Progress view-model.
    #[must_use]
    pub const fn progress_state(&self) -> &ProgressState {
        &self.progress_state
    }

    /// Profile view-model.
    #[must_use]
    pub const fn profile_state(&self) -> &ProfileState {
        &self.profile_state
    }

    /// Vault view-model.
    #[must_use]
    pub const fn vault_state(&self) -> &VaultState {
        &self.vault_state
    }

    /// Processes commands until the sender is dropped.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<UiCommand>) {
        while let Some(cmd) = cmd_rx.recv().await {
            self.handle(cmd).await;
        }
        info!("command channel closed");
    }

    /// Runs one command, then mounts whatever navigation it caused.
    pub async fn handle(&mut self, cmd: UiCommand) {
        match cmd {
            UiCommand::Navigate { path } => self.navigation.replace(&path),
            UiCommand::CheckAuth => {
                self.store.check_auth().await;
                self.reevaluate();
            }
            UiCommand::Login { email, password } => self.sign_in(email, password).await,
            UiCommand::ForgotPassword { email } => self.forgot_password(&email).await,
            UiCommand::GoogleSignIn => self.google_sign_in(),
            UiCommand::Register(form) => self.sign_up(&form).await,
            UiCommand::Logout => {
                self.store.logout().await;
            }
            UiCommand::WhoAmI => match self.store.prober().identity().await {
                Ok(identity) => self.emit(UiUpdate::Identity(identity)),
                Err(err) => self.toast_error(&err),
            },
            UiCommand::GetStarted => {
                let target = if self.store.status() == AuthStatus::Authenticated {
                    HOME_PATH
                } else {
                    LOGIN_PATH
                };
                self.navigation.replace(target);
            }

            UiCommand::AddMuscleGroup { name } => {
                if self.ready(|r| matches!(r, Route::Admin)) {
                    let result = self.catalog.add_group(&name).await;
                    let applied = result.map(|group| self.catalog_state.apply(group));
                    self.catalog_mutated(applied).await;
                }
            }
            UiCommand::RenameMuscleGroup { old, new } => {
                if self.ready(|r| matches!(r, Route::Admin)) {
                    let result = self.catalog.rename_group(&old, &new).await;
                    let applied = result.map(|renamed| {
                        if let Some(group) = renamed {
                            self.catalog_state.apply_rename(&old, group);
                        }
                    });
                    self.catalog_mutated(applied).await;
                }
            }
            UiCommand::DeleteMuscleGroup { name } => {
                if self.ready(|r| matches!(r, Route::Admin)) {
                    let result = self.catalog.delete_group(&name).await;
                    let applied = result.map(|()| self.catalog_state.apply_delete(&name));
                    self.catalog_mutated(applied).await;
                }
            }
            UiCommand::AddExercise { group, exercise } => {
                if self.ready(|r| matches!(r, Route::Admin)) {
                    let result = self.catalog.add_exercise(&group, &exercise).await;
                    let applied = result.map(|updated| self.catalog_state.apply(updated));
                    self.catalog_mutated(applied).await;
                }
            }
            UiCommand::DeleteExercise { group, exercise } => {
                if self.ready(|r| matches!(r, Route::Admin)) {
                    let result = self.catalog.delete_exercise(&group, &exercise).await;
                    let applied = result.map(|updated| self.catalog_state.apply(updated));
                    self.catalog_mutated(applied).await;
                }
            }

            UiCommand::LogWorkout(form) => self.log_workout(form).await,
            UiCommand::LogWeight { value } => self.log_weight(&value).await,
            UiCommand::DeleteWorkout { id } => self.delete_workout(&id).await,
            UiCommand::SetTimeRange(range) => self.set_time_range(range),

            UiCommand::EditProfile => self.edit_profile(ProfileState::begin_edit),
            UiCommand::UpdateProfileForm { username, bio } => {
                self.edit_profile(|state: &mut ProfileState| state.update_form(username, bio));
            }
            UiCommand::CancelEdit => self.edit_profile(ProfileState::cancel),
            UiCommand::SaveProfile { picture } => self.save_profile(picture).await,

            UiCommand::UploadTransformation { photo, pose, date } => {
                self.upload_transformation(photo, pose, date).await;
            }
            UiCommand::RetryTransformation => self.retry_transformation().await,
            UiCommand::ResolveImage { object_name } => self.resolve_image(object_name).await,
            UiCommand::RefreshGallery => {
                if self.ready(|r| matches!(r, Route::TransformationVault)) {
                    self.refresh_gallery().await;
                }
            }
        }
        self.follow_navigation().await;
    }

    async fn follow_navigation(&mut self) {
        for _ in 0..MAX_REDIRECTS {
            let Some(path) = self.navigation.take() else {
                return;
            };
            self.mount(&path).await;
        }
        if let Some(path) = self.navigation.take() {
            warn!(path = %path, "too many redirects, navigation dropped");
        }
    }

    async fn mount(&mut self, path: &str) {
        let Some(route) = Route::parse(path) else {
            warn!(path, "unknown route");
            self.notifier
                .notify(Notification::error(format!("Page not found: {path}")));
            return;
        };
        info!(route = %route, "mounting page");

        self.catalog_state = CatalogState::default();
        self.progress_state = ProgressState::default();
        self.profile_state = ProfileState::default();
        self.vault_state = VaultState::default();
        self.route = Some(route.clone());
        self.emit(UiUpdate::Navigated { path: route.path() });

        let view = match route.policy() {
            Some(policy) => {
                let navigator: Arc<dyn Navigator> = self.navigation.clone();
                let notifier: Arc<dyn Notifier> = self.notifier.clone();
                let mut gate = RedirectGate::new(policy, navigator, notifier);
                let view = gate.settle(&mut self.store.subscribe()).await;
                let redirected = gate.state() == GateState::Redirected;
                self.gate = Some(gate);
                if redirected {
                    self.emit(UiUpdate::Auth(view));
                    return;
                }
                view
            }
            None => {
                self.gate = None;
                GateView::from(self.store.snapshot())
            }
        };
        self.emit(UiUpdate::Auth(view));
        self.load_page(&route).await;
    }

    async fn load_page(&mut self, route: &Route) {
        match route {
            Route::Landing | Route::Register | Route::Measurements => {}
            Route::Login { verified } => {
                if *verified {
                    self.notifier.notify(Notification::success(ACCOUNT_VERIFIED));
                }
                if self.store.status() == AuthStatus::Authenticated {
                    self.navigation.replace(HOME_PATH);
                }
            }
            Route::Home => match self.profile.load().await {
                Ok(profile) => self.emit(UiUpdate::Home(Box::new(profile))),
                Err(err) => self.fail(&err).await,
            },
            Route::Admin => match self.catalog.load().await {
                Ok(catalog) => {
                    self.catalog_state.load(catalog);
                    self.emit(UiUpdate::Catalog(self.catalog_state.catalog.clone()));
                }
                Err(err) => self.fail(&err).await,
            },
            Route::Progress => {
                let (catalog, logs) =
                    tokio::join!(self.catalog.load_or_default(), self.progress.load());
                self.progress_state.catalog = catalog;
                match logs {
                    Ok(logs) => self.progress_state.load(logs, self.clock.now()),
                    Err(err) => self.fail(&err).await,
                }
                self.emit_progress();
            }
            Route::Profile => {
                match self.profile.load().await {
                    Ok(profile) => self.profile_state.loaded(profile),
                    Err(err) => {
                        self.profile_state.failed(err.to_string());
                        self.report(&err).await;
                    }
                }
                self.emit_profile();
            }
            Route::PublicProfile(username) => match self.public_profile.execute(username).await {
                Ok(profile) => self.emit(UiUpdate::PublicProfile(Box::new(profile))),
                Err(err) => self.toast_error(&err),
            },
            Route::TransformationVault => self.refresh_gallery().await,
        }
    }

    // --- Account ---

    async fn sign_in(&mut self, email: String, password: String) {
        let credentials = LoginCredentials::new(email, password);
        match self.login.execute(&credentials).await {
            Ok(()) => {
                self.notifier.notify(Notification::success("Login successful"));
                self.reevaluate();
                self.navigation.replace(HOME_PATH);
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.toast_error(&err);
                self.reevaluate();
            }
        }
    }

    async fn forgot_password(&mut self, email: &str) {
        match self.password_reset.execute(email).await {
            Ok(()) => self
                .notifier
                .notify(Notification::success("Password reset email sent")),
            Err(err) => self.toast_error(&err),
        }
    }

    fn google_sign_in(&self) {
        let Some(google) = &self.google else {
            self.notifier
                .notify(Notification::error("Google sign-in is not configured"));
            return;
        };
        match google_authorization_url(google) {
            Ok(url) => self.emit(UiUpdate::GoogleUrl(url.to_string())),
            Err(err) => {
                warn!(error = %err, "invalid Google sign-in settings");
                self.notifier
                    .notify(Notification::error("Failed to start Google sign-in"));
            }
        }
    }

    async fn sign_up(&mut self, form: &Registration) {
        match self.register.execute(form).await {
            Ok(_) => self.notifier.notify(Notification::info(REGISTRATION_SENT)),
            Err(err) => self.toast_error(&err),
        }
    }

    // --- Admin catalog ---

    async fn catalog_mutated(&mut self, result: Result<(), ApplicationError>) {
        match result {
            Ok(()) => self.emit(UiUpdate::Catalog(self.catalog_state.catalog.clone())),
            Err(err) => self.fail(&err).await,
        }
    }

    // --- Progress ---

    async fn log_workout(&mut self, form: WorkoutForm) {
        if !self.ready(|r| matches!(r, Route::Progress)) {
            return;
        }
        match self.progress.log_workout(form).await {
            Ok(log) => {
                self.progress_state.push_workout(log);
                self.emit_progress();
            }
            Err(err) => self.fail(&err).await,
        }
    }

    async fn log_weight(&mut self, value: &str) {
        if !self.ready(|r| matches!(r, Route::Progress)) {
            return;
        }
        match self.progress.log_weight(value).await {
            Ok(log) => {
                self.progress_state.push_weight(log, self.clock.now());
                self.emit_progress();
            }
            Err(err) => self.fail(&err).await,
        }
    }

    async fn delete_workout(&mut self, id: &str) {
        if !self.ready(|r| matches!(r, Route::Progress)) {
            return;
        }
        match self.progress.delete_workout(id).await {
            Ok(()) => {
                self.progress_state.remove_workout(id);
                self.emit_progress();
            }
            Err(err) => self.fail(&err).await,
        }
    }

    fn set_time_range(&mut self, range: TimeRange) {
        if self.ready(|r| matches!(r, Route::Progress)) {
            self.progress_state.set_range(range, self.clock.now());
            self.emit_progress();
        }
    }

    // --- Profile ---

    fn edit_profile(&mut self, change: impl FnOnce(&mut ProfileState)) {
        if self.ready(|r| matches!(r, Route::Profile)) {
            change(&mut self.profile_state);
            self.emit_profile();
        }
    }

    async fn save_profile(&mut self, picture: Option<PhotoUpload>) {
        if !self.ready(|r| matches!(r, Route::Profile)) {
            return;
        }
        let Some(current) = self.profile_state.profile.clone() else {
            self.profile_state.failed("Failed to fetch profile");
            self.emit_profile();
            return;
        };
        let form: ProfileForm = self.profile_state.form.clone();

        self.emit(UiUpdate::Busy(true));
        let result = self.profile.save(&current, form, picture).await;
        self.emit(UiUpdate::Busy(false));

        match result {
            Ok(profile) => self.profile_state.saved(profile),
            Err(ApplicationError::Validation(err)) => self.profile_state.failed(err.to_string()),
            Err(err) => {
                warn!(error = %err, "profile save failed");
                self.profile_state.failed(PROFILE_SAVE_FAILED);
                self.report(&err).await;
            }
        }
        self.emit_profile();
    }

    // --- Transformation vault ---

    async fn refresh_gallery(&mut self) {
        match self.vault.list().await {
            Ok(gallery) => self.vault_state.set_gallery(gallery),
            Err(err) => self.fail(&err).await,
        }
        self.emit_vault();
    }

    async fn upload_transformation(
        &mut self,
        photo: Option<PhotoUpload>,
        pose: Option<Pose>,
        date: NaiveDate,
    ) {
        if !self.ready(|r| matches!(r, Route::TransformationVault)) {
            return;
        }
        let (Some(photo), Some(pose)) = (photo, pose) else {
            self.vault_state.upload_rejected(UPLOAD_MISSING_INPUT);
            self.emit_vault();
            return;
        };

        self.emit(UiUpdate::Busy(true));
        let result = self.vault.upload(photo, pose, date).await;
        self.emit(UiUpdate::Busy(false));
        self.upload_finished(result.map(|_| ())).await;
    }

    async fn retry_transformation(&mut self) {
        if !self.ready(|r| matches!(r, Route::TransformationVault)) {
            return;
        }
        let Some(pending) = self.vault_state.pending.clone() else {
            self.notifier
                .notify(Notification::info("No upload is waiting to be saved"));
            return;
        };

        self.emit(UiUpdate::Busy(true));
        let result = self.vault.retry_persist(pending).await;
        self.emit(UiUpdate::Busy(false));
        self.upload_finished(result.map(|_| ())).await;
    }

    async fn upload_finished(&mut self, result: Result<(), ApplicationError>) {
        match result {
            Ok(()) => {
                self.vault_state.upload_succeeded();
                self.refresh_gallery().await;
            }
            Err(ApplicationError::Validation(err)) => {
                self.vault_state.upload_rejected(err.to_string());
                self.emit_vault();
            }
            Err(err) => {
                warn!(error = %err, step = ?err.upload_step(), "upload failed");
                self.vault_state.upload_failed(&err);
                self.emit_vault();
            }
        }
    }

    async fn resolve_image(&mut self, object_name: String) {
        if !self.ready(|r| matches!(r, Route::TransformationVault)) {
            return;
        }
        if let Some(url) = self.vault_state.cached_url(&object_name) {
            let url = url.to_string();
            self.emit(UiUpdate::ImageUrl { object_name, url });
            return;
        }
        match self.vault.image_url(&object_name).await {
            Ok(url) => {
                self.vault_state.remember_url(object_name.clone(), url.clone());
                self.emit(UiUpdate::ImageUrl { object_name, url });
            }
            Err(err) => self.fail(&err).await,
        }
    }

    // --- Helpers ---

    /// True if the mounted page matches and was not redirected away.
    fn ready(&self, page: impl Fn(&Route) -> bool) -> bool {
        let mounted = self.route.as_ref().is_some_and(page)
            && self.gate_state() != Some(GateState::Redirected);
        if !mounted {
            warn!(route = ?self.route, "command ignored, page not mounted");
        }
        mounted
    }

    /// Re-evaluates the mounted page's gate against the current snapshot.
    fn reevaluate(&mut self) {
        let view = match self.gate.as_mut() {
            Some(gate) => gate.evaluate(self.store.snapshot()),
            None => GateView::from(self.store.snapshot()),
        };
        self.emit(UiUpdate::Auth(view));
    }

    /// Shows `err` as a toast and re-checks the session if it was refused.
    async fn fail(&mut self, err: &ApplicationError) {
        self.toast_error(err);
        self.report(err).await;
    }

    async fn report(&mut self, err: &ApplicationError) {
        warn!(error = %err, "request failed");
        if matches!(err, ApplicationError::Unauthorized { .. }) {
            self.store.check_auth().await;
            self.reevaluate();
        }
    }

    fn toast_error(&self, err: &ApplicationError) {
        self.notifier.notify(Notification::error(err.to_string()));
    }

    fn emit_progress(&self) {
        self.emit(UiUpdate::Progress(Box::new(self.progress_state.clone())));
    }

    fn emit_profile(&self) {
        self.emit(UiUpdate::Profile(Box::new(self.profile_state.clone())));
    }

    fn emit_vault(&self) {
        self.emit(UiUpdate::Vault(Box::new(self.vault_state.clone())));
    }

    fn emit(&self, update: UiUpdate) {
        let _ = self.update_tx.send(update);
    }
}
