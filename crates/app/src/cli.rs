//! Command-line arguments and the page commands each subcommand runs.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use zenkai_domain::{ClientConfig, Pose, Registration, TimeRange, WorkoutForm};
use zenkai_infrastructure::{
    PhotoFileError, SerializationError, SettingsError, SettingsRepository, load_photo,
    to_pretty_json,
};
use zenkai_ui::UiCommand;

/// Zenkai Gains client.
#[derive(Debug, Parser)]
#[command(name = "zenkai", version, about = "Zenkai Gains fitness client", long_about = None)]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Account email. With --password, signs in before the command runs.
    #[arg(long, global = true, env = "ZENKAI_EMAIL")]
    pub email: Option<String>,

    /// Account password.
    #[arg(long, global = true, env = "ZENKAI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show whether the session is signed in.
    Status,
    /// Sign in with --email and --password.
    Login,
    /// Sign out.
    Logout,
    /// Create an account with --email and --password.
    Register(RegisterArgs),
    /// Send a password reset link to --email.
    ForgotPassword,
    /// Print the Google sign-in URL.
    GoogleUrl,
    /// Administer muscle groups and exercises.
    #[command(subcommand)]
    Catalog(CatalogCommand),
    /// Workout and body-weight logs.
    #[command(subcommand)]
    Progress(ProgressCommand),
    /// Your profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Someone's public profile.
    PublicProfile {
        /// Public handle.
        username: String,
    },
    /// Progress photos.
    #[command(subcommand)]
    Vault(VaultCommand),
    /// Client settings; runs without contacting the backend.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Registration details besides email and password.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Given name.
    #[arg(long)]
    pub first_name: String,
    /// Family name.
    #[arg(long)]
    pub last_name: String,
    /// Password confirmation; defaults to --password.
    #[arg(long)]
    pub confirm_password: Option<String>,
    /// Accept the terms of service and privacy policy.
    #[arg(long)]
    pub agree_terms: bool,
}

/// Catalog subcommands.
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List groups and exercises.
    List,
    /// Create a muscle group.
    AddGroup {
        /// Group name.
        name: String,
    },
    /// Rename a muscle group.
    RenameGroup {
        /// Current name.
        old: String,
        /// New name.
        new: String,
    },
    /// Delete a muscle group.
    DeleteGroup {
        /// Group name.
        name: String,
    },
    /// Add an exercise to a group.
    AddExercise {
        /// Group name.
        group: String,
        /// Exercise name.
        exercise: String,
    },
    /// Remove an exercise from a group.
    DeleteExercise {
        /// Group name.
        group: String,
        /// Exercise name.
        exercise: String,
    },
}

/// Progress subcommands.
#[derive(Debug, Subcommand)]
pub enum ProgressCommand {
    /// Show logs and the weight chart.
    Show {
        /// Chart window: week, month or year.
        #[arg(long, default_value = "week")]
        range: TimeRange,
    },
    /// Log a workout.
    LogWorkout {
        /// Muscle group.
        #[arg(long)]
        group: String,
        /// Exercise.
        #[arg(long)]
        exercise: String,
        /// Sets.
        #[arg(long)]
        sets: String,
        /// Reps per set.
        #[arg(long)]
        reps: String,
        /// Weight in kilograms.
        #[arg(long)]
        weight: String,
        /// Notes.
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Log a body-weight entry in kilograms.
    LogWeight {
        /// Body weight.
        value: String,
    },
    /// Delete a logged workout.
    DeleteWorkout {
        /// Log id.
        id: String,
    },
}

/// Profile subcommands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show your profile.
    Show,
    /// Change profile fields.
    Update {
        /// New username.
        #[arg(long)]
        username: Option<String>,
        /// New biography.
        #[arg(long)]
        bio: Option<String>,
        /// New profile picture.
        #[arg(long)]
        picture: Option<PathBuf>,
    },
}

/// Vault subcommands.
#[derive(Debug, Subcommand)]
pub enum VaultCommand {
    /// List photos by pose.
    List,
    /// Upload a progress photo.
    Upload {
        /// Image file.
        path: PathBuf,
        /// Pose, e.g. front-lat-spread.
        #[arg(long)]
        pose: Pose,
        /// Day the photo was taken (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print a signed URL for a stored image.
    ImageUrl {
        /// Storage object name.
        object_name: String,
    },
}

/// Settings subcommands.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings (file, environment and flags merged).
    Show,
    /// Write the effective settings to the settings file.
    Save,
}

/// Errors raised while turning arguments into page commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The command needs a flag that was not given.
    #[error("{command} requires {flag}")]
    MissingFlag {
        /// Subcommand name.
        command: &'static str,
        /// Missing flag.
        flag: &'static str,
    },
    /// A photo could not be read.
    #[error(transparent)]
    Photo(#[from] PhotoFileError),
    /// The settings file could not be written.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The settings could not be encoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

fn go(path: impl Into<String>) -> UiCommand {
    UiCommand::Navigate { path: path.into() }
}

impl Cli {
    /// Applies flag overrides on top of file and environment settings.
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(api_url) = &self.api_url {
            config.api_url.clone_from(api_url);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }
    }

    /// Whether the command signs in first when credentials are given.
    #[must_use]
    pub const fn signs_in_first(&self) -> bool {
        !matches!(
            self.command,
            Command::Register(_)
                | Command::Config(_)
                | Command::ForgotPassword
                | Command::GoogleUrl
                | Command::PublicProfile { .. }
        )
    }

    /// Page commands for this invocation, sign-in first when applicable.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing flag or an unreadable photo.
    pub async fn script(&self) -> Result<Vec<UiCommand>, CliError> {
        let mut script = Vec::new();
        let credentials = self.email.as_ref().zip(self.password.as_ref());
        if matches!(self.command, Command::Login) && credentials.is_none() {
            return Err(CliError::MissingFlag {
                command: "login",
                flag: "--email and --password",
            });
        }
        if self.signs_in_first()
            && let Some((email, password)) = credentials
        {
            script.push(go("/login"));
            script.push(UiCommand::Login {
                email: email.clone(),
                password: password.clone(),
            });
        }
        script.extend(self.command_script().await?);
        Ok(script)
    }

    async fn command_script(&self) -> Result<Vec<UiCommand>, CliError> {
        let script = match &self.command {
            Command::Status => vec![go("/"), UiCommand::WhoAmI],
            Command::Login => vec![],
            Command::Logout => vec![UiCommand::Logout],
            Command::Register(args) => {
                vec![go("/register"), UiCommand::Register(self.registration(args)?)]
            }
            Command::ForgotPassword => {
                let email = self.email.clone().ok_or(CliError::MissingFlag {
                    command: "forgot-password",
                    flag: "--email",
                })?;
                vec![go("/login"), UiCommand::ForgotPassword { email }]
            }
            Command::GoogleUrl => vec![UiCommand::GoogleSignIn],
            Command::Catalog(command) => catalog_script(command),
            Command::Progress(command) => progress_script(command),
            Command::Profile(command) => profile_script(command).await?,
            Command::PublicProfile { username } => vec![go(format!("/public/profile/{username}"))],
            Command::Vault(command) => vault_script(command).await?,
            Command::Config(_) => vec![],
        };
        Ok(script)
    }

    fn registration(&self, args: &RegisterArgs) -> Result<Registration, CliError> {
        let missing = |flag| CliError::MissingFlag {
            command: "register",
            flag,
        };
        let email = self.email.clone().ok_or_else(|| missing("--email"))?;
        let password = self.password.clone().ok_or_else(|| missing("--password"))?;
        Ok(Registration {
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            email,
            confirm_password: args
                .confirm_password
                .clone()
                .unwrap_or_else(|| password.clone()),
            password,
            agree_terms: args.agree_terms,
        })
    }
}

/// Runs a settings subcommand and returns the text to print.
///
/// # Errors
///
/// Returns an error if the settings are unusable or cannot be written.
pub async fn run_config(
    command: ConfigCommand,
    repo: &SettingsRepository,
    config: &ClientConfig,
) -> Result<String, CliError> {
    match command {
        ConfigCommand::Show => Ok(to_pretty_json(config)?.trim_end().to_string()),
        ConfigCommand::Save => {
            repo.save(config).await?;
            let path = repo
                .settings_path()
                .map_or_else(String::new, |p| p.display().to_string());
            Ok(format!("saved settings to {path}"))
        }
    }
}

fn catalog_script(command: &CatalogCommand) -> Vec<UiCommand> {
    let action = match command {
        CatalogCommand::List => None,
        CatalogCommand::AddGroup { name } => Some(UiCommand::AddMuscleGroup { name: name.clone() }),
        CatalogCommand::RenameGroup { old, new } => Some(UiCommand::RenameMuscleGroup {
            old: old.clone(),
            new: new.clone(),
        }),
        CatalogCommand::DeleteGroup { name } => {
            Some(UiCommand::DeleteMuscleGroup { name: name.clone() })
        }
        CatalogCommand::AddExercise { group, exercise } => Some(UiCommand::AddExercise {
            group: group.clone(),
            exercise: exercise.clone(),
        }),
        CatalogCommand::DeleteExercise { group, exercise } => Some(UiCommand::DeleteExercise {
            group: group.clone(),
            exercise: exercise.clone(),
        }),
    };
    std::iter::once(go("/admin")).chain(action).collect()
}

fn progress_script(command: &ProgressCommand) -> Vec<UiCommand> {
    let action = match command {
        ProgressCommand::Show { range } => UiCommand::SetTimeRange(*range),
        ProgressCommand::LogWorkout {
            group,
            exercise,
            sets,
            reps,
            weight,
            notes,
        } => UiCommand::LogWorkout(WorkoutForm {
            muscle_group: group.clone(),
            exercise: exercise.clone(),
            sets: sets.clone(),
            reps: reps.clone(),
            weight: weight.clone(),
            notes: notes.clone(),
        }),
        ProgressCommand::LogWeight { value } => UiCommand::LogWeight {
            value: value.clone(),
        },
        ProgressCommand::DeleteWorkout { id } => UiCommand::DeleteWorkout { id: id.clone() },
    };
    vec![go("/progress"), action]
}

async fn profile_script(command: &ProfileCommand) -> Result<Vec<UiCommand>, CliError> {
    let mut script = vec![go("/profile")];
    if let ProfileCommand::Update {
        username,
        bio,
        picture,
    } = command
    {
        let picture = match picture {
            Some(path) => Some(load_photo(path).await?),
            None => None,
        };
        script.push(UiCommand::EditProfile);
        script.push(UiCommand::UpdateProfileForm {
            username: username.clone(),
            bio: bio.clone(),
        });
        script.push(UiCommand::SaveProfile { picture });
    }
    Ok(script)
}

async fn vault_script(command: &VaultCommand) -> Result<Vec<UiCommand>, CliError> {
    let mut script = vec![go("/transformation-vault")];
    match command {
        VaultCommand::List => {}
        VaultCommand::Upload { path, pose, date } => {
            let photo = load_photo(path).await?;
            script.push(UiCommand::UploadTransformation {
                photo: Some(photo),
                pose: Some(*pose),
                date: date.unwrap_or_else(|| Utc::now().date_naive()),
            });
        }
        VaultCommand::ImageUrl { object_name } => script.push(UiCommand::ResolveImage {
            object_name: object_name.clone(),
        }),
    }
    Ok(script)
}
