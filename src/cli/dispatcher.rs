use crate::api::client::SupabaseClient;
use crate::cli::command_handlers::{
    AuthHandler, ConfigHandler, DashboardHandler, ListingHandler, ProfileHandler,
};
use crate::cli::main_types::Commands;
use crate::core::services::auth_service::AuthService;
use crate::core::services::listing_service::ListingService;
use crate::core::services::profile_service::ProfileService;
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{AuthMode, Credentials};
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    credentials: Credentials,
    verbose: bool,
    service_key: Option<String>,
}

impl Dispatcher {
    // Static helper function for verbose logging (used before self exists)
    fn print_verbose(verbose: bool, msg: &str) {
        if verbose {
            println!("Verbose: {}", msg);
        }
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        mut credentials: Credentials,
        verbose: bool,
        service_key: Option<String>,
    ) -> Self {
        // Session auto-restoration logic
        // Skip if a service key is set (the service key has priority)
        if matches!(credentials.get_auth_mode(), AuthMode::Session) {
            Self::print_verbose(verbose, "Checking for saved session token...");

            match Credentials::load(&credentials.profile_name) {
                Ok(loaded_creds) => {
                    credentials = loaded_creds;
                    Self::print_verbose(
                        verbose,
                        &format!(
                            "Session credentials loaded for profile: {}",
                            credentials.profile_name
                        ),
                    );
                }
                Err(_) => {
                    Self::print_verbose(
                        verbose,
                        &format!(
                            "No saved session token found for profile: {}",
                            credentials.profile_name
                        ),
                    );
                }
            }
        } else {
            Self::print_verbose(verbose, "Service key is set, skipping session restoration");
        }

        Self {
            config,
            config_path,
            credentials,
            verbose,
            service_key,
        }
    }

    fn active_profile(&self) -> Result<&Profile, AppError> {
        self.config
            .get_profile(&self.credentials.profile_name)
            .ok_or_else(|| {
                AppError::Cli(CliError::AuthRequired {
                    message: format!(
                        "Profile '{}' not found. Please configure a profile first.",
                        self.credentials.profile_name
                    ),
                    hint: "'inmo-cli config set url <supabase-url>' to get started".to_string(),
                    available_profiles: self.config.profiles.keys().cloned().collect(),
                })
            })
    }

    fn build_client(&self, profile: &Profile) -> Result<SupabaseClient, AppError> {
        if profile.anon_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "anon_key".to_string(),
                field_type: "string".to_string(),
            }
            .into());
        }

        let mut client = if let Some(key) = &self.service_key {
            SupabaseClient::with_service_key(
                profile.supabase_url.clone(),
                profile.anon_key.clone(),
                key.clone(),
            )?
        } else {
            SupabaseClient::new(profile.supabase_url.clone(), profile.anon_key.clone())?
        };

        if self.service_key.is_none() {
            if let Some(token) = self.credentials.get_access_token() {
                client.set_access_token(token);
            }
        }

        Ok(client)
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Auth { command } => {
                let profile = self.active_profile()?.clone();
                let client = self.build_client(&profile)?;
                let mut auth_service = AuthService::new(self.credentials.clone(), client);

                AuthHandler::new()
                    .handle(command, &mut auth_service, &profile, self.verbose)
                    .await
            }
            Commands::Config { command } => ConfigHandler::new().handle(
                command,
                &mut self.config,
                self.config_path.clone(),
                &self.credentials.profile_name.clone(),
                self.verbose,
            ),
            Commands::Profile { command } => {
                let profile = self.active_profile()?.clone();
                let client = self.build_client(&profile)?;
                let profile_service = ProfileService::new(client);

                ProfileHandler::new()
                    .handle(command, &profile_service, self.verbose)
                    .await
            }
            Commands::Listing { command } => {
                let profile = self.active_profile()?.clone();
                let client = self.build_client(&profile)?;
                let listing_service = ListingService::new(client);

                ListingHandler::new()
                    .handle(command, &listing_service, self.verbose)
                    .await
            }
            Commands::Dashboard => {
                let profile = self.active_profile()?.clone();
                let client = self.build_client(&profile)?;
                let profile_service = ProfileService::new(client.clone());
                let listing_service = ListingService::new(client);

                DashboardHandler::new()
                    .handle(&profile_service, &listing_service, self.verbose)
                    .await
            }
        }
    }
}
