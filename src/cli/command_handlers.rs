use crate::api::models::Profile as ProfileRow;
use crate::cli::main_types::{
    AuthCommands, ConfigCommands, ImageCommands, ListingCommands, ProfileCommands,
};
use crate::core::auth::{LoginInput, SignUpInput};
use crate::core::services::auth_service::AuthService;
use crate::core::services::listing_service::{ListingInput, ListingService};
use crate::core::services::profile_service::{ProfileService, ProfileUpdate};
use crate::display::{OperationStatus, TableDisplay, display_status, render_stats};
use crate::error::{AppError, CliError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::AuthMode;
use crate::utils::logging::print_verbose;
use crate::utils::validation::validate_url;
use std::io::{self, Write};
use std::path::PathBuf;

/// Mask a secret for display, keeping the first and last four characters.
/// Works on characters, not bytes, so multibyte keys cannot split a
/// char boundary.
fn mask_secret(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "*****".to_string()
    }
}

#[derive(Default)]
pub struct AuthHandler;

impl AuthHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AuthCommands,
        auth_service: &mut AuthService,
        profile: &Profile,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            AuthCommands::Signup => {
                print_verbose(verbose, "Attempting auth signup command using AuthService");

                let input = SignUpInput::collect()?;
                let response = auth_service
                    .sign_up(input.clone(), profile.signup_redirect_url.as_deref())
                    .await?;

                if response.needs_confirmation() {
                    println!("✅ Account created for {}", input.email);
                    println!("Check your inbox to confirm the address before logging in");
                } else {
                    println!("✅ Account created for {}", input.email);
                    println!("You can now log in with 'inmo-cli auth login'");
                }
                Ok(())
            }
            AuthCommands::Login => {
                print_verbose(verbose, "Attempting auth login command using AuthService");

                let input = LoginInput::collect(profile.email.as_deref())?;

                match auth_service.authenticate(input.clone()).await {
                    Ok(_) => {
                        print_verbose(verbose, "Authentication via AuthService succeeded");
                        println!("✅ Successfully logged in as {}", input.email);
                        println!("Connected to: {}", profile.supabase_url);
                        Ok(())
                    }
                    Err(e) => {
                        display_status(&format!("Login failed: {}", e), OperationStatus::Error);
                        Err(e)
                    }
                }
            }
            AuthCommands::Logout => {
                print_verbose(verbose, "Attempting auth logout command using AuthService");

                match auth_service.logout().await {
                    Ok(_) => {
                        println!(
                            "✅ Successfully logged out from profile: {}",
                            auth_service.get_auth_status().profile_name
                        );
                        Ok(())
                    }
                    Err(e) => {
                        println!("❌ Logout failed: {}", e);
                        Err(e)
                    }
                }
            }
            AuthCommands::Status => {
                print_verbose(verbose, "Attempting auth status command using AuthService");

                let auth_status = auth_service.get_auth_status();

                println!("Authentication Status:");
                println!("=====================");

                match auth_status.auth_mode {
                    AuthMode::ServiceKey => {
                        println!("Authentication Mode: Service Key");
                        if let Ok(key) = std::env::var("INMO_SERVICE_KEY") {
                            println!("Service Key: {}", mask_secret(&key));
                        } else {
                            println!("Service Key: (not set)");
                        }
                    }
                    AuthMode::Session => {
                        println!("Authentication Mode: Session");

                        if auth_status.session_active {
                            println!("Session: ✅ Active session found");
                            print_verbose(verbose, "Session token found in keychain");
                        } else {
                            println!(
                                "Session: ❌ No active session (use 'auth login' to authenticate)"
                            );
                            print_verbose(verbose, "No session token found in keychain");
                        }
                    }
                }

                println!("\nActive Profile: {}", auth_status.profile_name);

                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        profile_name: &str,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &config.profiles {
                        println!("  [{}]", name);
                        println!("    Supabase URL: {}", profile.supabase_url);
                        println!(
                            "    Anon Key: {}",
                            if profile.anon_key.is_empty() {
                                "(not set)"
                            } else {
                                "(set)"
                            }
                        );
                        if let Some(email) = &profile.email {
                            println!("    Email: {}", email);
                        }
                        if let Some(url) = &profile.signup_redirect_url {
                            println!("    Signup Redirect: {}", url);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting config set - key: {}, value: {}", key, value),
                );

                if key == "default_profile" {
                    config.default_profile = Some(value.clone());
                } else {
                    let profile = config.get_profile_mut(profile_name).ok_or_else(|| {
                        CliError::InvalidArguments(format!(
                            "Profile '{}' not found. Please configure a profile first.",
                            profile_name
                        ))
                    })?;

                    match key.as_str() {
                        "url" => {
                            validate_url(&value)?;
                            profile.supabase_url = value.trim_end_matches('/').to_string();
                        }
                        "anon_key" => profile.anon_key = value.clone(),
                        "email" => profile.email = Some(value.clone()),
                        "redirect_url" => {
                            validate_url(&value)?;
                            profile.signup_redirect_url = Some(value.clone());
                        }
                        _ => {
                            return Err(CliError::InvalidArguments(format!(
                                "Unknown configuration key '{}'. Valid keys: url, anon_key, \
                                 email, redirect_url, default_profile",
                                key
                            ))
                            .into());
                        }
                    }
                }

                config.save(config_path)?;
                println!("✅ Updated {} for profile '{}'", key, profile_name);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ProfileHandler;

impl ProfileHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ProfileCommands,
        profile_service: &ProfileService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ProfileCommands::Show => {
                print_verbose(verbose, "Attempting profile show command");

                let user = profile_service.current_user().await?;
                let profile = profile_service
                    .get_profile(&user.id)
                    .await?
                    .unwrap_or(ProfileRow {
                        id: user.id.clone(),
                        ..Default::default()
                    });

                let display = TableDisplay::new();
                println!("{}", display.render_profile(&profile, user.email.as_deref()));
                Ok(())
            }
            ProfileCommands::Update {
                nombre,
                apellido,
                bio,
                country,
                avatar,
            } => {
                print_verbose(verbose, "Attempting profile update command");

                if nombre.is_none()
                    && apellido.is_none()
                    && bio.is_none()
                    && country.is_none()
                    && avatar.is_none()
                {
                    return Err(CliError::InvalidArguments(
                        "Nothing to update; pass at least one field or --avatar".to_string(),
                    )
                    .into());
                }

                let update = ProfileUpdate {
                    nombre,
                    apellido,
                    bio,
                    country,
                };

                let profile = profile_service
                    .update_profile(update, avatar.as_deref())
                    .await?;

                println!("✅ Profile updated");
                let display = TableDisplay::new();
                println!("{}", display.render_profile(&profile, None));
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ListingHandler;

impl ListingHandler {
    pub fn new() -> Self {
        Self
    }

    fn confirm(&self, message: &str) -> Result<bool, AppError> {
        print!("{} (y/N): ", message);
        io::stdout().flush().map_err(|e| {
            CliError::InvalidArguments(format!("Failed to flush stdout: {}", e))
        })?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer).map_err(|e| {
            CliError::InvalidArguments(format!("Failed to read input: {}", e))
        })?;

        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    pub async fn handle(
        &self,
        command: ListingCommands,
        listing_service: &ListingService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ListingCommands::Create {
                titulo,
                descripcion,
                precio,
                operacion,
                inmueble,
                direccion,
                ciudad,
                pais,
            } => {
                print_verbose(verbose, "Attempting listing create command");

                let input = ListingInput {
                    titulo,
                    descripcion,
                    precio,
                    tipo_operacion: operacion,
                    tipo_inmueble: inmueble,
                    direccion,
                    ciudad,
                    country: pais,
                };

                let listing = listing_service.create_listing(input).await?;
                println!("✅ Listing created: {}", listing.id);
                println!(
                    "Next: 'inmo-cli listing images add {} <file>' to upload images",
                    listing.id
                );
                Ok(())
            }
            ListingCommands::List => {
                print_verbose(verbose, "Attempting listing list command");

                let listings = listing_service.my_listings().await?;
                if listings.is_empty() {
                    println!("No listings yet. Create one with 'inmo-cli listing create'");
                    return Ok(());
                }

                let display = TableDisplay::new();
                println!("{}", display.render_listings(&listings));
                println!("{}", render_stats(&ListingService::stats(&listings)));
                Ok(())
            }
            ListingCommands::Publish { id } => {
                print_verbose(verbose, &format!("Attempting listing publish - ID: {}", id));

                let listing = listing_service.publish(&id).await?;
                println!(
                    "✅ '{}' has {} image(s) and is ready to publish",
                    listing.titulo,
                    listing.imagenes.len()
                );
                Ok(())
            }
            ListingCommands::Delete { id, yes } => {
                print_verbose(verbose, &format!("Attempting listing delete - ID: {}", id));

                if !yes
                    && !self.confirm(&format!(
                        "Delete listing {} and all of its images? This cannot be undone",
                        id
                    ))?
                {
                    println!("Cancelled");
                    return Ok(());
                }

                display_status(
                    &format!("Deleting listing {} and its images", id),
                    OperationStatus::InProgress,
                );
                let outcome = listing_service.delete_listing(&id).await?;
                display_status(&format!("Listing {} deleted", id), OperationStatus::Success);
                println!(
                    "Removed {} image record(s); {} storage object(s) deleted",
                    outcome.images_total, outcome.storage_deleted
                );
                if outcome.storage_failed > 0 {
                    display_status(
                        &format!(
                            "{} storage object(s) could not be deleted; see warnings above",
                            outcome.storage_failed
                        ),
                        OperationStatus::Warning,
                    );
                }
                Ok(())
            }
            ListingCommands::Images { command } => {
                self.handle_images(command, listing_service, verbose).await
            }
        }
    }

    async fn handle_images(
        &self,
        command: ImageCommands,
        listing_service: &ListingService,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ImageCommands::Add { listing_id, file } => {
                print_verbose(
                    verbose,
                    &format!("Attempting image add - listing: {}", listing_id),
                );

                let image = listing_service.attach_image(&listing_id, &file).await?;
                println!("✅ Image uploaded as orden {}", image.orden);
                println!("URL: {}", image.url);
                if image.orden == 1 {
                    println!("This image is the cover (Principal)");
                }
                Ok(())
            }
            ImageCommands::List { listing_id } => {
                print_verbose(
                    verbose,
                    &format!("Attempting image list - listing: {}", listing_id),
                );

                let images = listing_service.images(&listing_id).await?;
                if images.is_empty() {
                    println!("Listing {} has no images yet", listing_id);
                    return Ok(());
                }

                let display = TableDisplay::new();
                println!("{}", display.render_images(&images));
                Ok(())
            }
            ImageCommands::Remove { image_id } => {
                print_verbose(
                    verbose,
                    &format!("Attempting image remove - image: {}", image_id),
                );

                listing_service.remove_image(&image_id).await?;
                println!("✅ Image record {} removed", image_id);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct DashboardHandler;

impl DashboardHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        profile_service: &ProfileService,
        listing_service: &ListingService,
        verbose: bool,
    ) -> Result<(), AppError> {
        print_verbose(verbose, "Attempting dashboard command");

        let user = profile_service.current_user().await?;
        let profile = profile_service
            .get_profile(&user.id)
            .await?
            .unwrap_or(ProfileRow {
                id: user.id.clone(),
                ..Default::default()
            });

        let active = listing_service.count_active().await?;

        println!("Dashboard");
        println!("=========");
        let display = TableDisplay::new();
        println!("{}", display.render_profile(&profile, user.email.as_deref()));
        println!("Anuncios activos: {}", active);
        Ok(())
    }
}
