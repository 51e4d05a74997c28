use clap::Parser;
use inmo_cli::cli::dispatcher::Dispatcher;
use inmo_cli::cli::main_types::Cli;
use inmo_cli::storage::config::Config;
use inmo_cli::storage::credentials::Credentials;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    // Determine the profile to use
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // Create a default profile if it doesn't exist
    if config.get_profile(&profile_name).is_none() {
        if cli.verbose {
            println!("Creating default profile: {}", profile_name);
        }

        use inmo_cli::storage::config::Profile;
        let default_profile = Profile {
            supabase_url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            email: None,
            signup_redirect_url: None,
        };

        config.set_profile(profile_name.clone(), default_profile);

        // Set as default if no default is set
        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        // Save the updated config
        if let Err(err) = config.save(config_path.clone()) {
            if cli.verbose {
                println!("Warning: Failed to save config: {}", err);
            }
        }
    }

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using profile: {}", profile_name);

        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }

        if cli.service_key.as_ref().is_some_and(|key| !key.is_empty()) {
            println!("Using service key provided via env or command line");
        }
    }

    // Load Credentials
    let credentials = match Credentials::load(&profile_name) {
        Ok(creds) => creds,
        Err(err) => {
            eprintln!("Error loading credentials: {}", err);
            Credentials::new(profile_name.clone())
        }
    };

    // Create dispatcher
    let mut dispatcher = Dispatcher::new(
        config,
        config_path,
        credentials,
        cli.verbose,
        cli.service_key.filter(|key| !key.is_empty()),
    );

    // Execute the command
    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", e.severity().emoji(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
