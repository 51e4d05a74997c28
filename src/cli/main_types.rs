use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inmo-cli")]
#[command(about = "Command line tool for managing real-estate listings on a Supabase backend")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    #[arg(long, global = true, env = "INMO_SERVICE_KEY")]
    pub service_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Profile management
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Listing management
    Listing {
        #[command(subcommand)]
        command: ListingCommands,
    },
    /// Account overview: profile plus listing stats
    Dashboard,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Register a new account
    Signup,
    /// Login and store the session
    Login,
    /// Logout and clear the session
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key (url, anon_key, email, redirect_url, default_profile)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the profile of the authenticated user
    Show,
    /// Update profile fields and optionally upload a new avatar
    Update {
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        apellido: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Avatar image file (max 2MB)
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListingCommands {
    /// Create a listing; attach images afterwards with `listing images add`
    Create {
        #[arg(long)]
        titulo: String,
        #[arg(long)]
        descripcion: String,
        #[arg(long)]
        precio: f64,
        /// venta, alquiler or alquiler_temporal
        #[arg(long)]
        operacion: String,
        /// departamento, casa, ph, oficina, local, terreno or cochera
        #[arg(long)]
        inmueble: String,
        #[arg(long)]
        direccion: String,
        #[arg(long)]
        ciudad: String,
        #[arg(long)]
        pais: String,
    },
    /// List your listings with stats
    List,
    /// Check that a listing has at least one image and mark it ready
    Publish {
        /// Listing ID
        id: String,
    },
    /// Delete a listing, its image records and its stored files
    Delete {
        /// Listing ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Image management for a listing
    Images {
        #[command(subcommand)]
        command: ImageCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Upload an image and append it to the listing's sequence
    Add {
        /// Listing ID
        listing_id: String,
        /// Image file to upload
        file: PathBuf,
    },
    /// List a listing's images in display order
    List {
        /// Listing ID
        listing_id: String,
    },
    /// Remove a single image record
    Remove {
        /// Image ID
        image_id: String,
    },
}
