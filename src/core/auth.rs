use crate::error::{AppError, CliError};
use crate::utils::validation::validate_signup_password;
use rpassword::read_password;
use std::io::{self, Write};

fn prompt_line(label: &str) -> Result<String, AppError> {
    print!("{}: ", label);
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to flush stdout: {}",
            e
        )))
    })?;

    let mut value = String::new();
    io::stdin().read_line(&mut value).map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read input: {}",
            e
        )))
    })?;
    Ok(value.trim().to_string())
}

fn prompt_password(label: &str) -> Result<String, AppError> {
    print!("{}: ", label);
    io::stdout().flush().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to flush stdout: {}",
            e
        )))
    })?;

    let password = read_password().map_err(|e| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Failed to read password: {}",
            e
        )))
    })?;
    Ok(password.trim().to_string())
}

/// User login credentials input handler
#[derive(Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Collect login credentials from interactive input
    /// If profile_email is provided, only password will be prompted
    pub fn collect(profile_email: Option<&str>) -> Result<Self, AppError> {
        let email = if let Some(email) = profile_email {
            println!("Using email from profile: {}", email);
            email.to_string()
        } else {
            prompt_line("Email")?
        };

        let password = prompt_password("Password")?;

        Ok(Self { email, password })
    }

    /// Validate that credentials are not empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Email cannot be empty".to_string(),
            )));
        }
        if self.password.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Password cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Registration form input: credentials plus the profile metadata the
/// original sign-up form collects
#[derive(Clone)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub confirmation: String,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub country: Option<String>,
}

impl SignUpInput {
    pub fn collect() -> Result<Self, AppError> {
        let email = prompt_line("Email")?;
        let nombre = prompt_line("Nombre (optional)")?;
        let apellido = prompt_line("Apellido (optional)")?;
        let country = prompt_line("Country (optional)")?;
        let password = prompt_password("Password")?;
        let confirmation = prompt_password("Confirm password")?;

        let optional = |s: String| if s.is_empty() { None } else { Some(s) };

        Ok(Self {
            email,
            password,
            confirmation,
            nombre: optional(nombre),
            apellido: optional(apellido),
            country: optional(country),
        })
    }

    /// Local validation, run before any network call
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Email cannot be empty".to_string(),
            )));
        }
        validate_signup_password(&self.password, &self.confirmation)
    }
}
