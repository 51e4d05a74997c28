use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ListingError: {0}")]
    Listing(#[from] ListingError),
    #[error("UtilsError: {0}")]
    Utils(#[from] UtilsError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired {
        message: String,
        hint: String,
        available_profiles: Vec<String>,
    },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login failed: Invalid credentials")]
    InvalidCredentials,
    #[error("Session expired or invalid")]
    SessionInvalid,
    #[error("No authenticated user")]
    NotLoggedIn,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Listing {id} not found")]
    NotFound { id: String },
    #[error("Listing {id} has no images; upload at least one before publishing")]
    NoImages { id: String },
    #[error("Image upload failed for listing {id}: {reason}")]
    ImageUploadFailed { id: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, field_type: String },
}

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Listing(_) => ErrorSeverity::Medium,
            AppError::Utils(_) => ErrorSeverity::Low,
        }
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Auth(AuthError::InvalidCredentials) => "Invalid credentials".to_string(),
            AppError::Auth(AuthError::SessionInvalid) => "Session expired or invalid".to_string(),
            AppError::Auth(AuthError::NotLoggedIn) => "No authenticated user".to_string(),
            AppError::Config(ConfigError::MissingField { field, .. }) => {
                format!("Configuration field '{}' is not set", field)
            }
            AppError::Listing(ListingError::NotFound { id }) => {
                format!("Listing {} not found", id)
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(
                AuthError::InvalidCredentials | AuthError::SessionInvalid | AuthError::NotLoggedIn,
            ) => Some("'inmo-cli auth login' try again".to_string()),
            AppError::Config(ConfigError::MissingField { field, .. }) => Some(format!(
                "'inmo-cli config set {} <value>' to set it",
                field
            )),
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet or Supabase connection and try again".to_string())
            }
            AppError::Listing(ListingError::NotFound { .. }) => {
                Some("'inmo-cli listing list' to see your published listings".to_string())
            }
            AppError::Listing(ListingError::NoImages { .. }) => {
                Some("'inmo-cli listing images add <id> <file>' to upload an image".to_string())
            }
            _ => None,
        }
    }
}
