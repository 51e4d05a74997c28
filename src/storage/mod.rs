//! Storage layer
//!
//! Local persistence only: TOML configuration profiles and OS-keyring
//! session tokens. Listing and profile data live in the remote backend.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
