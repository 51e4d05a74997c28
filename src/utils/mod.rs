//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// File system operations, content types and storage path handling
pub mod file;

/// Input validation and sanitization utilities
pub mod validation;

/// Verbose logging helpers
pub mod logging;

/// Text width and truncation helpers for table output
pub mod text;
