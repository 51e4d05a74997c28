//! Core business logic: interactive input collection and the service
//! layer that orchestrates calls against the Supabase backend.

pub mod auth;
pub mod services;
