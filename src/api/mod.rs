//! Supabase API client layer
//!
//! One reqwest-backed client shared by the three backend surfaces:
//! GoTrue auth, the PostgREST data API and object storage.

pub mod auth;
pub mod client;
pub mod models;
pub mod rest;
pub mod storage;
