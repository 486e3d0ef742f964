//! # songlib common library
//!
//! Shared code for the songlib service crates:
//! - Song model and list filter
//! - Configuration resolution
//! - Database connection and table bootstrap
//! - Release date formatting

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{Song, SongFilter};
