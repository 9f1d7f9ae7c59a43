//! Shared configuration and clock helpers for RecipeHub
//!
//! - Configuration management following 12-factor principles
//! - Unix-seconds clock used for token expiry checks

pub mod clock;
pub mod config;

pub use clock::unix_now;
pub use config::Config;
