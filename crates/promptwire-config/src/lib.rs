//! # Promptwire Config
//!
//! Preset management: named command templates with their output projection,
//! stored as TOML, with built-in defaults when no file exists. API keys stay
//! out of the preset file via `${VAR}` environment references resolved at
//! use time.

mod error;
mod store;

pub use error::ConfigError;
pub use store::{default_path, expand_path, Preset, PresetStore};
