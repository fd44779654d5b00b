//! Configuration management for asset-inventory

pub mod settings;

pub use settings::Settings;
