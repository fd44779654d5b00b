//! Command implementations for asset-inventory CLI

pub mod check;
pub mod collect;
pub mod config;
pub mod render;
