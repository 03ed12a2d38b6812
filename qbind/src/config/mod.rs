//! Connection configuration

pub mod defaults;
mod settings;

pub use settings::{ConnectionConfig, Dialect};
