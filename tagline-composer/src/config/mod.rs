//! User-configurable settings

pub mod settings;

pub use settings::Settings;
